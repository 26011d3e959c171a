//! Wire and view-model formats seen by the host and the renderer.

use hanoi_app::{HostMessage, MoveFeedback, OutcomeReport, Session, SessionConfig};
use hanoi_core::TowerId;
use proptest::prelude::*;

#[test]
fn fresh_snapshot() {
    let session = Session::new(SessionConfig::default());

    insta::assert_json_snapshot!(session.snapshot(), @r###"
    {
      "towers": [
        [
          4,
          3,
          2,
          1
        ],
        [],
        []
      ],
      "selection": null,
      "phase": "standby",
      "screen": "standby",
      "moveCount": 0,
      "timeRemaining": 60,
      "progress": 0,
      "epoch": 0
    }
    "###);
}

#[test]
fn selection_serializes_as_plain_numbers() {
    let mut session = Session::new(SessionConfig::default());
    session.start();
    session.key(hanoi_app::KeyInput::Char('1'));

    let json = serde_json::to_value(session.snapshot()).expect("serialize");

    assert_eq!(json["selection"], serde_json::json!({ "disc": 1, "tower": 0 }));
    assert_eq!(json["phase"], "active");
    assert_eq!(json["screen"], "hack");
}

#[test]
fn feedback_names_the_tower() {
    let json = serde_json::to_value(MoveFeedback::InvalidMove(TowerId::TARGET)).expect("serialize");
    assert_eq!(json, serde_json::json!({ "type": "invalidMove", "tower": 2 }));
}

#[test]
fn report_round_trips_through_host_json() {
    let report: OutcomeReport =
        serde_json::from_str(r#"{"success":false,"moves":7,"time":60}"#).expect("parse");
    assert_eq!(report, OutcomeReport { success: false, moves: 7, time: 60 });
}

proptest! {
    /// Arbitrary text never panics the parser.
    #[test]
    fn prop_parser_total(text in ".{0,64}") {
        let _ = HostMessage::from_json(&text);
    }

    /// Quarter-pixel click coordinates survive encoding.
    #[test]
    fn prop_click_coordinates_preserved(qx in -40_000i32..40_000, qy in -40_000i32..40_000) {
        let (x, y) = (f64::from(qx) / 4.0, f64::from(qy) / 4.0);
        let json = serde_json::to_string(&HostMessage::Click { x, y }).expect("serialize");
        prop_assert_eq!(HostMessage::from_json(&json).ok(), Some(HostMessage::Click { x, y }));
    }
}
