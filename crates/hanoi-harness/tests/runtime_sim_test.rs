//! The production runtime on a virtual clock.
//!
//! Host messages arrive as JSON text over in-memory channels and the clock
//! jumps to the next deadline whenever the host is idle, so a full 60 s
//! session runs instantly.

use hanoi_app::{
    HostMessage, MoveFeedback, OutcomeReport, Runtime, Screen, SessionConfig, SessionPhase,
};
use hanoi_core::TowerId;
use hanoi_harness::{RecordingRenderer, SimEnv, channel_bridge, optimal_solution};

/// Centre of the renderer column for `tower`.
fn column(tower: TowerId) -> f64 {
    tower.index() as f64 * 100.0 + 50.0
}

fn click(tower: TowerId) -> HostMessage {
    HostMessage::Click { x: column(tower), y: 10.0 }
}

#[tokio::test]
async fn solved_session_reports_success() {
    let (bridge, mut host) = channel_bridge();
    let renderer = RecordingRenderer::new();
    let view = renderer.clone();
    let mut runtime = Runtime::new(bridge, renderer, SimEnv::new(), SessionConfig::default());

    host.send(&HostMessage::StartHack).expect("send");
    for (from, to) in optimal_solution() {
        host.send(&click(from)).expect("send");
        host.send(&click(to)).expect("send");
    }

    let task = tokio::spawn(async move {
        let result = runtime.run().await;
        (runtime, result)
    });

    let report = host.next_report().await;
    assert_eq!(report, Some(OutcomeReport { success: true, moves: 15, time: 0 }));

    drop(host);
    let (runtime, result) = task.await.expect("runtime task");
    assert!(result.is_ok());
    assert_eq!(runtime.session().phase(), SessionPhase::Standby);

    let screens: Vec<Screen> = view.log().snapshots.iter().map(|s| s.screen).collect();
    assert!(screens.contains(&Screen::Success));
    assert_eq!(screens.last(), Some(&Screen::Standby));
}

#[tokio::test]
async fn idle_session_times_out() {
    let (bridge, mut host) = channel_bridge();
    let renderer = RecordingRenderer::new();
    let view = renderer.clone();
    let mut runtime = Runtime::new(bridge, renderer, SimEnv::new(), SessionConfig::default());

    host.send(&HostMessage::StartHack).expect("send");
    let task = tokio::spawn(async move {
        let result = runtime.run().await;
        (runtime, result)
    });

    let report = host.next_report().await;
    assert_eq!(report, Some(OutcomeReport { success: false, moves: 0, time: 60 }));

    drop(host);
    let (_, result) = task.await.expect("runtime task");
    assert!(result.is_ok());

    let remaining: Vec<u32> = view.log().snapshots.iter().map(|s| s.time_remaining).collect();
    assert!(remaining.windows(2).all(|pair| pair[1] <= pair[0]));
    assert!(remaining.contains(&1));
}

#[tokio::test]
async fn malformed_messages_are_skipped() {
    let (bridge, host) = channel_bridge();
    let mut runtime =
        Runtime::new(bridge, RecordingRenderer::new(), SimEnv::new(), SessionConfig::default());

    host.send_raw("not json").expect("send");
    host.send_raw(r#"{"type":"selfDestruct"}"#).expect("send");
    host.send_raw(r#"{"x":1}"#).expect("send");
    host.send(&HostMessage::StartHack).expect("send");
    host.send(&HostMessage::DebugState).expect("send");
    drop(host);

    runtime.run().await.expect("runtime");

    assert_eq!(runtime.host().malformed(), 3);
    assert_eq!(runtime.session().phase(), SessionPhase::Active);
}

#[tokio::test]
async fn stop_aborts_without_report() {
    let (bridge, mut host) = channel_bridge();
    let mut runtime =
        Runtime::new(bridge, RecordingRenderer::new(), SimEnv::new(), SessionConfig::default());

    host.send(&HostMessage::StartHack).expect("send");
    host.send(&click(TowerId::SOURCE)).expect("send");
    host.send(&HostMessage::StopHack).expect("send");
    host.close();

    runtime.run().await.expect("runtime");

    assert_eq!(runtime.session().phase(), SessionPhase::Standby);
    assert_eq!(runtime.pending_timers(), 0);
    assert_eq!(runtime.session().outcome(), None);
    assert_eq!(host.try_report(), None);
}

#[tokio::test]
async fn keys_cursor_and_misses_reach_the_right_place() {
    let (bridge, host) = channel_bridge();
    let renderer = RecordingRenderer::new();
    let view = renderer.clone();
    let mut runtime = Runtime::new(bridge, renderer, SimEnv::new(), SessionConfig::default());

    host.send(&HostMessage::StartHack).expect("send");
    host.send(&HostMessage::MouseMove { x: 12.0, y: 34.0 }).expect("send");
    host.send(&HostMessage::Click { x: 900.0, y: 0.0 }).expect("send");
    host.send(&HostMessage::KeyDown { key: "1".into() }).expect("send");
    host.send(&HostMessage::KeyDown { key: "2".into() }).expect("send");
    drop(host);

    runtime.run().await.expect("runtime");

    let log = view.log();
    assert_eq!(log.cursor, Some((12.0, 34.0)));
    assert_eq!(log.feedback, vec![MoveFeedback::ValidMove(TowerId::AUXILIARY)]);
    assert_eq!(runtime.session().engine().move_count(), 1);
}

#[tokio::test]
async fn render_failures_do_not_stop_the_session() {
    let (bridge, host) = channel_bridge();
    let mut runtime =
        Runtime::new(bridge, RecordingRenderer::failing(), SimEnv::new(), SessionConfig::default());

    host.send(&HostMessage::StartHack).expect("send");
    host.send(&click(TowerId::SOURCE)).expect("send");
    host.send(&click(TowerId::TARGET)).expect("send");
    drop(host);

    runtime.run().await.expect("runtime");

    assert_eq!(runtime.session().engine().puzzle().sizes(), [vec![4, 3, 2], vec![], vec![1]]);
}

#[tokio::test]
async fn report_failures_do_not_stop_the_session() {
    let (bridge, mut host) = channel_bridge();
    let renderer = RecordingRenderer::new();
    let view = renderer.clone();
    let mut runtime = Runtime::new(bridge, renderer, SimEnv::new(), SessionConfig::default());

    host.close_reports();
    host.send(&HostMessage::StartHack).expect("send");
    let task = tokio::spawn(async move {
        let result = runtime.run().await;
        (runtime, result)
    });

    let back_in_standby = |screens: &[Screen]| {
        screens.contains(&Screen::Failure) && screens.last() == Some(&Screen::Standby)
    };
    for _ in 0..10_000 {
        let screens: Vec<Screen> = view.log().snapshots.iter().map(|s| s.screen).collect();
        if back_in_standby(&screens) {
            break;
        }
        tokio::task::yield_now().await;
    }
    let screens: Vec<Screen> = view.log().snapshots.iter().map(|s| s.screen).collect();
    assert!(back_in_standby(&screens), "session never returned to standby: {screens:?}");

    host.send(&HostMessage::StartHack).expect("send");
    host.close();

    let (runtime, result) = task.await.expect("runtime task");
    assert!(result.is_ok());
    assert_eq!(runtime.session().phase(), SessionPhase::Active);
    assert_eq!(host.try_report(), None);
}
