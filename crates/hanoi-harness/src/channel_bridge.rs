//! In-memory host bridge.
//!
//! The host side pushes raw JSON text, exactly what a real host would send,
//! so malformed-input handling runs through the same path as production.

use hanoi_app::{BridgeError, HostBridge, HostMessage, OutcomeReport};
use tokio::sync::mpsc;

/// Session side of an in-memory host channel.
pub struct ChannelBridge {
    inbound: mpsc::UnboundedReceiver<String>,
    reports: mpsc::UnboundedSender<OutcomeReport>,
    malformed: usize,
}

/// Host side of an in-memory host channel.
pub struct ChannelHost {
    outbound: Option<mpsc::UnboundedSender<String>>,
    reports: mpsc::UnboundedReceiver<OutcomeReport>,
}

/// Create a connected bridge and host pair.
pub fn channel_bridge() -> (ChannelBridge, ChannelHost) {
    let (outbound, inbound) = mpsc::unbounded_channel();
    let (report_tx, report_rx) = mpsc::unbounded_channel();
    (
        ChannelBridge { inbound, reports: report_tx, malformed: 0 },
        ChannelHost { outbound: Some(outbound), reports: report_rx },
    )
}

impl ChannelBridge {
    /// Number of inbound messages skipped as malformed.
    pub fn malformed(&self) -> usize {
        self.malformed
    }
}

impl HostBridge for ChannelBridge {
    type Error = BridgeError;

    async fn next_message(&mut self) -> Option<HostMessage> {
        loop {
            let text = self.inbound.recv().await?;
            match HostMessage::from_json(&text) {
                Ok(message) => return Some(message),
                Err(e) => {
                    self.malformed += 1;
                    tracing::warn!(error = %e, "ignoring malformed host message");
                },
            }
        }
    }

    fn report_outcome(&mut self, report: OutcomeReport) -> Result<(), Self::Error> {
        self.reports.send(report).map_err(|_| BridgeError::Closed)
    }
}

impl ChannelHost {
    /// Send raw JSON text.
    ///
    /// # Errors
    ///
    /// - `BridgeError::Closed` if the session side is gone
    pub fn send_raw(&self, text: impl Into<String>) -> Result<(), BridgeError> {
        let outbound = self.outbound.as_ref().ok_or(BridgeError::Closed)?;
        outbound.send(text.into()).map_err(|_| BridgeError::Closed)
    }

    /// Stop sending. The session side sees the host as gone once it has
    /// drained what was already sent; reports can still be received.
    pub fn close(&mut self) {
        self.outbound = None;
    }

    /// Stop receiving reports. The session side then fails every
    /// `report_outcome` with `BridgeError::Closed`.
    pub fn close_reports(&mut self) {
        self.reports.close();
    }

    /// Encode and send a message.
    ///
    /// # Errors
    ///
    /// - `BridgeError::Malformed` if encoding fails
    /// - `BridgeError::Closed` if the session side is gone
    pub fn send(&self, message: &HostMessage) -> Result<(), BridgeError> {
        self.send_raw(serde_json::to_string(message)?)
    }

    /// Wait for the next outcome report. `None` once the session side is gone.
    pub async fn next_report(&mut self) -> Option<OutcomeReport> {
        self.reports.recv().await
    }

    /// Take a report if one is already queued.
    pub fn try_report(&mut self) -> Option<OutcomeReport> {
        self.reports.try_recv().ok()
    }
}
