//! Newline-delimited JSON host bridge.
//!
//! One JSON object per line in each direction. Blank and malformed lines are
//! skipped with a warning; a read error or end of input means the host is
//! gone.
//!
//! Reports are written by a separate writer task fed over an mpsc channel.
//! The event loop only encodes and enqueues, so a host that stops reading
//! stdout stalls nothing but that task.

use hanoi_app::{HostBridge, HostMessage, OutcomeReport};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin},
    sync::mpsc,
    task::JoinHandle,
};

use crate::HostError;

/// Host bridge over a line-oriented reader and a detached report writer.
pub struct StdioBridge<R> {
    lines: Lines<R>,
    reports: mpsc::UnboundedSender<Vec<u8>>,
    writer: JoinHandle<()>,
}

impl StdioBridge<BufReader<Stdin>> {
    /// Bridge over the process's stdin and stdout.
    ///
    /// Must be called from within a tokio runtime.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R> StdioBridge<R>
where
    R: AsyncBufRead + Unpin,
{
    /// Bridge over arbitrary streams.
    ///
    /// Spawns the report writer, so it must be called from within a tokio
    /// runtime.
    pub fn new<W>(reader: R, writer: W) -> Self
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (reports, queued) = mpsc::unbounded_channel();
        let writer = tokio::spawn(write_reports(writer, queued));
        Self { lines: reader.lines(), reports, writer }
    }

    /// Stop accepting reports and wait for the queued ones to be written.
    ///
    /// Never returns if the host has stopped reading; callers bound it with a
    /// timeout.
    pub async fn finish(self) {
        let Self { reports, writer, .. } = self;
        drop(reports);
        if let Err(e) = writer.await {
            tracing::warn!(error = %e, "report writer task failed");
        }
    }
}

async fn write_reports<W>(mut writer: W, mut queued: mpsc::UnboundedReceiver<Vec<u8>>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = queued.recv().await {
        let written = match writer.write_all(&line).await {
            Ok(()) => writer.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write outcome report");
        }
    }
}

impl<R> HostBridge for StdioBridge<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    type Error = HostError;

    async fn next_message(&mut self) -> Option<HostMessage> {
        loop {
            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read host input");
                    return None;
                },
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match HostMessage::from_json(text) {
                Ok(message) => return Some(message),
                Err(e) => {
                    tracing::warn!(error = %e, line = text, "ignoring malformed host message");
                },
            }
        }
    }

    fn report_outcome(&mut self, report: OutcomeReport) -> Result<(), Self::Error> {
        let mut line = serde_json::to_vec(&report)?;
        line.push(b'\n');
        self.reports.send(line).map_err(|_| HostError::WriterClosed)
    }
}
