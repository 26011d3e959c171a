//! Host process errors.

use hanoi_app::RuntimeError;
use hanoi_core::ConfigError;
use thiserror::Error;

/// Errors from the host process.
#[derive(Debug, Error)]
pub enum HostError {
    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An outcome report could not be encoded.
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The report writer task is gone.
    #[error("report writer closed")]
    WriterClosed,

    /// Command line arguments describe an unusable configuration.
    ///
    /// Fatal at startup.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The runtime stopped on a session error.
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
