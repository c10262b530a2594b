// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photobooth application

use std::fmt;

/// Result type alias using BoothError
pub type BoothResult<T> = Result<T, BoothError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum BoothError {
    /// Camera permission/device failure. Persistent for the session; the
    /// live feed is replaced by an error notice and capture is disabled.
    CameraUnavailable(String),
    /// The export renderer is missing or a render call failed. Surfaced as
    /// a notice; the export is aborted with no partial output.
    RenderUnavailable(String),
    /// The host has no share handler. The share action is hidden rather
    /// than treated as a runtime error.
    ShareUnsupported,
    /// A gallery entry references a frame id that is not in the catalog.
    /// The entry is skipped from rendering.
    InvalidFrameReference(String),
    /// Export failure after rendering (encoding or disk I/O)
    Export(String),
    /// Configuration errors
    Config(String),
}

impl fmt::Display for BoothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoothError::CameraUnavailable(msg) => write!(f, "Camera unavailable: {}", msg),
            BoothError::RenderUnavailable(msg) => {
                write!(f, "Export is currently unavailable: {}", msg)
            }
            BoothError::ShareUnsupported => write!(f, "Sharing is not supported on this system"),
            BoothError::InvalidFrameReference(id) => write!(f, "Unknown frame id: {}", id),
            BoothError::Export(msg) => write!(f, "Export failed: {}", msg),
            BoothError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for BoothError {}

impl From<std::io::Error> for BoothError {
    fn from(err: std::io::Error) -> Self {
        BoothError::Export(err.to_string())
    }
}

impl From<String> for BoothError {
    fn from(msg: String) -> Self {
        BoothError::Export(msg)
    }
}
