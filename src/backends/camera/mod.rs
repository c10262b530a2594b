// SPDX-License-Identifier: GPL-3.0-only

//! Camera source abstraction
//!
//! The booth consumes frames through [`CameraFeed`], which hides whether
//! they come from a V4L2 device or the synthetic test pattern. Acquisition
//! happens once per session; dropping the feed stops streaming and releases
//! the device.

pub mod pattern;
pub mod types;
pub mod v4l2;

pub use types::*;

use tracing::info;

/// An open camera source
pub enum CameraFeed {
    /// Hardware capture via V4L2
    V4l2(v4l2::CameraStream),
    /// Synthetic test pattern (no hardware)
    Pattern(pattern::PatternStream),
}

impl CameraFeed {
    /// Open the session's camera source
    ///
    /// `use_pattern` forces the synthetic source. Otherwise a device is
    /// selected (configured path, then user-facing, then first found) and
    /// opened at the preferred resolution.
    pub fn open(use_pattern: bool, preferred_path: Option<&str>) -> BackendResult<CameraFeed> {
        if use_pattern {
            info!("Using synthetic test-pattern source");
            return Ok(CameraFeed::Pattern(pattern::PatternStream::open()));
        }

        let device = v4l2::select_device(preferred_path)?;
        info!(name = %device.name, path = %device.path.display(), "Opening camera");
        let stream = v4l2::CameraStream::open(&device)?;
        Ok(CameraFeed::V4l2(stream))
    }

    /// Poll for the next frame without blocking
    pub fn poll(&mut self) -> FramePoll {
        match self {
            CameraFeed::V4l2(stream) => stream.poll(),
            CameraFeed::Pattern(stream) => stream.poll(),
        }
    }
}
