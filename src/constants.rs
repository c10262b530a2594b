// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Number of countdown ticks before each shot
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Interval between countdown ticks
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Duration of the cosmetic flash cue shown when a shot is taken
///
/// The flash runs concurrently with rasterization and never delays the
/// capture sequence.
pub const FLASH_DURATION: Duration = Duration::from_millis(300);

/// Preferred capture resolution requested from the camera (width)
pub const PREFERRED_WIDTH: u32 = 1280;

/// Preferred capture resolution requested from the camera (height)
pub const PREFERRED_HEIGHT: u32 = 720;

/// Scale factor applied when rendering an export artifact
pub const EXPORT_SCALE: u32 = 2;

/// Logical width of the export canvas before scaling
///
/// The height is derived from the selected frame's aspect ratio.
pub const EXPORT_BASE_WIDTH: u32 = 600;

/// Folder name for saved photos under the user's pictures directory
pub const SAVE_FOLDER: &str = "photobooth";

/// How long the terminal event loop waits for input before redrawing
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_is_three_ticks() {
        assert_eq!(COUNTDOWN_SECONDS, 3);
        assert_eq!(COUNTDOWN_TICK, Duration::from_secs(1));
    }

    #[test]
    fn test_flash_shorter_than_tick() {
        assert!(FLASH_DURATION < COUNTDOWN_TICK);
    }
}
