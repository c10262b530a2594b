// SPDX-License-Identifier: GPL-3.0-only

//! Rasterization of camera frames into stills
//!
//! The selfie-mirror convention is applied here, at still creation time,
//! with the same orientation the preview uses, so exported photos match
//! what the user saw.

use crate::backends::camera::CameraFrame;
use image::RgbaImage;
use tracing::debug;

/// Rasterize the current camera frame into an RGBA still
pub fn rasterize(frame: &CameraFrame, mirror: bool) -> RgbaImage {
    let width = frame.width;
    let height = frame.height;
    let mut still = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let src_x = if mirror { width - 1 - x } else { x };
            let (r, g, b) = frame.sample_rgb(src_x, y);
            still.put_pixel(x, y, image::Rgba([r, g, b, 255]));
        }
    }

    debug!(width, height, mirror, "Rasterized still");
    still
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::PixelFormat;
    use std::sync::Arc;
    use std::time::Instant;

    fn two_pixel_frame() -> CameraFrame {
        // Left pixel red, right pixel blue
        let data: Vec<u8> = vec![255, 0, 0, 0, 0, 255];
        CameraFrame {
            width: 2,
            height: 1,
            data: Arc::from(data.into_boxed_slice()),
            format: PixelFormat::RGB24,
            stride: 6,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_rasterize_preserves_orientation_unmirrored() {
        let still = rasterize(&two_pixel_frame(), false);
        assert_eq!(still.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(still.get_pixel(1, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_rasterize_mirrors_horizontally() {
        let still = rasterize(&two_pixel_frame(), true);
        assert_eq!(still.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(still.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }
}
