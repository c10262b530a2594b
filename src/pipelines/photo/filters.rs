// SPDX-License-Identifier: GPL-3.0-only

//! CPU filter preset implementations
//!
//! Presets operate on normalized RGB and are shared by the export renderer
//! and the viewer's live preview, so both always agree on the result.

use crate::catalog::FilterPreset;
use image::RgbaImage;

/// Apply a preset to normalized RGB values in-place
#[inline]
pub fn apply_preset(r: &mut f32, g: &mut f32, b: &mut f32, preset: FilterPreset) {
    match preset {
        FilterPreset::Original => {}

        FilterPreset::Sepia => {
            let luminance = 0.299 * *r + 0.587 * *g + 0.114 * *b;
            *r = (luminance * 1.2 + 0.1).clamp(0.0, 1.0);
            *g = (luminance * 0.9 + 0.05).clamp(0.0, 1.0);
            *b = (luminance * 0.7).clamp(0.0, 1.0);
        }

        FilterPreset::Mono => {
            let gray = 0.299 * *r + 0.587 * *g + 0.114 * *b;
            *r = gray;
            *g = gray;
            *b = gray;
        }

        FilterPreset::Vivid => {
            let luminance = 0.299 * *r + 0.587 * *g + 0.114 * *b;
            *r = (luminance + (*r - luminance) * 1.4).clamp(0.0, 1.0);
            *g = (luminance + (*g - luminance) * 1.4).clamp(0.0, 1.0);
            *b = (luminance + (*b - luminance) * 1.4).clamp(0.0, 1.0);
            *r = ((*r - 0.5) * 1.15 + 0.55).clamp(0.0, 1.0);
            *g = ((*g - 0.5) * 1.15 + 0.55).clamp(0.0, 1.0);
            *b = ((*b - 0.5) * 1.15 + 0.55).clamp(0.0, 1.0);
        }
    }
}

/// Apply a preset to 8-bit RGB values (used by the terminal preview)
#[inline]
pub fn apply_preset_rgb8(r: u8, g: u8, b: u8, preset: FilterPreset) -> (u8, u8, u8) {
    if preset == FilterPreset::Original {
        return (r, g, b);
    }
    let mut rf = r as f32 / 255.0;
    let mut gf = g as f32 / 255.0;
    let mut bf = b as f32 / 255.0;
    apply_preset(&mut rf, &mut gf, &mut bf, preset);
    (
        (rf * 255.0).round() as u8,
        (gf * 255.0).round() as u8,
        (bf * 255.0).round() as u8,
    )
}

/// Apply a preset to every pixel of an RGBA image, leaving alpha untouched
pub fn apply_to_image(image: &mut RgbaImage, preset: FilterPreset) {
    if preset == FilterPreset::Original {
        return;
    }

    for pixel in image.pixels_mut() {
        let mut r = pixel[0] as f32 / 255.0;
        let mut g = pixel[1] as f32 / 255.0;
        let mut b = pixel[2] as f32 / 255.0;

        apply_preset(&mut r, &mut g, &mut b, preset);

        pixel[0] = (r * 255.0).round() as u8;
        pixel[1] = (g * 255.0).round() as u8;
        pixel[2] = (b * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_is_identity() {
        assert_eq!(apply_preset_rgb8(12, 200, 99, FilterPreset::Original), (12, 200, 99));
    }

    #[test]
    fn test_mono_equalizes_channels() {
        let (r, g, b) = apply_preset_rgb8(250, 10, 120, FilterPreset::Mono);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_sepia_is_warm() {
        // Sepia output always orders channels red >= green >= blue
        let (r, g, b) = apply_preset_rgb8(80, 120, 200, FilterPreset::Sepia);
        assert!(r >= g);
        assert!(g >= b);
    }

    #[test]
    fn test_apply_to_image_preserves_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, image::Rgba([100, 150, 200, 128]));
        apply_to_image(&mut img, FilterPreset::Vivid);
        assert_eq!(img.get_pixel(0, 0)[3], 128);
    }
}
