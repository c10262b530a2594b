// SPDX-License-Identifier: GPL-3.0-only

//! Artifact composition
//!
//! Renders a captured photo inside its decorative frame with a filter
//! preset applied, at a fixed scale factor over a transparent background.
//! The renderer is behind a trait so the export path can be exercised with
//! a fake (or an absent renderer) in tests.

use crate::catalog::{Border, FilterPreset, Frame, FrameLayout, FrameStyle};
use crate::constants::{EXPORT_BASE_WIDTH, EXPORT_SCALE};
use crate::pipelines::photo::filters;
use crate::session::CapturedPhoto;
use image::{Rgba, RgbaImage, imageops};

/// Renders an export artifact from a photo, frame and filter
///
/// Rendering must be a pure function of its inputs: the same tuple always
/// produces the same artifact.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        photo: &CapturedPhoto,
        frame: &Frame,
        filter: FilterPreset,
    ) -> Result<RgbaImage, String>;
}

/// Production renderer compositing with the `image` crate
pub struct CompositeRenderer;

impl Renderer for CompositeRenderer {
    fn render(
        &self,
        photo: &CapturedPhoto,
        frame: &Frame,
        filter: FilterPreset,
    ) -> Result<RgbaImage, String> {
        if photo.stills.is_empty() {
            return Err("Photo has no stills to render".to_string());
        }

        let scale = EXPORT_SCALE;
        let width = EXPORT_BASE_WIDTH * scale;
        let height = frame.aspect.height_for_width(EXPORT_BASE_WIDTH) * scale;
        let style = &frame.style;

        // Transparent base so shadows/rounded hosts composite cleanly
        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

        if let Some(bg) = style.background {
            fill_rect(&mut canvas, 0, 0, width, height, Rgba(bg));
        }
        if let Some(border) = style.border {
            draw_border(&mut canvas, &border, scale);
        }

        let (content_x, content_y, content_w, content_h) = content_area(style, width, height, scale);
        if content_w == 0 || content_h == 0 {
            return Err("Frame styling leaves no room for the photo".to_string());
        }

        let cells = layout_cells(
            frame.layout,
            frame.shot_count,
            style.gap * scale,
            content_x,
            content_y,
            content_w,
            content_h,
        );

        for (still, (cx, cy, cw, ch)) in photo.stills.iter().zip(cells) {
            let mut cell = cover_crop(still, cw, ch);
            filters::apply_to_image(&mut cell, filter);
            imageops::overlay(&mut canvas, &cell, cx as i64, cy as i64);
        }

        Ok(canvas)
    }
}

/// Photo area inside border, padding and the bottom caption margin
fn content_area(style: &FrameStyle, width: u32, height: u32, scale: u32) -> (u32, u32, u32, u32) {
    let (edge_x, edge_y) = match style.border {
        Some(b) if b.horizontal_only => (0, b.thickness * scale),
        Some(b) => (b.thickness * scale, b.thickness * scale),
        None => (0, 0),
    };
    let pad = style.padding * scale;
    let x = edge_x + pad;
    let y = edge_y + pad;
    let w = width.saturating_sub(2 * (edge_x + pad));
    let h = height.saturating_sub(2 * (edge_y + pad) + style.bottom_extra * scale);
    (x, y, w, h)
}

/// Cell rectangles for the photo area
fn layout_cells(
    layout: FrameLayout,
    shot_count: u32,
    gap: u32,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) -> Vec<(u32, u32, u32, u32)> {
    match layout {
        FrameLayout::Single => vec![(x, y, w, h)],
        FrameLayout::Strip => {
            let count = shot_count.max(1);
            let total_gap = gap * (count - 1);
            let cell_h = h.saturating_sub(total_gap) / count;
            (0..count)
                .map(|i| (x, y + i * (cell_h + gap), w, cell_h))
                .collect()
        }
    }
}

/// Scale a still to cover a cell, center-cropping the overflow
fn cover_crop(still: &RgbaImage, cell_w: u32, cell_h: u32) -> RgbaImage {
    let (iw, ih) = still.dimensions();
    if iw == 0 || ih == 0 || cell_w == 0 || cell_h == 0 {
        return RgbaImage::new(cell_w.max(1), cell_h.max(1));
    }

    let scale = f64::max(cell_w as f64 / iw as f64, cell_h as f64 / ih as f64);
    let rw = ((iw as f64 * scale).ceil() as u32).max(cell_w);
    let rh = ((ih as f64 * scale).ceil() as u32).max(cell_h);

    let resized = imageops::resize(still, rw, rh, imageops::FilterType::Triangle);
    let x0 = (rw - cell_w) / 2;
    let y0 = (rh - cell_h) / 2;
    imageops::crop_imm(&resized, x0, y0, cell_w, cell_h).to_image()
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(canvas.height()) {
        for px in x..(x + w).min(canvas.width()) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn draw_border(canvas: &mut RgbaImage, border: &Border, scale: u32) {
    let (w, h) = canvas.dimensions();
    let t = (border.thickness * scale).min(h / 2);
    let color = Rgba(border.color);

    fill_rect(canvas, 0, 0, w, t, color);
    fill_rect(canvas, 0, h - t, w, t, color);
    if !border.horizontal_only {
        let t = (border.thickness * scale).min(w / 2);
        fill_rect(canvas, 0, 0, t, h, color);
        fill_rect(canvas, w - t, 0, t, h, color);
    }
}
