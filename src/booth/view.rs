// SPDX-License-Identifier: GPL-3.0-only

//! Booth rendering
//!
//! Draws the live preview, countdown and flash overlays, the gallery panel
//! and the photo viewer using Unicode half-block characters for improved
//! vertical resolution.

use crate::booth::state::{BoothModel, CameraState, ExportState};
use crate::catalog::{FilterPreset, Frame, FrameLayout};
use crate::pipelines::photo::filters;
use crate::session::CapturedPhoto;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Widget};
use std::time::Instant;

/// Render one UI frame
pub fn draw(f: &mut ratatui::Frame, model: &BoothModel, now: Instant) {
    let area = f.area();
    if area.height < 2 {
        return;
    }

    let main = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };

    // Entries pointing at unknown frames are skipped from rendering
    let viewed = model
        .session
        .viewed_photo()
        .and_then(|photo| photo.frame().map(|frame| (photo, frame)));

    if let Some((photo, frame)) = viewed {
        let viewer = ViewerWidget {
            photo,
            frame,
            filter: model.viewer_filter,
            export_state: model.export_state,
            share_available: model.share.is_available(),
        };
        f.render_widget(&viewer, main);
    } else {
        let gallery_width = if main.width >= 72 { main.width / 3 } else { 0 };
        let preview_area = Rect {
            x: main.x,
            y: main.y,
            width: main.width - gallery_width,
            height: main.height,
        };

        let preview = PreviewWidget { model, now };
        f.render_widget(&preview, preview_area);

        if gallery_width > 0 {
            let gallery_area = Rect {
                x: main.x + preview_area.width,
                y: main.y,
                width: gallery_width,
                height: main.height,
            };
            let gallery = GalleryWidget { model };
            f.render_widget(&gallery, gallery_area);
        }
    }

    let message = if model.status.is_empty() {
        help_message(model)
    } else {
        model.status.clone()
    };
    f.render_widget(StatusBar { message: &message }, status_area);
}

/// Key help for the current mode
fn help_message(model: &BoothModel) -> String {
    if model.session.viewed_photo().is_some() {
        let mut msg = "'d' download".to_string();
        if model.share.is_available() {
            msg.push_str(" | 's' share");
        }
        msg.push_str(" | 'x' filter | left/right photos | 'esc' close");
        msg
    } else {
        "'space' capture | 'f' frame | 'g' photos | 'q' quit".to_string()
    }
}

fn style_color(rgba: [u8; 4]) -> Color {
    Color::Rgb(rgba[0], rgba[1], rgba[2])
}

fn frame_border_color(frame: &Frame) -> Color {
    frame
        .style
        .border
        .map(|b| style_color(b.color))
        .or(frame.style.background.map(style_color))
        .unwrap_or(Color::DarkGray)
}

/// Live camera preview framed by the selected booth frame
struct PreviewWidget<'a> {
    model: &'a BoothModel,
    now: Instant,
}

impl Widget for &PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let model = self.model;
        let frame = model.session.selected_frame();

        let block = Block::bordered()
            .title(frame.name)
            .border_style(Style::default().fg(frame_border_color(frame)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match &model.camera_state {
            CameraState::Starting => {
                centered_line(inner, buf, 0, "Starting camera...", Style::default());
            }
            CameraState::Unavailable(message) => {
                centered_line(
                    inner,
                    buf,
                    0,
                    message,
                    Style::default().fg(Color::Red),
                );
                centered_line(
                    inner,
                    buf,
                    1,
                    "Check permissions and restart the booth",
                    Style::default().fg(Color::DarkGray),
                );
            }
            CameraState::Ready => {
                if let Some(live) = &model.live_frame {
                    let mirror = model.config.mirror_preview;
                    let width = live.width;
                    render_pixels(inner, buf, width, live.height, |x, y| {
                        let sx = if mirror { width - 1 - x } else { x };
                        live.sample_rgb(sx, y)
                    });
                }

                if model.flash_active(self.now) {
                    flash_fill(inner, buf);
                }

                if let Some(count) = model.sequence.as_ref().and_then(|s| s.countdown()) {
                    render_countdown(inner, buf, count);
                }
            }
        }
    }
}

/// Gallery list of captured photos
struct GalleryWidget<'a> {
    model: &'a BoothModel,
}

impl Widget for &GalleryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Your Photos");
        let inner = block.inner(area);
        block.render(area, buf);

        let photos = self.model.session.photos();
        if photos.is_empty() {
            centered_line(
                inner,
                buf,
                0,
                "Your captured photos",
                Style::default().fg(Color::DarkGray),
            );
            centered_line(
                inner,
                buf,
                1,
                "will appear here.",
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let mut row = 0u16;
        for photo in photos {
            if row >= inner.height {
                break;
            }
            // Unknown frame ids are skipped, not rendered broken
            let Some(frame) = photo.frame() else {
                continue;
            };
            let line = format!("{}  {}", photo.id, frame.name);
            let style = Style::default().fg(frame_border_color(frame));
            buf.set_stringn(
                inner.x,
                inner.y + row,
                line,
                inner.width as usize,
                style,
            );
            row += 1;
        }
    }
}

/// Full-size photo viewer with filter preview and export actions
struct ViewerWidget<'a> {
    photo: &'a CapturedPhoto,
    frame: &'static Frame,
    filter: FilterPreset,
    export_state: ExportState,
    share_available: bool,
}

impl Widget for &ViewerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("{} ({})", self.frame.name, self.photo.id);
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(frame_border_color(self.frame)));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let pixel_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height - 1,
        };

        let cells: Vec<Rect> = match self.frame.layout {
            FrameLayout::Single => vec![pixel_area],
            FrameLayout::Strip => {
                let count = self.frame.shot_count.max(1) as u16;
                let cell_h = pixel_area.height.saturating_sub(count - 1) / count;
                (0..count)
                    .map(|i| Rect {
                        x: pixel_area.x,
                        y: pixel_area.y + i * (cell_h + 1),
                        width: pixel_area.width,
                        height: cell_h,
                    })
                    .collect()
            }
        };

        let filter = self.filter;
        for (still, cell) in self.photo.stills.iter().zip(cells) {
            // Stills are already mirrored; only the filter preview applies here
            render_pixels(cell, buf, still.width(), still.height(), |x, y| {
                let px = still.get_pixel(x, y);
                filters::apply_preset_rgb8(px[0], px[1], px[2], filter)
            });
        }

        let actions = match self.export_state {
            ExportState::Downloading => "Preparing download...".to_string(),
            ExportState::Sharing => "Preparing share...".to_string(),
            ExportState::Idle => {
                let mut msg = format!("Filter: {}  |  'd' download", filter.display_name());
                if self.share_available {
                    msg.push_str("  |  's' share");
                }
                msg
            }
        };
        let actions_y = inner.y + inner.height - 1;
        buf.set_stringn(
            inner.x,
            actions_y,
            actions,
            inner.width as usize,
            Style::default().fg(Color::Yellow),
        );
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self
            .message
            .chars()
            .take(area.width as usize)
            .collect();

        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}

/// Render a pixel source into a terminal area using half-block characters
///
/// Each terminal cell shows two vertically stacked pixels: the upper half
/// (▀) takes the foreground color, the lower half the background color. The
/// image is centered and letterboxed to keep its aspect ratio.
fn render_pixels<F>(area: Rect, buf: &mut Buffer, src_w: u32, src_h: u32, sample: F)
where
    F: Fn(u32, u32) -> (u8, u8, u8),
{
    if src_w == 0 || src_h == 0 || area.width == 0 || area.height == 0 {
        return;
    }

    let src_aspect = src_w as f64 / src_h as f64;
    let term_width = area.width as f64;
    let term_height = (area.height * 2) as f64; // *2 because half-blocks

    let (display_width, display_height) = if term_width / term_height > src_aspect {
        let h = term_height;
        let w = h * src_aspect;
        (w as u16, (h / 2.0) as u16)
    } else {
        let w = term_width;
        let h = w / src_aspect;
        (w as u16, (h / 2.0) as u16)
    };

    if display_width == 0 || display_height == 0 {
        return;
    }

    let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
    let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

    let x_scale = src_w as f64 / display_width as f64;
    let y_scale = src_h as f64 / (display_height * 2) as f64;

    for ty in 0..display_height {
        for tx in 0..display_width {
            let term_x = x_offset + tx;
            let term_y = y_offset + ty;
            if term_x >= area.x + area.width || term_y >= area.y + area.height {
                continue;
            }

            let src_x = ((tx as f64 * x_scale) as u32).min(src_w - 1);
            let src_y_top = ((ty as f64 * 2.0 * y_scale) as u32).min(src_h - 1);
            let src_y_bottom = (((ty as f64 * 2.0 + 1.0) * y_scale) as u32).min(src_h - 1);

            let (tr, tg, tb) = sample(src_x, src_y_top);
            let (br, bg, bb) = sample(src_x, src_y_bottom);

            if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                cell.set_char('▀');
                cell.set_fg(Color::Rgb(tr, tg, tb));
                cell.set_bg(Color::Rgb(br, bg, bb));
            }
        }
    }
}

/// Fill the area with the flash cue
fn flash_fill(area: Rect, buf: &mut Buffer) {
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ');
                cell.set_bg(Color::White);
            }
        }
    }
}

/// 3x5 bitmap digits for the countdown overlay
const DIGITS: [[&str; 5]; 3] = [
    [".#.", "##.", ".#.", ".#.", "###"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", "###", "..#", "###"],
];

/// Draw the remaining countdown centered over the preview
fn render_countdown(area: Rect, buf: &mut Buffer, count: u32) {
    let Some(rows) = DIGITS.get((count as usize).wrapping_sub(1)) else {
        centered_line(area, buf, 0, &count.to_string(), Style::default());
        return;
    };

    // Each bitmap cell renders two columns wide for a squarer digit
    let digit_w = (rows[0].len() * 2) as u16;
    let digit_h = rows.len() as u16;
    if area.width < digit_w || area.height < digit_h {
        centered_line(area, buf, 0, &count.to_string(), Style::default());
        return;
    }

    let x0 = area.x + (area.width - digit_w) / 2;
    let y0 = area.y + (area.height - digit_h) / 2;

    for (dy, row) in rows.iter().enumerate() {
        for (dx, ch) in row.chars().enumerate() {
            if ch != '#' {
                continue;
            }
            for rep in 0..2u16 {
                let x = x0 + (dx as u16) * 2 + rep;
                let y = y0 + dy as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char('█');
                    cell.set_fg(Color::White);
                }
            }
        }
    }
}

fn centered_line(area: Rect, buf: &mut Buffer, row: u16, text: &str, style: Style) {
    if row >= area.height {
        return;
    }
    let len = text.chars().count().min(area.width as usize) as u16;
    let x = area.x + (area.width.saturating_sub(len)) / 2;
    let y = area.y + area.height / 2 + row;
    if y < area.y + area.height {
        buf.set_stringn(x, y, text, area.width as usize, style);
    }
}
