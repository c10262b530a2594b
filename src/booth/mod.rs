// SPDX-License-Identifier: GPL-3.0-only

//! Terminal photobooth shell
//!
//! Owns the terminal lifecycle and the single event loop that drains
//! camera frames, advances the capture sequence by wall clock, renders the
//! UI and dispatches key input.
//!
//! # Architecture
//!
//! - `state`: booth state and handler methods (BoothModel)
//! - `view`: ratatui rendering (preview, overlays, gallery, viewer)

pub mod state;
pub mod view;

pub use state::{BoothModel, CameraState, ExportAction, ExportState};

use crate::backends::camera::{CameraFeed, FramePoll};
use crate::config::Config;
use crate::constants::{INPUT_POLL_INTERVAL, SAVE_FOLDER};
use crate::pipelines::photo::{CompositeRenderer, ExportPipeline};
use crate::share::ShareCapability;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Get the photo save directory (~/Pictures/photobooth)
pub fn get_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(SAVE_FOLDER)
}

/// Run the booth
pub fn run(config: Config, use_pattern: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let share = ShareCapability::detect();
    let pipeline = Some(ExportPipeline::new(Arc::new(CompositeRenderer)));
    let save_dir = config.save_dir.clone().unwrap_or_else(get_photo_directory);

    let mut model = BoothModel::new(config, pipeline, share, save_dir);

    // Camera acquisition failures are persistent state, not fatal: the
    // booth starts and shows the error in place of the live feed.
    let mut feed = match CameraFeed::open(use_pattern, model.config.camera_path.as_deref()) {
        Ok(feed) => Some(feed),
        Err(e) => {
            model.handle_camera_failed(e);
            None
        }
    };

    // Set up terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut model, &mut feed, &rt);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Release the camera so the device lock never outlives the booth
    drop(feed);
    info!("Booth session ended");

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &mut BoothModel,
    feed: &mut Option<CameraFeed>,
    rt: &tokio::runtime::Runtime,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Drain all pending frames so the preview shows the latest
        let mut feed_ended = false;
        if let Some(stream) = feed.as_mut() {
            loop {
                match stream.poll() {
                    FramePoll::Frame(frame) => model.handle_frame(frame),
                    FramePoll::Empty => break,
                    FramePoll::Ended => {
                        feed_ended = true;
                        break;
                    }
                }
            }
        }
        if feed_ended {
            model.handle_camera_ended();
            *feed = None;
        }

        let now = Instant::now();
        model.advance_capture(now);

        terminal.draw(|f| view::draw(f, model, now))?;

        // Handle input with a timeout so frames keep flowing
        if event::poll(INPUT_POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            if key.code == KeyCode::Char('q') {
                break;
            }

            if model.session.viewed_photo().is_some() {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('g') => model.handle_close_viewer(),
                    KeyCode::Left => model.handle_view_neighbor(-1),
                    KeyCode::Right => model.handle_view_neighbor(1),
                    KeyCode::Char('x') => model.handle_cycle_filter(),
                    KeyCode::Char('d') => model.handle_export(ExportAction::Download, rt),
                    KeyCode::Char('s') => {
                        // Not offered at all when the capability is absent
                        if model.share.is_available() {
                            model.handle_export(ExportAction::Share, rt);
                        }
                    }
                    _ => {}
                }
            } else {
                match key.code {
                    KeyCode::Char(' ') | KeyCode::Char('p') => {
                        model.handle_capture_trigger(Instant::now());
                    }
                    KeyCode::Char('f') | KeyCode::Right => model.handle_cycle_frame(1),
                    KeyCode::Left => model.handle_cycle_frame(-1),
                    KeyCode::Char('g') => model.handle_open_viewer(),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
