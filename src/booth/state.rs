// SPDX-License-Identifier: GPL-3.0-only

//! Booth state and message handling
//!
//! [`BoothModel`] owns all mutable state for a session: the camera state,
//! the live frame, the in-progress capture sequence, the gallery/selection
//! state and the export state machine. State is mutated only through the
//! handler methods below; the event loop calls them and renders the result.

use crate::backends::camera::{BackendError, CameraFrame};
use crate::capture::{CaptureSequence, SequenceStep, snapshot};
use crate::catalog::{self, FilterPreset, Frame};
use crate::config::Config;
use crate::constants::FLASH_DURATION;
use crate::errors::BoothError;
use crate::pipelines::photo::ExportPipeline;
use crate::session::{CapturedPhoto, Session};
use crate::share::ShareCapability;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Camera feed state
///
/// `Unavailable` is persistent for the session: there is no automatic
/// retry, the preview shows the error and the capture trigger is a no-op.
#[derive(Debug, Clone, Default)]
pub enum CameraState {
    #[default]
    Starting,
    Ready,
    Unavailable(String),
}

impl CameraState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CameraState::Ready)
    }
}

/// Export state machine
///
/// One export action runs at a time; download and share are mutually
/// exclusive on the same artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Downloading,
    Sharing,
}

impl ExportState {
    pub fn is_busy(&self) -> bool {
        !matches!(self, ExportState::Idle)
    }
}

/// Export actions available from the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    Download,
    Share,
}

/// All mutable state of a booth session
pub struct BoothModel {
    pub config: Config,
    pub camera_state: CameraState,
    /// Latest frame drained from the camera feed
    pub live_frame: Option<CameraFrame>,
    pub session: Session,
    /// In-progress capture, if any
    pub sequence: Option<CaptureSequence>,
    /// End of the current cosmetic flash cue
    flash_until: Option<Instant>,
    /// Filter previewed (and exported) in the viewer
    pub viewer_filter: FilterPreset,
    pub export_state: ExportState,
    /// Export pipeline; `None` when the renderer is unavailable
    pub pipeline: Option<ExportPipeline>,
    pub share: ShareCapability,
    /// One-line user-visible status/alert
    pub status: String,
    pub save_dir: PathBuf,
}

impl BoothModel {
    pub fn new(
        config: Config,
        pipeline: Option<ExportPipeline>,
        share: ShareCapability,
        save_dir: PathBuf,
    ) -> Self {
        Self {
            config,
            camera_state: CameraState::Starting,
            live_frame: None,
            session: Session::new(),
            sequence: None,
            flash_until: None,
            viewer_filter: FilterPreset::default(),
            export_state: ExportState::default(),
            pipeline,
            share,
            status: String::new(),
            save_dir,
        }
    }

    // =========================================================================
    // Camera feed
    // =========================================================================

    /// A new frame arrived from the feed
    pub fn handle_frame(&mut self, frame: CameraFrame) {
        if matches!(self.camera_state, CameraState::Starting) {
            info!(
                width = frame.width,
                height = frame.height,
                "Camera ready"
            );
            self.camera_state = CameraState::Ready;
        }
        self.live_frame = Some(frame);
    }

    /// The camera failed to open
    pub fn handle_camera_failed(&mut self, err: BackendError) {
        warn!(error = %err, "Camera unavailable");
        self.camera_state =
            CameraState::Unavailable(BoothError::CameraUnavailable(err.to_string()).to_string());
    }

    /// The camera stream ended mid-session (device disconnected)
    ///
    /// An in-progress capture is abandoned without emitting a partial photo.
    pub fn handle_camera_ended(&mut self) {
        if let Some(seq) = self.sequence.take() {
            warn!(
                shots_taken = seq.shots_taken(),
                "Camera lost mid-capture, abandoning sequence"
            );
        }
        self.live_frame = None;
        self.camera_state = CameraState::Unavailable(
            BoothError::CameraUnavailable("Camera disconnected".to_string()).to_string(),
        );
    }

    // =========================================================================
    // Capture
    // =========================================================================

    /// The user pressed the shutter
    pub fn handle_capture_trigger(&mut self, now: Instant) {
        if !self.camera_state.is_ready() {
            self.status = "Camera is not available".to_string();
            return;
        }
        if self.sequence.is_some() {
            // No concurrent captures; the running countdown keeps going
            warn!("Capture trigger ignored, sequence already in progress");
            return;
        }
        self.sequence = Some(CaptureSequence::start(self.session.selected_frame(), now));
        self.status.clear();
    }

    /// Advance an in-progress capture to `now`
    ///
    /// Rasterizes a still whenever one is due and a live frame exists; a
    /// momentarily missing frame delays the shot instead of dropping it.
    pub fn advance_capture(&mut self, now: Instant) {
        let Some(seq) = &mut self.sequence else {
            return;
        };

        if let SequenceStep::ShotDue { .. } = seq.advance(now) {
            let Some(frame) = &self.live_frame else {
                return;
            };
            let still = snapshot::rasterize(frame, self.config.mirror_preview);
            self.flash_until = Some(now + FLASH_DURATION);

            if let Some(photo) = seq.complete_shot(Arc::new(still), now) {
                self.status = format!("Captured {}", photo.id);
                self.session.add_photo(photo);
                self.sequence = None;
            }
        }
    }

    /// Whether the flash cue is currently showing
    pub fn flash_active(&self, now: Instant) -> bool {
        self.flash_until.map(|until| now < until).unwrap_or(false)
    }

    // =========================================================================
    // Selection & viewer
    // =========================================================================

    /// Cycle the active frame selection
    pub fn handle_cycle_frame(&mut self, step: isize) {
        let frames = &catalog::FRAMES;
        let current = self.session.selected_frame().id;
        let idx = frames
            .iter()
            .position(|f| f.id == current)
            .unwrap_or(0) as isize;
        let len = frames.len() as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        self.session.select_frame(frames[next].id);
        self.status = format!("Frame: {}", frames[next].name);
    }

    /// Open the viewer on the newest photo
    pub fn handle_open_viewer(&mut self) {
        let Some(newest) = self.session.photos().first() else {
            self.status = "No photos captured yet".to_string();
            return;
        };
        let id = newest.id.clone();
        self.session.view_photo(Some(&id));
    }

    /// Close the viewer
    ///
    /// Does not cancel an export in flight; the in-flight flag keeps
    /// guarding re-entry until the export settles.
    pub fn handle_close_viewer(&mut self) {
        self.session.view_photo(None);
    }

    /// Move between photos inside the viewer
    pub fn handle_view_neighbor(&mut self, offset: isize) {
        self.session.view_neighbor(offset);
    }

    /// Cycle the viewer's filter preset
    pub fn handle_cycle_filter(&mut self) {
        self.viewer_filter = self.viewer_filter.next();
        self.status = format!("Filter: {}", self.viewer_filter.display_name());
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Run a download or share action for the viewed photo
    ///
    /// Blocks the loop for the duration of the export; the in-flight flag
    /// is cleared on every exit path.
    pub fn handle_export(&mut self, action: ExportAction, rt: &tokio::runtime::Runtime) {
        if self.export_state.is_busy() {
            self.status = "An export is already in progress".to_string();
            return;
        }
        let Some(photo) = self.session.viewed_photo() else {
            return;
        };
        let photo = photo.clone();
        let Some(frame) = photo.frame() else {
            self.status = BoothError::InvalidFrameReference(photo.frame_id.clone()).to_string();
            return;
        };
        if action == ExportAction::Share && !self.share.is_available() {
            // The action is hidden when unsupported; keep a guard anyway
            self.status = BoothError::ShareUnsupported.to_string();
            return;
        }
        self.export_state = match action {
            ExportAction::Download => ExportState::Downloading,
            ExportAction::Share => ExportState::Sharing,
        };

        let result = self.run_export(&photo, frame, rt);

        // Guaranteed cleanup: the flag clears on success and failure alike
        self.export_state = ExportState::Idle;

        match result {
            Ok(path) => match action {
                ExportAction::Download => {
                    self.status = format!("Saved {}", path.display());
                }
                ExportAction::Share => match self.share.share_file(&path) {
                    Ok(()) => self.status = "Shared photo".to_string(),
                    Err(e) => self.status = e,
                },
            },
            Err(e) => {
                self.status = BoothError::RenderUnavailable(e).to_string();
            }
        }
    }

    /// Render, encode and save the viewed photo with the viewer's filter
    ///
    /// Fails immediately when no renderer is loaded.
    fn run_export(
        &self,
        photo: &CapturedPhoto,
        frame: &'static Frame,
        rt: &tokio::runtime::Runtime,
    ) -> Result<PathBuf, String> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| "renderer is not loaded".to_string())?;
        rt.block_on(pipeline.export(photo, frame, self.viewer_filter, self.save_dir.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::pattern::synthetic_frame;
    use crate::pipelines::photo::{CompositeRenderer, Renderer};
    use crate::session::CapturedPhoto;
    use image::RgbaImage;
    use std::time::Duration;

    fn model_with_pipeline(pipeline: Option<ExportPipeline>) -> BoothModel {
        BoothModel::new(
            Config::default(),
            pipeline,
            ShareCapability::unsupported(),
            std::env::temp_dir().join("photobooth-booth-test"),
        )
    }

    fn ready_model() -> BoothModel {
        let mut model = model_with_pipeline(None);
        model.handle_frame(synthetic_frame(8, 6, 0));
        model
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(
            &self,
            _photo: &CapturedPhoto,
            _frame: &crate::catalog::Frame,
            _filter: FilterPreset,
        ) -> Result<RgbaImage, String> {
            Err("renderer not loaded".to_string())
        }
    }

    fn viewed_photo_model(pipeline: Option<ExportPipeline>) -> BoothModel {
        let mut model = model_with_pipeline(pipeline);
        let still = std::sync::Arc::new(RgbaImage::from_pixel(4, 3, image::Rgba([9, 9, 9, 255])));
        model.session.add_photo(CapturedPhoto {
            id: "photo-1".to_string(),
            stills: vec![still],
            frame_id: "polaroid".to_string(),
        });
        model.session.view_photo(Some("photo-1"));
        model
    }

    #[test]
    fn test_trigger_rejected_until_camera_ready() {
        let mut model = model_with_pipeline(None);
        model.handle_capture_trigger(Instant::now());
        assert!(model.sequence.is_none());

        model.handle_camera_failed(BackendError::NoCameraFound);
        model.handle_capture_trigger(Instant::now());
        assert!(model.sequence.is_none());
    }

    #[test]
    fn test_trigger_does_not_stack_sequences() {
        let mut model = ready_model();
        let now = Instant::now();
        model.handle_capture_trigger(now);
        assert!(model.sequence.is_some());

        // Advance partway through the countdown, then trigger again
        model.advance_capture(now + Duration::from_millis(1500));
        let countdown = model.sequence.as_ref().unwrap().countdown();
        model.handle_capture_trigger(now + Duration::from_millis(1600));
        assert_eq!(model.sequence.as_ref().unwrap().countdown(), countdown);
    }

    #[test]
    fn test_strip_capture_adds_one_photo_with_two_stills() {
        let mut model = ready_model();
        model.session.select_frame("photo-strip");
        let start = Instant::now();

        model.handle_capture_trigger(start);
        model.advance_capture(start + Duration::from_secs(4));
        assert!(model.sequence.is_some());
        model.advance_capture(start + Duration::from_secs(8));

        assert!(model.sequence.is_none());
        assert_eq!(model.session.photos().len(), 1);
        assert_eq!(model.session.photos()[0].stills.len(), 2);
    }

    #[test]
    fn test_camera_loss_abandons_sequence() {
        let mut model = ready_model();
        model.session.select_frame("photo-strip");
        let start = Instant::now();
        model.handle_capture_trigger(start);
        // First of two shots is in; the sequence is mid-flight
        model.advance_capture(start + Duration::from_secs(4));
        assert_eq!(model.sequence.as_ref().unwrap().shots_taken(), 1);

        model.handle_camera_ended();
        assert!(model.sequence.is_none());
        assert!(model.session.photos().is_empty());
        assert!(matches!(model.camera_state, CameraState::Unavailable(_)));
    }

    #[test]
    fn test_export_without_renderer_fails_cleanly() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut model = viewed_photo_model(None);

        model.handle_export(ExportAction::Download, &rt);

        assert_eq!(model.export_state, ExportState::Idle);
        assert_eq!(model.session.photos().len(), 1);
        assert!(model.session.viewed_photo().is_some());
        assert!(model.status.contains("unavailable"));
    }

    #[test]
    fn test_failed_render_clears_in_flight_flag() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pipeline = ExportPipeline::new(std::sync::Arc::new(FailingRenderer));
        let mut model = viewed_photo_model(Some(pipeline));

        model.handle_export(ExportAction::Download, &rt);

        assert_eq!(model.export_state, ExportState::Idle);
        assert!(model.status.contains("unavailable"));
    }

    #[test]
    fn test_share_hidden_when_unsupported() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pipeline = ExportPipeline::new(std::sync::Arc::new(CompositeRenderer));
        let mut model = viewed_photo_model(Some(pipeline));

        model.handle_export(ExportAction::Share, &rt);
        assert_eq!(model.export_state, ExportState::Idle);
        assert_eq!(model.status, BoothError::ShareUnsupported.to_string());
    }

    #[test]
    fn test_download_writes_deterministic_filename() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pipeline = ExportPipeline::new(std::sync::Arc::new(CompositeRenderer));
        let mut model = viewed_photo_model(Some(pipeline));
        model.viewer_filter = FilterPreset::Sepia;

        model.handle_export(ExportAction::Download, &rt);

        let expected = model.save_dir.join("photobooth-photo-1-Sepia.png");
        assert!(expected.exists(), "status: {}", model.status);
        let _ = std::fs::remove_file(&expected);
    }

    #[test]
    fn test_unknown_frame_reference_skips_export() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let pipeline = ExportPipeline::new(std::sync::Arc::new(CompositeRenderer));
        let mut model = model_with_pipeline(Some(pipeline));
        let still = std::sync::Arc::new(RgbaImage::from_pixel(4, 3, image::Rgba([9, 9, 9, 255])));
        model.session.add_photo(CapturedPhoto {
            id: "photo-9".to_string(),
            stills: vec![still],
            frame_id: "retired-frame".to_string(),
        });
        model.session.view_photo(Some("photo-9"));

        model.handle_export(ExportAction::Download, &rt);
        assert_eq!(model.export_state, ExportState::Idle);
        assert!(model.status.contains("retired-frame"));
    }

    #[test]
    fn test_cycle_frame_wraps() {
        let mut model = ready_model();
        let first = model.session.selected_frame().id;
        for _ in 0..catalog::FRAMES.len() {
            model.handle_cycle_frame(1);
        }
        assert_eq!(model.session.selected_frame().id, first);

        model.handle_cycle_frame(-1);
        assert_eq!(
            model.session.selected_frame().id,
            catalog::FRAMES[catalog::FRAMES.len() - 1].id
        );
    }
}
