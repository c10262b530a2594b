// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture and export flow

use photobooth::backends::camera::pattern::synthetic_frame;
use photobooth::booth::{BoothModel, ExportAction};
use photobooth::catalog::FilterPreset;
use photobooth::config::Config;
use photobooth::pipelines::photo::{CompositeRenderer, ExportPipeline};
use photobooth::share::ShareCapability;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn test_model(save_dir: std::path::PathBuf) -> BoothModel {
    let pipeline = ExportPipeline::new(Arc::new(CompositeRenderer));
    let mut model = BoothModel::new(
        Config::default(),
        Some(pipeline),
        ShareCapability::unsupported(),
        save_dir,
    );
    model.handle_frame(synthetic_frame(32, 24, 0));
    model
}

#[test]
fn test_photo_strip_scenario() {
    // Select photo-strip (two shots), trigger capture, run both countdowns:
    // exactly one new photo with two stills, prepended to the gallery.
    let mut model = test_model(std::env::temp_dir());
    model.session.select_frame("photo-strip");

    let start = Instant::now();
    model.handle_capture_trigger(start);

    let mut now = start;
    for _ in 0..10 {
        now += Duration::from_secs(1);
        model.handle_frame(synthetic_frame(32, 24, 1));
        model.advance_capture(now);
    }

    assert_eq!(model.session.photos().len(), 1);
    let photo = &model.session.photos()[0];
    assert_eq!(photo.stills.len(), 2);
    assert_eq!(photo.frame_id, "photo-strip");
}

#[test]
fn test_sepia_download_scenario() {
    // Open a captured photo, apply Sepia, download: the produced filename
    // matches photobooth-<id>-Sepia.png.
    let save_dir = std::env::temp_dir().join("photobooth-scenario-test");
    let mut model = test_model(save_dir.clone());

    let start = Instant::now();
    model.handle_capture_trigger(start);
    model.advance_capture(start + Duration::from_secs(4));
    assert_eq!(model.session.photos().len(), 1);

    let id = model.session.photos()[0].id.clone();
    model.handle_open_viewer();
    model.handle_cycle_filter();
    assert_eq!(model.viewer_filter, FilterPreset::Sepia);

    let rt = tokio::runtime::Runtime::new().unwrap();
    model.handle_export(ExportAction::Download, &rt);

    let expected = save_dir.join(format!("photobooth-{}-Sepia.png", id));
    assert!(expected.exists(), "status: {}", model.status);

    let _ = std::fs::remove_file(&expected);
    let _ = std::fs::remove_dir(&save_dir);
}
