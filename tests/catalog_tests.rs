// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the frame catalog

use photobooth::catalog::{self, FilterPreset, FrameLayout};

#[test]
fn test_default_frame_is_single_shot() {
    let frame = catalog::default_frame();
    assert_eq!(frame.layout, FrameLayout::Single);
    assert_eq!(
        frame.shot_count, 1,
        "Default frame should need exactly one shot"
    );
}

#[test]
fn test_photo_strip_needs_two_shots() {
    let frame = catalog::find_frame("photo-strip").expect("photo-strip frame exists");
    assert_eq!(frame.layout, FrameLayout::Strip);
    assert_eq!(frame.shot_count, 2);
}

#[test]
fn test_every_frame_resolvable_by_id() {
    for frame in &catalog::FRAMES {
        let found = catalog::find_frame(frame.id).expect("frame resolves by its own id");
        assert_eq!(found.name, frame.name);
    }
}

#[test]
fn test_filter_presets_have_distinct_slugs() {
    let slugs: Vec<&str> = FilterPreset::ALL.iter().map(|p| p.file_slug()).collect();
    for (i, slug) in slugs.iter().enumerate() {
        assert!(
            !slugs[i + 1..].contains(slug),
            "Duplicate filter slug: {}",
            slug
        );
    }
}
