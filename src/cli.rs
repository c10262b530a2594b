// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Listing the frame catalog

use photobooth::backends::camera::v4l2;
use photobooth::catalog::{FRAMES, FrameLayout};

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = v4l2::enumerate_cameras();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let location = match camera.location.as_deref() {
            Some(loc) => format!(" [{}]", loc),
            None => String::new(),
        };
        println!("  [{}] {}{}", index, camera.name, location);
        println!("      Path: {}  Driver: {}", camera.path.display(), camera.driver);
        println!();
    }

    Ok(())
}

/// List the compiled-in frame catalog
pub fn list_frames() {
    println!("Available frames:");
    println!();
    for frame in &FRAMES {
        let layout = match frame.layout {
            FrameLayout::Single => "single".to_string(),
            FrameLayout::Strip => format!("strip of {}", frame.shot_count),
        };
        println!(
            "  {:12} {}  ({}, {} aspect)",
            frame.id, frame.name, layout, frame.aspect
        );
    }
}
