// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use photobooth::Config;

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    // Check sensible defaults
    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert!(
        config.save_dir.is_none(),
        "Save directory should default to the pictures folder"
    );
}

#[test]
fn test_config_roundtrips_through_json() {
    let config = Config {
        mirror_preview: false,
        save_dir: Some(std::path::PathBuf::from("/tmp/booth")),
        camera_path: Some("/dev/video2".to_string()),
    };

    let json = serde_json::to_string(&config).expect("config serializes");
    let restored: Config = serde_json::from_str(&json).expect("config deserializes");
    assert_eq!(restored, config);
}
