// SPDX-License-Identifier: GPL-3.0-only

//! Artifact encoding and saving
//!
//! Export artifacts are always PNG (lossless, keeps the transparent
//! background). Filenames are derived deterministically from the photo id
//! and filter slug so repeated downloads of the same photo differ only per
//! filter.

use crate::catalog::FilterPreset;
use image::RgbaImage;
use std::path::PathBuf;
use tracing::{debug, info};

/// Build the export filename for a photo/filter pair
///
/// Pattern: `photobooth-<photoId>-<filterSlug>.png`
pub fn export_filename(photo_id: &str, filter: FilterPreset) -> String {
    format!("photobooth-{}-{}.png", photo_id, filter.file_slug())
}

/// PNG encoder for export artifacts
pub struct ArtifactEncoder;

impl ArtifactEncoder {
    /// Encode an artifact as PNG bytes
    ///
    /// Encoding is CPU-bound and runs on the blocking pool.
    pub async fn encode(&self, artifact: RgbaImage) -> Result<Vec<u8>, String> {
        tokio::task::spawn_blocking(move || {
            let mut buffer = Vec::new();
            artifact
                .write_to(
                    &mut std::io::Cursor::new(&mut buffer),
                    image::ImageFormat::Png,
                )
                .map_err(|e| format!("PNG encoding failed: {}", e))?;
            debug!(size = buffer.len(), "Artifact encoded");
            Ok(buffer)
        })
        .await
        .map_err(|e| format!("Encoding task error: {}", e))?
    }

    /// Save encoded bytes under the output directory
    pub async fn save(
        &self,
        data: Vec<u8>,
        output_dir: PathBuf,
        filename: String,
    ) -> Result<PathBuf, String> {
        let filepath = output_dir.join(&filename);
        let filepath_clone = filepath.clone();

        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&output_dir)
                .map_err(|e| format!("Failed to create output directory: {}", e))?;
            std::fs::write(&filepath_clone, &data)
                .map_err(|e| format!("Failed to save artifact: {}", e))?;
            Ok::<_, String>(())
        })
        .await
        .map_err(|e| format!("Save task error: {}", e))??;

        info!(path = %filepath.display(), "Artifact saved");
        Ok(filepath)
    }
}

impl Default for ArtifactEncoder {
    fn default() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_includes_filter_name() {
        assert_eq!(
            export_filename("photo-1700000000000", FilterPreset::Sepia),
            "photobooth-photo-1700000000000-Sepia.png"
        );
    }

    #[test]
    fn test_identity_filter_filename_says_original() {
        assert_eq!(
            export_filename("photo-42", FilterPreset::Original),
            "photobooth-photo-42-original.png"
        );
    }

    #[test]
    fn test_encode_produces_png_magic() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let artifact = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let bytes = rt.block_on(ArtifactEncoder.encode(artifact)).unwrap();
        assert_eq!(bytes[..8], *b"\x89PNG\r\n\x1a\x0a");
    }

    #[test]
    fn test_save_writes_file() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let dir = std::env::temp_dir().join("photobooth-encoding-test");
        let path = rt
            .block_on(ArtifactEncoder.save(
                vec![1, 2, 3],
                dir.clone(),
                "photobooth-photo-1-original.png".to_string(),
            ))
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }
}
