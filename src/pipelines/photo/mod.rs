// SPDX-License-Identifier: GPL-3.0-only

//! Async export pipeline
//!
//! ```text
//! CapturedPhoto + Frame + Filter → Render → PNG Encode → Disk I/O
//! ```
//!
//! All stages run off the UI thread on the blocking pool. The renderer is
//! injected; when the booth has no renderer the export features degrade to
//! an error notice instead of crashing.

pub mod compose;
pub mod encoding;
pub mod filters;

pub use compose::{CompositeRenderer, Renderer};
pub use encoding::{ArtifactEncoder, export_filename};

use crate::catalog::{FilterPreset, Frame};
use crate::session::CapturedPhoto;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Complete export pipeline
///
/// Orchestrates render → encode → save for one artifact.
pub struct ExportPipeline {
    renderer: Arc<dyn Renderer>,
    encoder: ArtifactEncoder,
}

impl ExportPipeline {
    /// Create a pipeline around an injected renderer
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            encoder: ArtifactEncoder,
        }
    }

    /// Render and save one artifact, returning the saved path
    pub async fn export(
        &self,
        photo: &CapturedPhoto,
        frame: &'static Frame,
        filter: FilterPreset,
        output_dir: PathBuf,
    ) -> Result<PathBuf, String> {
        info!(
            photo = %photo.id,
            frame = frame.id,
            filter = filter.display_name(),
            "Exporting artifact"
        );

        let filename = export_filename(&photo.id, filter);

        // Rendering is CPU-bound; stills are Arc'd so the clone is cheap
        let renderer = self.renderer.clone();
        let photo = photo.clone();
        let artifact = tokio::task::spawn_blocking(move || renderer.render(&photo, frame, filter))
            .await
            .map_err(|e| format!("Render task error: {}", e))??;

        let encoded = self.encoder.encode(artifact).await?;
        self.encoder.save(encoded, output_dir, filename).await
    }
}
