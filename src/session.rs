// SPDX-License-Identifier: GPL-3.0-only

//! Session gallery and selection state
//!
//! Pure in-memory state: the gallery lives only for the current session and
//! is mutated exclusively through the operations below. Photos are
//! append-only (newest first); there is no delete.

use crate::catalog::{self, Frame};
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, warn};

/// A completed capture
///
/// Created atomically by the capture sequence once all required stills are
/// acquired, and immutable afterwards. `stills.len()` always equals the
/// `shot_count` of the frame referenced by `frame_id` at capture time;
/// frames are immutable, so the invariant holds for the photo's lifetime
/// even if the active frame selection changes later.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    /// Time-derived unique id ("photo-<unix-millis>")
    pub id: String,
    /// Stills in acquisition order
    pub stills: Vec<Arc<RgbaImage>>,
    /// Frame active when the capture started
    pub frame_id: String,
}

impl CapturedPhoto {
    /// The frame this photo was captured with, if still known to the catalog
    pub fn frame(&self) -> Option<&'static Frame> {
        catalog::find_frame(&self.frame_id)
    }
}

/// Per-session gallery and selection state
pub struct Session {
    photos: Vec<CapturedPhoto>,
    selected_frame: &'static Frame,
    viewed: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            selected_frame: catalog::default_frame(),
            viewed: None,
        }
    }

    /// All captured photos, newest first
    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    /// Prepend a completed photo
    pub fn add_photo(&mut self, photo: CapturedPhoto) {
        debug!(id = %photo.id, stills = photo.stills.len(), "Photo added to gallery");
        self.photos.insert(0, photo);
    }

    /// The frame used for the next capture
    pub fn selected_frame(&self) -> &'static Frame {
        self.selected_frame
    }

    /// Change the active frame for future captures
    ///
    /// Unknown ids fall back to the default frame; already-captured photos
    /// are unaffected.
    pub fn select_frame(&mut self, id: &str) {
        if catalog::find_frame(id).is_none() {
            warn!(id, "Unknown frame id selected, falling back to default");
        }
        self.selected_frame = catalog::frame_or_default(id);
    }

    /// Set or clear the currently inspected photo
    pub fn view_photo(&mut self, id: Option<&str>) {
        self.viewed = id.map(str::to_owned);
    }

    /// The currently inspected photo, if any
    pub fn viewed_photo(&self) -> Option<&CapturedPhoto> {
        let id = self.viewed.as_deref()?;
        self.photos.iter().find(|p| p.id == id)
    }

    /// Move the viewed photo by an offset within the gallery order
    pub fn view_neighbor(&mut self, offset: isize) {
        let Some(current) = self.viewed.as_deref() else {
            return;
        };
        let Some(idx) = self.photos.iter().position(|p| p.id == current) else {
            return;
        };
        let target = idx as isize + offset;
        if target >= 0 && (target as usize) < self.photos.len() {
            self.viewed = Some(self.photos[target as usize].id.clone());
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str, frame_id: &str) -> CapturedPhoto {
        let still = Arc::new(RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255])));
        CapturedPhoto {
            id: id.to_string(),
            stills: vec![still],
            frame_id: frame_id.to_string(),
        }
    }

    #[test]
    fn test_add_photo_prepends() {
        let mut session = Session::new();
        session.add_photo(photo("photo-1", "polaroid"));
        session.add_photo(photo("photo-2", "polaroid"));

        let ids: Vec<&str> = session.photos().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["photo-2", "photo-1"]);
    }

    #[test]
    fn test_select_unknown_frame_falls_back() {
        let mut session = Session::new();
        session.select_frame("photo-strip");
        assert_eq!(session.selected_frame().id, "photo-strip");

        session.select_frame("does-not-exist");
        assert_eq!(session.selected_frame().id, catalog::default_frame().id);
    }

    #[test]
    fn test_view_photo_set_and_clear() {
        let mut session = Session::new();
        session.add_photo(photo("photo-1", "polaroid"));

        session.view_photo(Some("photo-1"));
        assert_eq!(session.viewed_photo().unwrap().id, "photo-1");

        session.view_photo(None);
        assert!(session.viewed_photo().is_none());
    }

    #[test]
    fn test_view_neighbor_stays_in_bounds() {
        let mut session = Session::new();
        session.add_photo(photo("photo-1", "polaroid"));
        session.add_photo(photo("photo-2", "polaroid"));

        session.view_photo(Some("photo-2"));
        session.view_neighbor(-1);
        assert_eq!(session.viewed_photo().unwrap().id, "photo-2");

        session.view_neighbor(1);
        assert_eq!(session.viewed_photo().unwrap().id, "photo-1");
        session.view_neighbor(1);
        assert_eq!(session.viewed_photo().unwrap().id, "photo-1");
    }

    #[test]
    fn test_photo_with_retired_frame_id_resolves_to_none() {
        let p = photo("photo-1", "no-such-frame");
        assert!(p.frame().is_none());
    }
}
