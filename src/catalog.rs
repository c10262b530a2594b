// SPDX-License-Identifier: GPL-3.0-only

//! Compiled-in frame catalog and filter presets
//!
//! Frames are immutable and loaded once at startup. Each frame carries a
//! layout shape (single photo or multi-shot strip), the number of stills a
//! capture sequence must acquire, an aspect ratio, and two presentation
//! variants (full and preview) describing its decorative styling.

/// Layout shape of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayout {
    /// One full-bleed photo
    Single,
    /// Fixed-count vertical strip of photos
    Strip,
}

/// Aspect ratio as a width:height rational
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Height matching this ratio for a given width
    pub fn height_for_width(&self, width: u32) -> u32 {
        width * self.height / self.width
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Border style of a frame variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// RGBA border color
    pub color: [u8; 4],
    /// Thickness in logical pixels
    pub thickness: u32,
    /// Draw only the top and bottom edges (film strip style)
    pub horizontal_only: bool,
}

/// Presentation styling for one frame variant
///
/// Expressed in logical pixels; the export renderer multiplies everything
/// by the export scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStyle {
    /// Background fill, `None` leaves the canvas transparent
    pub background: Option<[u8; 4]>,
    /// Optional border drawn inside the canvas edge
    pub border: Option<Border>,
    /// Padding between border and photo area
    pub padding: u32,
    /// Extra bottom margin (the Polaroid caption area)
    pub bottom_extra: u32,
    /// Gap between stills in strip layouts
    pub gap: u32,
}

/// A decorative frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub id: &'static str,
    pub name: &'static str,
    pub layout: FrameLayout,
    /// Number of stills one capture sequence acquires for this frame
    pub shot_count: u32,
    pub aspect: AspectRatio,
    /// Full-size presentation variant (preview area, viewer, export)
    pub style: FrameStyle,
    /// Scaled-down variant for gallery thumbnails
    pub preview: FrameStyle,
}

const PORTRAIT: AspectRatio = AspectRatio { width: 3, height: 4 };

const NO_BORDER: Option<Border> = None;

/// All available frames. The first entry is the default selection.
pub const FRAMES: [Frame; 6] = [
    Frame {
        id: "polaroid",
        name: "Classic Polaroid",
        layout: FrameLayout::Single,
        shot_count: 1,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: Some([0xf5, 0xf5, 0xf4, 0xff]),
            border: Some(Border {
                color: [0xd6, 0xd3, 0xd1, 0xff],
                thickness: 2,
                horizontal_only: false,
            }),
            padding: 16,
            bottom_extra: 48,
            gap: 0,
        },
        preview: FrameStyle {
            background: Some([0xf5, 0xf5, 0xf4, 0xff]),
            border: Some(Border {
                color: [0xd6, 0xd3, 0xd1, 0xff],
                thickness: 1,
                horizontal_only: false,
            }),
            padding: 4,
            bottom_extra: 16,
            gap: 0,
        },
    },
    Frame {
        id: "ornate",
        name: "Ornate Gold",
        layout: FrameLayout::Single,
        shot_count: 1,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: Some([0x1c, 0x19, 0x17, 0xff]),
            border: Some(Border {
                color: [0xd9, 0x77, 0x06, 0xff],
                thickness: 8,
                horizontal_only: false,
            }),
            padding: 24,
            bottom_extra: 0,
            gap: 0,
        },
        preview: FrameStyle {
            background: Some([0x1c, 0x19, 0x17, 0xff]),
            border: Some(Border {
                color: [0xd9, 0x77, 0x06, 0xff],
                thickness: 4,
                horizontal_only: false,
            }),
            padding: 4,
            bottom_extra: 0,
            gap: 0,
        },
    },
    Frame {
        id: "filmstrip",
        name: "Film Strip",
        layout: FrameLayout::Single,
        shot_count: 1,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: Some([0x00, 0x00, 0x00, 0xff]),
            border: Some(Border {
                color: [0x44, 0x40, 0x3c, 0xff],
                thickness: 8,
                horizontal_only: true,
            }),
            padding: 16,
            bottom_extra: 0,
            gap: 0,
        },
        preview: FrameStyle {
            background: Some([0x00, 0x00, 0x00, 0xff]),
            border: Some(Border {
                color: [0x44, 0x40, 0x3c, 0xff],
                thickness: 2,
                horizontal_only: true,
            }),
            padding: 4,
            bottom_extra: 0,
            gap: 0,
        },
    },
    Frame {
        id: "scrapbook",
        name: "Scrapbook",
        layout: FrameLayout::Single,
        shot_count: 1,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: Some([0xfe, 0xf3, 0xc7, 0xff]),
            border: Some(Border {
                color: [0x92, 0x40, 0x0e, 0xff],
                thickness: 2,
                horizontal_only: false,
            }),
            padding: 16,
            bottom_extra: 0,
            gap: 0,
        },
        preview: FrameStyle {
            background: Some([0xfe, 0xf3, 0xc7, 0xff]),
            border: Some(Border {
                color: [0x92, 0x40, 0x0e, 0xff],
                thickness: 1,
                horizontal_only: false,
            }),
            padding: 4,
            bottom_extra: 0,
            gap: 0,
        },
    },
    Frame {
        id: "minimalist",
        name: "Minimalist Black",
        layout: FrameLayout::Single,
        shot_count: 1,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: None,
            border: Some(Border {
                color: [0xe7, 0xe5, 0xe4, 0xff],
                thickness: 4,
                horizontal_only: false,
            }),
            padding: 8,
            bottom_extra: 0,
            gap: 0,
        },
        preview: FrameStyle {
            background: None,
            border: Some(Border {
                color: [0xe7, 0xe5, 0xe4, 0xff],
                thickness: 2,
                horizontal_only: false,
            }),
            padding: 4,
            bottom_extra: 0,
            gap: 0,
        },
    },
    Frame {
        id: "photo-strip",
        name: "Photo Strip",
        layout: FrameLayout::Strip,
        shot_count: 2,
        aspect: PORTRAIT,
        style: FrameStyle {
            background: Some([0x00, 0x00, 0x00, 0xff]),
            border: Some(Border {
                color: [0x44, 0x40, 0x3c, 0xff],
                thickness: 4,
                horizontal_only: false,
            }),
            padding: 12,
            bottom_extra: 0,
            gap: 8,
        },
        preview: FrameStyle {
            background: Some([0x00, 0x00, 0x00, 0xff]),
            border: NO_BORDER,
            padding: 2,
            bottom_extra: 0,
            gap: 2,
        },
    },
];

/// Look up a frame by id
pub fn find_frame(id: &str) -> Option<&'static Frame> {
    FRAMES.iter().find(|f| f.id == id)
}

/// The default frame (first catalog entry)
pub fn default_frame() -> &'static Frame {
    &FRAMES[0]
}

/// Look up a frame by id, falling back to the default frame
pub fn frame_or_default(id: &str) -> &'static Frame {
    find_frame(id).unwrap_or_else(default_frame)
}

/// Filter presets applied when compositing an export artifact
///
/// A fixed enumerated set; none of the presets expose tunable parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPreset {
    /// No adjustment (displays as "Original")
    #[default]
    Original,
    /// Sepia tone (warm brownish tint)
    Sepia,
    /// Desaturated black & white
    Mono,
    /// Boosted contrast, brightness and saturation
    Vivid,
}

impl FilterPreset {
    /// All presets for UI iteration
    pub const ALL: [FilterPreset; 4] = [
        FilterPreset::Original,
        FilterPreset::Sepia,
        FilterPreset::Mono,
        FilterPreset::Vivid,
    ];

    /// Cycle to the next preset: Original -> Sepia -> Mono -> Vivid -> Original
    pub fn next(self) -> Self {
        match self {
            FilterPreset::Original => FilterPreset::Sepia,
            FilterPreset::Sepia => FilterPreset::Mono,
            FilterPreset::Mono => FilterPreset::Vivid,
            FilterPreset::Vivid => FilterPreset::Original,
        }
    }

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterPreset::Original => "Original",
            FilterPreset::Sepia => "Sepia",
            FilterPreset::Mono => "Mono",
            FilterPreset::Vivid => "Vivid",
        }
    }

    /// Slug used in export filenames
    ///
    /// The identity preset downloads as "original" so repeated downloads of
    /// the same photo are distinguishable per filter.
    pub fn file_slug(&self) -> &'static str {
        match self {
            FilterPreset::Original => "original",
            FilterPreset::Sepia => "Sepia",
            FilterPreset::Mono => "Mono",
            FilterPreset::Vivid => "Vivid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_ids_unique() {
        for (i, frame) in FRAMES.iter().enumerate() {
            for other in &FRAMES[i + 1..] {
                assert_ne!(frame.id, other.id, "Duplicate frame id: {}", frame.id);
            }
        }
    }

    #[test]
    fn test_shot_counts_match_layout() {
        for frame in &FRAMES {
            match frame.layout {
                FrameLayout::Single => assert_eq!(frame.shot_count, 1),
                FrameLayout::Strip => assert!(frame.shot_count > 1),
            }
        }
    }

    #[test]
    fn test_unknown_frame_falls_back_to_default() {
        assert_eq!(frame_or_default("no-such-frame").id, default_frame().id);
        assert_eq!(frame_or_default("photo-strip").id, "photo-strip");
    }

    #[test]
    fn test_filter_cycle_visits_all_presets() {
        let mut preset = FilterPreset::Original;
        let mut seen = Vec::new();
        for _ in 0..FilterPreset::ALL.len() {
            seen.push(preset);
            preset = preset.next();
        }
        assert_eq!(preset, FilterPreset::Original);
        assert_eq!(seen.len(), FilterPreset::ALL.len());
    }

    #[test]
    fn test_identity_filter_slug_is_lowercase_original() {
        assert_eq!(FilterPreset::Original.file_slug(), "original");
        assert_eq!(FilterPreset::Sepia.file_slug(), "Sepia");
    }
}
