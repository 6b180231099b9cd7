//! Colour classification for floor plan pixels.
//!
//! Every pixel of a floor image is mapped to a [`Category`] by testing it against an
//! ordered [`Palette`] of reference colours. The first entry whose colour lies within
//! the tolerance window on all three channels wins; anything else is [`Category::Default`].

use serde::{Deserialize, Serialize};

/// Default per-channel tolerance used when matching pixels against the palette.
pub const DEFAULT_TOLERANCE: u8 = 20;

/// A single RGB pixel as read from a decoded floor image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Largest absolute difference over the three channels.
    pub fn channel_distance(self, other: Rgb) -> u8 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0)
    }

    /// True when every channel is within `tolerance` of `reference`.
    pub fn matches(self, reference: Rgb, tolerance: u8) -> bool {
        self.channel_distance(reference) <= tolerance
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(px: image::Rgb<u8>) -> Self {
        Self(px.0)
    }
}

/// The structural role a pixel plays in the generated building.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Green: an opening in the ceiling, cleared with air.
    Hole,
    /// White: a floor-level light source.
    Light,
    /// Blue: wall with a two block window at mid height.
    Glass,
    /// Red: a two block door with wall above.
    Door,
    /// Purple: wall three blocks tall.
    WallPartial2,
    /// Yellow: wall two blocks tall.
    WallPartial1,
    /// Cyan: a single block at floor level.
    WallDirect,
    /// Brown: a single block at floor level, still roofed over.
    WallSolid,
    /// Anything unmatched: a full height wall.
    Default,
}

impl Category {
    /// Whether the pixel counts towards the occupied footprint used to bound the ceiling.
    pub fn is_structural(self) -> bool {
        !matches!(self, Self::Hole | Self::Light)
    }

    /// Whether a ceiling block may be placed above this pixel.
    ///
    /// Partial height walls keep their tops open.
    pub fn covers_ceiling(self) -> bool {
        !matches!(
            self,
            Self::WallPartial2 | Self::WallPartial1 | Self::WallDirect
        )
    }
}

/// One reference colour in a [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub category: Category,
    pub color: Rgb,
}

/// An ordered list of reference colours. Order is priority: earlier entries win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl Palette {
    /// The colour coding used by hand drawn floor plans.
    pub fn standard() -> Self {
        let entries = [
            (Category::Hole, Rgb::new(0, 255, 0)),
            (Category::Light, Rgb::new(255, 255, 255)),
            (Category::Glass, Rgb::new(0, 0, 255)),
            (Category::Door, Rgb::new(255, 0, 0)),
            (Category::WallPartial2, Rgb::new(255, 0, 255)),
            (Category::WallPartial1, Rgb::new(255, 255, 0)),
            (Category::WallDirect, Rgb::new(0, 255, 255)),
            (Category::WallSolid, Rgb::new(156, 90, 60)),
        ]
        .into_iter()
        .map(|(category, color)| PaletteEntry { category, color })
        .collect();

        Self { entries }
    }

    /// A palette with no entries. Every pixel classifies as [`Category::Default`].
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a reference colour at the lowest priority (builder pattern).
    pub fn with_entry(mut self, category: Category, color: Rgb) -> Self {
        self.entries.push(PaletteEntry { category, color });
        self
    }

    pub fn classify(&self, pixel: Rgb, tolerance: u8) -> Category {
        classify(pixel, self, tolerance)
    }
}

/// Classifies `pixel` against `palette`, first match wins.
pub fn classify(pixel: Rgb, palette: &Palette, tolerance: u8) -> Category {
    palette
        .entries
        .iter()
        .find(|entry| pixel.matches(entry.color, tolerance))
        .map(|entry| entry.category)
        .unwrap_or(Category::Default)
}
