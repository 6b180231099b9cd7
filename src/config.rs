//! Build configuration for structure compilation.
//!
//! A [`BuildConfig`] is an immutable value handed to every compilation call. Nothing in
//! the crate keeps configuration in shared state, so concurrent callers can each pass
//! their own.

use crate::error::{Error, Result};
use crate::palette::{DEFAULT_TOLERANCE, Palette};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Block identifiers for each structural role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Materials {
    pub wall: String,
    pub glass: String,
    pub door: String,
    pub air: String,
    pub ceiling: String,
    pub light: String,
}

impl Default for Materials {
    fn default() -> Self {
        Self {
            wall: "minecraft:black_stained_glass".into(),
            glass: "minecraft:light_blue_stained_glass".into(),
            door: "minecraft:oak_door".into(),
            air: "minecraft:air".into(),
            ceiling: "minecraft:light_gray_stained_glass".into(),
            light: "minecraft:light_block".into(),
        }
    }
}

impl Materials {
    fn roles(&self) -> [(&'static str, &str); 6] {
        [
            ("wall", self.wall.as_str()),
            ("glass", self.glass.as_str()),
            ("door", self.door.as_str()),
            ("air", self.air.as_str()),
            ("ceiling", self.ceiling.as_str()),
            ("light", self.light.as_str()),
        ]
    }
}

/// Horizontal direction a placed door faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorFacing {
    #[default]
    North,
    South,
    East,
    West,
}

impl DoorFacing {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// Parameters for one compilation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Blocks per storey, ceiling layer included. Must be at least 2 to fit a door.
    pub floor_height: u32,
    /// Height at which the wall above a door starts. `1 <= door_height < floor_height`.
    pub door_height: u32,
    /// Roof a single floor. Multi-floor runs always get ceilings.
    pub generate_ceiling: bool,
    /// Per-channel tolerance for palette matching.
    pub tolerance: u8,
    pub door_facing: DoorFacing,
    pub materials: Materials,
    pub palette: Palette,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            floor_height: 4,
            door_height: 2,
            generate_ceiling: false,
            tolerance: DEFAULT_TOLERANCE,
            door_facing: DoorFacing::default(),
            materials: Materials::default(),
            palette: Palette::standard(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floor_height(mut self, floor_height: u32) -> Self {
        self.floor_height = floor_height;
        self
    }

    pub fn with_door_height(mut self, door_height: u32) -> Self {
        self.door_height = door_height;
        self
    }

    pub fn with_ceiling(mut self, generate_ceiling: bool) -> Self {
        self.generate_ceiling = generate_ceiling;
        self
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_door_facing(mut self, door_facing: DoorFacing) -> Self {
        self.door_facing = door_facing;
        self
    }

    pub fn with_materials(mut self, materials: Materials) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks the invariants every compilation relies on.
    pub fn validate(&self) -> Result<()> {
        if self.floor_height == 0 {
            return Err(Error::InvalidConfiguration(
                "floor_height must be at least 1".into(),
            ));
        }
        if self.door_height == 0 || self.door_height >= self.floor_height {
            return Err(Error::InvalidConfiguration(format!(
                "door_height must be in 1..{} (got {})",
                self.floor_height, self.door_height
            )));
        }
        if i32::try_from(self.floor_height).is_err() {
            return Err(Error::InvalidConfiguration(format!(
                "floor_height {} is out of range",
                self.floor_height
            )));
        }
        for (role, id) in self.materials.roles() {
            if id.trim().is_empty() {
                return Err(Error::InvalidConfiguration(format!(
                    "{role} material identifier is empty"
                )));
            }
        }
        Ok(())
    }
}
