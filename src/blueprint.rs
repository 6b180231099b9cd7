use crate::error::Result;
use glam::{IVec3, UVec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::path::Path;

/// First line of every generated function file.
pub const MCFUNCTION_HEADER: &str = "# Minecraft building generation commands";

/// Block state metadata attached to a placed block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    /// Bracketed properties, e.g. `[half=lower,facing=north]`.
    Properties(Vec<(String, String)>),
    /// Legacy numeric data value written after the identifier, e.g. light level `15`.
    Data(u8),
}

impl BlockState {
    pub fn properties<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Properties(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Looks up a property value. Always `None` for data values.
    pub fn property(&self, key: &str) -> Option<&str> {
        match self {
            Self::Properties(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            Self::Data(_) => None,
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Properties(pairs) => {
                f.write_str("[")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("]")
            }
            Self::Data(value) => write!(f, " {value}"),
        }
    }
}

/// An atomic construction directive.
///
/// Coordinates are offsets relative to wherever the consumer anchors the structure:
/// `x` is the image column, `y` the height and `z` the image row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Fill the inclusive box between two corners.
    FillRegion {
        from: IVec3,
        to: IVec3,
        material: String,
        state: Option<BlockState>,
    },
    /// Place one block.
    SetBlock {
        pos: IVec3,
        material: String,
        state: Option<BlockState>,
    },
}

impl Instruction {
    pub fn fill(from: IVec3, to: IVec3, material: impl Into<String>) -> Self {
        Self::FillRegion {
            from,
            to,
            material: material.into(),
            state: None,
        }
    }

    pub fn set(pos: IVec3, material: impl Into<String>) -> Self {
        Self::SetBlock {
            pos,
            material: material.into(),
            state: None,
        }
    }

    /// Attaches block state metadata (builder pattern).
    pub fn with_state(mut self, new_state: BlockState) -> Self {
        match &mut self {
            Self::FillRegion { state, .. } | Self::SetBlock { state, .. } => {
                *state = Some(new_state)
            }
        }
        self
    }

    pub fn material(&self) -> &str {
        match self {
            Self::FillRegion { material, .. } | Self::SetBlock { material, .. } => material,
        }
    }

    pub fn state(&self) -> Option<&BlockState> {
        match self {
            Self::FillRegion { state, .. } | Self::SetBlock { state, .. } => state.as_ref(),
        }
    }

    /// Inclusive `(min, max)` corners of the affected volume.
    pub fn bounds(&self) -> (IVec3, IVec3) {
        match self {
            Self::FillRegion { from, to, .. } => (from.min(*to), from.max(*to)),
            Self::SetBlock { pos, .. } => (*pos, *pos),
        }
    }

    pub fn is_set_block(&self) -> bool {
        matches!(self, Self::SetBlock { .. })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FillRegion { from, to, .. } => write!(
                f,
                "fill ~{} ~{} ~{} ~{} ~{} ~{} ",
                from.x, from.y, from.z, to.x, to.y, to.z
            )?,
            Self::SetBlock { pos, .. } => {
                write!(f, "setblock ~{} ~{} ~{} ", pos.x, pos.y, pos.z)?
            }
        }
        f.write_str(self.material())?;
        if let Some(state) = self.state() {
            write!(f, "{state}")?;
        }
        Ok(())
    }
}

/// Inclusive rectangle of occupied image cells, in `(column, row)` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub min: UVec2,
    pub max: UVec2,
}

impl Footprint {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min.x..=self.max.x).contains(&x) && (self.min.y..=self.max.y).contains(&y)
    }

    pub fn area(&self) -> u64 {
        let size = self.max - self.min + UVec2::ONE;
        size.x as u64 * size.y as u64
    }
}

/// What one floor contributed to a [`Blueprint`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSummary {
    pub index: usize,
    pub base_y: i32,
    pub ceiling_y: i32,
    /// Slice of [`Blueprint::instructions`] emitted for this floor.
    pub instructions: Range<usize>,
    /// Bounding rectangle of structural pixels, if there were any.
    pub footprint: Option<Footprint>,
    pub holes: usize,
    pub ceiling_blocks: usize,
}

/// The ordered output of one compilation run across all floors.
///
/// Instructions must be applied in order; later ones may overwrite earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub instructions: Vec<Instruction>,
    pub floors: Vec<FloorSummary>,
}

impl Blueprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions emitted for floor `index`.
    pub fn floor_instructions(&self, index: usize) -> &[Instruction] {
        self.floors
            .get(index)
            .and_then(|floor| self.instructions.get(floor.instructions.clone()))
            .unwrap_or(&[])
    }

    /// Renders the function file: a header comment then one command per line.
    pub fn to_mcfunction(&self) -> String {
        let mut out = String::with_capacity(self.instructions.len() * 48);
        out.push_str(MCFUNCTION_HEADER);
        out.push('\n');
        for instruction in &self.instructions {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }

    pub fn write_mcfunction(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_mcfunction())?;
        Ok(())
    }
}
