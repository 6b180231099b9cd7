//! Per-floor compilation: turning one pixel grid into construction instructions.

use crate::blueprint::{BlockState, Footprint, Instruction};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::palette::Category;
use glam::{IVec3, UVec2};
use std::collections::BTreeSet;

/// Light level written for light pixels.
pub const MAX_LIGHT_LEVEL: u8 = 15;

/// Vertical placement of one storey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorFrame {
    pub index: usize,
    pub height: i32,
    /// Lowest block of the storey.
    pub base_y: i32,
    /// Topmost layer, reserved for the ceiling.
    pub ceiling_y: i32,
}

impl FloorFrame {
    /// Places storey `index`. Returns `None` when the storey would not fit in `i32`
    /// coordinates, including the layer just above it.
    pub fn new(index: usize, floor_height: u32) -> Option<Self> {
        let height = i32::try_from(floor_height).ok()?;
        let base_y = i32::try_from(index).ok()?.checked_mul(height)?;
        base_y.checked_add(height)?;
        Some(Self {
            index,
            height,
            base_y,
            ceiling_y: base_y + height - 1,
        })
    }

    /// Whether the vertical span `y0..=y1`, in either order, stays inside the storey.
    pub fn contains_span(&self, y0: i32, y1: i32) -> bool {
        y0.min(y1) >= self.base_y && y0.max(y1) <= self.ceiling_y
    }

    /// Middle of the storey, where windows are centred.
    pub fn center_y(&self) -> i32 {
        self.base_y + self.height / 2
    }

    /// Highest layer walls may reach without touching the ceiling.
    pub fn wall_top(&self) -> i32 {
        self.ceiling_y - 1
    }

    fn at(&self, x: u32, y: i32, z: u32) -> IVec3 {
        IVec3::new(x as i32, y, z as i32)
    }
}

/// Everything one floor produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorOutput {
    pub base_y: i32,
    pub ceiling_y: i32,
    pub instructions: Vec<Instruction>,
    pub occupied_columns: BTreeSet<u32>,
    pub occupied_rows: BTreeSet<u32>,
    /// `(column, row)` cells that must stay open to the floor above.
    pub holes: BTreeSet<(u32, u32)>,
    pub ceiling_blocks: usize,
}

impl FloorOutput {
    /// Bounding rectangle over the occupied columns and rows.
    pub fn footprint(&self) -> Option<Footprint> {
        let (min_x, max_x) = (
            self.occupied_columns.first()?,
            self.occupied_columns.last()?,
        );
        let (min_y, max_y) = (self.occupied_rows.first()?, self.occupied_rows.last()?);
        Some(Footprint {
            min: UVec2::new(*min_x, *min_y),
            max: UVec2::new(*max_x, *max_y),
        })
    }
}

/// Collects instructions for one floor, dropping spans that would leave the storey.
struct Emitter<'a> {
    frame: FloorFrame,
    config: &'a BuildConfig,
    out: Vec<Instruction>,
}

impl<'a> Emitter<'a> {
    fn column(&mut self, x: u32, z: u32, y0: i32, y1: i32, material: &str) {
        if !self.frame.contains_span(y0, y1) {
            return;
        }
        self.out.push(Instruction::fill(
            self.frame.at(x, y0, z),
            self.frame.at(x, y1, z),
            material,
        ));
    }

    fn block(&mut self, x: u32, y: i32, z: u32, material: &str, state: Option<BlockState>) {
        let mut instruction = Instruction::set(self.frame.at(x, y, z), material);
        if let Some(state) = state {
            instruction = instruction.with_state(state);
        }
        self.out.push(instruction);
    }

    fn door_half(&self, half: &str) -> BlockState {
        BlockState::properties([
            ("half", half),
            ("facing", self.config.door_facing.as_str()),
        ])
    }

    fn emit(&mut self, x: u32, z: u32, category: Category) {
        let config: &'a BuildConfig = self.config;
        let m = &config.materials;
        let (wall, glass, door, air, light) = (
            m.wall.as_str(),
            m.glass.as_str(),
            m.door.as_str(),
            m.air.as_str(),
            m.light.as_str(),
        );
        let base = self.frame.base_y;
        let top = self.frame.wall_top();

        match category {
            Category::Hole => self.column(x, z, base, top, air),
            Category::Light => {
                self.block(x, base, z, light, Some(BlockState::Data(MAX_LIGHT_LEVEL)))
            }
            Category::Glass => {
                let center = self.frame.center_y();
                self.column(x, z, base, center - 2, wall);
                self.column(x, z, center + 1, top, wall);
                self.block(x, center - 1, z, glass, None);
                self.block(x, center, z, glass, None);
            }
            Category::Door => {
                let lower = self.door_half("lower");
                let upper = self.door_half("upper");
                self.block(x, base, z, door, Some(lower));
                self.block(x, base + 1, z, door, Some(upper));
                let door_top = base.saturating_add_unsigned(config.door_height);
                self.column(x, z, door_top, top, wall);
            }
            Category::WallPartial2 => {
                let y1 = base.saturating_add(2).min(self.frame.ceiling_y);
                self.column(x, z, base, y1, wall)
            }
            Category::WallPartial1 => {
                let y1 = base.saturating_add(1).min(self.frame.ceiling_y);
                self.column(x, z, base, y1, wall)
            }
            Category::WallDirect | Category::WallSolid => self.block(x, base, z, wall, None),
            Category::Default => self.column(x, z, base, top, wall),
        }
    }
}

/// Compiles one floor.
///
/// `config` must already be validated. Ceilings are generated when `is_multi_floor` or
/// `config.generate_ceiling` is set, over the bounding rectangle of structural pixels,
/// skipping holes and partial height walls.
///
/// Fails with [`Error::InvalidConfiguration`] when the storey lies beyond the `i32`
/// coordinate range, and with [`Error::Decode`] when the grid is too wide for it.
pub fn compile_floor(
    grid: &Grid,
    floor_index: usize,
    config: &BuildConfig,
    is_multi_floor: bool,
) -> Result<FloorOutput> {
    let frame = FloorFrame::new(floor_index, config.floor_height).ok_or_else(|| {
        Error::InvalidConfiguration(format!(
            "floor {} at height {} exceeds the coordinate range",
            floor_index, config.floor_height
        ))
    })?;
    if i32::try_from(grid.width()).is_err() || i32::try_from(grid.height()).is_err() {
        return Err(Error::decode(format!(
            "grid of {}x{} exceeds the coordinate range",
            grid.width(),
            grid.height()
        ))
        .at_floor(floor_index));
    }
    let mut emitter = Emitter {
        frame,
        config,
        out: Vec::new(),
    };
    let mut output = FloorOutput {
        base_y: frame.base_y,
        ceiling_y: frame.ceiling_y,
        ..Default::default()
    };

    // Classified once; the ceiling pass reads it back.
    let mut categories = Vec::with_capacity(grid.width() as usize * grid.height() as usize);

    for (x, y, pixel) in grid.iter() {
        let category = config.palette.classify(pixel, config.tolerance);
        categories.push(category);

        if category == Category::Hole {
            output.holes.insert((x, y));
        } else if category.is_structural() {
            output.occupied_columns.insert(x);
            output.occupied_rows.insert(y);
        }
        emitter.emit(x, y, category);
    }

    if (is_multi_floor || config.generate_ceiling)
        && let Some(footprint) = output.footprint()
    {
        let ceiling = config.materials.ceiling.as_str();
        let before = emitter.out.len();
        for x in footprint.min.x..=footprint.max.x {
            for y in footprint.min.y..=footprint.max.y {
                let idx = y as usize * grid.width() as usize + x as usize;
                let covered = categories
                    .get(idx)
                    .is_some_and(|category| category.covers_ceiling());
                if covered && !output.holes.contains(&(x, y)) {
                    emitter.block(x, frame.ceiling_y, y, ceiling, None);
                }
            }
        }
        output.ceiling_blocks = emitter.out.len() - before;
        log::trace!(
            "Floor {}: {} ceiling blocks over {:?}",
            floor_index,
            output.ceiling_blocks,
            footprint
        );
    }

    log::debug!(
        "Floor {}: base_y={} ceiling_y={} footprint={:?} holes={} instructions={}",
        floor_index,
        frame.base_y,
        frame.ceiling_y,
        output.footprint(),
        output.holes.len(),
        emitter.out.len()
    );

    output.instructions = emitter.out;
    Ok(output)
}
