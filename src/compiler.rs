//! Compiler that stacks per-floor output into a single [`Blueprint`].
//!
//! The entry point is [`StructureCompiler`]. Build it from a validated [`BuildConfig`],
//! then call [`StructureCompiler::compile`] with one [`Grid`] per floor, bottom floor
//! first, or [`StructureCompiler::compile_images`] with encoded image bytes.

use crate::blueprint::{Blueprint, FloorSummary};
use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::floor::{FloorOutput, compile_floor};
use crate::grid::{Grid, decode};
use rayon::prelude::*;

/// Compiles floor grids into construction instructions.
///
/// Holds no state besides its configuration, so one compiler can serve any number of
/// runs, including concurrent ones.
#[derive(Clone, Debug)]
pub struct StructureCompiler {
    config: BuildConfig,
}

impl StructureCompiler {
    /// Creates a compiler, rejecting configurations that would produce malformed floors.
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Compiles `grids` in order. Floor `k` sits at `k * floor_height`.
    ///
    /// A stack too tall for `i32` coordinates fails with
    /// [`Error::InvalidConfiguration`] before any output is produced.
    ///
    /// Ceilings are always generated when more than one floor is supplied; a single
    /// floor is roofed only if `generate_ceiling` is set.
    pub fn compile(&self, grids: &[Grid]) -> Result<Blueprint> {
        if grids.is_empty() {
            return Err(Error::EmptyInput);
        }
        let multi = grids.len() > 1;
        let floors = grids
            .iter()
            .enumerate()
            .map(|(index, grid)| compile_floor(grid, index, &self.config, multi))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.assemble(floors))
    }

    /// Same output as [`compile`](Self::compile), with floors compiled on the rayon pool.
    pub fn compile_parallel(&self, grids: &[Grid]) -> Result<Blueprint> {
        if grids.is_empty() {
            return Err(Error::EmptyInput);
        }
        let multi = grids.len() > 1;
        let floors: Vec<FloorOutput> = grids
            .par_iter()
            .enumerate()
            .map(|(index, grid)| compile_floor(grid, index, &self.config, multi))
            .collect::<Result<_>>()?;
        Ok(self.assemble(floors))
    }

    /// Decodes every image, then compiles. Any undecodable image fails the whole run.
    pub fn compile_images<B: AsRef<[u8]>>(&self, images: &[B]) -> Result<Blueprint> {
        let grids = images
            .iter()
            .enumerate()
            .map(|(index, bytes)| decode(bytes.as_ref()).map_err(|e| e.at_floor(index)))
            .collect::<Result<Vec<_>>>()?;
        self.compile(&grids)
    }

    fn assemble(&self, floors: impl IntoIterator<Item = FloorOutput>) -> Blueprint {
        let mut blueprint = Blueprint::new();

        for (index, floor) in floors.into_iter().enumerate() {
            let start = blueprint.instructions.len();
            let footprint = floor.footprint();
            blueprint.instructions.extend(floor.instructions);
            blueprint.floors.push(FloorSummary {
                index,
                base_y: floor.base_y,
                ceiling_y: floor.ceiling_y,
                instructions: start..blueprint.instructions.len(),
                footprint,
                holes: floor.holes.len(),
                ceiling_blocks: floor.ceiling_blocks,
            });
        }

        log::info!(
            "Compiled {} floor(s) into {} instructions",
            blueprint.floors.len(),
            blueprint.len()
        );
        blueprint
    }
}

/// Validates `config` and compiles `grids` sequentially.
pub fn compile(grids: &[Grid], config: &BuildConfig) -> Result<Blueprint> {
    StructureCompiler::new(config.clone())?.compile(grids)
}
