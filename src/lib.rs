//! # floorplan-compiler
//!
//! An engine-agnostic compiler that turns colour coded floor plan images into ordered
//! block construction instructions.
//!
//! Each image is one storey. Pixels are classified against a colour [`Palette`], every
//! class expands into a small column of wall, window, door, light or air blocks, and
//! storeys are stacked by offsetting each floor by `floor_height`. The resulting
//! [`Blueprint`] can be rendered as a Minecraft function file or consumed directly.

pub mod blueprint;
pub mod compiler;
pub mod config;
pub mod error;
pub mod floor;
pub mod grid;
pub mod palette;

pub use blueprint::*;
pub use compiler::*;
pub use config::*;
pub use error::*;
pub use floor::*;
pub use grid::*;
pub use palette::*;
