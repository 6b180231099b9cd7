//! Decoding floor images into pixel grids.

use crate::error::{Error, Result};
use crate::palette::Rgb;
use image::RgbImage;
use std::path::Path;

/// A rectangular grid of pixels for one floor.
///
/// `x` is the image column and `y` the image row. The floor compiler maps rows onto
/// the world `z` axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Grid {
    /// Builds a grid by evaluating `f(x, y)` for every cell, row by row.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wraps an already decoded RGB image.
    pub fn from_rgb_image(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::decode(format!(
                "image has zero size ({width}x{height})"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: img.pixels().map(|&px| Rgb::from(px)).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, row `y`. Returns `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterates `(x, y, pixel)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &px)| ((i as u32) % width, (i as u32) / width, px))
    }
}

/// Decodes any raster format supported by `image` into a [`Grid`], discarding alpha.
pub fn decode(bytes: &[u8]) -> Result<Grid> {
    let img = image::load_from_memory(bytes).map_err(|e| Error::decode(e.to_string()))?;
    Grid::from_rgb_image(&img.to_rgb8())
}

/// Reads and decodes a floor image from disk.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("Decoding {} ({} bytes)", path.display(), bytes.len());
    decode(&bytes)
}
