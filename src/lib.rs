//! Sprite locator - find sprites on a sprite sheet
//!
//! This library provides functionality to:
//! - Estimate a sheet's background color
//! - Detect sprite bounding boxes with a margin-tolerant flood fill
//! - Order boxes row by row for atlas building
//! - Read and write box lists as JSON or YAML, extract sprites, draw guides
//!
//! ```
//! use sprite_locator::grid::MemoryGrid;
//! use sprite_locator::{locate, DetectOptions, Sprite};
//!
//! let mut grid = MemoryGrid::from_pixel(16, 8, '.');
//! grid.fill_rect(10, 0, 12, 2, '#');
//! grid.fill_rect(0, 0, 2, 2, '#');
//!
//! let sheet = locate(&grid, &DetectOptions::new(0, 0), Some(0)).unwrap();
//! assert_eq!(
//!     sheet.sprites,
//!     vec![Sprite::from_coords(0, 0, 2, 2), Sprite::from_coords(10, 0, 12, 2)]
//! );
//! ```

pub mod background;
pub mod cli;
pub mod color;
pub mod config;
pub mod detect;
pub mod error;
pub mod grid;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod output;
pub mod rows;

pub use background::estimate_background;
pub use detect::{detect_sprites, locate_sprites, DetectOptions};
pub use error::LocateError;
pub use grid::{PixelGrid, Point};
pub use models::{Sprite, Spritesheet};
pub use rows::sort_into_rows;

/// Run the whole pipeline on one sheet: estimate the background, detect
/// sprites, and, when `sort_margin` is given, order them into rows.
///
/// A sheet without any sprites yields an empty [`Spritesheet`] rather than an
/// error, even when sorting is requested.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] for a grid without pixels and
/// [`LocateError::InvalidMargin`] for a negative detection margin.
pub fn locate<G: PixelGrid>(
    grid: &G,
    options: &DetectOptions,
    sort_margin: Option<u32>,
) -> Result<Spritesheet, LocateError> {
    let sprites = locate_sprites(grid, options)?;
    match sort_margin {
        Some(margin) if !sprites.is_empty() => Ok(Spritesheet::new(sort_into_rows(&sprites, margin)?)),
        _ => Ok(Spritesheet::new(sprites)),
    }
}
