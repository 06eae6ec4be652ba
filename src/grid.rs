//! Read-only pixel grids consumed by the locator
//!
//! The detector only needs bounds and per-pixel color equality, so any
//! decoded image can be plugged in through [`PixelGrid`].

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// An integer pixel coordinate. May lie outside a grid while probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangular field of opaque, comparable colors.
///
/// Bounds are fixed for the lifetime of the grid and `color_at` must return
/// the same value for the same coordinate on every call.
pub trait PixelGrid {
    type Color: Copy + Eq + Hash + Debug;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Color at `(x, y)`. Callers guarantee the coordinate is in bounds.
    fn color_at(&self, x: u32, y: u32) -> Self::Color;

    /// Whether a signed coordinate falls inside the grid.
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl PixelGrid for RgbaImage {
    type Color = Rgba<u8>;

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn color_at(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }
}

/// Row-major in-memory grid of arbitrary colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryGrid<C> {
    width: u32,
    height: u32,
    cells: Vec<C>,
}

impl<C: Copy> MemoryGrid<C> {
    /// Grid of `width` x `height` filled with one color
    pub fn from_pixel(width: u32, height: u32, color: C) -> Self {
        Self { width, height, cells: vec![color; width as usize * height as usize] }
    }

    /// Grid built from rows of equal length. Returns `None` for ragged input.
    pub fn from_rows(rows: Vec<Vec<C>>) -> Option<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if rows.iter().any(|r| r.len() as u32 != width) {
            return None;
        }
        let cells = rows.into_iter().flatten().collect();
        Some(Self { width, height, cells })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Set a single in-bounds pixel; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, color: C) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = color;
        }
    }

    /// Paint the inclusive box `(x0, y0)..=(x1, y1)`, clipped to the grid
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: C) {
        for y in y0..=y1.min(self.height.saturating_sub(1)) {
            for x in x0..=x1.min(self.width.saturating_sub(1)) {
                self.set(x, y, color);
            }
        }
    }
}

impl<C: Copy + Eq + Hash + Debug> PixelGrid for MemoryGrid<C> {
    type Color = C;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_at(&self, x: u32, y: u32) -> C {
        self.cells[self.index(x, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_grid_from_rows() {
        let grid = MemoryGrid::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.color_at(0, 0), 1);
        assert_eq!(grid.color_at(2, 1), 6);
    }

    #[test]
    fn test_memory_grid_ragged_rows_rejected() {
        assert!(MemoryGrid::from_rows(vec![vec![1, 2], vec![3]]).is_none());
    }

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut grid = MemoryGrid::from_pixel(4, 4, 0u8);
        grid.fill_rect(2, 2, 10, 10, 7);
        assert_eq!(grid.color_at(3, 3), 7);
        assert_eq!(grid.color_at(2, 2), 7);
        assert_eq!(grid.color_at(1, 1), 0);
    }

    #[test]
    fn test_contains_signed_coordinates() {
        let grid = MemoryGrid::from_pixel(3, 2, 0u8);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 1));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 2));
    }

    #[test]
    fn test_rgba_image_grid() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        assert_eq!(PixelGrid::width(&img), 2);
        assert_eq!(img.color_at(1, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(img.color_at(0, 1), Rgba([255, 255, 255, 255]));
        assert!(!PixelGrid::is_empty(&img));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_index_past_u32_range() {
        // Zero-sized cells, so the huge grid costs no memory
        let mut grid = MemoryGrid::from_pixel(65_536, 65_537, ());
        assert_eq!(grid.pixel_count(), 65_536 * 65_537);
        assert_eq!(grid.index(65_535, 65_536), 4_295_032_831);
        grid.set(65_535, 65_536, ());
        grid.color_at(65_535, 65_536);
    }

    #[test]
    fn test_empty_grid() {
        let grid: MemoryGrid<u8> = MemoryGrid::from_rows(vec![]).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.pixel_count(), 0);
    }
}
