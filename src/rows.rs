//! Row ordering - arranges detected sprites into reading order
//!
//! Works like a horizontal ray cast. The remaining sprite closest to the sheet
//! origin seeds a row; a ray is cast from the seed's center to the right edge
//! of the sheet and every sprite it passes through (with `margin` slack around
//! each box) joins that row. The row is emitted left to right by center and
//! the process repeats on what is left.

use log::debug;

use crate::error::LocateError;
use crate::models::{Sprite, Spritesheet};

/// Reorder sprites row by row, top to bottom, then left to right.
///
/// The output always holds exactly the input sprites. Every pass removes at
/// least the row seed, so at most `sprites.len()` rows are extracted.
///
/// # Errors
///
/// Returns [`LocateError::EmptySheet`] when `sprites` is empty.
pub fn sort_into_rows(sprites: &[Sprite], margin: u32) -> Result<Vec<Sprite>, LocateError> {
    let Some(right_edge) = sprites.iter().map(|s| s.max.x).max() else {
        return Err(LocateError::EmptySheet);
    };
    let margin = margin.min(i32::MAX as u32) as i32;

    let mut remaining: Vec<Sprite> = sprites.to_vec();
    let mut sorted = Vec::with_capacity(sprites.len());

    while !remaining.is_empty() {
        debug!("finding top row of sprites among {} remaining", remaining.len());
        let row = pop_top_row(&mut remaining, right_edge, margin);
        debug!("row of {} sprites, {} unsorted remaining", row.len(), remaining.len());
        sorted.extend(row);
    }

    Ok(sorted)
}

/// Remove the next row from `remaining` and return it sorted by center x
fn pop_top_row(remaining: &mut Vec<Sprite>, right_edge: i32, margin: i32) -> Vec<Sprite> {
    let seed_idx = find_seed(remaining);
    let seed = remaining[seed_idx];
    let center = seed.center();

    let mut row = vec![seed];
    let mut rest = Vec::with_capacity(remaining.len());
    for (i, sprite) in remaining.drain(..).enumerate() {
        if i == seed_idx {
            continue;
        }
        if ray_hits(center.x, center.y, right_edge, &sprite, margin) {
            row.push(sprite);
        } else {
            rest.push(sprite);
        }
    }
    *remaining = rest;

    // Stable, so equal centers keep their input order
    row.sort_by_key(|s| s.center().x);
    row
}

/// Index of the sprite whose top-left corner is nearest the origin.
/// The first of several equally near sprites wins.
fn find_seed(sprites: &[Sprite]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for (i, sprite) in sprites.iter().enumerate() {
        let dist = sprite.origin_distance();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Whether the horizontal segment from `(x0, y)` to `(x1, y)` touches the
/// sprite's box grown by `margin`.
///
/// Both bounds are tested on each axis; this is the same answer as stepping
/// along the segment one pixel at a time.
fn ray_hits(x0: i32, y: i32, x1: i32, sprite: &Sprite, margin: i32) -> bool {
    let min_x = sprite.min.x.saturating_sub(margin);
    let max_x = sprite.max.x.saturating_add(margin);
    let min_y = sprite.min.y.saturating_sub(margin);
    let max_y = sprite.max.y.saturating_add(margin);

    let within_y = y >= min_y && y <= max_y;
    let within_x = x0.max(min_x) <= x1.min(max_x);
    within_y && within_x
}

impl Spritesheet {
    /// Copy of this sheet with sprites in reading order
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::EmptySheet`] if the sheet has no sprites.
    pub fn sorted(&self, margin: u32) -> Result<Spritesheet, LocateError> {
        sort_into_rows(&self.sprites, margin).map(Spritesheet::new)
    }
}
