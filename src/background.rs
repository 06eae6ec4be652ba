//! Background color estimation
//!
//! The background of a sprite sheet is assumed to cover more area than any
//! single sprite color, so it is simply the most frequent color.

use std::collections::HashMap;

use crate::error::LocateError;
use crate::grid::PixelGrid;

/// Return the most frequent color in the grid.
///
/// Pixels are scanned row-major. When several colors share the highest
/// count, the one encountered first in scan order wins, so repeated calls on
/// the same grid always agree.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] if the grid has no pixels.
pub fn estimate_background<G: PixelGrid>(grid: &G) -> Result<G::Color, LocateError> {
    if grid.is_empty() {
        return Err(LocateError::EmptyInput);
    }

    // color -> (count, first seen scan index)
    let mut frequencies: HashMap<G::Color, (usize, usize)> = HashMap::new();
    let mut index = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let entry = frequencies.entry(grid.color_at(x, y)).or_insert((0, index));
            entry.0 += 1;
            index += 1;
        }
    }

    frequencies
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| color)
        .ok_or(LocateError::EmptyInput)
}
