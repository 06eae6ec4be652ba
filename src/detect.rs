//! Sprite region detection
//!
//! Segments a sheet into sprites with a margin-tolerant flood fill over
//! non-background pixels:
//!
//! 1. Scan every pixel row-major. A pixel that is not background, not yet
//!    visited and not inside an already found sprite seeds a new component.
//! 2. Grow the component with an explicit work stack. An accepted pixel probes
//!    its four cardinal neighbours at every distance up to `margin + 1`, so a
//!    component jumps over at most `margin` background pixels in a straight
//!    line. There is no diagonal dilation.
//! 3. The bounding box of the accepted pixels becomes a sprite unless it is
//!    degenerate or shorter than the configured minimum height.
//!
//! A single visited set spans the whole scan, so every pixel is accepted or
//! rejected at most once per call regardless of how many sprites are found.

use log::{debug, info};

use crate::error::LocateError;
use crate::grid::{PixelGrid, Point};
use crate::models::Sprite;

/// Default pixel gap bridged between parts of one sprite
pub const DEFAULT_MARGIN: i32 = 4;

/// Tuning for [`detect_sprites`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Largest run of background pixels, along one axis, that still joins
    /// two foreground pixels into the same sprite
    pub margin: i32,
    /// Drop sprites whose height is below this value. 0 disables the filter.
    pub min_height: u32,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self { margin: DEFAULT_MARGIN, min_height: 0 }
    }
}

impl DetectOptions {
    pub fn new(margin: i32, min_height: u32) -> Self {
        Self { margin, min_height }
    }
}

/// Pixels examined during one detection pass
struct VisitedSet {
    width: u32,
    marks: Vec<bool>,
}

impl VisitedSet {
    fn new(width: u32, height: u32) -> Self {
        Self { width, marks: vec![false; width as usize * height as usize] }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        self.marks[self.index(x, y)]
    }

    /// Mark a pixel, returning false if it was already marked
    fn insert(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        !std::mem::replace(&mut self.marks[idx], true)
    }
}

/// Accepted pixels of one growing component
#[derive(Debug, Default)]
struct Component {
    pixels: Vec<Point>,
}

impl Component {
    fn bounds(&self) -> Option<Sprite> {
        let first = self.pixels.first()?;
        let mut sprite = Sprite::new(*first, *first);
        for p in &self.pixels[1..] {
            sprite.min.x = sprite.min.x.min(p.x);
            sprite.min.y = sprite.min.y.min(p.y);
            sprite.max.x = sprite.max.x.max(p.x);
            sprite.max.y = sprite.max.y.max(p.y);
        }
        Some(sprite)
    }
}

/// State owned by a single detection call
struct Detector<'a, G: PixelGrid> {
    grid: &'a G,
    background: G::Color,
    reach: i32,
    min_height: u32,
    visited: VisitedSet,
    stack: Vec<Point>,
    sprites: Vec<Sprite>,
}

impl<'a, G: PixelGrid> Detector<'a, G> {
    fn new(grid: &'a G, background: G::Color, options: &DetectOptions) -> Self {
        // Probes past the far edge of the grid can never land, so the reach is
        // capped there to keep coordinate arithmetic in range.
        let longest_side = grid.width().max(grid.height()).min(i32::MAX as u32) as i32;
        let reach = options.margin.saturating_add(1).min(longest_side.max(1));
        Self {
            grid,
            background,
            reach,
            min_height: options.min_height,
            visited: VisitedSet::new(grid.width(), grid.height()),
            stack: Vec::new(),
            sprites: Vec::new(),
        }
    }

    fn is_claimed(&self, p: Point) -> bool {
        self.sprites.iter().any(|s| s.contains(p))
    }

    fn run(mut self) -> Vec<Sprite> {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                if self.grid.color_at(x, y) == self.background || self.visited.contains(x, y) {
                    continue;
                }
                let seed = Point::new(x as i32, y as i32);
                if self.is_claimed(seed) {
                    continue;
                }
                let component = self.grow(seed);
                self.finalize(&component);
            }
        }
        self.sprites
    }

    /// Flood outward from `seed`, accepting every reachable foreground pixel.
    ///
    /// Pixels are marked visited when pushed, so each one enters the stack at
    /// most once per call.
    fn grow(&mut self, seed: Point) -> Component {
        let mut component = Component::default();
        if self.visited.insert(seed.x as u32, seed.y as u32) {
            self.stack.push(seed);
        }

        while let Some(p) = self.stack.pop() {
            if self.grid.color_at(p.x as u32, p.y as u32) == self.background || self.is_claimed(p) {
                continue;
            }
            component.pixels.push(p);

            for i in 1..=self.reach {
                for probe in [
                    Point::new(p.x - i, p.y),
                    Point::new(p.x + i, p.y),
                    Point::new(p.x, p.y - i),
                    Point::new(p.x, p.y + i),
                ] {
                    if self.grid.contains(probe.x, probe.y)
                        && self.visited.insert(probe.x as u32, probe.y as u32)
                    {
                        self.stack.push(probe);
                    }
                }
            }
        }

        component
    }

    fn finalize(&mut self, component: &Component) {
        let Some(bounds) = component.bounds() else {
            return;
        };
        if component.pixels.len() < 2 || bounds.width() == 0 || bounds.height() == 0 {
            debug!("dropping degenerate region {:?} ({} pixels)", bounds, component.pixels.len());
            return;
        }
        if self.min_height > 0 && (bounds.height() as u32) < self.min_height {
            debug!(
                "dropping region {:?}: height {} below minimum {}",
                bounds,
                bounds.height(),
                self.min_height
            );
            return;
        }
        self.sprites.push(bounds);
        info!("found a sprite with bounds {:?}; total sprites found: {}", bounds, self.sprites.len());
    }
}

/// Find the bounding boxes of all sprites on a sheet.
///
/// The result is in discovery order, which follows the row-major scan of each
/// sprite's first pixel. Use [`crate::rows::sort_into_rows`] for reading order.
///
/// # Errors
///
/// Returns [`LocateError::InvalidMargin`] if `options.margin` is negative.
pub fn detect_sprites<G: PixelGrid>(
    grid: &G,
    background: G::Color,
    options: &DetectOptions,
) -> Result<Vec<Sprite>, LocateError> {
    if options.margin < 0 {
        return Err(LocateError::InvalidMargin(options.margin));
    }
    info!(
        "finding sprites in {}x{} sheet with background {:?}",
        grid.width(),
        grid.height(),
        background
    );
    if grid.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Detector::new(grid, background, options).run())
}

/// Estimate the background and detect sprites in one step.
///
/// # Errors
///
/// Returns [`LocateError::EmptyInput`] for a grid without pixels and
/// [`LocateError::InvalidMargin`] for a negative margin.
pub fn locate_sprites<G: PixelGrid>(
    grid: &G,
    options: &DetectOptions,
) -> Result<Vec<Sprite>, LocateError> {
    if options.margin < 0 {
        return Err(LocateError::InvalidMargin(options.margin));
    }
    let background = crate::background::estimate_background(grid)?;
    detect_sprites(grid, background, options)
}
