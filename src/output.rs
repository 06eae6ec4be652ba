//! PNG input/output and image side products of sprite location
//!
//! Covers decoding sheets, writing extracted sprites, guide overlays that
//! outline each located box, and background matting.

use image::{Rgba, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};

use crate::models::Sprite;

/// Transparent color used for extraction canvases
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for image file operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Decode an image file into RGBA pixels
pub fn load_png(path: &Path) -> Result<RgbaImage, OutputError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Clip a sprite box to the image, returning inclusive pixel bounds
fn clip(image: &RgbaImage, sprite: &Sprite) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let x0 = sprite.min.x.max(0);
    let y0 = sprite.min.y.max(0);
    let x1 = sprite.max.x.min(w as i32 - 1);
    let y1 = sprite.max.y.min(h as i32 - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

/// Copy one sprite onto a transparent canvas the size of the sheet.
///
/// The sprite keeps its position, so extracted frames stay aligned with the
/// source sheet.
pub fn extract_sprite(image: &RgbaImage, sprite: &Sprite) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), TRANSPARENT);
    if let Some((x0, y0, x1, y1)) = clip(image, sprite) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                canvas.put_pixel(x, y, *image.get_pixel(x, y));
            }
        }
    }
    canvas
}

/// Copy just the sprite's box out of the sheet
pub fn crop_sprite(image: &RgbaImage, sprite: &Sprite) -> RgbaImage {
    match clip(image, sprite) {
        Some((x0, y0, x1, y1)) => {
            image::imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
        }
        None => RgbaImage::from_pixel(1, 1, TRANSPARENT),
    }
}

/// Path for the `index`th extracted sprite: `{stem}_{index}.png`, next to the
/// input unless `out_dir` is given.
pub fn extraction_path(input: &Path, index: usize, out_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sheet");
    let file_name = format!("{}_{}.png", stem, index);
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.parent().unwrap_or(Path::new("")).join(file_name),
    }
}

/// Outline color for the `index`th of `count` boxes.
///
/// Colors walk a red → green → blue → red ramp, spread evenly over the boxes.
pub fn guide_color(index: usize, count: usize) -> Rgba<u8> {
    const RAMP: usize = 256 * 3;
    let step = (RAMP / count.max(1)).max(1);
    let pos = (index * step) % RAMP;
    let t = (pos % 256) as u8;
    match pos / 256 {
        0 => Rgba([255 - t, t, 0, 255]),
        1 => Rgba([0, 255 - t, t, 255]),
        _ => Rgba([t, 0, 255 - t, 255]),
    }
}

/// 3x5 digit glyphs, one row per byte, bit 2 is the left column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Offset of a box's label from its top-left corner, inside the outline
const LABEL_INSET: i32 = 2;

/// Horizontal advance per digit
const DIGIT_ADVANCE: i32 = 4;

fn put_clipped(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Write `number` in decimal with its top-left pixel at `(x, y)`
fn draw_number(canvas: &mut RgbaImage, number: usize, x: i32, y: i32, color: Rgba<u8>) {
    let text = number.to_string();
    for (n, ch) in text.bytes().enumerate() {
        let glyph = &DIGITS[usize::from(ch - b'0')];
        let left = x.saturating_add(DIGIT_ADVANCE.saturating_mul(n as i32));
        for (dy, bits) in glyph.iter().enumerate() {
            for dx in 0..3 {
                if bits & (0b100 >> dx) != 0 {
                    put_clipped(canvas, left.saturating_add(dx), y.saturating_add(dy as i32), color);
                }
            }
        }
    }
}

/// Copy of the sheet with every sprite box outlined and numbered with its
/// position in `sprites`, one color per sprite
pub fn draw_guides(image: &RgbaImage, sprites: &[Sprite]) -> RgbaImage {
    let mut canvas = image.clone();
    for (i, sprite) in sprites.iter().enumerate() {
        let color = guide_color(i, sprites.len());
        for (x, y) in outline(sprite) {
            put_clipped(&mut canvas, x, y, color);
        }
        draw_number(
            &mut canvas,
            i,
            sprite.min.x.saturating_add(LABEL_INSET),
            sprite.min.y.saturating_add(LABEL_INSET),
            color,
        );
    }
    canvas
}

/// Pixels on the border of a box
fn outline(sprite: &Sprite) -> impl Iterator<Item = (i32, i32)> + '_ {
    let horizontal = (sprite.min.x..=sprite.max.x)
        .flat_map(move |x| [(x, sprite.min.y), (x, sprite.max.y)]);
    let vertical = (sprite.min.y..=sprite.max.y)
        .flat_map(move |y| [(sprite.min.x, y), (sprite.max.x, y)]);
    horizontal.chain(vertical)
}

/// Make every pixel of the given color fully transparent, keeping its RGB
pub fn remove_background(image: &RgbaImage, background: Rgba<u8>) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        if *pixel == background {
            pixel.0[3] = 0;
        }
    }
    out
}
