//! CLI integration tests for the `sprite-locator` binary.
//!
//! Each test builds small PNG sheets in a temporary directory, runs the real
//! binary against them and checks the files it writes.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use serde_json::Value;
use tempfile::TempDir;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Get the path to the sprite-locator binary.
fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sprite-locator"))
}

/// Run the binary in `dir` without any inherited locator environment.
fn run(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(binary());
    cmd.current_dir(dir)
        .env_remove("PIXEL_MARGIN")
        .env_remove("MIN_IMAGE_HEIGHT")
        .env_remove("EXTRACT_SPRITES")
        .args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("Failed to execute sprite-locator")
}

fn fill(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            image.put_pixel(x, y, color);
        }
    }
}

/// 20x10 white sheet: red box (2,2)-(5,6) and blue box (12,1)-(16,4),
/// separated by six background columns.
fn write_sheet(dir: &Path, name: &str) -> PathBuf {
    let mut image = RgbaImage::from_pixel(20, 10, WHITE);
    fill(&mut image, 2, 2, 5, 6, RED);
    fill(&mut image, 12, 1, 16, 4, BLUE);
    let path = dir.join(name);
    image.save(&path).expect("should write sheet");
    path
}

/// Boxes of a JSON box list as `[min.x, min.y, max.x, max.y]`
fn read_boxes(path: &Path) -> Vec<[i64; 4]> {
    let content = std::fs::read_to_string(path).expect("metadata should exist");
    let json: Value = serde_json::from_str(&content).expect("metadata should be JSON");
    json["sprites"]
        .as_array()
        .expect("sprites array")
        .iter()
        .map(|s| {
            [
                s["min"]["x"].as_i64().unwrap(),
                s["min"]["y"].as_i64().unwrap(),
                s["max"]["x"].as_i64().unwrap(),
                s["max"]["y"].as_i64().unwrap(),
            ]
        })
        .collect()
}

#[test]
fn test_locate_writes_sorted_boxes() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json"], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Saved:"));

    let boxes = read_boxes(&temp.path().join("boxes.json"));
    assert_eq!(boxes, vec![[2, 2, 5, 6], [12, 1, 16, 4]]);
}

#[test]
fn test_locate_no_sort_keeps_discovery_order() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json", "--no-sort"], &[]);
    assert!(output.status.success());

    // Blue starts on an earlier scan line
    let boxes = read_boxes(&temp.path().join("boxes.json"));
    assert_eq!(boxes, vec![[12, 1, 16, 4], [2, 2, 5, 6]]);
}

#[test]
fn test_locate_default_output_next_to_input() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png"], &[]);
    assert!(output.status.success());
    assert_eq!(read_boxes(&temp.path().join("sheet.json")).len(), 2);
}

#[test]
fn test_locate_yaml_output() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "-o", "boxes.yaml"], &[]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(temp.path().join("boxes.yaml")).unwrap();
    assert!(content.contains("sprites:"));
    assert!(content.contains("min:"));
}

#[test]
fn test_margin_env_and_flag_precedence() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    // Margin 6 bridges the six-column gap
    let output = run(temp.path(), &["locate", "sheet.png", "-o", "env.json"], &[("PIXEL_MARGIN", "6")]);
    assert!(output.status.success());
    assert_eq!(read_boxes(&temp.path().join("env.json")), vec![[2, 1, 16, 6]]);

    let output = run(
        temp.path(),
        &["locate", "sheet.png", "-o", "flag.json", "--margin", "4"],
        &[("PIXEL_MARGIN", "6")],
    );
    assert!(output.status.success());
    assert_eq!(read_boxes(&temp.path().join("flag.json")).len(), 2);
}

#[test]
fn test_min_height_filters_short_sprites() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output =
        run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json", "--min-height", "4"], &[]);
    assert!(output.status.success());
    assert_eq!(read_boxes(&temp.path().join("boxes.json")), vec![[2, 2, 5, 6]]);
}

#[test]
fn test_locate_config_file() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");
    std::fs::write(temp.path().join("locator.toml"), "[sort]\nenabled = false\n").unwrap();

    let output = run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json"], &[]);
    assert!(output.status.success());
    assert_eq!(read_boxes(&temp.path().join("boxes.json"))[0], [12, 1, 16, 4]);
}

#[test]
fn test_locate_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");
    std::fs::write(temp.path().join("locator.toml"), "[detect]\nmargin = -2\n").unwrap();

    let output = run(temp.path(), &["locate", "sheet.png"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("detect.margin"));
}

#[test]
fn test_extract_writes_full_size_frames() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "-o", "out/boxes.json", "--extract"], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let first = image::open(temp.path().join("out/sheet_0.png")).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (20, 10));
    assert_eq!(*first.get_pixel(3, 3), RED);
    assert_eq!(first.get_pixel(13, 2).0[3], 0);
    assert!(temp.path().join("out/sheet_1.png").exists());
}

#[test]
fn test_extract_crop() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output =
        run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json", "--extract", "--crop"], &[]);
    assert!(output.status.success());

    let second = image::open(temp.path().join("sheet_1.png")).unwrap().to_rgba8();
    assert_eq!(second.dimensions(), (5, 4));
    assert!(second.pixels().all(|p| *p == BLUE));
}

#[test]
fn test_extract_env_values() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(
        temp.path(),
        &["locate", "sheet.png", "-o", "boxes.json"],
        &[("EXTRACT_SPRITES", "false")],
    );
    assert!(output.status.success());
    assert!(!temp.path().join("sheet_0.png").exists());

    let output =
        run(temp.path(), &["locate", "sheet.png", "-o", "boxes.json"], &[("EXTRACT_SPRITES", "yes")]);
    assert!(output.status.success());
    assert!(temp.path().join("sheet_0.png").exists());
}

#[test]
fn test_locate_directory_of_sheets() {
    let temp = TempDir::new().unwrap();
    let sheets = temp.path().join("sheets");
    std::fs::create_dir_all(&sheets).unwrap();
    write_sheet(&sheets, "a.png");
    write_sheet(&sheets, "b.png");

    let output = run(temp.path(), &["locate", "sheets", "-o", "meta"], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_boxes(&temp.path().join("meta/a.json")).len(), 2);
    assert_eq!(read_boxes(&temp.path().join("meta/b.json")).len(), 2);
}

#[test]
fn test_same_named_sheets_are_refused() {
    let temp = TempDir::new().unwrap();
    for dir in ["a", "b"] {
        std::fs::create_dir_all(temp.path().join(dir)).unwrap();
        write_sheet(&temp.path().join(dir), "hero.png");
    }

    let output = run(temp.path(), &["locate", "a/hero.png", "b/hero.png", "-o", "meta"], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("hero.json"));
    assert!(!temp.path().join("meta").exists());

    // Without -o each box list lands next to its own sheet
    let output = run(temp.path(), &["locate", "a/hero.png", "b/hero.png"], &[]);
    assert!(output.status.success());
    assert!(temp.path().join("a/hero.json").exists());
    assert!(temp.path().join("b/hero.json").exists());
}

#[test]
fn test_flags_repair_config_file_values() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");
    std::fs::write(temp.path().join("locator.toml"), "[detect]\nmargin = -2\ncrop = true\n")
        .unwrap();

    let output = run(
        temp.path(),
        &["locate", "sheet.png", "-o", "boxes.json", "--margin", "4", "--extract"],
        &[],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_boxes(&temp.path().join("boxes.json")).len(), 2);
    let frame = image::open(temp.path().join("sheet_0.png")).unwrap().to_rgba8();
    assert_eq!(frame.dimensions(), (4, 5));
}

#[test]
fn test_crop_without_extract_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "--crop"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("detect.crop"));
}

#[test]
fn test_negative_margin_is_invalid_argument() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["locate", "sheet.png", "--margin", "-1"], &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp.path().join("sheet.json").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["locate", "missing.png"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.png"));
}

#[test]
fn test_sort_reorders_and_draws_guides() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");
    std::fs::write(
        temp.path().join("boxes.json"),
        r#"{"sprites":[{"min":{"x":12,"y":1},"max":{"x":16,"y":4}},{"min":{"x":2,"y":2},"max":{"x":5,"y":6}}]}"#,
    )
    .unwrap();

    let output =
        run(temp.path(), &["sort", "boxes.json", "--image", "sheet.png", "-o", "guides"], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert_eq!(
        read_boxes(&temp.path().join("guides/boxes.json")),
        vec![[2, 2, 5, 6], [12, 1, 16, 4]]
    );
    let guided = image::open(temp.path().join("guides/sheet.png")).unwrap().to_rgba8();
    assert_eq!(guided.dimensions(), (20, 10));
    // First box outline starts pure red
    assert_eq!(*guided.get_pixel(2, 2), RED);
}

#[test]
fn test_sort_empty_box_list_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("boxes.json"), r#"{"sprites":[]}"#).unwrap();

    let output = run(temp.path(), &["sort", "boxes.json"], &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_matte_clears_background() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["matte", "sheet.png"], &[]);
    assert!(output.status.success());

    let matted = image::open(temp.path().join("sheet_matte.png")).unwrap().to_rgba8();
    assert_eq!(matted.get_pixel(0, 0).0[3], 0);
    assert_eq!(*matted.get_pixel(3, 3), RED);
}

#[test]
fn test_matte_explicit_color() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["matte", "sheet.png", "-o", "clear.png", "--color", "#F00"], &[]);
    assert!(output.status.success());

    let matted = image::open(temp.path().join("clear.png")).unwrap().to_rgba8();
    assert_eq!(matted.get_pixel(3, 3).0[3], 0);
    assert_eq!(*matted.get_pixel(0, 0), WHITE);
}

#[test]
fn test_matte_bad_color_is_invalid_argument() {
    let temp = TempDir::new().unwrap();
    write_sheet(temp.path(), "sheet.png");

    let output = run(temp.path(), &["matte", "sheet.png", "--color", "red"], &[]);
    assert_eq!(output.status.code(), Some(2));
}
