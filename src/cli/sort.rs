//! CLI implementation of the `sort` command
//!
//! Reorders an existing box list into reading order and, given the sheet,
//! draws an outline around every box so the order can be checked by eye.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::metadata::{load_sheet, save_sheet};
use crate::output::{draw_guides, load_png, save_png};

use super::{resolve_config, EXIT_ERROR, EXIT_SUCCESS};

/// `dir/{file name of path}`
fn output_path(dir: &Path, path: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => dir.join(name),
        None => dir.join("sheet"),
    }
}

/// Execute the sort command
pub fn run_sort(
    metadata: &Path,
    image: Option<&Path>,
    output: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let sheet = match load_sheet(metadata) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", metadata.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let sorted = match sheet.sorted(config.sort.margin) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: '{}': {}", metadata.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    log::debug!("sorted {} box(es) with margin {}", sorted.len(), config.sort.margin);

    let sorted_path = output_path(output, metadata);
    if let Err(e) = save_sheet(&sorted, &sorted_path) {
        eprintln!("Error: Failed to write '{}': {}", sorted_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", sorted_path.display());

    if let Some(image_path) = image {
        let sheet_image = match load_png(image_path) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("Error: Failed to read '{}': {}", image_path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let guided = draw_guides(&sheet_image, &sorted.sprites);
        let guide_path = output_path(output, image_path);
        if let Err(e) = save_png(&guided, &guide_path) {
            eprintln!("Error: Failed to write '{}': {}", guide_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", guide_path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}
