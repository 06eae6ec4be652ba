//! CLI implementation of the `matte` command

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::background::estimate_background;
use crate::color::{format_color, parse_color};
use crate::output::{load_png, remove_background, save_png};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Default output: `{stem}_matte.png` next to the input
fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sheet");
    input.with_file_name(format!("{}_matte.png", stem))
}

/// Execute the matte command
pub fn run_matte(input: &Path, output: Option<&Path>, color: Option<&str>) -> ExitCode {
    let requested = match color.map(parse_color).transpose() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: --color: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let image = match load_png(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let background = match requested {
        Some(c) => c,
        None => match estimate_background(&image) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: '{}': {}", input.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };
    log::debug!("clearing background {}", format_color(background));

    let matted = remove_background(&image, background);
    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output(input));
    if let Err(e) = save_png(&matted, &out_path) {
        eprintln!("Error: Failed to write '{}': {}", out_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", out_path.display());

    ExitCode::from(EXIT_SUCCESS)
}
