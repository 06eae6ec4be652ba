//! CLI implementation of the `locate` command

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rayon::prelude::*;

use crate::config::{CliOverrides, LocatorConfig};
use crate::metadata::save_sheet;
use crate::output::{crop_sprite, extract_sprite, extraction_path, load_png, save_png};

use super::{
    find_png_files, resolve_config, FormatArg, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS,
};

/// Expand directories into the PNG files they contain
fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_png_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Where the box list for `input` is written.
///
/// With a single sheet `output` names the file itself. With several it is a
/// directory receiving `{stem}.{format}` per sheet.
fn metadata_path(input: &Path, output: Option<&Path>, format: FormatArg, single: bool) -> PathBuf {
    match output {
        Some(out) if single => out.to_path_buf(),
        Some(dir) => {
            let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("sheet");
            dir.join(format!("{}.{}", stem, format.extension()))
        }
        None => input.with_extension(format.extension()),
    }
}

/// First destination shared by two sheets, if any.
///
/// Extracted frames are named from the same directory and stem as the box
/// list, so distinct box list paths also keep the frames apart.
fn duplicate_destination(paths: &[PathBuf]) -> Option<&PathBuf> {
    let mut seen = HashSet::new();
    paths.iter().find(|p| !seen.insert(*p))
}

/// Locate, write and optionally extract the sprites of one sheet.
/// Returns the number of sprites found.
fn process_sheet(input: &Path, meta_path: &Path, config: &LocatorConfig) -> Result<usize, String> {
    let image = load_png(input).map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;

    let sort_margin = config.sort.enabled.then_some(config.sort.margin);
    let sheet = crate::locate(&image, &config.detect_options(), sort_margin)
        .map_err(|e| format!("'{}': {}", input.display(), e))?;
    log::debug!("{}: {} sprite(s)", input.display(), sheet.len());

    save_sheet(&sheet, meta_path)
        .map_err(|e| format!("Failed to write '{}': {}", meta_path.display(), e))?;
    println!("Saved: {}", meta_path.display());

    if config.detect.extract {
        let out_dir = meta_path.parent();
        for (i, sprite) in sheet.sprites.iter().enumerate() {
            let frame = if config.detect.crop {
                crop_sprite(&image, sprite)
            } else {
                extract_sprite(&image, sprite)
            };
            let path = extraction_path(input, i, out_dir);
            save_png(&frame, &path)
                .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
            log::debug!("extracted sprite {} to {}", i, path.display());
        }
        log::info!("Extracted {} sprite(s) from {}", sheet.len(), input.display());
    }

    Ok(sheet.len())
}

/// Execute the locate command
pub fn run_locate(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: FormatArg,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    if let Some(margin) = overrides.margin.filter(|m| *m < 0) {
        eprintln!("Error: --margin must be non-negative, got {}", margin);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let files = collect_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: No PNG files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let single = files.len() == 1;
    let meta_paths: Vec<PathBuf> =
        files.iter().map(|input| metadata_path(input, output, format, single)).collect();
    if let Some(path) = duplicate_destination(&meta_paths) {
        eprintln!("Error: Several sheets would be written to '{}'", path.display());
        eprintln!("Rename the sheets or locate them separately");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let results: Vec<(PathBuf, Result<usize, String>)> = files
        .par_iter()
        .zip(meta_paths.par_iter())
        .map(|(input, meta_path)| (input.clone(), process_sheet(input, meta_path, &config)))
        .collect();

    let mut failed = 0;
    let mut total = 0;
    for (input, result) in &results {
        match result {
            Ok(count) => total += count,
            Err(e) => {
                log::error!("{}", e);
                log::debug!("skipped {}", input.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        eprintln!("Error: {} of {} sheet(s) failed", failed, results.len());
        return ExitCode::from(EXIT_ERROR);
    }

    if !single {
        log::info!("Located {} sprite(s) across {} sheets", total, results.len());
    }
    ExitCode::from(EXIT_SUCCESS)
}
