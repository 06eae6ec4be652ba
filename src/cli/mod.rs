//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod locate;
mod matte;
mod sort;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{CliOverrides, LocatorConfig};
use crate::metadata::SheetFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Check if a path looks like a PNG file.
pub fn is_png_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Find all PNG files in a directory (recursively), sorted by path.
pub fn find_png_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let dir_str = dir.display().to_string();

    for pattern in [format!("{}/**/*.png", dir_str), format!("{}/**/*.PNG", dir_str)] {
        if let Ok(paths) = glob(&pattern) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Metadata format for generated box lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Json,
    Yaml,
}

impl From<FormatArg> for SheetFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => SheetFormat::Json,
            FormatArg::Yaml => SheetFormat::Yaml,
        }
    }
}

impl FormatArg {
    pub(crate) fn extension(self) -> &'static str {
        match self {
            FormatArg::Json => "json",
            FormatArg::Yaml => "yaml",
        }
    }
}

/// Sprite locator - find sprites on a sprite sheet and write their bounding boxes
#[derive(Parser)]
#[command(name = "sprite-locator")]
#[command(about = "Find sprites on a sprite sheet and write their bounding boxes")]
#[command(version)]
pub struct Cli {
    /// Print more detail (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: nearest locator.toml above the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate sprites on one or more sheets and write their bounding boxes
    Locate {
        /// Sprite sheet PNG files, or directories to search for PNG files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output metadata file (.json, .yaml, .yml).
        /// With several inputs this is a directory receiving {sheet}.{format}.
        /// If omitted: {input}.{format} next to each input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Metadata format when the output name does not decide it
        #[arg(long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Largest background gap bridged inside one sprite (default: 4)
        #[arg(long, env = "PIXEL_MARGIN", allow_hyphen_values = true)]
        margin: Option<i32>,

        /// Drop sprites shorter than this many pixels (0 keeps all)
        #[arg(long, env = "MIN_IMAGE_HEIGHT")]
        min_height: Option<u32>,

        /// Write every sprite to {input}_{index}.png
        #[arg(long, env = "EXTRACT_SPRITES", value_parser = clap::builder::FalseyValueParser::new())]
        extract: bool,

        /// Crop extracted sprites to their bounding box
        #[arg(long)]
        crop: bool,

        /// Keep detection order instead of sorting into rows
        #[arg(long)]
        no_sort: bool,

        /// Slack around each box when grouping rows
        #[arg(long)]
        sort_margin: Option<u32>,
    },

    /// Sort an existing box list into rows and draw row guides
    Sort {
        /// Sprite metadata file (.json, .yaml, .yml)
        metadata: PathBuf,

        /// Sheet image to outline and number each box on
        #[arg(long)]
        image: Option<PathBuf>,

        /// Output directory for the sorted metadata and guide image
        #[arg(short, long, default_value = "out")]
        output: PathBuf,

        /// Slack around each box when grouping rows
        #[arg(long)]
        margin: Option<u32>,
    },

    /// Make a sheet's background transparent
    Matte {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file (default: {input}_matte.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Background color to clear, as hex (default: most frequent color)
        #[arg(long)]
        color: Option<String>,
    },
}

/// Load the configuration and apply command-line overrides.
///
/// Prints the error and returns the exit code on failure.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<LocatorConfig, ExitCode> {
    crate::config::resolve_config(path, overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(crate::logging::level_for(cli.verbose, cli.quiet));
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Locate {
            inputs,
            output,
            format,
            margin,
            min_height,
            extract,
            crop,
            no_sort,
            sort_margin,
        } => {
            let overrides = CliOverrides {
                margin,
                min_height,
                extract: extract.then_some(true),
                crop: crop.then_some(true),
                sort: no_sort.then_some(false),
                sort_margin,
            };
            locate::run_locate(&inputs, output.as_deref(), format, config_path, &overrides)
        }
        Commands::Sort { metadata, image, output, margin } => {
            let overrides = CliOverrides { sort_margin: margin, ..Default::default() };
            sort::run_sort(&metadata, image.as_deref(), &output, config_path, &overrides)
        }
        Commands::Matte { input, output, color } => {
            matte::run_matte(&input, output.as_deref(), color.as_deref())
        }
    }
}
