//! Sprite locator - command-line tool for finding sprites on a sprite sheet

use std::process::ExitCode;

use sprite_locator::cli;

fn main() -> ExitCode {
    cli::run()
}
