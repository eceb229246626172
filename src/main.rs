//! huepick - Command-line tool for inspecting and editing CSS color values

use std::process::ExitCode;

use huepick::cli;

fn main() -> ExitCode {
    cli::run()
}
