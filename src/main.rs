//! Mediatx - Command-line tool for rendering transformation descriptions to URL tokens

use std::process::ExitCode;

use mediatx::cli;

fn main() -> ExitCode {
    cli::run()
}
