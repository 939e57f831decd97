//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::models::{parse_doc, to_transformation};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Mediatx - Serialize transformation descriptions to CDN URL tokens
#[derive(Parser)]
#[command(name = "mtx")]
#[command(about = "Mediatx - Serialize transformation descriptions to CDN URL tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON5 transformation description to its URL token string
    Render {
        /// Input description file, or `-` for stdin
        input: PathBuf,
    },
}

/// Parse arguments and dispatch. Returns the process exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Render { input } => cmd_render(&input),
    };
    ExitCode::from(code)
}

fn read_input(input: &Path) -> std::io::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
    }
}

fn cmd_render(input: &Path) -> u8 {
    let text = match read_input(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: cannot read {}: {}", input.display(), e);
            return EXIT_INVALID_ARGS;
        }
    };

    let doc = match parse_doc(&text) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    let transformation = match to_transformation(&doc) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {}", e);
            return EXIT_ERROR;
        }
    };

    match transformation.render() {
        Ok(token) => {
            println!("{}", token);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            EXIT_ERROR
        }
    }
}
