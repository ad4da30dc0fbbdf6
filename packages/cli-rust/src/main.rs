//! Formwright CLI
//!
//! Validate form schemas, check submissions against them, and print
//! generated validator or component source.
//!
//! # Usage
//!
//! ```bash
//! formwright validate form.json
//! formwright check --schema form.json answers.json
//! cat form.json | formwright codegen - --flavor shadcn --indent 4
//! formwright sample > form.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use formwright_core::{CodeFlavor, CodegenConfig};

mod commands;
mod input;
mod logging;

use commands::Outcome;
use logging::LogFormat;

#[derive(Parser)]
#[command(name = "formwright")]
#[command(version)]
#[command(about = "JSON form schema validator and form code generator", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr; filter with RUST_LOG)
    #[arg(long, env = "FORMWRIGHT_LOG_FORMAT", value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a form schema is structurally valid
    Validate {
        /// Schema file, or `-` for stdin
        file: PathBuf,
    },
    /// Validate a submission against a form schema
    Check {
        /// Schema file
        #[arg(long, short)]
        schema: PathBuf,
        /// Submission file (a JSON object keyed by field id), or `-` for stdin
        data: PathBuf,
    },
    /// Print generated source for a form schema
    Codegen {
        /// Schema file, or `-` for stdin
        file: PathBuf,
        /// Output flavor: html, shadcn or zod
        #[arg(long, short, env = "FORMWRIGHT_FLAVOR", default_value = "html")]
        flavor: CodeFlavor,
        /// Spaces per indent level
        #[arg(long, default_value_t = 2)]
        indent: usize,
        /// Leave the schema JSON literal out of component output
        #[arg(long)]
        no_schema: bool,
    },
    /// Print the built-in sample schema
    Sample,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match run(cli.command) {
        Ok(outcome) => outcome.emit(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(commands::EXIT_INPUT)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<Outcome> {
    match command {
        Commands::Validate { file } => Ok(commands::validate(&input::read_source(&file)?)),
        Commands::Check { schema, data } => {
            let schema = input::read_source(&schema)?;
            let data = input::read_source(&data)?;
            Ok(commands::check(&schema, &data))
        }
        Commands::Codegen {
            file,
            flavor,
            indent,
            no_schema,
        } => {
            let config = CodegenConfig {
                flavor,
                indent_width: indent,
                include_schema_literal: !no_schema,
            };
            commands::codegen(&input::read_source(&file)?, &config)
        }
        Commands::Sample => commands::sample(),
    }
}
