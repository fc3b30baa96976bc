//! exval CLI entry point.
//!
//! Provides command-line tools for working with validation expressions:
//! - `exval normalize` - Print the normalized form of an expression
//! - `exval check` - Check that an expression parses
//! - `exval eval` - Validate a JSON object against an expression
//! - `exval templates` - List the named templates

mod commands;
mod object;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_eval, run_normalize, run_templates, CheckArgs, EvalArgs, NormalizeArgs,
    TemplatesArgs,
};
use tracing_subscriber::EnvFilter;

/// Validation expression tools.
#[derive(Debug, Parser)]
#[command(name = "exval")]
#[command(about = "Validation expression tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the normalized form of an expression
    Normalize(NormalizeArgs),
    /// Check that an expression parses
    Check(CheckArgs),
    /// Validate an object against an expression
    Eval(EvalArgs),
    /// List the named templates
    Templates(TemplatesArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "exval=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Normalize(args) => run_normalize(args),
        Commands::Check(args) => run_check(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Templates(args) => run_templates(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
