//! mdp CLI - Markdown site pipeline.
//!
//! Provides commands for:
//! - `build`: Load a site and write HTML, the view model and the theme
//! - `show`: Print the title and HTML of the page a fragment selects
//! - `navigate`: Replay fragments read from stdin and print page titles
//! - `check`: Report slug collisions and missing documents

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, NavigateArgs, ShowArgs};
use output::Output;

/// mdp - Markdown site pipeline.
#[derive(Parser)]
#[command(name = "mdp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the site and write it to the output directory.
    Build(BuildArgs),
    /// Show the page selected by a fragment.
    Show(ShowArgs),
    /// Navigate with fragments read line by line from stdin.
    Navigate(NavigateArgs),
    /// Check the site map and every document without writing output.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.site.verbose,
            Self::Show(args) => args.site.verbose,
            Self::Navigate(args) => args.site.verbose,
            Self::Check(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Navigate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
