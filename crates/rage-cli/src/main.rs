//! Command-line interface for the Rage compiler.

mod commands;
mod compiler;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use compiler::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Identifier of the generated IR module
    #[arg(long, global = true, value_name = "NAME")]
    module_name: Option<String>,

    /// Skip IR verification
    #[arg(long, global = true)]
    no_verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a source file and print its IR
    #[command(visible_alias = "e")]
    Emit {
        /// Source file to compile
        file: PathBuf,

        /// Write the IR to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a source file for errors
    Check {
        /// Source file to check
        file: PathBuf,
    },

    /// Print the tokens of a source file
    Tokens {
        /// Source file to tokenize
        file: PathBuf,
    },

    /// Compile a source file and interpret its `main` function
    #[command(visible_alias = "r")]
    Run {
        /// Source file to run
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    rage_utils::logger::init(cli.verbose);

    let overrides = Overrides {
        module_name: cli.module_name,
        no_verify: cli.no_verify,
    };

    match cli.command {
        Commands::Emit { file, output } => {
            commands::emit::execute(&file, output.as_deref(), &overrides)
        }
        Commands::Check { file } => commands::check::execute(&file, &overrides),
        Commands::Tokens { file } => commands::tokens::execute(&file, &overrides),
        Commands::Run { file } => {
            let code = commands::run::execute(&file, &overrides)?;
            std::process::exit(code)
        }
    }
}
