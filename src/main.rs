extern crate tracefmt;
use clap::{Parser, Subcommand};
use std::env;

mod cli;

use cli::format::{format_command, FormatCmdArgs};
use cli::shared::HELP_TEMPLATE;
use cli::trace::{trace_command, TraceCmdArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stack-trace normalization and display-value formatting.", long_about=None, rename_all = "kebab-case", help_template = HELP_TEMPLATE, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a stack trace into normalized frames
    Trace(TraceCmdArgs),
    /// Format numbers and ranges for legends, popups and widgets
    Format(FormatCmdArgs),
}

#[cfg(feature = "mimalloc_allocator")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "tracefmt=info");
    }
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    match cli.command {
        Commands::Trace(args) => trace_command(args),
        Commands::Format(args) => format_command(args),
    }
}
