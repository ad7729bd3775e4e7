mod commands;
mod config;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, defaults, pull, push, render, CheckArgs, DefaultsArgs, PullArgs, PushArgs, RenderArgs};

/// PotatoPay CLI - render and sync creator block templates
#[derive(Parser, Debug)]
#[command(name = "potatopay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a block collection to HTML
    Render(RenderArgs),

    /// Parse every block template and report failures
    Check(CheckArgs),

    /// Print the default JSON of a block type
    Defaults(DefaultsArgs),

    /// Download a surface's blocks from the API
    Pull(PullArgs),

    /// Upload a block collection to the API
    Push(PushArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(e) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Render(args) => tokio::task::block_in_place(|| render(args, &cwd)),
        Command::Check(args) => check(args),
        Command::Defaults(args) => defaults(args),
        Command::Pull(args) => pull(args, &cwd).await,
        Command::Push(args) => push(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
