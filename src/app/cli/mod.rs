//! CLI Adapter.

mod play;
mod render;

use std::path::PathBuf;

use crate::domain::AppError;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "etcdlabs")]
#[command(version)]
#[command(
    about = "Render etcd install scripts, TLS assets, service units and flags; drive the playground",
    long_about = None
)]
struct Cli {
    /// Profile file (.toml, .yaml or .yml); built-in defaults when omitted
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a script, unit file or flag set from the profile
    #[clap(visible_alias = "r")]
    Render {
        #[command(subcommand)]
        target: render::RenderCommand,
    },
    /// Print the default profile as TOML
    #[clap(visible_alias = "d")]
    Defaults,
    /// Talk to the etcd playground backend
    #[clap(visible_alias = "p")]
    Play {
        #[command(subcommand)]
        command: play::PlayCommand,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    crate::app::logging::init(cli.verbose);

    let profile = cli.profile.as_deref();
    let result: Result<i32, AppError> = match cli.command {
        Commands::Render { target } => render::run_render(profile, target).map(|_| 0),
        Commands::Defaults => run_defaults().map(|_| 0),
        Commands::Play { command } => play::run_play(profile, command),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_defaults() -> Result<(), AppError> {
    print!("{}", crate::app::api::default_profile_toml()?);
    Ok(())
}
