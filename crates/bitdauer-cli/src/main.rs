//! Bitdauer CLI - render synthesizer patches to WAV files.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bitdauer")]
#[command(author, version, about = "Bitdauer sample synthesizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a patch file to a WAV file
    Render(commands::render::RenderArgs),

    /// Render a single wave tone
    Tone(commands::tone::ToneArgs),

    /// Render colored noise
    Noise(commands::noise::NoiseArgs),

    /// Render a built-in factory patch
    Factory(commands::factory::FactoryArgs),

    /// List and manage patches
    Patches(commands::patches::PatchesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Tone(args) => commands::tone::run(args),
        Commands::Noise(args) => commands::noise::run(args),
        Commands::Factory(args) => commands::factory::run(args),
        Commands::Patches(args) => commands::patches::run(args),
    }
}
