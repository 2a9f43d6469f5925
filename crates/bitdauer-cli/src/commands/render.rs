//! Render a patch file.

use clap::Args;

use super::common::{OutputArgs, load_patch, render_patch};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Patch file, user patch name or factory patch name
    #[arg(value_name = "PATCH")]
    patch: String,

    #[command(flatten)]
    output: OutputArgs,

    /// Override the patch's render length in milliseconds
    #[arg(long)]
    duration_ms: Option<u32>,

    /// Override the patch's sample rate
    #[arg(long)]
    sample_rate: Option<u32>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut patch = load_patch(&args.patch)?;
    if let Some(duration_ms) = args.duration_ms {
        patch.duration_ms = duration_ms;
    }
    if let Some(sample_rate) = args.sample_rate {
        patch.sample_rate = sample_rate;
    }

    println!("Rendering '{}'...", patch.name);
    println!(
        "  {} ms at {} Hz, {} generator",
        patch.duration_ms, patch.sample_rate, patch.generator
    );

    render_patch(&patch, &args.output)
}
