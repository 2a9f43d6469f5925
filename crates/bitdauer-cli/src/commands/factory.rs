//! Render a factory patch.

use bitdauer_config::get_factory_patch;
use clap::Args;

use super::common::{OutputArgs, render_patch};

#[derive(Args, Debug)]
pub struct FactoryArgs {
    /// Factory patch name (see `bitdauer patches list --factory`)
    #[arg(value_name = "NAME")]
    name: String,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: FactoryArgs) -> anyhow::Result<()> {
    let Some(patch) = get_factory_patch(&args.name) else {
        anyhow::bail!(
            "Unknown factory patch '{}'. Use 'bitdauer patches list --factory' to see them.",
            args.name
        );
    };

    println!("Rendering factory patch '{}'...", patch.name);
    render_patch(&patch, &args.output)
}
