//! Patch management commands.

use bitdauer_config::{
    Patch, ensure_user_patches_dir, factory_patch_names, get_factory_patch, list_user_patches,
    patch_name_from_path, user_patches_dir,
};
use clap::{Args, Subcommand};

use super::common::load_patch;

#[derive(Args, Debug)]
pub struct PatchesArgs {
    #[command(subcommand)]
    command: PatchesCommand,
}

#[derive(Subcommand, Debug)]
enum PatchesCommand {
    /// List available patches (factory and user)
    List {
        /// Show only factory patches
        #[arg(long)]
        factory: bool,

        /// Show only user patches
        #[arg(long)]
        user: bool,
    },

    /// Print a patch as TOML
    Show {
        /// Patch name or path
        name: String,
    },

    /// Copy a factory patch to the user patches directory
    Copy {
        /// Factory patch name
        source: String,

        /// File name for the copy (defaults to the factory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the patch directory
    Paths,
}

pub fn run(args: PatchesArgs) -> anyhow::Result<()> {
    match args.command {
        PatchesCommand::List { factory, user } => list_patches(factory, user),
        PatchesCommand::Show { name } => show_patch(&name),
        PatchesCommand::Copy { source, name } => copy_patch(&source, name.as_deref()),
        PatchesCommand::Paths => {
            println!("User patches: {}", user_patches_dir().display());
            Ok(())
        }
    }
}

fn list_patches(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Patches:");
        println!("================");
        for id in factory_patch_names() {
            let Some(patch) = get_factory_patch(id) else {
                continue;
            };
            let desc = patch.description.as_deref().unwrap_or("");
            println!("  {:12} - {}", id, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Patches:");
        println!("=============");
        let user_patches = list_user_patches();
        if user_patches.is_empty() {
            println!("  (none)");
        }
        for path in user_patches {
            let name = patch_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
            match Patch::load(&path) {
                Ok(patch) => {
                    let desc = patch.description.as_deref().unwrap_or("");
                    println!("  {:12} - {}", name, desc);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable patch");
                    println!("  {:12} - (error loading)", name);
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_patch(name: &str) -> anyhow::Result<()> {
    let patch = load_patch(name)?;
    print!("{}", patch.to_toml()?);
    Ok(())
}

fn copy_patch(source: &str, name: Option<&str>) -> anyhow::Result<()> {
    let Some(patch) = get_factory_patch(source) else {
        anyhow::bail!("Unknown factory patch '{}'", source);
    };

    let file_name = name.unwrap_or(source);
    let path = ensure_user_patches_dir()?.join(format!("{file_name}.toml"));
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }

    patch.save(&path)?;
    println!("Copied '{}' to {}", patch.name, path.display());
    Ok(())
}
