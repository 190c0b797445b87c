//! Policy Graph CLI
//!
//! Loads an asset inventory export and prints query results as JSON

use anyhow::Context;
use clap::{Parser, Subcommand};
use gcp_policy_graph::{PolicyConfig, PolicyManager};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "policy-graph")]
#[command(about = "Query resource hierarchy and IAM bindings from an asset inventory export")]
struct Args {
    /// Path to the asset inventory JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ancestor ids of a resource, nearest first
    Path {
        /// Canonical resource id, e.g. folders/188906894377
        resource: String,
    },

    /// Every descendant resource of a resource
    Children { resource: String },

    /// Every resource a member can access, with type and granting role
    Member {
        /// Member id, e.g. user:alice@example.com
        member: String,
    },

    /// Every member and role with access to a resource
    Access { resource: String },

    /// Node and edge counts
    Summary,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PolicyConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PolicyConfig::default(),
    };
    debug!("Using configuration {:?}", config);

    let manager = PolicyManager::builder()
        .config(config)
        .build_from_file(&args.input)
        .with_context(|| format!("failed to load inventory {}", args.input.display()))?;

    match args.command {
        Command::Path { resource } => {
            let resource = manager.resource_by_id(&resource)?;
            print_json(&manager.resource_path(resource))
        }
        Command::Children { resource } => {
            let resource = manager.resource_by_id(&resource)?;
            let ids: Vec<&str> = manager
                .child_resources(resource)
                .into_iter()
                .map(|child| child.id())
                .collect();
            print_json(&ids)
        }
        Command::Member { member } => {
            let member = manager.member_by_id(&member)?;
            print_json(&manager.all_members_permission(member)?)
        }
        Command::Access { resource } => {
            let resource = manager.resource_by_id(&resource)?;
            print_json(&manager.resource_member_permissions(resource))
        }
        Command::Summary => print_json(&manager.summary()),
    }
}
