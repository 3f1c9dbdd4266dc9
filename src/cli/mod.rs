//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Cluster sizing and container resource updates for vertical autoscaling
#[derive(Parser, Debug)]
#[command(name = "k8s-scale-client")]
#[command(version)]
#[command(about = "Read cluster size and update workload container resources")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Namespace of the scaled workload
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Scaled workload as <kind>/<name> (deployment, daemonset or replicaset)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Path to kubeconfig; in-cluster credentials are used when omitted
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show node count and total CPU cores
    ClusterSize {
        /// Output format (text, json, json-pretty)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Update container resources of the target
    Update(UpdateArgs),

    /// Show the resolved target
    Target {
        /// Output format (text, json, json-pretty)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Describe supported environment variables
    Env,
}

/// Arguments for update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// YAML or JSON file mapping container name to resource requirements
    #[arg(short, long)]
    pub resources: PathBuf,

    /// Print the patch instead of applying it
    #[arg(long)]
    pub dry_run: bool,
}
