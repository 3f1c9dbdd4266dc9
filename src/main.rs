//! k8s-scale-client - cluster sizing and resource updates from the shell
//!
//! ## Usage
//!
//! ```bash
//! # Show cluster size using in-cluster credentials
//! k8s-scale-client --target deployment/coredns -n kube-system cluster-size
//!
//! # Preview a resources patch using a local kubeconfig
//! k8s-scale-client --kubeconfig ~/.kube/config -t daemonset/agent \
//!     update --resources resources.yaml --dry-run
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use k8s_scale_client::config::{self, ClientConfig, EnvConfig};
use k8s_scale_client::k8s::K8sClient;
use k8s_scale_client::output::{OutputFormat, ResultFormatter};
use k8s_scale_client::utils::{init_logger, LogLevel};

mod cli;

use cli::{Args, Command, UpdateArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let level = if args.verbose > 0 {
        LogLevel::from_verbosity(args.verbose)
    } else {
        env.log_level
            .as_deref()
            .and_then(|level| level.parse::<LogLevel>().ok())
            .unwrap_or_default()
    };
    init_logger(level);

    if let Command::Env = args.command {
        config::print_env_help();
        return Ok(());
    }

    let client_config = ClientConfig::resolve(&env, args.namespace, args.target, args.kubeconfig)?;

    let mut client = K8sClient::connect(&client_config)
        .await
        .context("Failed to create scaling client")?;

    match args.command {
        Command::ClusterSize { format } => {
            let size = client
                .get_cluster_size()
                .await
                .context("Failed to read cluster size")?;
            println!("{}", formatter(&format)?.format_cluster_size(&size));
        }
        Command::Target { format } => {
            println!("{}", formatter(&format)?.format_target(client.target()));
        }
        Command::Update(update_args) => {
            update(&client, update_args).await?;
        }
        Command::Env => config::print_env_help(),
    }

    Ok(())
}

fn formatter(format: &str) -> Result<ResultFormatter> {
    let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
    Ok(ResultFormatter::new(format))
}

async fn update(client: &K8sClient, args: UpdateArgs) -> Result<()> {
    let resources = config::load_resources(&args.resources)?;

    if args.dry_run {
        let patch = client.preview_patch(&resources)?;
        println!("{}", ResultFormatter::new(OutputFormat::Text).format_patch(&patch));
        return Ok(());
    }

    client
        .update_resources(&resources)
        .await
        .with_context(|| format!("Failed to update resources of {}", client.target()))?;

    info!("Updated {} container(s)", resources.len());
    Ok(())
}
