use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flotilla - multi-cluster control plane CLI
#[derive(Parser, Debug)]
#[command(name = "flotillactl", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Remove a member cluster from the control plane
    Unjoin(UnjoinArgs),
}

#[derive(clap::Args, Debug)]
pub struct UnjoinArgs {
    /// Name the cluster was registered under
    pub cluster_name: String,

    /// Kubeconfig context of the member cluster (default: the cluster name)
    #[arg(long)]
    pub member_cluster_context: Option<String>,

    /// Path to the member cluster's kubeconfig. Without it, resources inside
    /// the member cluster are left untouched
    #[arg(long)]
    pub member_cluster_kubeconfig: Option<PathBuf>,

    /// Delete the registration even when member cluster cleanup fails
    #[arg(long)]
    pub force: bool,

    /// Path to the control plane kubeconfig (default: standard resolution)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context for the control plane
    #[arg(long)]
    pub context: Option<String>,

    /// Namespace where join placed the per-cluster objects
    #[arg(long, default_value = "flotilla-cluster")]
    pub cluster_namespace: String,

    /// Show what would be deleted without calling any API server
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    pub output: String,
}
