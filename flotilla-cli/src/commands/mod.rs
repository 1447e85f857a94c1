//! flotillactl command handlers

pub mod unjoin;

use std::path::Path;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

/// Build a Kubernetes client for the given kubeconfig path and context.
///
/// With neither given, the standard resolution applies: `KUBECONFIG`, then
/// `~/.kube/config`, then in-cluster configuration.
pub async fn build_client(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Client> {
    if kubeconfig.is_none() && context.is_none() {
        return Client::try_default()
            .await
            .context("Failed to create Kubernetes client");
    }

    let file = match kubeconfig {
        Some(path) => Kubeconfig::read_from(path)
            .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?,
        None => Kubeconfig::read().context("Failed to read kubeconfig")?,
    };

    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let config = Config::from_custom_kubeconfig(file, &options)
        .await
        .context("Failed to load kubeconfig")?;

    Client::try_from(config).context("Failed to create Kubernetes client")
}
