//! Unjoin command

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use flotilla_orchestrations::{
    ClusterIdentity, DeletionPolicy, KubeResourceClient, ResourceClient, UnjoinOrchestration,
    UnjoinReport, UnjoinRequest,
};

use crate::cli::UnjoinArgs;
use crate::commands::build_client;

pub async fn run_unjoin(args: UnjoinArgs) -> Result<()> {
    if args.cluster_name.trim().is_empty() {
        anyhow::bail!("member cluster name is required");
    }

    let identity = ClusterIdentity::new(
        args.cluster_name,
        args.member_cluster_context,
        args.member_cluster_kubeconfig,
    );
    let request = UnjoinRequest::new(
        identity,
        DeletionPolicy::from_force(args.force),
        args.dry_run,
        args.cluster_namespace,
    );

    let client = build_client(args.kubeconfig.as_deref(), args.context.as_deref()).await?;
    let control_plane: Arc<dyn ResourceClient> = Arc::new(KubeResourceClient::new(client));

    let member_cluster = match request.identity().member_kubeconfig() {
        Some(path) => {
            info!(
                "Connecting to member cluster {:?} (context {:?})",
                request.cluster_name(),
                request.identity().member_context()
            );
            let client = build_client(Some(path), Some(request.identity().member_context())).await?;
            Some(Arc::new(KubeResourceClient::new(client)) as Arc<dyn ResourceClient>)
        }
        None => {
            info!("No member cluster kubeconfig given, skipping member cluster cleanup");
            None
        }
    };

    let unjoin = UnjoinOrchestration::new(request, control_plane, member_cluster);
    let report = unjoin.run().await?;

    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &UnjoinReport) {
    if report.dry_run {
        println!("✓ Dry run complete, nothing was deleted");
    } else if report.is_clean() {
        println!("✓ Cluster '{}' unjoined", report.cluster_name);
    } else {
        println!(
            "✓ Cluster '{}' unjoined, some member cluster resources were left behind",
            report.cluster_name
        );
    }

    println!();
    for step in &report.steps {
        println!(
            "  {:<22} {:<46} {}",
            step.resource.kind.to_string(),
            step.resource.name,
            step.outcome
        );
    }

    let left_behind = report.left_behind();
    if !left_behind.is_empty() {
        println!();
        println!("Left behind in the member cluster:");
        for step in left_behind {
            println!(
                "  {}: {}",
                step.resource,
                step.detail.as_deref().unwrap_or("unknown failure")
            );
        }
    }
}
