//! Unjoin orchestration
//!
//! Removes a member cluster from the control plane. Steps run in a fixed
//! order: the cluster's execution namespace in the control plane, then (when
//! member credentials were supplied) the RBAC grants, service account, and
//! namespace that join created inside the member cluster, and finally the
//! cluster's registration object. Every deletion is confirmed gone before
//! the next step starts, so a cluster is never half-removed silently.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::error::UnjoinError;
use crate::names;
use crate::poller::{self, WaitError};
use crate::resource_client::{DeleteOutcome, ResourceClient};
use crate::types::{
    ApiSurface, DeletionStep, ResourceKind, ResourceRef, StepOutcome, StepReport, UnjoinReport,
    UnjoinRequest,
};

/// Drives the removal of one member cluster.
pub struct UnjoinOrchestration {
    request: UnjoinRequest,
    control_plane: Arc<dyn ResourceClient>,
    member_cluster: Option<Arc<dyn ResourceClient>>,
}

impl UnjoinOrchestration {
    /// `member_cluster` is `None` when no member credentials were supplied;
    /// in that case only control-plane bookkeeping is removed.
    pub fn new(
        request: UnjoinRequest,
        control_plane: Arc<dyn ResourceClient>,
        member_cluster: Option<Arc<dyn ResourceClient>>,
    ) -> Self {
        Self {
            request,
            control_plane,
            member_cluster,
        }
    }

    /// The deletion steps this run will attempt, in execution order.
    ///
    /// Recomputed from the cluster name alone. Control-plane steps never
    /// tolerate failure; member-cluster steps defer to the failure policy.
    pub fn plan(&self) -> Vec<DeletionStep> {
        let cluster = self.request.cluster_name();

        let mut steps = vec![DeletionStep {
            surface: ApiSurface::ControlPlane,
            resource: ResourceRef::cluster_scoped(
                ResourceKind::Namespace,
                names::execution_space_name(cluster),
            ),
            tolerates_failure: false,
        }];

        if self.member_cluster.is_some() {
            let service_account = names::service_account_name(cluster);
            let role = names::role_name(&service_account);

            steps.push(DeletionStep {
                surface: ApiSurface::MemberCluster,
                resource: ResourceRef::cluster_scoped(ResourceKind::ClusterRoleBinding, role.clone()),
                tolerates_failure: true,
            });
            steps.push(DeletionStep {
                surface: ApiSurface::MemberCluster,
                resource: ResourceRef::cluster_scoped(ResourceKind::ClusterRole, role),
                tolerates_failure: true,
            });
            steps.push(DeletionStep {
                surface: ApiSurface::MemberCluster,
                resource: ResourceRef::namespaced(
                    ResourceKind::ServiceAccount,
                    self.request.cluster_namespace(),
                    service_account,
                ),
                tolerates_failure: true,
            });
            steps.push(DeletionStep {
                surface: ApiSurface::MemberCluster,
                resource: ResourceRef::cluster_scoped(
                    ResourceKind::Namespace,
                    self.request.cluster_namespace(),
                ),
                tolerates_failure: true,
            });
        }

        steps.push(DeletionStep {
            surface: ApiSurface::ControlPlane,
            resource: ResourceRef::cluster_scoped(ResourceKind::MemberCluster, cluster),
            tolerates_failure: false,
        });

        steps
    }

    /// Run the pipeline to completion.
    ///
    /// Returns a report with one entry per executed step. A hard failure
    /// aborts immediately; whatever was already deleted stays deleted, and
    /// rerunning after the cause is fixed picks up where this run stopped.
    pub async fn run(&self) -> Result<UnjoinReport, UnjoinError> {
        let cluster = self.request.cluster_name();
        debug!("Unjoining member cluster {:?}", cluster);
        debug!(
            "Member side objects live in namespace {:?}",
            self.request.cluster_namespace()
        );

        let steps = self.plan();
        let mut reports = Vec::with_capacity(steps.len());

        for step in &steps {
            if self.request.dry_run() {
                info!("Dry run: would delete {}", step.resource);
                reports.push(report_row(step, StepOutcome::SkippedDryRun, None));
                continue;
            }

            let client = match step.surface {
                ApiSurface::ControlPlane => &self.control_plane,
                ApiSurface::MemberCluster => match self.member_cluster.as_ref() {
                    Some(client) => client,
                    // plan() omits member steps when no member client is bound
                    None => continue,
                },
            };

            match self.execute(client, step).await {
                Ok(outcome) => {
                    reports.push(report_row(step, outcome, None));
                }
                Err(err) if step.tolerates_failure => {
                    let detail = err.to_string();
                    match self.request.policy().absorb(step, err) {
                        Ok(outcome) => reports.push(report_row(step, outcome, Some(detail))),
                        Err(err) => {
                            error!(
                                outcome = ?StepOutcome::HardFailed,
                                "Aborting unjoin of cluster {:?}: {}", cluster, err
                            );
                            return Err(err);
                        }
                    }
                }
                Err(err) => {
                    error!(
                        outcome = ?StepOutcome::HardFailed,
                        "Aborting unjoin of cluster {:?}: {}", cluster, err
                    );
                    return Err(err);
                }
            }
        }

        if self.request.dry_run() {
            info!("Dry run complete, nothing was deleted");
        } else {
            info!("Unjoined member cluster {:?}", cluster);
        }

        Ok(UnjoinReport {
            cluster_name: cluster.to_string(),
            dry_run: self.request.dry_run(),
            steps: reports,
            finished_at: Utc::now(),
        })
    }

    /// Delete one resource and confirm it is gone.
    async fn execute(
        &self,
        client: &Arc<dyn ResourceClient>,
        step: &DeletionStep,
    ) -> Result<StepOutcome, UnjoinError> {
        let cluster = self.request.cluster_name();
        let resource = &step.resource;

        info!("Deleting {}", resource);
        match client.delete(resource).await {
            Ok(DeleteOutcome::Deleted) => {}
            Ok(DeleteOutcome::AlreadyAbsent) => {
                info!("{} not found, skipping", resource);
                return Ok(StepOutcome::SkippedAbsent);
            }
            Err(source) => {
                return Err(UnjoinError::DeleteFailed {
                    cluster: cluster.to_string(),
                    kind: resource.kind,
                    name: resource.name.clone(),
                    source,
                });
            }
        }

        let subject = resource.to_string();
        let check_client = Arc::clone(client);
        let target = resource.clone();
        let wait = poller::wait_until_absent(&subject, move || {
            let client = Arc::clone(&check_client);
            let target = target.clone();
            async move { client.exists(&target).await }
        })
        .await;

        match wait {
            Ok(()) => {
                info!("Deleted {}", resource);
                Ok(StepOutcome::Succeeded)
            }
            Err(WaitError::Check(source)) => Err(UnjoinError::CheckFailed {
                cluster: cluster.to_string(),
                kind: resource.kind,
                name: resource.name.clone(),
                source,
            }),
            Err(WaitError::TimedOut(waited)) => Err(UnjoinError::ConfirmTimeout {
                cluster: cluster.to_string(),
                kind: resource.kind,
                name: resource.name.clone(),
                waited,
            }),
        }
    }
}

fn report_row(step: &DeletionStep, outcome: StepOutcome, detail: Option<String>) -> StepReport {
    StepReport {
        surface: step.surface,
        resource: step.resource.clone(),
        outcome,
        detail,
    }
}
