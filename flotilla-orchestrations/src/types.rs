//! Input, plan, and report types for the unjoin orchestration

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::DeletionPolicy;

// ============================================================================
// Cluster identity and request
// ============================================================================

/// Identity of the member cluster being unjoined.
///
/// Immutable once constructed. When no member context is given the cluster
/// name doubles as the kubeconfig context name, mirroring what join assumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterIdentity {
    cluster_name: String,
    member_context: String,
    member_kubeconfig: Option<PathBuf>,
}

impl ClusterIdentity {
    pub fn new(
        cluster_name: impl Into<String>,
        member_context: Option<String>,
        member_kubeconfig: Option<PathBuf>,
    ) -> Self {
        let cluster_name = cluster_name.into();
        let member_context = member_context.unwrap_or_else(|| cluster_name.clone());
        Self {
            cluster_name,
            member_context,
            member_kubeconfig,
        }
    }

    /// Registered name of the cluster in the control plane.
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Kubeconfig context to use when talking to the member cluster.
    pub fn member_context(&self) -> &str {
        &self.member_context
    }

    /// Path of the member cluster's kubeconfig, if credentials were supplied.
    pub fn member_kubeconfig(&self) -> Option<&Path> {
        self.member_kubeconfig.as_deref()
    }
}

/// Everything the unjoin orchestration needs to run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnjoinRequest {
    identity: ClusterIdentity,
    policy: DeletionPolicy,
    dry_run: bool,
    cluster_namespace: String,
}

impl UnjoinRequest {
    pub fn new(
        identity: ClusterIdentity,
        policy: DeletionPolicy,
        dry_run: bool,
        cluster_namespace: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            policy,
            dry_run,
            cluster_namespace: cluster_namespace.into(),
        }
    }

    pub fn identity(&self) -> &ClusterIdentity {
        &self.identity
    }

    pub fn cluster_name(&self) -> &str {
        self.identity.cluster_name()
    }

    pub fn policy(&self) -> DeletionPolicy {
        self.policy
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Namespace holding the control plane's objects inside the member cluster.
    pub fn cluster_namespace(&self) -> &str {
        &self.cluster_namespace
    }
}

// ============================================================================
// Deletion plan
// ============================================================================

/// Which API server a deletion step talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ApiSurface {
    ControlPlane,
    MemberCluster,
}

/// Kinds of resources the unjoin pipeline removes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Namespace,
    ServiceAccount,
    ClusterRole,
    ClusterRoleBinding,
    MemberCluster,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Namespace => "namespace",
            Self::ServiceAccount => "service account",
            Self::ClusterRole => "cluster role",
            Self::ClusterRoleBinding => "cluster role binding",
            Self::MemberCluster => "member cluster",
        })
    }
}

/// Target of a single delete or existence check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub kind: ResourceKind,
    /// Set only for namespaced kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceRef {
    pub fn cluster_scoped(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: None,
            name: name.into(),
        }
    }

    pub fn namespaced(
        kind: ResourceKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.name)
    }
}

/// One unit of work in the unjoin pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionStep {
    pub surface: ApiSurface,
    pub resource: ResourceRef,
    /// Whether the failure policy may absorb this step's errors.
    pub tolerates_failure: bool,
}

// ============================================================================
// Report
// ============================================================================

/// How a single step ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StepOutcome {
    /// Deleted and confirmed gone.
    Succeeded,
    /// Dry run, nothing was sent to any API server.
    SkippedDryRun,
    /// The resource was already absent.
    SkippedAbsent,
    /// Failed, but the best-effort policy absorbed the error.
    SoftFailed,
    /// Failed and aborted the pipeline.
    HardFailed,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Succeeded => "deleted",
            Self::SkippedDryRun => "would delete (dry run)",
            Self::SkippedAbsent => "already absent",
            Self::SoftFailed => "failed (continued)",
            Self::HardFailed => "failed",
        })
    }
}

/// Outcome of one pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub surface: ApiSurface,
    pub resource: ResourceRef,
    pub outcome: StepOutcome,
    /// Failure detail for steps the policy absorbed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Summary of a completed unjoin run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnjoinReport {
    pub cluster_name: String,
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
    pub finished_at: DateTime<Utc>,
}

impl UnjoinReport {
    /// Steps whose failure the best-effort policy absorbed.
    pub fn left_behind(&self) -> Vec<&StepReport> {
        self.steps
            .iter()
            .filter(|step| step.outcome == StepOutcome::SoftFailed)
            .collect()
    }

    /// True when no member cluster resources were left behind.
    pub fn is_clean(&self) -> bool {
        self.left_behind().is_empty()
    }
}
