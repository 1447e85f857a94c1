//! Shared types for the Flotilla control plane.
//!
//! The central type is the [`MemberCluster`] custom resource: the control
//! plane's registration record for a Kubernetes cluster that has joined the
//! federation. Joining creates one, unjoining deletes it.

use chrono::{DateTime, Utc};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the control plane synchronizes state with a member cluster.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum SyncMode {
    /// The control plane connects to the member cluster's API server directly.
    #[default]
    Push,
    /// An agent inside the member cluster pulls state from the control plane.
    Pull,
}

/// Namespaced reference to the secret holding a member cluster's credentials.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSecretRef {
    pub namespace: String,
    pub name: String,
}

/// Specification for a registered member cluster.
///
/// Created by `flotillactl join` and removed by `flotillactl unjoin`.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "flotilla.dev",
    version = "v1alpha1",
    kind = "MemberCluster",
    plural = "memberclusters",
    shortname = "mc",
    status = "MemberClusterStatus",
    printcolumn = r#"{"name":"Mode","type":"string","jsonPath":".spec.syncMode"}"#,
    printcolumn = r#"{"name":"Endpoint","type":"string","jsonPath":".spec.apiEndpoint"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MemberClusterSpec {
    /// Synchronization mode for this cluster.
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// API server endpoint of the member cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// Secret holding the credentials the control plane uses to reach the
    /// member cluster. Only meaningful in `Push` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ClusterSecretRef>,
}

/// Observed state of a member cluster.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberClusterStatus {
    /// Kubernetes version reported by the member cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,

    /// Conditions representing the cluster's health.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ClusterCondition>,
}

/// Condition status following Kubernetes conventions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Kubernetes-style condition for member cluster status reporting.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ClusterCondition {
    /// Type of condition (e.g., Ready).
    #[serde(rename = "type")]
    pub type_: String,

    /// Status of the condition (True, False, Unknown).
    pub status: ConditionStatus,

    /// Machine-readable reason for the condition.
    pub reason: String,

    /// Human-readable message.
    pub message: String,

    /// Last time the condition transitioned.
    #[serde(rename = "lastTransitionTime")]
    pub last_transition_time: DateTime<Utc>,
}

impl ClusterCondition {
    /// Create a new condition stamped with the current time.
    pub fn new(
        type_: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: reason.into(),
            message: message.into(),
            last_transition_time: Utc::now(),
        }
    }
}
