//! Error types for the unjoin orchestration

use std::time::Duration;

use thiserror::Error;

use crate::resource_client::ApiError;
use crate::types::ResourceKind;

/// Why an unjoin run aborted.
///
/// Every variant carries the cluster being unjoined and the resource the
/// pipeline was working on when it stopped.
#[derive(Debug, Error)]
pub enum UnjoinError {
    /// The API server rejected the delete call.
    #[error("failed to delete {kind} {name:?} for cluster {cluster:?}: {source}")]
    DeleteFailed {
        cluster: String,
        kind: ResourceKind,
        name: String,
        #[source]
        source: ApiError,
    },

    /// An existence check failed while confirming a deletion.
    #[error("failed to confirm deletion of {kind} {name:?} for cluster {cluster:?}: {source}")]
    CheckFailed {
        cluster: String,
        kind: ResourceKind,
        name: String,
        #[source]
        source: ApiError,
    },

    /// The resource was still present when the confirmation budget ran out.
    #[error("{kind} {name:?} for cluster {cluster:?} was still present after {waited:?}")]
    ConfirmTimeout {
        cluster: String,
        kind: ResourceKind,
        name: String,
        waited: Duration,
    },
}

impl UnjoinError {
    /// Name of the resource the pipeline stopped on.
    pub fn resource_name(&self) -> &str {
        match self {
            Self::DeleteFailed { name, .. }
            | Self::CheckFailed { name, .. }
            | Self::ConfirmTimeout { name, .. } => name,
        }
    }

    /// Kind of the resource the pipeline stopped on.
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::DeleteFailed { kind, .. }
            | Self::CheckFailed { kind, .. }
            | Self::ConfirmTimeout { kind, .. } => *kind,
        }
    }
}
