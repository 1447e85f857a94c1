//! Failure policy for member cluster cleanup
//!
//! Control-plane steps always abort on failure. Member-cluster steps go
//! through [`DeletionPolicy::absorb`], which decides whether a failure stops
//! the pipeline or is logged and carried in the report instead.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::UnjoinError;
use crate::types::{DeletionStep, StepOutcome};

/// How failures of member-cluster cleanup steps are handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DeletionPolicy {
    /// Any failure aborts the pipeline. Default.
    Strict,
    /// Member-cluster failures are logged and skipped, so the cluster's
    /// registration can be removed even when the member is unreachable.
    BestEffort,
}

impl DeletionPolicy {
    /// The `--force` flag selects best-effort cleanup.
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::BestEffort
        } else {
            Self::Strict
        }
    }

    /// Resolve the failure of a step that tolerates failure.
    ///
    /// Strict returns the error unchanged. Best-effort logs it and turns the
    /// step into a soft failure so the pipeline keeps going.
    pub fn absorb(
        self,
        step: &DeletionStep,
        err: UnjoinError,
    ) -> Result<StepOutcome, UnjoinError> {
        match self {
            Self::Strict => Err(err),
            Self::BestEffort => {
                warn!(
                    "Force deletion: {}; leaving {} behind and continuing",
                    err, step.resource
                );
                Ok(StepOutcome::SoftFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::resource_client::ApiError;
    use crate::types::{ApiSurface, ResourceKind, ResourceRef};

    fn forbidden_binding() -> (DeletionStep, UnjoinError) {
        let step = DeletionStep {
            surface: ApiSurface::MemberCluster,
            resource: ResourceRef::cluster_scoped(
                ResourceKind::ClusterRoleBinding,
                "flotilla-controller-manager:flotilla-cluster-a",
            ),
            tolerates_failure: true,
        };
        let err = UnjoinError::DeleteFailed {
            cluster: "cluster-a".to_string(),
            kind: ResourceKind::ClusterRoleBinding,
            name: "flotilla-controller-manager:flotilla-cluster-a".to_string(),
            source: ApiError::Status {
                code: 403,
                message: "forbidden".to_string(),
            },
        };
        (step, err)
    }

    #[test]
    fn test_strict_returns_the_error_unchanged() {
        let (step, err) = forbidden_binding();
        let result = DeletionPolicy::Strict.absorb(&step, err);

        match result {
            Err(UnjoinError::DeleteFailed { kind, .. }) => {
                assert_eq!(kind, ResourceKind::ClusterRoleBinding)
            }
            other => panic!("expected the original error, got {:?}", other),
        }
    }

    #[test]
    fn test_best_effort_absorbs_into_soft_failure() {
        let (step, err) = forbidden_binding();
        let outcome = DeletionPolicy::BestEffort.absorb(&step, err);
        assert!(matches!(outcome, Ok(StepOutcome::SoftFailed)));
    }

    #[test]
    fn test_force_flag_selects_policy() {
        assert_eq!(DeletionPolicy::from_force(false), DeletionPolicy::Strict);
        assert_eq!(DeletionPolicy::from_force(true), DeletionPolicy::BestEffort);
    }
}
