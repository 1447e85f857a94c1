//! Derived resource names for member clusters
//!
//! Join derives every per-cluster resource name from the cluster name alone,
//! so unjoin can recompute the same names without consulting any stored state.

/// Prefix of the per-cluster execution namespace in the control plane.
pub const EXECUTION_SPACE_PREFIX: &str = "flotilla-es-";

/// Prefix of the control plane's service account inside a member cluster.
pub const SERVICE_ACCOUNT_PREFIX: &str = "flotilla-";

/// Prefix of the cluster role granted to the control plane's service account.
/// The cluster role binding reuses the cluster role's name.
pub const ROLE_PREFIX: &str = "flotilla-controller-manager:";

/// Namespace in the control plane where scheduled work for the cluster lands.
pub fn execution_space_name(cluster_name: &str) -> String {
    format!("{}{}", EXECUTION_SPACE_PREFIX, cluster_name)
}

/// Service account the control plane authenticates as inside the member cluster.
pub fn service_account_name(cluster_name: &str) -> String {
    format!("{}{}", SERVICE_ACCOUNT_PREFIX, cluster_name)
}

/// Cluster role (and cluster role binding) granted to the service account.
pub fn role_name(service_account_name: &str) -> String {
    format!("{}{}", ROLE_PREFIX, service_account_name)
}
