//! Deletion-oriented view of a Kubernetes API surface
//!
//! The unjoin pipeline only ever deletes resources by name and checks whether
//! a resource still exists. [`ResourceClient`] captures exactly that, so the
//! orchestration can run against the control plane and the member cluster
//! through the same interface, and tests can swap in an in-memory fake.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, ServiceAccount};
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding};
use kube::api::{Api, DeleteParams};
use kube::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use flotilla_models::MemberCluster;

use crate::types::{ResourceKind, ResourceRef};

/// Error surfaced by a [`ResourceClient`] call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API server answered with a non-2xx status.
    #[error("api server rejected the request (status {code}): {message}")]
    Status { code: u16, message: String },

    /// The request never produced an API answer.
    #[error("request failed: {0}")]
    Connection(String),
}

impl From<kube::Error> for ApiError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) => ApiError::Status {
                code: response.code,
                message: response.message,
            },
            other => ApiError::Connection(other.to_string()),
        }
    }
}

/// What an idempotent delete actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The resource existed and deletion was accepted.
    Deleted,
    /// The resource was already gone.
    AlreadyAbsent,
}

/// Delete and existence-check operations against one API surface.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Delete `resource` if present. Absence is not an error.
    async fn delete(&self, resource: &ResourceRef) -> Result<DeleteOutcome, ApiError>;

    /// Report whether `resource` currently exists.
    async fn exists(&self, resource: &ResourceRef) -> Result<bool, ApiError>;
}

/// [`ResourceClient`] backed by a kube [`Client`].
///
/// One instance per API surface: the unjoin pipeline holds one for the
/// control plane and, when member credentials are supplied, one for the
/// member cluster.
#[derive(Clone)]
pub struct KubeResourceClient {
    client: Client,
}

impl KubeResourceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn service_accounts(&self, resource: &ResourceRef) -> Api<ServiceAccount> {
        match resource.namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::default_namespaced(self.client.clone()),
        }
    }

    async fn delete_with<K>(&self, api: Api<K>, name: &str) -> Result<DeleteOutcome, ApiError>
    where
        K: Clone + DeserializeOwned + std::fmt::Debug,
    {
        match api.delete(name, &DeleteParams::default()).await {
            Ok(_) => Ok(DeleteOutcome::Deleted),
            Err(kube::Error::Api(response)) if response.code == 404 => {
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn exists_with<K>(&self, api: Api<K>, name: &str) -> Result<bool, ApiError>
    where
        K: Clone + DeserializeOwned + std::fmt::Debug,
    {
        match api.get(name).await {
            Ok(_) => Ok(true),
            Err(kube::Error::Api(response)) if response.code == 404 => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl ResourceClient for KubeResourceClient {
    async fn delete(&self, resource: &ResourceRef) -> Result<DeleteOutcome, ApiError> {
        let name = resource.name.as_str();
        match resource.kind {
            ResourceKind::Namespace => {
                self.delete_with(Api::<Namespace>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::ServiceAccount => {
                self.delete_with(self.service_accounts(resource), name).await
            }
            ResourceKind::ClusterRole => {
                self.delete_with(Api::<ClusterRole>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::ClusterRoleBinding => {
                self.delete_with(Api::<ClusterRoleBinding>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::MemberCluster => {
                self.delete_with(Api::<MemberCluster>::all(self.client.clone()), name)
                    .await
            }
        }
    }

    async fn exists(&self, resource: &ResourceRef) -> Result<bool, ApiError> {
        let name = resource.name.as_str();
        match resource.kind {
            ResourceKind::Namespace => {
                self.exists_with(Api::<Namespace>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::ServiceAccount => {
                self.exists_with(self.service_accounts(resource), name).await
            }
            ResourceKind::ClusterRole => {
                self.exists_with(Api::<ClusterRole>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::ClusterRoleBinding => {
                self.exists_with(Api::<ClusterRoleBinding>::all(self.client.clone()), name)
                    .await
            }
            ResourceKind::MemberCluster => {
                self.exists_with(Api::<MemberCluster>::all(self.client.clone()), name)
                    .await
            }
        }
    }
}
