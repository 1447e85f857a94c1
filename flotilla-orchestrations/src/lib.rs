//! Flotilla Orchestrations - removal of member clusters from the control plane
//!
//! This crate implements the unjoin pipeline: deleting the control plane's
//! bookkeeping for a member cluster and, when member credentials are
//! supplied, the access objects join created inside the member cluster.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use flotilla_orchestrations::{
//!     ClusterIdentity, DeletionPolicy, KubeResourceClient, UnjoinOrchestration, UnjoinRequest,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = ClusterIdentity::new("my-cluster", None, None);
//! let request = UnjoinRequest::new(identity, DeletionPolicy::Strict, false, "flotilla-cluster");
//!
//! let client = kube::Client::try_default().await?;
//! let control_plane = Arc::new(KubeResourceClient::new(client));
//!
//! let unjoin = UnjoinOrchestration::new(request, control_plane, None);
//! let report = unjoin.run().await?;
//! println!("removed {} resources", report.steps.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod names;
pub mod policy;
pub mod poller;
pub mod resource_client;
pub mod types;
pub mod unjoin;

// Re-export key types for convenience
pub use error::UnjoinError;
pub use policy::DeletionPolicy;
pub use resource_client::{ApiError, DeleteOutcome, KubeResourceClient, ResourceClient};
pub use types::*;
pub use unjoin::UnjoinOrchestration;
