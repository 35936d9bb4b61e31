// svckit/src/lib.rs
//
// Shared kit for the Fabric demo dashboard
// Domain types, error taxonomy, configuration and the service seams that
// stand in for Microsoft Fabric until the real integration lands.
//

pub mod config;
pub mod errors;
pub mod services;
pub mod types;

pub use errors::FabricError;
pub use types::{BusinessCase, EmbedReference, MetricsBundle, PipelineRun, RunStatus};
