// svckit/src/services/mod.rs
//
// Service seams for the Fabric integration
// Each trait is the boundary a real Fabric / Power BI client will sit behind.
// The mock implementations are the default backend and the test double.
//

mod embed;
mod metrics;
mod pipeline;

use std::sync::Arc;
use async_trait::async_trait;

use crate::config::DashboardConfig;
use crate::errors::FabricError;
use crate::types::{BusinessCase, EmbedReference, MetricsBundle, PipelineRun};

pub use embed::PlaceholderEmbed;
pub use metrics::MockMetrics;
pub use pipeline::MockPipeline;

/// Pipeline job API: submit a run for a business case and await completion
#[async_trait]
pub trait PipelineService: Send + Sync {
    async fn trigger(&self, business_case: &str) -> Result<PipelineRun, FabricError>;
    fn name(&self) -> &str;
}

/// Warehouse / lakehouse query returning KPIs and the weekly trend
pub trait MetricsService: Send + Sync {
    fn fetch(&self, business_case: &str) -> Result<MetricsBundle, FabricError>;

    fn fetch_case(&self, business_case: BusinessCase) -> Result<MetricsBundle, FabricError> {
        self.fetch(business_case.as_str())
    }
}

/// Embed token service producing a report URL, or `Unavailable`
pub trait EmbedResolver: Send + Sync {
    fn resolve(&self, report_id: &str) -> Result<EmbedReference, FabricError>;
}

/// The three collaborators the dashboard renders from
#[derive(Clone)]
pub struct Services {
    pub pipeline: Arc<dyn PipelineService>,
    pub metrics: Arc<dyn MetricsService>,
    pub embed: Arc<dyn EmbedResolver>,
}

impl Services {
    /// Mock backend configured from `config`
    pub fn mock(config: &DashboardConfig) -> Self {
        Self {
            pipeline: Arc::new(MockPipeline::new(config.pipeline.simulated_latency())),
            metrics: Arc::new(MockMetrics::new(config.metrics.unknown_case)),
            embed: Arc::new(PlaceholderEmbed),
        }
    }
}
