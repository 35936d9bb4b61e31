// svckit/src/services/pipeline.rs
//
// Mock pipeline trigger
// Real integration: POST .../workspaces/{workspaceId}/items/{itemId}/jobs/instances?jobType=Pipeline
// with an Entra ID bearer token, then poll the job instance until it settles.
//

use std::time::Duration;
use async_trait::async_trait;
use rand::Rng;
use tracing::info;

use super::PipelineService;
use crate::errors::FabricError;
use crate::types::{PipelineRun, RunStatus};

pub struct MockPipeline {
    latency: Duration,
}

impl MockPipeline {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockPipeline {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

/// `run-NNNN` with NNNN uniform in 1000..=9999; not unique across calls
fn generate_run_id() -> String {
    let n: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("run-{}", n)
}

#[async_trait]
impl PipelineService for MockPipeline {
    async fn trigger(&self, business_case: &str) -> Result<PipelineRun, FabricError> {
        info!("Submitting mock pipeline run for {}", business_case);

        tokio::time::sleep(self.latency).await;

        let run = PipelineRun {
            status: RunStatus::Success,
            run_id: generate_run_id(),
            message: format!("Pipeline for {} completed successfully", business_case),
        };
        info!("Mock pipeline {} finished with status {}", run.run_id, run.status);
        Ok(run)
    }

    fn name(&self) -> &str {
        "mock-pipeline"
    }
}
