// services/fabric-dash/src/state.rs
//
// Dashboard state management
// Only what the user chose and where the pipeline run stands; every figure
// on screen is recomputed from the services on each render pass.
//

use svckit::{BusinessCase, FabricError, PipelineRun};

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Idle,
    Running { business_case: BusinessCase },
    Succeeded(PipelineRun),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub selected: BusinessCase,
    pub pipeline: PipelineState,
    // Drives the spinner while a run is in flight
    pub tick: u64,
}

impl DashboardState {
    pub fn new(selected: BusinessCase) -> Self {
        Self {
            selected,
            pipeline: PipelineState::Idle,
            tick: 0,
        }
    }

    /// Change the selection; a finished run's notice does not survive it
    pub fn select(&mut self, case: BusinessCase) {
        if case == self.selected {
            return;
        }
        self.selected = case;
        if !self.is_running() {
            self.pipeline = PipelineState::Idle;
        }
    }

    pub fn select_next(&mut self) {
        self.select(self.selected.next());
    }

    pub fn select_previous(&mut self) {
        self.select(self.selected.previous());
    }

    pub fn is_running(&self) -> bool {
        matches!(self.pipeline, PipelineState::Running { .. })
    }

    /// Mark a run as started for the current selection.
    /// Returns `None` while another run is still pending.
    pub fn begin_run(&mut self) -> Option<BusinessCase> {
        if self.is_running() {
            return None;
        }
        let business_case = self.selected;
        self.pipeline = PipelineState::Running { business_case };
        Some(business_case)
    }

    /// Record the outcome of the pending run. The notice belongs to the case
    /// the run was started for; if the selection moved on, it is dropped.
    pub fn finish_run(&mut self, result: Result<PipelineRun, FabricError>) {
        let stale = matches!(
            self.pipeline,
            PipelineState::Running { business_case } if business_case != self.selected
        );
        self.pipeline = match result {
            _ if stale => PipelineState::Idle,
            Ok(run) => PipelineState::Succeeded(run),
            Err(e) => PipelineState::Failed(e.to_string()),
        };
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(BusinessCase::default())
    }
}
