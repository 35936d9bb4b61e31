// services/fabric-dash/src/app.rs
//
// Dashboard application: input handling and pipeline dispatch
// Pipeline runs are spawned on the tokio runtime and report back over a
// channel, so the UI thread keeps redrawing while a run is pending.
//

use crossterm::event::KeyCode;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use svckit::services::Services;
use svckit::{BusinessCase, FabricError, PipelineRun};

use crate::state::DashboardState;
use crate::view::DashboardView;

pub enum AppEvent {
    PipelineFinished(Result<PipelineRun, FabricError>),
}

pub struct App {
    pub state: DashboardState,
    services: Services,
    report_id: String,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(services: Services, initial: BusinessCase, report_id: impl Into<String>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::new(initial),
            services,
            report_id: report_id.into(),
            events_tx,
            events_rx,
        }
    }

    /// Build the view for the current render pass
    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.state, &self.services, &self.report_id)
    }

    /// Returns `true` when the user asked to quit
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Tab => self.state.select_next(),
            KeyCode::Left | KeyCode::BackTab => self.state.select_previous(),
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as usize) - ('1' as usize);
                self.state.select(BusinessCase::ALL[idx]);
            }
            KeyCode::Enter | KeyCode::Char('p') => self.trigger_pipeline(),
            _ => {}
        }
        false
    }

    /// Spawn a pipeline run for the selected business case.
    /// Must be called from within a tokio runtime.
    pub fn trigger_pipeline(&mut self) {
        let Some(business_case) = self.state.begin_run() else {
            debug!("Pipeline already running; ignoring trigger");
            return;
        };

        info!("Run Fabric Pipeline pressed for {}", business_case);
        let pipeline = self.services.pipeline.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = pipeline.trigger(business_case.as_str()).await;
            let _ = tx.send(AppEvent::PipelineFinished(result));
        });
    }

    /// Apply every event that arrived since the last frame
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::PipelineFinished(result) => {
                    match &result {
                        Ok(run) => info!("{} (ID: {})", run.message, run.run_id),
                        Err(e) => warn!("Pipeline run failed: {}", e),
                    }
                    self.state.finish_run(result);
                }
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.state.on_tick();
    }
}
