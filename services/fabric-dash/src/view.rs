// services/fabric-dash/src/view.rs
//
// One render pass worth of data
// Built fresh from the services every frame and handed to the drawing code.
//

use svckit::services::Services;
use svckit::{BusinessCase, EmbedReference};

use crate::state::{DashboardState, PipelineState};

pub const TITLE: &str = "Fabric Demo Dashboard";
pub const DESCRIPTION: &str = "This is a demo UI showing how a custom dashboard could integrate with \
Microsoft Fabric. All data is currently mocked - real Fabric connections will be added later.";
pub const REPORT_PLACEHOLDER: &str = "Power BI Report will be embedded here later";
pub const REPORT_PLACEHOLDER_DETAIL: &str = "This area will display an interactive Power BI report \
once the embed integration is configured.";

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelinePanel {
    Idle,
    Running { spinner: &'static str, business_case: BusinessCase },
    Notice(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportPanel {
    Embedded { url: String },
    Placeholder,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub selected: BusinessCase,
    pub pipeline: PipelinePanel,
    pub kpis_title: String,
    pub kpis: Section<Vec<(String, String)>>,
    pub trend: Section<Vec<(String, u64)>>,
    pub report: ReportPanel,
}

impl DashboardView {
    /// Run one render pass against the services
    pub fn build(state: &DashboardState, services: &Services, report_id: &str) -> Self {
        let (kpis, trend) = match services.metrics.fetch_case(state.selected) {
            Ok(bundle) => (
                Section::Ready(
                    bundle
                        .kpis
                        .iter()
                        .map(|k| (k.label.clone(), k.value.clone()))
                        .collect(),
                ),
                Section::Ready(
                    bundle
                        .trend
                        .points()
                        .map(|(label, value)| (label.to_string(), value))
                        .collect(),
                ),
            ),
            Err(e) => (Section::Error(e.to_string()), Section::Error(e.to_string())),
        };

        let report = match services.embed.resolve(report_id) {
            Ok(EmbedReference::Available { url }) => ReportPanel::Embedded { url },
            Ok(EmbedReference::Unavailable) => ReportPanel::Placeholder,
            Err(e) => ReportPanel::Error(e.to_string()),
        };

        Self {
            selected: state.selected,
            pipeline: pipeline_panel(state),
            kpis_title: format!("{} KPIs", state.selected),
            kpis,
            trend,
            report,
        }
    }
}

fn pipeline_panel(state: &DashboardState) -> PipelinePanel {
    match &state.pipeline {
        PipelineState::Idle => PipelinePanel::Idle,
        PipelineState::Running { business_case } => PipelinePanel::Running {
            spinner: SPINNER[(state.tick % SPINNER.len() as u64) as usize],
            business_case: *business_case,
        },
        PipelineState::Succeeded(run) => PipelinePanel::Notice(run.notice()),
        PipelineState::Failed(reason) => PipelinePanel::Error(reason.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use svckit::config::DashboardConfig;
    use svckit::services::{EmbedResolver, MetricsService};
    use svckit::{FabricError, MetricsBundle, PipelineRun, RunStatus};

    fn mock_services() -> Services {
        Services::mock(&DashboardConfig::default())
    }

    struct LiveEmbed;

    impl EmbedResolver for LiveEmbed {
        fn resolve(&self, report_id: &str) -> Result<EmbedReference, FabricError> {
            Ok(EmbedReference::Available {
                url: format!("https://app.powerbi.com/reportEmbed?reportId={}", report_id),
            })
        }
    }

    struct BrokenMetrics;

    impl MetricsService for BrokenMetrics {
        fn fetch(&self, _business_case: &str) -> Result<MetricsBundle, FabricError> {
            Err(FabricError::AuthError("service principal rejected".to_string()))
        }
    }

    #[test]
    fn test_procurement_render_pass() {
        let state = DashboardState::new(BusinessCase::Procurement);
        let view = DashboardView::build(&state, &mock_services(), "placeholder-report-id");

        assert_eq!(view.kpis_title, "Procurement KPIs");
        assert_eq!(
            view.kpis,
            Section::Ready(vec![
                ("Spend".to_string(), "$890K".to_string()),
                ("Suppliers".to_string(), "45".to_string()),
                ("On-Time".to_string(), "94%".to_string()),
            ])
        );

        let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        let values = [45, 52, 48, 61, 55, 49, 58];
        let expected: Vec<(String, u64)> = days
            .iter()
            .zip(values)
            .map(|(d, v)| (d.to_string(), v))
            .collect();
        assert_eq!(view.trend, Section::Ready(expected));
        assert_eq!(view.report, ReportPanel::Placeholder);
        assert_eq!(view.pipeline, PipelinePanel::Idle);
    }

    #[test]
    fn test_repeated_render_passes_are_identical() {
        let services = mock_services();
        for case in BusinessCase::ALL {
            let state = DashboardState::new(case);
            let first = DashboardView::build(&state, &services, "placeholder-report-id");
            for _ in 0..5 {
                assert_eq!(DashboardView::build(&state, &services, "placeholder-report-id"), first);
            }
        }
    }

    #[test]
    fn test_notice_shows_message_and_run_id() {
        let mut state = DashboardState::new(BusinessCase::Finance);
        state.begin_run();
        state.finish_run(Ok(PipelineRun {
            status: RunStatus::Success,
            run_id: "run-4821".to_string(),
            message: "Pipeline for Finance completed successfully".to_string(),
        }));

        let view = DashboardView::build(&state, &mock_services(), "placeholder-report-id");
        assert_eq!(
            view.pipeline,
            PipelinePanel::Notice("Pipeline for Finance completed successfully (ID: run-4821)".to_string())
        );
    }

    #[test]
    fn test_running_panel_spins() {
        let mut state = DashboardState::new(BusinessCase::Sales);
        state.begin_run();
        let services = mock_services();

        let a = DashboardView::build(&state, &services, "r").pipeline;
        state.on_tick();
        let b = DashboardView::build(&state, &services, "r").pipeline;

        assert!(matches!(a, PipelinePanel::Running { spinner: "|", .. }));
        assert!(matches!(b, PipelinePanel::Running { spinner: "/", .. }));
    }

    #[test]
    fn test_available_embed_renders_frame() {
        let mut services = mock_services();
        services.embed = Arc::new(LiveEmbed);

        let view = DashboardView::build(&DashboardState::default(), &services, "abc");
        assert_eq!(
            view.report,
            ReportPanel::Embedded {
                url: "https://app.powerbi.com/reportEmbed?reportId=abc".to_string()
            }
        );
    }

    #[test]
    fn test_metrics_failure_is_visible() {
        let mut services = mock_services();
        services.metrics = Arc::new(BrokenMetrics);

        let view = DashboardView::build(&DashboardState::default(), &services, "r");
        assert_eq!(
            view.kpis,
            Section::Error("Authentication error: service principal rejected".to_string())
        );
        assert!(matches!(view.trend, Section::Error(_)));
    }
}
