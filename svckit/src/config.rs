use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::FabricError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub pipeline: PipelineConfig,
    pub metrics: MetricsConfig,
    pub report: ReportConfig,
    pub ui: UiConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// How long the mock pipeline pretends to run
    pub simulated_latency_ms: u64,
}

impl PipelineConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 2_000,
        }
    }
}

/// What the metrics lookup does with an identifier outside the known set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCasePolicy {
    /// Serve the Sales bundle and log a validation warning
    #[default]
    FallbackToSales,
    /// Fail with `FabricError::UnknownBusinessCase`
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub unknown_case: UnknownCasePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub report_id: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_id: "placeholder-report-id".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval of the terminal dashboard
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_file: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: "fabric-dash.log".to_string(),
        }
    }
}

/// `FABRIC_DASH__<SECTION>__<KEY>` overrides, e.g. `FABRIC_DASH__PIPELINE__SIMULATED_LATENCY_MS`
fn environment() -> Environment {
    Environment::with_prefix("FABRIC_DASH")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration: built-in defaults, then the optional YAML file at
/// `path`, then `FABRIC_DASH__*` environment variables.
pub fn load_config(path: &str) -> Result<DashboardConfig, FabricError> {
    load_layers(path, environment())
}

fn load_layers(path: &str, env: Environment) -> Result<DashboardConfig, FabricError> {
    let config = Config::builder()
        .add_source(Config::try_from(&DashboardConfig::default())?)
        .add_source(File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn from_yaml(contents: &str) -> Result<DashboardConfig, FabricError> {
        serde_yaml::from_str(contents).map_err(|e| FabricError::ConfigError(e.to_string()))
    }

    fn shipped_config_path() -> String {
        format!("{}/../config/fabric-dash.yaml", env!("CARGO_MANIFEST_DIR"))
    }

    fn fake_env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        environment().source(Some(map))
    }

    #[test]
    fn test_defaults_match_mock_behaviour() {
        let config = DashboardConfig::default();
        assert_eq!(config.pipeline.simulated_latency(), Duration::from_secs(2));
        assert_eq!(config.metrics.unknown_case, UnknownCasePolicy::FallbackToSales);
        assert_eq!(config.report.report_id, "placeholder-report-id");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = from_yaml(
            r#"
pipeline:
  simulated_latency_ms: 250
metrics:
  unknown_case: reject
"#,
        )
        .unwrap();

        assert_eq!(config.pipeline.simulated_latency_ms, 250);
        assert_eq!(config.metrics.unknown_case, UnknownCasePolicy::Reject);
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.observability.log_file, "fabric-dash.log");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_layers("does/not/exist/fabric-dash", fake_env(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_shipped_config_file_loads() {
        let path = shipped_config_path();
        let direct = from_yaml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let loaded = load_layers(&path, fake_env(&[])).unwrap();

        assert_eq!(loaded, direct);
        assert_eq!(loaded.pipeline.simulated_latency_ms, 2_000);
        assert_eq!(loaded.report.report_id, "placeholder-report-id");
        assert_eq!(loaded.metrics.unknown_case, UnknownCasePolicy::FallbackToSales);
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "pipeline:\n  simulated_latency_ms: 750\nui:\n  tick_ms: 40").unwrap();

        let config = load_layers(file.path().to_str().unwrap(), fake_env(&[])).unwrap();
        assert_eq!(config.pipeline.simulated_latency_ms, 750);
        assert_eq!(config.ui.tick_ms, 40);
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_environment_overrides_file() {
        let env = fake_env(&[
            ("FABRIC_DASH__PIPELINE__SIMULATED_LATENCY_MS", "5"),
            ("FABRIC_DASH__METRICS__UNKNOWN_CASE", "reject"),
        ]);
        let config = load_layers(&shipped_config_path(), env).unwrap();

        assert_eq!(config.pipeline.simulated_latency_ms, 5);
        assert_eq!(config.metrics.unknown_case, UnknownCasePolicy::Reject);
        assert_eq!(config.ui.tick_ms, 100);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let result = from_yaml("pipeline: [not, a, map]");
        assert!(matches!(result, Err(FabricError::ConfigError(_))));
    }
}
