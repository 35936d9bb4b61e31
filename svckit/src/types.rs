use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FabricError;

/// Business case offered by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BusinessCase {
    #[default]
    Sales,
    Procurement,
    Finance,
}

impl BusinessCase {
    /// Selector order; the first entry is the default selection
    pub const ALL: [BusinessCase; 3] = [
        BusinessCase::Sales,
        BusinessCase::Procurement,
        BusinessCase::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessCase::Sales => "Sales",
            BusinessCase::Procurement => "Procurement",
            BusinessCase::Finance => "Finance",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BusinessCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessCase {
    type Err = FabricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FabricError::UnknownBusinessCase(s.to_string()))
    }
}

/// Single KPI, rendered as a label/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// KPIs in display order (left to right)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiSet(pub Vec<Kpi>);

impl KpiSet {
    pub fn iter(&self) -> impl Iterator<Item = &Kpi> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|k| k.label == label)
            .map(|k| k.value.as_str())
    }
}

impl FromIterator<Kpi> for KpiSet {
    fn from_iter<I: IntoIterator<Item = Kpi>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered (label, value) series, one point per weekday in the mock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTrendSeries")]
pub struct TrendSeries {
    labels: Vec<String>,
    values: Vec<u64>,
}

/// Wire shape of `TrendSeries`, validated through `TrendSeries::new`
#[derive(Deserialize)]
struct RawTrendSeries {
    labels: Vec<String>,
    values: Vec<u64>,
}

impl TryFrom<RawTrendSeries> for TrendSeries {
    type Error = FabricError;

    fn try_from(raw: RawTrendSeries) -> Result<Self, Self::Error> {
        TrendSeries::new(raw.labels, raw.values)
    }
}

impl TrendSeries {
    /// Labels and values are parallel sequences and must have equal length
    pub fn new(labels: Vec<String>, values: Vec<u64>) -> Result<Self, FabricError> {
        if labels.len() != values.len() {
            return Err(FabricError::ValidationError(format!(
                "trend series has {} labels but {} values",
                labels.len(),
                values.len()
            )));
        }
        Ok(Self { labels, values })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Points in series order (never sorted)
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Everything the dashboard shows for one business case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub kpis: KpiSet,
    pub trend: TrendSeries,
}

/// Pipeline run status as reported by the job API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
    Running,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
            RunStatus::Running => "running",
        };
        f.write_str(s)
    }
}

/// Result of one pipeline trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub status: RunStatus,
    pub run_id: String,
    pub message: String,
}

impl PipelineRun {
    /// Notice text shown after a run: "<message> (ID: <run_id>)"
    pub fn notice(&self) -> String {
        format!("{} (ID: {})", self.message, self.run_id)
    }
}

/// Whether a live report embed exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EmbedReference {
    Available { url: String },
    Unavailable,
}

impl EmbedReference {
    pub fn url(&self) -> Option<&str> {
        match self {
            EmbedReference::Available { url } => Some(url),
            EmbedReference::Unavailable => None,
        }
    }
}
