// svckit/src/services/metrics.rs
//
// Mock metrics retrieval
// Stands in for a Lakehouse / Warehouse table or semantic model query.
// Same logical shape as the real query: named KPIs plus a weekly series.
//

use tracing::warn;

use super::MetricsService;
use crate::config::UnknownCasePolicy;
use crate::errors::FabricError;
use crate::types::{BusinessCase, Kpi, MetricsBundle, TrendSeries};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Default)]
pub struct MockMetrics {
    policy: UnknownCasePolicy,
}

impl MockMetrics {
    pub fn new(policy: UnknownCasePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownCasePolicy {
        self.policy
    }
}

fn weekly(values: [u64; 7]) -> Result<TrendSeries, FabricError> {
    TrendSeries::new(
        WEEKDAYS.iter().map(|d| d.to_string()).collect(),
        values.to_vec(),
    )
}

fn mock_bundle(case: BusinessCase) -> Result<MetricsBundle, FabricError> {
    let (kpis, values) = match case {
        BusinessCase::Sales => (
            [("Revenue", "$2.4M"), ("Orders", "1,234"), ("Conversion", "3.2%")],
            [120, 150, 180, 140, 200, 220, 190],
        ),
        BusinessCase::Procurement => (
            [("Spend", "$890K"), ("Suppliers", "45"), ("On-Time", "94%")],
            [45, 52, 48, 61, 55, 49, 58],
        ),
        BusinessCase::Finance => (
            [("Budget", "$5.1M"), ("Variance", "-2.3%"), ("Forecasted", "$5.3M")],
            [500, 520, 510, 530, 525, 540, 535],
        ),
    };

    Ok(MetricsBundle {
        kpis: kpis.iter().map(|(l, v)| Kpi::new(*l, *v)).collect(),
        trend: weekly(values)?,
    })
}

impl MetricsService for MockMetrics {
    fn fetch(&self, business_case: &str) -> Result<MetricsBundle, FabricError> {
        match business_case.parse::<BusinessCase>() {
            Ok(case) => mock_bundle(case),
            Err(err) => match self.policy {
                UnknownCasePolicy::FallbackToSales => {
                    warn!("{}; serving Sales metrics instead", err);
                    mock_bundle(BusinessCase::Sales)
                }
                UnknownCasePolicy::Reject => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KpiSet;

    fn kpi_labels(kpis: &KpiSet) -> Vec<&str> {
        kpis.iter().map(|k| k.label.as_str()).collect()
    }

    #[test]
    fn test_every_case_has_three_kpis_and_seven_points() {
        let metrics = MockMetrics::default();
        for case in BusinessCase::ALL {
            let bundle = metrics.fetch_case(case).unwrap();
            assert_eq!(bundle.kpis.len(), 3);
            assert_eq!(bundle.trend.len(), 7);
            assert_eq!(bundle.trend.labels().len(), bundle.trend.values().len());
        }
    }

    #[test]
    fn test_procurement_bundle() {
        let bundle = MockMetrics::default().fetch("Procurement").unwrap();

        assert_eq!(kpi_labels(&bundle.kpis), vec!["Spend", "Suppliers", "On-Time"]);
        assert_eq!(bundle.kpis.get("Spend"), Some("$890K"));
        assert_eq!(bundle.kpis.get("Suppliers"), Some("45"));
        assert_eq!(bundle.kpis.get("On-Time"), Some("94%"));
        assert_eq!(bundle.trend.values(), &[45, 52, 48, 61, 55, 49, 58]);
        assert_eq!(bundle.trend.labels(), &WEEKDAYS.map(String::from));
    }

    #[test]
    fn test_unknown_case_falls_back_to_sales() {
        let metrics = MockMetrics::default();
        let sales = metrics.fetch("Sales").unwrap();

        for unknown in ["Marketing", "", "sales", "FINANCE"] {
            assert_eq!(metrics.fetch(unknown).unwrap(), sales);
        }
    }

    #[test]
    fn test_reject_policy_surfaces_unknown_case() {
        let metrics = MockMetrics::new(UnknownCasePolicy::Reject);

        assert_eq!(
            metrics.fetch("Marketing"),
            Err(FabricError::UnknownBusinessCase("Marketing".to_string()))
        );
        assert!(metrics.fetch("Finance").is_ok());
    }

    #[test]
    fn test_fetch_is_deterministic() {
        let metrics = MockMetrics::default();
        let first = metrics.fetch("Finance").unwrap();
        for _ in 0..10 {
            assert_eq!(metrics.fetch("Finance").unwrap(), first);
        }
    }
}
