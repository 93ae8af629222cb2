use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use lemonstand_core::plan::DayPlan;
use lemonstand_core::stand::DayConditions;

/// One broken invariant, with enough context to replay the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    pub seed: u32,
    pub day: u32,
    pub invariant: String,
    pub detail: String,
    pub conditions: DayConditions,
    pub plan: DayPlan,
}

#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    reports: Vec<ViolationReport>,
    rendered: Vec<String>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the report and returns its YAML rendering.
    pub fn record(&mut self, report: ViolationReport) -> Result<String, serde_yaml::Error> {
        let yaml = serde_yaml::to_string(&report)?;
        self.reports.push(report);
        self.rendered.push(yaml.clone());
        Ok(yaml)
    }

    pub fn reports(&self) -> &[ViolationReport] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Writes every report as `violation_<seed>_<day>.yaml` under `dir`.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(self.reports.len());
        for (report, yaml) in self.reports.iter().zip(&self.rendered) {
            let path = dir.join(format!("violation_{}_{}.yaml", report.seed, report.day));
            fs::write(&path, yaml)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemonstand_core::plan::{PurchaseOrder, Recipe};
    use lemonstand_core::pricing::PriceList;
    use lemonstand_core::weather::{Weather, WeatherKind};

    fn report() -> ViolationReport {
        ViolationReport {
            seed: 9,
            day: 4,
            invariant: "cash_conservation".into(),
            detail: "off by 0.5".into(),
            conditions: DayConditions {
                weather: Weather::new(WeatherKind::Mild, 75),
                prices: PriceList::baseline(),
            },
            plan: DayPlan::new(0.3, PurchaseOrder::new(1, 1, 1, 1), Recipe::default()).unwrap(),
        }
    }

    #[test]
    fn records_yaml() {
        let mut diagnostics = DiagnosticsCollector::new();
        assert!(diagnostics.is_empty());
        let yaml = diagnostics.record(report()).unwrap();
        assert!(yaml.contains("invariant: cash_conservation"));
        assert!(yaml.contains("kind: Mild"));
        assert_eq!(diagnostics.reports().len(), 1);
    }
}
