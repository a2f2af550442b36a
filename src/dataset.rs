//! Pipeline outputs bundled into the binary.
//!
//! The CSVs under `data/` are parsed once, on first access, and shared for
//! the lifetime of the page. A table that fails to parse leaves the dataset
//! empty, which the page renders as "no data" rather than an error.

use crate::{
    find_constituency_impact, read_budget_rows_from_csv_string,
    read_constituencies_from_csv_string, read_constituency_impacts_from_csv_string,
    read_decile_impacts_from_csv_string, read_metrics_rows_from_csv_string,
    read_winners_losers_from_csv_string, BudgetRow, ConstituencyImpact, ConstituencyItem,
    DataError, DecileBreakdown, DecileImpactRow, MetricsRow, MetricsSummary, WinnersLosersRow,
};
use log::{debug, warn};
use once_cell::sync::Lazy;

const CONSTITUENCIES_CSV: &str = include_str!("../data/constituencies_2024.csv");
const BUDGETARY_IMPACT_CSV: &str = include_str!("../data/budgetary_impact.csv");
const METRICS_CSV: &str = include_str!("../data/metrics.csv");
const CONSTITUENCY_IMPACT_CSV: &str = include_str!("../data/constituency.csv");
const DISTRIBUTIONAL_IMPACT_CSV: &str = include_str!("../data/distributional_impact.csv");
const WINNERS_LOSERS_CSV: &str = include_str!("../data/winners_losers.csv");

pub static EMBEDDED: Lazy<Dataset> = Lazy::new(|| {
    Dataset::from_csv(CsvSources {
        constituencies: CONSTITUENCIES_CSV,
        budget: BUDGETARY_IMPACT_CSV,
        metrics: METRICS_CSV,
        impacts: CONSTITUENCY_IMPACT_CSV,
        distributional: DISTRIBUTIONAL_IMPACT_CSV,
        winners_losers: WINNERS_LOSERS_CSV,
    })
    .unwrap_or_else(|e| {
        warn!("Embedded dataset unavailable: {}", e);
        Dataset::default()
    })
});

/// A reform as offered in the reform tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReformOption {
    pub id: String,
    pub name: String,
}

/// Raw CSV text for each pipeline output.
#[derive(Debug, Clone, Copy)]
pub struct CsvSources<'a> {
    pub constituencies: &'a str,
    pub budget: &'a str,
    pub metrics: &'a str,
    pub impacts: &'a str,
    pub distributional: &'a str,
    pub winners_losers: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub constituencies: Vec<ConstituencyItem>,
    pub budget: Vec<BudgetRow>,
    pub metrics: Vec<MetricsRow>,
    pub impacts: Vec<ConstituencyImpact>,
    pub distributional: Vec<DecileImpactRow>,
    pub winners_losers: Vec<WinnersLosersRow>,
}

impl Dataset {
    pub fn from_csv(sources: CsvSources<'_>) -> Result<Self, DataError> {
        Ok(Self {
            constituencies: read_constituencies_from_csv_string(sources.constituencies)?,
            budget: read_budget_rows_from_csv_string(sources.budget)?,
            metrics: read_metrics_rows_from_csv_string(sources.metrics)?,
            impacts: read_constituency_impacts_from_csv_string(sources.impacts)?,
            distributional: read_decile_impacts_from_csv_string(sources.distributional)?,
            winners_losers: read_winners_losers_from_csv_string(sources.winners_losers)?,
        })
    }

    /// Reforms in the order they first appear in the budget table.
    pub fn reforms(&self) -> Vec<ReformOption> {
        let mut out: Vec<ReformOption> = Vec::new();
        for row in &self.budget {
            if !out.iter().any(|r| r.id == row.reform_id) {
                out.push(ReformOption {
                    id: row.reform_id.clone(),
                    name: row.reform_name.clone(),
                });
            }
        }
        out
    }

    /// Ascending years with budget figures for `reform_id`.
    pub fn years(&self, reform_id: &str) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .budget
            .iter()
            .filter(|r| r.reform_id == reform_id)
            .map(|r| r.year)
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn summary(&self, reform_id: &str, year: u16) -> Option<MetricsSummary> {
        match MetricsSummary::for_reform(&self.budget, &self.metrics, reform_id, year) {
            Ok(summary) => Some(summary),
            Err(e) => {
                debug!("No metrics summary: {}", e);
                None
            }
        }
    }

    pub fn impact(&self, reform_id: &str, year: u16, code: &str) -> Option<ConstituencyImpact> {
        find_constituency_impact(&self.impacts, reform_id, year, code).cloned()
    }

    pub fn deciles(&self, reform_id: &str, year: u16) -> Option<DecileBreakdown> {
        match DecileBreakdown::for_reform(&self.distributional, &self.winners_losers, reform_id, year)
        {
            Ok(breakdown) => Some(breakdown),
            Err(e) => {
                debug!("No decile breakdown: {}", e);
                None
            }
        }
    }
}
