use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub mod animation;
pub mod components;
pub mod config;
pub mod dataset;
pub mod dom;
pub mod hooks;
pub mod selector;
pub mod utils;

/// A selectable area in the constituency picker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstituencyItem {
    pub code: String,
    pub name: String,
}

/// One row of `budgetary_impact.csv`. `value` is in £ billions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub reform_id: String,
    pub reform_name: String,
    pub year: u16,
    pub value: f64,
}

/// One row of `metrics.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub reform_id: String,
    pub reform_name: String,
    pub year: u16,
    pub people_affected: f64,
    pub gini_change: f64,
    pub poverty_change_pp: f64,
    pub poverty_change_pct: f64,
}

/// One row of `constituency.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyImpact {
    pub reform_id: String,
    pub year: u16,
    pub constituency_code: String,
    pub constituency_name: String,
    pub average_gain: f64,
    pub relative_change: f64,
}

/// The four headline figures shown in the metrics bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Net cost to the exchequer, £ billions.
    pub budget_impact: f64,
    /// Share of people whose net income changes, in percent.
    pub percent_affected: f64,
    /// Relative change in the Gini index, as a fraction.
    pub inequality_change: f64,
    /// Change in the poverty rate, in percentage points.
    pub poverty_rate_change: f64,
}

#[derive(Debug)]
pub enum DataError {
    Csv(csv::Error),
    MissingReform(String),
    MissingYear { reform_id: String, year: u16 },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Csv(e) => write!(f, "Failed to read CSV data: {}", e),
            DataError::MissingReform(id) => write!(f, "No data for reform '{}'", id),
            DataError::MissingYear { reform_id, year } => {
                write!(f, "No data for reform '{}' in {}", reform_id, year)
            }
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv(e)
    }
}

impl MetricsSummary {
    /// Join the budget and metrics tables for one reform and year.
    ///
    /// Both rows must exist; a summary is never assembled from half the data.
    pub fn for_reform(
        budget_rows: &[BudgetRow],
        metric_rows: &[MetricsRow],
        reform_id: &str,
        year: u16,
    ) -> Result<Self, DataError> {
        if !budget_rows.iter().any(|r| r.reform_id == reform_id)
            && !metric_rows.iter().any(|r| r.reform_id == reform_id)
        {
            return Err(DataError::MissingReform(reform_id.to_string()));
        }

        let missing = || DataError::MissingYear {
            reform_id: reform_id.to_string(),
            year,
        };
        let budget = budget_rows
            .iter()
            .find(|r| r.reform_id == reform_id && r.year == year)
            .ok_or_else(missing)?;
        let metrics = metric_rows
            .iter()
            .find(|r| r.reform_id == reform_id && r.year == year)
            .ok_or_else(missing)?;

        Ok(MetricsSummary {
            budget_impact: budget.value,
            percent_affected: metrics.people_affected,
            inequality_change: metrics.gini_change,
            poverty_rate_change: metrics.poverty_change_pp,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Deserialize every well-formed record of a headed CSV document.
///
/// Records that fail to deserialize are logged and skipped; only a broken
/// header aborts the read.
fn read_records<T>(csv_content: &str, what: &str) -> Result<Vec<T>, DataError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());
    reader.headers()?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            // Line numbers are 1-based and the header occupies line 1.
            Err(e) => warn!("Skipping {} record on line {}: {}", what, i + 2, e),
        }
    }

    info!("Loaded {} {} records", rows.len(), what);
    Ok(rows)
}

/// Read `code,name` pairs for the picker, dropping duplicate codes and
/// rows with an empty name.
pub fn read_constituencies_from_csv_string(
    csv_content: &str,
) -> Result<Vec<ConstituencyItem>, DataError> {
    let mut seen_codes = HashSet::new();
    let items = read_records::<ConstituencyItem>(csv_content, "constituency")?
        .into_iter()
        .filter(|item| {
            if item.name.is_empty() {
                debug!("Constituency '{}' has no name, skipping", item.code);
                return false;
            }
            if !seen_codes.insert(item.code.clone()) {
                debug!("Duplicate constituency code '{}', skipping", item.code);
                return false;
            }
            true
        })
        .collect();
    Ok(items)
}

pub fn read_budget_rows_from_csv_string(csv_content: &str) -> Result<Vec<BudgetRow>, DataError> {
    read_records(csv_content, "budgetary impact")
}

pub fn read_metrics_rows_from_csv_string(
    csv_content: &str,
) -> Result<Vec<MetricsRow>, DataError> {
    read_records(csv_content, "metrics")
}

pub fn read_constituency_impacts_from_csv_string(
    csv_content: &str,
) -> Result<Vec<ConstituencyImpact>, DataError> {
    read_records(csv_content, "constituency impact")
}

/// Find one constituency's figures for a reform and year.
pub fn find_constituency_impact<'a>(
    impacts: &'a [ConstituencyImpact],
    reform_id: &str,
    year: u16,
    code: &str,
) -> Option<&'a ConstituencyImpact> {
    impacts
        .iter()
        .find(|r| r.reform_id == reform_id && r.year == year && r.constituency_code == code)
}

/// One row of `distributional_impact.csv`: relative income change (%) for a
/// household income decile, labelled `1st`..`10th`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecileImpactRow {
    pub reform_id: String,
    pub reform_name: String,
    pub year: u16,
    pub decile: String,
    pub value: f64,
}

/// One row of `winners_losers.csv`: average £ change per household for a
/// decile (`1`..`10`), or across all households (`all`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnersLosersRow {
    pub reform_id: String,
    pub reform_name: String,
    pub year: u16,
    pub decile: String,
    pub avg_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecileEntry {
    /// 1 (poorest) to 10 (richest).
    pub decile: u8,
    pub relative_change: f64,
    pub average_change: Option<f64>,
}

/// Per-decile effect of one reform in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct DecileBreakdown {
    pub deciles: Vec<DecileEntry>,
    pub overall_average_change: Option<f64>,
}

/// Decile number from either label style: `"3rd"` or `"3"`.
pub fn decile_number(label: &str) -> Option<u8> {
    let digits = label.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
    match digits.parse::<u8>() {
        Ok(n) if (1..=10).contains(&n) => Some(n),
        _ => None,
    }
}

impl DecileBreakdown {
    /// Join relative and absolute decile changes for one reform and year.
    ///
    /// The relative changes are required; average £ changes are attached
    /// where the winners/losers table has them.
    pub fn for_reform(
        distributional: &[DecileImpactRow],
        winners_losers: &[WinnersLosersRow],
        reform_id: &str,
        year: u16,
    ) -> Result<Self, DataError> {
        let mut deciles: Vec<DecileEntry> = distributional
            .iter()
            .filter(|r| r.reform_id == reform_id && r.year == year)
            .filter_map(|r| match decile_number(&r.decile) {
                Some(decile) => Some((decile, r.value)),
                None => {
                    debug!("Unrecognised decile label '{}', skipping", r.decile);
                    None
                }
            })
            .map(|(decile, relative_change)| DecileEntry {
                decile,
                relative_change,
                average_change: None,
            })
            .collect();

        if deciles.is_empty() {
            return Err(DataError::MissingYear {
                reform_id: reform_id.to_string(),
                year,
            });
        }
        deciles.sort_by_key(|d| d.decile);
        deciles.dedup_by_key(|d| d.decile);

        let mut overall_average_change = None;
        for row in winners_losers
            .iter()
            .filter(|r| r.reform_id == reform_id && r.year == year)
        {
            if row.decile.trim() == "all" {
                overall_average_change = Some(row.avg_change);
            } else if let Some(n) = decile_number(&row.decile) {
                if let Some(entry) = deciles.iter_mut().find(|d| d.decile == n) {
                    entry.average_change = Some(row.avg_change);
                }
            }
        }

        Ok(DecileBreakdown {
            deciles,
            overall_average_change,
        })
    }
}

pub fn read_decile_impacts_from_csv_string(
    csv_content: &str,
) -> Result<Vec<DecileImpactRow>, DataError> {
    read_records(csv_content, "distributional impact")
}

pub fn read_winners_losers_from_csv_string(
    csv_content: &str,
) -> Result<Vec<WinnersLosersRow>, DataError> {
    read_records(csv_content, "winners/losers")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET_CSV: &str = "reform_id,reform_name,year,value
two_child_limit_removal,Two Child Limit removal,2026,-0.15
two_child_limit_removal,Two Child Limit removal,2027,-0.16
";

    const METRICS_CSV: &str = "reform_id,reform_name,year,people_affected,gini_change,poverty_change_pp,poverty_change_pct
two_child_limit_removal,Two Child Limit removal,2026,4.2,-0.0031,-0.45,-2.1
";

    #[test]
    fn summary_joins_budget_and_metrics() {
        let budget = read_budget_rows_from_csv_string(BUDGET_CSV).unwrap();
        let metrics = read_metrics_rows_from_csv_string(METRICS_CSV).unwrap();

        let summary =
            MetricsSummary::for_reform(&budget, &metrics, "two_child_limit_removal", 2026).unwrap();

        assert_eq!(summary.budget_impact, -0.15);
        assert_eq!(summary.percent_affected, 4.2);
        assert_eq!(summary.inequality_change, -0.0031);
        assert_eq!(summary.poverty_rate_change, -0.45);
    }

    #[test]
    fn summary_requires_both_rows() {
        let budget = read_budget_rows_from_csv_string(BUDGET_CSV).unwrap();
        let metrics = read_metrics_rows_from_csv_string(METRICS_CSV).unwrap();

        // 2027 exists in the budget table only.
        let err = MetricsSummary::for_reform(&budget, &metrics, "two_child_limit_removal", 2027)
            .unwrap_err();
        assert!(matches!(err, DataError::MissingYear { year: 2027, .. }));

        let err = MetricsSummary::for_reform(&budget, &metrics, "unknown", 2026).unwrap_err();
        assert!(matches!(err, DataError::MissingReform(_)));
    }

    #[test]
    fn constituencies_skip_duplicates_and_blank_names() {
        let csv = "code,name
S14000021,Aberdeen North
S14000022, Aberdeen South
S14000021,Aberdeen North (again)
S14000023,
";
        let items = read_constituencies_from_csv_string(csv).unwrap();
        assert_eq!(
            items,
            vec![
                ConstituencyItem {
                    code: "S14000021".into(),
                    name: "Aberdeen North".into()
                },
                ConstituencyItem {
                    code: "S14000022".into(),
                    name: "Aberdeen South".into()
                },
            ]
        );
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let csv = "reform_id,reform_name,year,value
a,A,2026,1.5
b,B,not-a-year,2.0
c,C,2026,oops
";
        let rows = read_budget_rows_from_csv_string(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reform_id, "a");
    }

    #[test]
    fn impact_lookup_matches_reform_year_and_code() {
        let csv = "reform_id,year,constituency_code,constituency_name,average_gain,relative_change
r,2026,S1,Glasgow East,120.5,0.4
r,2027,S1,Glasgow East,130.0,0.5
";
        let impacts = read_constituency_impacts_from_csv_string(csv).unwrap();
        let hit = find_constituency_impact(&impacts, "r", 2027, "S1").unwrap();
        assert_eq!(hit.average_gain, 130.0);
        assert!(find_constituency_impact(&impacts, "r", 2028, "S1").is_none());
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = MetricsSummary {
            budget_impact: 1.0,
            percent_affected: 2.0,
            inequality_change: 0.5,
            poverty_rate_change: -1.0,
        };
        let json = summary.to_json();
        assert!(json.contains("\"budget_impact\":1.0"));
        assert!(json.contains("\"poverty_rate_change\":-1.0"));
    }

    #[test]
    fn decile_labels_in_both_styles() {
        assert_eq!(decile_number("1st"), Some(1));
        assert_eq!(decile_number("3rd"), Some(3));
        assert_eq!(decile_number("10th"), Some(10));
        assert_eq!(decile_number("7"), Some(7));
        assert_eq!(decile_number("all"), None);
        assert_eq!(decile_number("11th"), None);
        assert_eq!(decile_number("0"), None);
    }

    #[test]
    fn decile_breakdown_joins_relative_and_average_changes() {
        let distributional = read_decile_impacts_from_csv_string(
            "reform_id,reform_name,year,decile,value
r,R,2026,2nd,0.8
r,R,2026,1st,1.5
r,R,2027,1st,9.9
",
        )
        .unwrap();
        let winners = read_winners_losers_from_csv_string(
            "reform_id,reform_name,year,decile,avg_change
r,R,2026,1,210.0
r,R,2026,all,95.5
",
        )
        .unwrap();

        let breakdown = DecileBreakdown::for_reform(&distributional, &winners, "r", 2026).unwrap();

        assert_eq!(
            breakdown.deciles,
            vec![
                DecileEntry {
                    decile: 1,
                    relative_change: 1.5,
                    average_change: Some(210.0)
                },
                DecileEntry {
                    decile: 2,
                    relative_change: 0.8,
                    average_change: None
                },
            ]
        );
        assert_eq!(breakdown.overall_average_change, Some(95.5));
    }

    #[test]
    fn decile_breakdown_needs_distributional_rows() {
        let err = DecileBreakdown::for_reform(&[], &[], "r", 2026).unwrap_err();
        assert!(matches!(err, DataError::MissingYear { year: 2026, .. }));
    }
}
