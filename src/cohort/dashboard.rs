use super::export::{CohortRow, NAME_COLUMN, TIMESTAMP_COLUMN};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_WINDOW: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    pub total_rows: usize,
    pub recent: Vec<RecentEntry>,
    pub top_clusters: Vec<(String, usize)>,
    pub future_fit_trend: Vec<(NaiveDate, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    pub timestamp: String,
    pub name: String,
    pub top_cluster: String,
    pub future_fit: Option<u8>,
}

pub fn summarize(rows: &[CohortRow], window: usize) -> CohortSummary {
    let recent = rows
        .iter()
        .skip(rows.len().saturating_sub(window))
        .map(|row| RecentEntry {
            timestamp: row.get(TIMESTAMP_COLUMN).unwrap_or_default().to_string(),
            name: row.get(NAME_COLUMN).unwrap_or_default().to_string(),
            top_cluster: row.top_cluster().unwrap_or_default().to_string(),
            future_fit: row.future_fit(),
        })
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cluster in rows.iter().filter_map(CohortRow::top_cluster) {
        *counts.entry(cluster).or_insert(0) += 1;
    }
    let mut top_clusters: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(cluster, count)| (cluster.to_string(), count))
        .collect();
    top_clusters.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut daily: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let (Some(date), Some(future_fit)) = (
            row.get(TIMESTAMP_COLUMN).and_then(parse_date),
            row.future_fit(),
        ) else {
            continue;
        };
        let entry = daily.entry(date).or_insert((0.0, 0));
        entry.0 += f64::from(future_fit);
        entry.1 += 1;
    }
    let future_fit_trend = daily
        .into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect();

    CohortSummary {
        total_rows: rows.len(),
        recent,
        top_clusters,
        future_fit_trend,
    }
}

/// Accepts RFC 3339 stamps and offset-less ISO stamps from older exports.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|stamp| stamp.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

pub fn to_markdown(summary: &CohortSummary) -> String {
    let mut output = String::new();
    output.push_str("# Cohort Dashboard\n\n");
    if summary.total_rows == 0 {
        output.push_str("No cohort data yet. Export some results first.\n");
        return output;
    }
    output.push_str(&format!("Students: {}\n\n", summary.total_rows));

    output.push_str("## Top Cluster Distribution\n\n");
    if summary.top_clusters.is_empty() {
        output.push_str("- none\n");
    }
    for (cluster, count) in &summary.top_clusters {
        output.push_str(&format!("- {cluster}: {count}\n"));
    }

    output.push_str("\n## Average FutureFit Over Time\n\n");
    if summary.future_fit_trend.is_empty() {
        output.push_str("- none\n");
    }
    for (date, average) in &summary.future_fit_trend {
        output.push_str(&format!("- {date}: {average:.1}\n"));
    }

    output.push_str(&format!("\n## Recent Results ({})\n\n", summary.recent.len()));
    for entry in &summary.recent {
        let future_fit = entry
            .future_fit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "- {} | {} | {} | {}\n",
            entry.timestamp, entry.name, entry.top_cluster, future_fit
        ));
    }
    output
}
