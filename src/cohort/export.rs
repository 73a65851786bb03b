use crate::error::Result;
use crate::types::catalog::POOLS;
use crate::types::report::AssessmentReport;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const NAME_COLUMN: &str = "name";
pub const TOP_CLUSTER_COLUMN: &str = "TopCluster";
pub const FUTURE_FIT_COLUMN: &str = "FutureFit";

/// One flattened cohort record, columns in write order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortRow {
    columns: Vec<(String, String)>,
}

impl CohortRow {
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn top_cluster(&self) -> Option<&str> {
        self.get(TOP_CLUSTER_COLUMN).filter(|value| !value.is_empty())
    }

    pub fn future_fit(&self) -> Option<u8> {
        self.get(FUTURE_FIT_COLUMN)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .map(|value| value.round().clamp(0.0, 100.0) as u8)
    }
}

/// Flattens a report into `timestamp`, `name`, `<PREFIX>_<facet>` columns,
/// then `TopCluster` and `FutureFit` (blank when nothing was ranked).
pub fn flatten(report: &AssessmentReport) -> CohortRow {
    let mut row = CohortRow::default();
    row.push(TIMESTAMP_COLUMN, report.generated_at.as_str());
    row.push(NAME_COLUMN, report.student.name.as_str());
    for spec in POOLS.iter() {
        let (Some(prefix), Some(scores)) = (spec.export_prefix, report.facets.get(spec.key)) else {
            continue;
        };
        for (facet, value) in scores {
            row.push(format!("{prefix}_{facet}"), value.to_string());
        }
    }
    row.push(
        TOP_CLUSTER_COLUMN,
        report
            .top_cluster()
            .map(|result| result.cluster.as_str())
            .unwrap_or_default(),
    );
    row.push(
        FUTURE_FIT_COLUMN,
        report
            .future_fit
            .map(|value| value.to_string())
            .unwrap_or_default(),
    );
    row
}

/// Appends `row`, widening the header with any columns the file lacks.
///
/// Writers hold an exclusive OS lock on `<file>.lock` for the whole
/// read-modify-write, so concurrent exports queue up instead of dropping rows.
/// The rewritten table is persisted over `path` in one rename.
pub fn append_row(path: &Path, row: &CohortRow) -> Result<()> {
    let dir = match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };
    let _lock = CohortLock::acquire(path)?;

    let (mut header, mut rows) = if path.exists() {
        read_table(path)?
    } else {
        (Vec::new(), Vec::new())
    };
    for column in row.columns() {
        if !header.iter().any(|existing| existing == column) {
            header.push(column.to_string());
        }
    }
    rows.push(row.clone());

    let mut staged = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::Writer::from_writer(staged.as_file_mut());
        writer.write_record(&header)?;
        for existing in &rows {
            writer.write_record(
                header
                    .iter()
                    .map(|column| existing.get(column).unwrap_or_default()),
            )?;
        }
        writer.flush()?;
    }
    staged.persist(path).map_err(|e| e.error)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "cohort row appended");
    Ok(())
}

pub fn read_rows(path: &Path) -> Result<Vec<CohortRow>> {
    Ok(read_table(path)?.1)
}

fn read_table(path: &Path) -> Result<(Vec<String>, Vec<CohortRow>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = CohortRow::default();
        for (column, value) in header.iter().zip(record.iter()) {
            row.push(column.as_str(), value);
        }
        rows.push(row);
    }
    Ok((header, rows))
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

/// Exclusive advisory lock, released when the handle closes.
#[derive(Debug)]
struct CohortLock {
    _file: File,
}

impl CohortLock {
    fn acquire(target: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(lock_path(target))?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;
    use tempfile::TempDir;

    #[test]
    fn flatten_prefixes_facets_and_appends_summary() {
        let row = flatten(&sample_report());
        let columns: Vec<_> = row.columns().collect();
        assert_eq!(columns.first(), Some(&"timestamp"));
        assert_eq!(columns.last(), Some(&"FutureFit"));
        assert_eq!(row.get("RIASEC_Realistic"), Some("5"));
        assert_eq!(row.get("AI_Curiosity"), Some("8"));
        assert_eq!(row.get("name"), Some("Meera"));
        assert_eq!(row.top_cluster(), Some("Engineer"));
        assert_eq!(row.future_fit(), Some(64));
    }

    #[test]
    fn flatten_leaves_summary_blank_without_clusters() {
        let mut report = sample_report();
        report.clusters.clear();
        report.future_fit = None;
        let row = flatten(&report);
        assert_eq!(row.get(TOP_CLUSTER_COLUMN), Some(""));
        assert_eq!(row.top_cluster(), None);
        assert_eq!(row.future_fit(), None);
    }

    #[test]
    fn flatten_orders_pools_by_registry_and_facets_by_name() {
        let row = flatten(&sample_report());
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec![
                "timestamp",
                "name",
                "RIASEC_Artistic",
                "RIASEC_Realistic",
                "AI_Curiosity",
                "TopCluster",
                "FutureFit"
            ]
        );
    }

    #[test]
    fn written_rows_parse_back_to_same_top_cluster_and_future_fit() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data/responses.csv");
        let report = sample_report();

        append_row(&path, &flatten(&report)).expect("row should append");
        let rows = read_rows(&path).expect("rows should read");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].top_cluster(), Some("Engineer"));
        assert_eq!(rows[0].future_fit(), report.future_fit);
    }

    #[test]
    fn append_widens_header_and_blanks_missing_cells() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("responses.csv");

        let mut first = CohortRow::default();
        first.push("timestamp", "2026-01-01T10:00:00+00:00");
        first.push("RIASEC_Realistic", "4");
        append_row(&path, &first).expect("first row should append");

        let mut second = CohortRow::default();
        second.push("timestamp", "2026-01-02T10:00:00+00:00");
        second.push("BIG5_Openness", "6");
        append_row(&path, &second).expect("second row should append");

        let rows = read_rows(&path).expect("rows should read");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["timestamp", "RIASEC_Realistic", "BIG5_Openness"]
        );
        assert_eq!(rows[0].get("BIG5_Openness"), Some(""));
        assert_eq!(rows[1].get("RIASEC_Realistic"), Some(""));
        assert_eq!(rows[1].get("BIG5_Openness"), Some("6"));
    }

    #[test]
    fn leftover_lock_file_does_not_block_writers() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("responses.csv");
        fs::write(dir.path().join("responses.csv.lock"), "").expect("lock should write");

        append_row(&path, &flatten(&sample_report())).expect("first append should succeed");
        append_row(&path, &flatten(&sample_report())).expect("second append should succeed");
        assert_eq!(read_rows(&path).expect("rows should read").len(), 2);
    }

    #[test]
    fn concurrent_writers_all_land_in_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("data/responses.csv");

        let handles: Vec<_> = (0..8)
            .map(|index| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut row = flatten(&sample_report());
                    row.push("writer", index.to_string());
                    append_row(&path, &row)
                })
            })
            .collect();
        for handle in handles {
            handle
                .join()
                .expect("writer thread should not panic")
                .expect("append should succeed");
        }

        let rows = read_rows(&path).expect("rows should read");
        assert_eq!(rows.len(), 8);
        let mut writers: Vec<_> = rows
            .iter()
            .filter_map(|row| row.get("writer"))
            .map(str::to_string)
            .collect();
        writers.sort();
        assert_eq!(writers, (0..8).map(|i| i.to_string()).collect::<Vec<_>>());
    }
}
