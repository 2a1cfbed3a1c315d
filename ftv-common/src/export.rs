//! Export row assembly
//!
//! The document encoders (printable report, spreadsheet) live outside this
//! codebase; their input contract is a column list plus rows in a fixed
//! order. This module produces exactly that shape from the filtered records
//! or the chart series.

use serde::Serialize;
use serde_json::{json, Value};

use crate::model::WorkerRecord;
use crate::stats::SeriesPoint;

/// Tabular input for an external document encoder
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Worker listing report: No, Name, NIK, Department, Factory, Status,
/// Verified Date. Dates render as `YYYY-MM-DD`, or `N/A` when absent.
pub fn worker_report(records: &[&WorkerRecord]) -> ReportTable {
    let columns = vec![
        "No".to_string(),
        "Name".to_string(),
        "NIK".to_string(),
        "Department".to_string(),
        "Factory".to_string(),
        "Status".to_string(),
        "Verified Date".to_string(),
    ];

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            vec![
                json!(index + 1),
                json!(record.name),
                json!(record.nik),
                json!(record.department),
                json!(record.factory_label()),
                json!(record.status_label()),
                record
                    .verified_date
                    .map(|d| json!(d.date_naive().to_string()))
                    .unwrap_or_else(|| json!("N/A")),
            ]
        })
        .collect();

    ReportTable { columns, rows }
}

/// Verification progress report from the chart series: No, Date, one column
/// per factory, Total; closed by a totals row summing every column.
pub fn progress_report(series: &[SeriesPoint]) -> ReportTable {
    // Every point carries the same factory key set
    let factories: Vec<String> = series
        .first()
        .map(|p| p.by_factory.keys().cloned().collect())
        .unwrap_or_default();

    let mut columns = vec!["No".to_string(), "Date".to_string()];
    columns.extend(factories.iter().map(|f| format!("Factory {}", f)));
    columns.push("Total".to_string());

    let mut rows: Vec<Vec<Value>> = series
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let mut row = vec![json!(index + 1), json!(point.date.to_string())];
            for factory in &factories {
                row.push(json!(point.by_factory.get(factory).copied().unwrap_or(0)));
            }
            row.push(json!(point.total));
            row
        })
        .collect();

    let mut totals = vec![json!(""), json!("Total")];
    for factory in &factories {
        let sum: u64 = series
            .iter()
            .map(|p| p.by_factory.get(factory).copied().unwrap_or(0))
            .sum();
        totals.push(json!(sum));
    }
    totals.push(json!(series.iter().map(|p| p.total).sum::<u64>()));
    rows.push(totals);

    ReportTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::compute_series;
    use chrono::{DateTime, Utc};

    fn record(id: i64, factory: &str, status: bool, verified: Option<&str>) -> WorkerRecord {
        WorkerRecord {
            id,
            factory: factory.to_string(),
            nik: format!("{:010}", id),
            ktp: format!("{:010}", id + 5000),
            name: format!("Worker {}", id),
            department: "Sewing".to_string(),
            status,
            verified_date: verified.map(|s| {
                s.parse::<DateTime<Utc>>()
                    .expect("test timestamp should parse")
            }),
        }
    }

    #[test]
    fn test_worker_report_column_order() {
        let table = worker_report(&[]);
        assert_eq!(
            table.columns,
            vec!["No", "Name", "NIK", "Department", "Factory", "Status", "Verified Date"]
        );
    }

    #[test]
    fn test_worker_report_rows() {
        let verified = record(1, "2", true, Some("2024-01-05T09:00:00Z"));
        let unverified = record(2, "3", false, None);
        let table = worker_report(&[&verified, &unverified]);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], json!(1));
        assert_eq!(table.rows[0][4], json!("Factory 2"));
        assert_eq!(table.rows[0][5], json!("Verified"));
        assert_eq!(table.rows[0][6], json!("2024-01-05"));

        assert_eq!(table.rows[1][0], json!(2));
        assert_eq!(table.rows[1][5], json!("Unverified"));
        assert_eq!(table.rows[1][6], json!("N/A"));
    }

    #[test]
    fn test_progress_report_with_totals_row() {
        let records = vec![
            record(1, "2", true, Some("2024-01-01T06:00:00Z")),
            record(2, "3", true, Some("2024-01-01T07:00:00Z")),
            record(3, "2", true, Some("2024-01-02T06:00:00Z")),
        ];
        let series = compute_series(&records);
        let table = progress_report(&series);

        assert_eq!(
            table.columns,
            vec!["No", "Date", "Factory 2", "Factory 3", "Total"]
        );
        assert_eq!(table.rows.len(), 3); // two dates + totals row

        assert_eq!(table.rows[0][1], json!("2024-01-01"));
        assert_eq!(table.rows[0][2], json!(1));
        assert_eq!(table.rows[0][3], json!(1));
        assert_eq!(table.rows[0][4], json!(2));

        let totals = table.rows.last().expect("totals row");
        assert_eq!(totals[1], json!("Total"));
        assert_eq!(totals[2], json!(2));
        assert_eq!(totals[3], json!(1));
        assert_eq!(totals[4], json!(3));
    }

    #[test]
    fn test_progress_report_empty_series() {
        let table = progress_report(&[]);
        assert_eq!(table.columns, vec!["No", "Date", "Total"]);
        assert_eq!(table.rows.len(), 1); // totals row only
        assert_eq!(table.rows[0][2], json!(0));
    }
}
