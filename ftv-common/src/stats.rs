//! Aggregate statistics and verification time series
//!
//! Both projections are recomputed from the full record collection on each
//! query; nothing here is patched incrementally.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::WorkerRecord;

/// One count with its per-factory breakdown
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Breakdown {
    pub overall: u64,
    pub by_factory: BTreeMap<String, u64>,
}

/// Total/verified/unverified counts for the dashboard cards
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub total: Breakdown,
    pub verified: Breakdown,
    pub unverified: Breakdown,
}

/// One calendar date of the verification progress chart
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeriesPoint {
    /// UTC calendar date of the verification timestamps
    pub date: NaiveDate,
    /// Verifications that day per factory; zero for factories quiet that day
    pub by_factory: BTreeMap<String, u64>,
    pub total: u64,
}

fn count_where<F>(records: &[WorkerRecord], factories: &[String], pred: F) -> Breakdown
where
    F: Fn(&WorkerRecord) -> bool,
{
    let mut by_factory: BTreeMap<String, u64> =
        factories.iter().map(|f| (f.clone(), 0)).collect();
    let mut overall = 0;

    for record in records.iter().filter(|r| pred(r)) {
        overall += 1;
        if let Some(count) = by_factory.get_mut(&record.factory) {
            *count += 1;
        }
    }

    Breakdown { overall, by_factory }
}

/// Compute dashboard counts from the current collection.
///
/// `verified.overall + unverified.overall == total.overall == records.len()`
/// holds for every input, and every distinct factory key appears in all
/// three breakdowns.
pub fn compute_stats(records: &[WorkerRecord]) -> Stats {
    let factories = crate::model::factory_keys(records);

    Stats {
        total: count_where(records, &factories, |_| true),
        verified: count_where(records, &factories, |r| r.status),
        unverified: count_where(records, &factories, |r| !r.status),
    }
}

/// Bucket verified records by UTC calendar date and factory.
///
/// Only verified records with a timestamp contribute. One row per distinct
/// date, ascending; dates with no verifications at all are absent rather
/// than zero-filled.
pub fn compute_series(records: &[WorkerRecord]) -> Vec<SeriesPoint> {
    let verified: Vec<&WorkerRecord> = records
        .iter()
        .filter(|r| r.status && r.verified_date.is_some())
        .collect();

    let factories: BTreeSet<String> = verified.iter().map(|r| r.factory.clone()).collect();

    let mut buckets: BTreeMap<NaiveDate, BTreeMap<String, u64>> = BTreeMap::new();
    for record in &verified {
        // filter above guarantees the timestamp is present
        let Some(when) = record.verified_date else {
            continue;
        };
        let day = buckets.entry(when.date_naive()).or_insert_with(|| {
            factories.iter().map(|f| (f.clone(), 0)).collect()
        });
        if let Some(count) = day.get_mut(&record.factory) {
            *count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(date, by_factory)| {
            let total = by_factory.values().sum();
            SeriesPoint {
                date,
                by_factory,
                total,
            }
        })
        .collect()
}
