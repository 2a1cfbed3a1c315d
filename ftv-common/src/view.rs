//! Filter and pagination view-model for the dashboard listing
//!
//! Filtering is a pure conjunction over the in-memory collection; pagination
//! clamps the requested page into range. Any filter change is expected to
//! restart at page 1 (the server additionally clamps out-of-range pages, so
//! a stale page number degrades to the last page rather than an empty one).

use serde::{Deserialize, Serialize};

use crate::model::WorkerRecord;

/// Verification status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Verified,
    Unverified,
}

impl StatusFilter {
    fn accepts(&self, record: &WorkerRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Verified => record.status,
            StatusFilter::Unverified => !record.status,
        }
    }
}

/// Compound dashboard filter; every field defaults to "no constraint"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerFilter {
    pub status: StatusFilter,
    pub factory: Option<String>,
    pub department: Option<String>,
    /// Case-insensitive substring over name or NIK
    pub search: Option<String>,
}

impl WorkerFilter {
    fn accepts(&self, record: &WorkerRecord) -> bool {
        if !self.status.accepts(record) {
            return false;
        }
        if let Some(factory) = &self.factory {
            if &record.factory != factory {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if &record.department != department {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty()
                && !record.name.to_lowercase().contains(&needle)
                && !record.nik.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Apply the compound filter, preserving collection order. Idempotent.
pub fn apply_filters<'a>(records: &'a [WorkerRecord], filter: &WorkerFilter) -> Vec<&'a WorkerRecord> {
    records.iter().filter(|r| filter.accepts(r)).collect()
}

/// Department options offered for the current factory filter: the sorted
/// distinct departments among records matching that factory.
pub fn department_options(records: &[WorkerRecord], factory: Option<&str>) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter(|r| factory.map_or(true, |f| r.factory == f))
        .map(|r| r.department.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Drop a selected department that is no longer offered for the selected
/// factory (silent reset to "no constraint").
pub fn reconcile_department(filter: &mut WorkerFilter, records: &[WorkerRecord]) {
    if let Some(department) = &filter.department {
        let options = department_options(records, filter.factory.as_deref());
        if !options.contains(department) {
            filter.department = None;
        }
    }
}

/// Pagination metadata calculated from the filtered result count
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed), clamped into range
    pub page: i64,
    /// Total number of pages
    pub total_pages: i64,
    /// Index of the first row on the page
    pub offset: i64,
}

/// Calculate pagination metadata, clamping the requested page to
/// `[1, max(total_pages, 1)]`.
pub fn calculate_pagination(total_results: i64, requested_page: i64, page_size: i64) -> Pagination {
    let total_pages = (total_results + page_size - 1) / page_size;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Slice one page out of the filtered sequence
pub fn page_slice<'a, T>(items: &'a [T], p: &Pagination, page_size: i64) -> &'a [T] {
    let start = (p.offset as usize).min(items.len());
    let end = (p.offset + page_size).min(items.len() as i64) as usize;
    &items[start..end]
}
