//! Identity matching engine
//!
//! Finds at most one worker record for a factory selection and a typed
//! NIK/KTP value. Exact match on either id-string wins; short inputs fall
//! back to a suffix match. The accepted short-code lengths and case
//! sensitivity vary between deployments, so they live in [`MatchPolicy`]
//! rather than in the code.

use std::ops::RangeInclusive;

use crate::model::WorkerRecord;

/// Deployment-specific matching rules
#[derive(Debug, Clone)]
pub struct MatchPolicy {
    /// Fold input and id-strings to lowercase before comparing
    pub case_insensitive: bool,
    /// Input lengths that suffix-match the primary id-string (NIK)
    pub nik_suffix: RangeInclusive<usize>,
    /// Input length that suffix-matches the secondary id-string (KTP)
    pub ktp_suffix_len: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            nik_suffix: 5..=6,
            ktp_suffix_len: 7,
        }
    }
}

impl MatchPolicy {
    fn normalize(&self, value: &str) -> String {
        let trimmed = value.trim();
        if self.case_insensitive {
            trimmed.to_lowercase()
        } else {
            trimmed.to_string()
        }
    }
}

/// Find the record matching `raw_input` within the given factory.
///
/// Steps, stopping at the first success:
/// 1. Restrict to records whose factory key equals `factory_key`.
/// 2. Exact match against NIK or KTP.
/// 3. Suffix match: NIK for inputs whose length is in `nik_suffix`, KTP for
///    inputs of exactly `ktp_suffix_len` characters. First record in
///    collection order wins.
///
/// Pure: repeated calls over the same collection return the same record.
pub fn find_match<'a>(
    records: &'a [WorkerRecord],
    factory_key: &str,
    raw_input: &str,
    policy: &MatchPolicy,
) -> Option<&'a WorkerRecord> {
    let input = policy.normalize(raw_input);
    if input.is_empty() {
        return None;
    }

    let pool: Vec<&WorkerRecord> = records
        .iter()
        .filter(|r| r.factory == factory_key)
        .collect();

    if let Some(exact) = pool.iter().copied().find(|r| {
        policy.normalize(&r.nik) == input || policy.normalize(&r.ktp) == input
    }) {
        return Some(exact);
    }

    let len = input.chars().count();
    if policy.nik_suffix.contains(&len) {
        return pool
            .into_iter()
            .find(|r| policy.normalize(&r.nik).ends_with(&input));
    }
    if len == policy.ktp_suffix_len {
        return pool
            .into_iter()
            .find(|r| policy.normalize(&r.ktp).ends_with(&input));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, factory: &str, nik: &str, ktp: &str) -> WorkerRecord {
        WorkerRecord {
            id,
            factory: factory.to_string(),
            nik: nik.to_string(),
            ktp: ktp.to_string(),
            name: format!("Worker {}", id),
            department: "Sewing".to_string(),
            status: false,
            verified_date: None,
        }
    }

    #[test]
    fn test_exact_nik_match() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "1234567890", &policy);
        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_exact_ktp_match() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "9998887770", &policy);
        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_five_digit_suffix_matches_nik() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "67890", &policy);
        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_six_digit_suffix_matches_nik() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "567890", &policy);
        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_seven_digit_suffix_matches_ktp_not_nik() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        // 7 chars match the KTP suffix rule only
        assert!(find_match(&records, "2", "8887770", &policy).is_some());
        assert!(find_match(&records, "2", "4567890", &policy).is_none());
    }

    #[test]
    fn test_factory_filter_runs_before_suffix_logic() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        assert!(find_match(&records, "3", "67890", &policy).is_none());
    }

    #[test]
    fn test_exact_match_beats_suffix_match() {
        // Record 2's full NIK is a suffix of record 1's NIK; typing it in
        // full must hit record 2 exactly, never record 1 by suffix.
        let records = vec![
            record(1, "2", "111167890", "0000000001"),
            record(2, "2", "67890", "0000000002"),
        ];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "67890", &policy);
        assert_eq!(found.map(|r| r.id), Some(2));
    }

    #[test]
    fn test_suffix_takes_first_in_collection_order() {
        let records = vec![
            record(7, "2", "1114567890", "0000000001"),
            record(8, "2", "2224567890", "0000000002"),
        ];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "67890", &policy);
        assert_eq!(found.map(|r| r.id), Some(7));
    }

    #[test]
    fn test_input_is_trimmed_and_case_folded() {
        let records = vec![record(1, "2", "AB34567890", "9998887770")];
        let policy = MatchPolicy::default();
        let found = find_match(&records, "2", "  ab34567890  ", &policy);
        assert_eq!(found.map(|r| r.id), Some(1));
    }

    #[test]
    fn test_case_sensitive_policy_rejects_folded_input() {
        let records = vec![record(1, "2", "AB34567890", "9998887770")];
        let policy = MatchPolicy {
            case_insensitive: false,
            ..MatchPolicy::default()
        };
        assert!(find_match(&records, "2", "ab34567890", &policy).is_none());
        assert!(find_match(&records, "2", "AB34567890", &policy).is_some());
    }

    #[test]
    fn test_fixed_length_five_policy() {
        // The other observed deployment: suffix only for exactly 5 characters
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy {
            nik_suffix: 5..=5,
            ..MatchPolicy::default()
        };
        assert!(find_match(&records, "2", "67890", &policy).is_some());
        assert!(find_match(&records, "2", "567890", &policy).is_none());
    }

    #[test]
    fn test_no_match_for_mid_length_input() {
        let records = vec![record(1, "2", "1234567890", "9998887770")];
        let policy = MatchPolicy::default();
        // 8 characters: too long for either suffix rule, not an exact value
        assert!(find_match(&records, "2", "34567890", &policy).is_none());
    }

    #[test]
    fn test_repeated_calls_return_same_record() {
        let records = vec![
            record(1, "2", "1234567890", "9998887770"),
            record(2, "2", "5554567890", "1112223330"),
        ];
        let policy = MatchPolicy::default();
        let first = find_match(&records, "2", "67890", &policy).map(|r| r.id);
        let second = find_match(&records, "2", "67890", &policy).map(|r| r.id);
        assert_eq!(first, second);
    }
}
