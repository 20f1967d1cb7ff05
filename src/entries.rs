//! Flat `(date, count)` collection with at most one entry per date.
//!
//! Every operation returns a fresh collection; callers swap it into their
//! snapshot. Entries whose count reaches zero are dropped.

use crate::models::Entry;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertMode {
    /// Quick counter: `existing + delta`, floored at zero.
    AddDelta,
    /// Backfill: `existing + amount`, never overwrites and never subtracts.
    Accumulate,
}

pub fn upsert(entries: &[Entry], date: &str, amount: i64, mode: UpsertMode) -> Vec<Entry> {
    let existing = count_for(entries, date);
    let next = match mode {
        UpsertMode::AddDelta => apply(existing, amount),
        UpsertMode::Accumulate => apply(existing, amount.max(0)),
    };

    let mut updated: Vec<Entry> = entries.to_vec();
    match updated.iter_mut().find(|entry| entry.date == date) {
        Some(entry) => entry.count = next,
        None => updated.push(Entry::new(date, next)),
    }
    updated.retain(|entry| entry.count > 0);
    updated
}

pub fn remove(entries: &[Entry], date: &str) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| entry.date != date)
        .cloned()
        .collect()
}

pub fn count_for(entries: &[Entry], date: &str) -> u64 {
    entries
        .iter()
        .find(|entry| entry.date == date)
        .map(|entry| entry.count)
        .unwrap_or(0)
}

/// Newest first, at most `limit` entries.
pub fn recent(entries: &[Entry], limit: usize) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Restores the collection invariants on data read from storage: zero
/// counts are dropped and only the first entry for a date survives.
pub fn normalize(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| entry.count > 0 && seen.insert(entry.date.clone()))
        .collect()
}

fn apply(existing: u64, amount: i64) -> u64 {
    if amount >= 0 {
        existing.saturating_add(amount.unsigned_abs())
    } else {
        existing.saturating_sub(amount.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![Entry::new("2024-01-01", 30), Entry::new("2024-01-03", 10)]
    }

    #[test]
    fn upsert_updates_existing_entry_in_place() {
        let entries = upsert(&sample(), "2024-01-01", 5, UpsertMode::AddDelta);
        assert_eq!(entries[0], Entry::new("2024-01-01", 35));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn upsert_appends_new_dates() {
        let entries = upsert(&sample(), "2024-01-02", 25, UpsertMode::AddDelta);
        assert_eq!(entries.last(), Some(&Entry::new("2024-01-02", 25)));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn upsert_then_remove_restores_original() {
        let original = sample();
        let entries = upsert(&original, "2024-02-01", 40, UpsertMode::Accumulate);
        assert_eq!(remove(&entries, "2024-02-01"), original);
    }

    #[test]
    fn remove_missing_date_is_noop() {
        assert_eq!(remove(&sample(), "2030-01-01"), sample());
    }

    #[test]
    fn negative_results_clamp_and_drop_the_entry() {
        let entries = upsert(&sample(), "2024-01-03", -25, UpsertMode::AddDelta);
        assert_eq!(count_for(&entries, "2024-01-03"), 0);
        assert!(entries.iter().all(|entry| entry.date != "2024-01-03"));
    }

    #[test]
    fn negative_delta_on_absent_date_leaves_no_entry() {
        let entries = upsert(&[], "2024-01-05", -10, UpsertMode::AddDelta);
        assert!(entries.is_empty());
    }

    #[test]
    fn clamping_is_not_reversible() {
        let entries = upsert(&sample(), "2024-01-03", -25, UpsertMode::AddDelta);
        let entries = upsert(&entries, "2024-01-03", 25, UpsertMode::AddDelta);
        assert_eq!(count_for(&entries, "2024-01-03"), 25);
    }

    #[test]
    fn symmetric_deltas_cancel_without_clamping() {
        let entries = upsert(&sample(), "2024-01-01", -10, UpsertMode::AddDelta);
        let entries = upsert(&entries, "2024-01-01", 10, UpsertMode::AddDelta);
        assert_eq!(count_for(&entries, "2024-01-01"), 30);
    }

    #[test]
    fn accumulate_adds_to_existing_total() {
        let entries = upsert(&[], "2024-01-01", 30, UpsertMode::Accumulate);
        let entries = upsert(&entries, "2024-01-01", 20, UpsertMode::Accumulate);
        assert_eq!(entries, vec![Entry::new("2024-01-01", 50)]);
    }

    #[test]
    fn accumulate_ignores_negative_amounts() {
        let entries = upsert(&sample(), "2024-01-01", -30, UpsertMode::Accumulate);
        assert_eq!(entries, sample());
    }

    #[test]
    fn no_zero_counts_survive_any_upsert() {
        let mut entries = sample();
        for (date, amount) in [("2024-01-01", -30), ("2024-01-09", 0), ("2024-01-03", -1)] {
            entries = upsert(&entries, date, amount, UpsertMode::AddDelta);
            assert!(entries.iter().all(|entry| entry.count > 0));
        }
        assert_eq!(entries, vec![Entry::new("2024-01-03", 9)]);
    }

    #[test]
    fn recent_sorts_newest_first_and_truncates() {
        let entries = vec![
            Entry::new("2024-01-02", 1),
            Entry::new("2024-03-01", 2),
            Entry::new("2023-12-31", 3),
        ];
        let dates: Vec<_> = recent(&entries, 2).into_iter().map(|e| e.date).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-02"]);
    }

    #[test]
    fn normalize_drops_zero_and_duplicate_dates() {
        let entries = vec![
            Entry::new("2024-01-01", 10),
            Entry::new("2024-01-02", 0),
            Entry::new("2024-01-01", 99),
        ];
        assert_eq!(normalize(entries), vec![Entry::new("2024-01-01", 10)]);
    }
}
