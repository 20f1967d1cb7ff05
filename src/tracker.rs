use crate::calendar::{build_calendar, day_label};
use crate::entries::{self, UpsertMode};
use crate::errors::TrackerError;
use crate::models::{CalendarResponse, RecentEntry, Snapshot, StatsResponse};
use crate::stats::{build_stats_at, date_key, year_entries};
use chrono::{Datelike, NaiveDate};

/// The in-memory snapshot plus the operations the page and API call.
///
/// Every mutating method leaves the snapshot untouched when it returns an
/// error; persisting after a successful mutation is the caller's job.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    snapshot: Snapshot,
}

impl Tracker {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn yearly_goal(&self) -> u64 {
        self.snapshot.yearly_goal
    }

    pub fn count_on(&self, date: NaiveDate) -> u64 {
        entries::count_for(&self.snapshot.entries, &date_key(date))
    }

    /// Quick-counter step; returns the new total, floored at zero.
    pub fn add_delta(&mut self, date: NaiveDate, delta: i64) -> u64 {
        let key = date_key(date);
        self.snapshot.entries =
            entries::upsert(&self.snapshot.entries, &key, delta, UpsertMode::AddDelta);
        entries::count_for(&self.snapshot.entries, &key)
    }

    /// Backfill: adds `amount` on top of whatever `date` already holds.
    pub fn add_backlog(
        &mut self,
        date: Option<NaiveDate>,
        amount: i64,
        today: NaiveDate,
    ) -> Result<u64, TrackerError> {
        let date = date.ok_or(TrackerError::MissingDate)?;
        if amount <= 0 {
            return Err(TrackerError::NonPositiveAmount(amount));
        }
        if date > today {
            return Err(TrackerError::FutureDate(date_key(date)));
        }

        let key = date_key(date);
        self.snapshot.entries =
            entries::upsert(&self.snapshot.entries, &key, amount, UpsertMode::Accumulate);
        Ok(entries::count_for(&self.snapshot.entries, &key))
    }

    /// Returns whether an entry was removed.
    pub fn delete_day(&mut self, date: NaiveDate) -> bool {
        let before = self.snapshot.entries.len();
        self.snapshot.entries = entries::remove(&self.snapshot.entries, &date_key(date));
        self.snapshot.entries.len() != before
    }

    pub fn set_goal(&mut self, goal: u64) -> Result<(), TrackerError> {
        if goal == 0 {
            return Err(TrackerError::InvalidGoal);
        }
        self.snapshot.yearly_goal = goal;
        Ok(())
    }

    pub fn stats(&self, now: NaiveDate) -> StatsResponse {
        build_stats_at(now, &self.snapshot)
    }

    pub fn calendar(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<CalendarResponse, TrackerError> {
        build_calendar(&self.snapshot.entries, year, month, today)
            .ok_or(TrackerError::InvalidMonth { year, month })
    }

    /// Newest-first history of the year `now` falls in.
    pub fn recent(&self, now: NaiveDate, limit: usize) -> Vec<RecentEntry> {
        let this_year = year_entries(&self.snapshot.entries, now.year());
        entries::recent(&this_year, limit)
            .into_iter()
            .map(|entry| RecentEntry {
                label: day_label(&entry.date),
                date: entry.date,
                count: entry.count,
            })
            .collect()
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(value.to_string()))
}

/// Like [`parse_date`] but treats a blank value as "no date picked".
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, TrackerError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}
