use crate::entries::count_for;
use crate::models::{Entry, Snapshot, StatsResponse};
use chrono::{Datelike, Duration, Local, NaiveDate};

const STREAK_WINDOW: i64 = 365;

pub fn build_stats(snapshot: &Snapshot) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), snapshot)
}

pub fn build_stats_at(today: NaiveDate, snapshot: &Snapshot) -> StatsResponse {
    let year = today.year();
    let goal = snapshot.yearly_goal;
    let year_entries = year_entries(&snapshot.entries, year);

    let total = total(&year_entries);
    let day_of_year = day_of_year(today);
    let days_in_year = days_in_year(year);
    let days_remaining = days_in_year.saturating_sub(day_of_year);
    let expected = expected_by_now(goal, days_in_year, day_of_year);

    StatsResponse {
        year,
        today: date_key(today),
        today_count: count_for(&snapshot.entries, &date_key(today)),
        yearly_goal: goal,
        total_this_year: total,
        progress_percent: progress_percent(total, goal),
        expected_by_now: expected,
        expected_percent: progress_percent(expected, goal),
        on_track: total >= expected,
        behind_by: expected.saturating_sub(total),
        daily_average: daily_average(total, year_entries.len()),
        active_days: year_entries.len(),
        streak: streak(&year_entries, today),
        day_of_year,
        days_in_year,
        days_remaining,
        needed_per_day: needed_per_day(goal, total, days_remaining),
    }
}

/// Entries whose date string starts with `year`.
pub fn year_entries(entries: &[Entry], year: i32) -> Vec<Entry> {
    let prefix = format!("{year:04}");
    entries
        .iter()
        .filter(|entry| entry.date.starts_with(&prefix))
        .cloned()
        .collect()
}

pub fn total(entries: &[Entry]) -> u64 {
    entries
        .iter()
        .fold(0u64, |sum, entry| sum.saturating_add(entry.count))
}

pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Linear pro-rated target for `day_of_year`.
pub fn expected_by_now(goal: u64, days_in_year: u32, day_of_year: u32) -> u64 {
    (goal as f64 / f64::from(days_in_year) * f64::from(day_of_year)).round() as u64
}

/// Share of `goal` reached, capped at 100.
pub fn progress_percent(total: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 100.0;
    }
    (total as f64 / goal as f64 * 100.0).min(100.0)
}

pub fn daily_average(total: u64, active_days: usize) -> u64 {
    if active_days == 0 {
        return 0;
    }
    (total as f64 / active_days as f64).round() as u64
}

/// Negative once the goal is passed; display code floors it.
pub fn needed_per_day(goal: u64, total: u64, days_remaining: u32) -> i64 {
    if days_remaining == 0 {
        return 0;
    }
    let missing = goal as f64 - total as f64;
    (missing / f64::from(days_remaining)).ceil() as i64
}

/// Consecutive days with a positive count, walking back from `today`.
///
/// Today may still be empty without breaking a streak that ended yesterday;
/// every other gap ends the walk.
pub fn streak(entries: &[Entry], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut check = today;
    for step in 0..STREAK_WINDOW {
        if count_for(entries, &date_key(check)) > 0 {
            streak += 1;
        } else if step != 0 {
            break;
        }
        check = check - Duration::days(1);
    }
    streak
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_at(today: NaiveDate, days_back: i64, count: u64) -> Entry {
        Entry::new(date_key(today - Duration::days(days_back)), count)
    }

    #[test]
    fn leap_year_rule() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn day_of_year_is_one_based() {
        assert_eq!(day_of_year(day(2024, 1, 1)), 1);
        assert_eq!(day_of_year(day(2024, 3, 1)), 61);
        assert_eq!(day_of_year(day(2024, 12, 31)), 366);
    }

    #[test]
    fn streak_breaks_at_first_gap_after_today() {
        let today = day(2024, 6, 10);
        let entries = vec![
            entry_at(today, 0, 10),
            entry_at(today, 1, 10),
            entry_at(today, 3, 10),
        ];
        assert_eq!(streak(&entries, today), 2);
    }

    #[test]
    fn streak_survives_missing_today() {
        let today = day(2024, 6, 10);
        let entries = vec![entry_at(today, 1, 10), entry_at(today, 2, 10)];
        assert_eq!(streak(&entries, today), 2);
    }

    #[test]
    fn streak_is_zero_when_yesterday_is_also_missing() {
        let today = day(2024, 6, 10);
        let entries = vec![entry_at(today, 2, 10), entry_at(today, 3, 10)];
        assert_eq!(streak(&entries, today), 0);
    }

    #[test]
    fn streak_walk_is_bounded() {
        let today = day(2024, 12, 31);
        let entries: Vec<_> = (0..400).map(|back| entry_at(today, back, 1)).collect();
        assert_eq!(streak(&entries, today), 365);
    }

    #[test]
    fn progress_clamps_at_one_hundred() {
        assert_eq!(progress_percent(25_000, 20_000), 100.0);
        assert_eq!(progress_percent(5_000, 20_000), 25.0);
    }

    #[test]
    fn expected_pace_rounds_to_nearest() {
        assert_eq!(expected_by_now(20_000, 366, 61), 3333);
        assert_eq!(expected_by_now(20_000, 365, 288), 15781);
        assert_eq!(expected_by_now(20_000, 365, 365), 20_000);
    }

    #[test]
    fn needed_per_day_rounds_up_and_goes_negative_past_goal() {
        assert_eq!(needed_per_day(20_000, 0, 100), 200);
        assert_eq!(needed_per_day(20_000, 19_999, 2), 1);
        assert_eq!(needed_per_day(20_000, 20_500, 10), -50);
        assert_eq!(needed_per_day(20_000, 0, 0), 0);
    }

    #[test]
    fn daily_average_over_active_days() {
        assert_eq!(daily_average(0, 0), 0);
        assert_eq!(daily_average(100, 3), 33);
        assert_eq!(daily_average(101, 2), 51);
    }

    #[test]
    fn year_filter_is_a_prefix_match() {
        let entries = vec![
            Entry::new("2023-12-31", 40),
            Entry::new("2024-01-01", 10),
            Entry::new("2024-07-04", 20),
        ];
        let filtered = year_entries(&entries, 2024);
        assert_eq!(filtered.len(), 2);
        assert_eq!(total(&filtered), 30);
    }

    #[test]
    fn stats_bundle_for_a_known_day() {
        let today = day(2024, 3, 1);
        let snapshot = Snapshot {
            yearly_goal: 20_000,
            entries: vec![
                Entry::new("2023-12-31", 500),
                Entry::new("2024-02-28", 100),
                Entry::new("2024-02-29", 50),
                Entry::new("2024-03-01", 30),
            ],
        };

        let stats = build_stats_at(today, &snapshot);
        assert_eq!(stats.year, 2024);
        assert_eq!(stats.today, "2024-03-01");
        assert_eq!(stats.today_count, 30);
        assert_eq!(stats.total_this_year, 180);
        assert_eq!(stats.active_days, 3);
        assert_eq!(stats.daily_average, 60);
        assert_eq!(stats.streak, 3);
        assert_eq!(stats.day_of_year, 61);
        assert_eq!(stats.days_in_year, 366);
        assert_eq!(stats.days_remaining, 305);
        assert_eq!(stats.expected_by_now, 3333);
        assert!(!stats.on_track);
        assert_eq!(stats.behind_by, 3153);
        assert_eq!(stats.needed_per_day, 65);
    }

    #[test]
    fn streak_does_not_cross_into_previous_year() {
        let today = day(2024, 1, 1);
        let snapshot = Snapshot {
            yearly_goal: 20_000,
            entries: vec![Entry::new("2024-01-01", 10), Entry::new("2023-12-31", 10)],
        };
        assert_eq!(build_stats_at(today, &snapshot).streak, 1);
    }
}
