use crate::entries::count_for;
use crate::models::{Bucket, CalendarDay, CalendarResponse, Entry};
use crate::stats::{date_key, total};
use chrono::{Datelike, Duration, NaiveDate};

/// Month grid for `year`/`month` (1-based). `None` when the month does not
/// exist.
pub fn build_calendar(
    entries: &[Entry],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<CalendarResponse> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let length = days_in_month(first)?;

    let mut days = Vec::with_capacity(leading + length as usize);
    days.resize(leading, None);
    for day in 1..=length {
        let date = first + Duration::days(i64::from(day - 1));
        let key = date_key(date);
        let count = count_for(entries, &key);
        days.push(Some(CalendarDay {
            day,
            date: key,
            count,
            bucket: Bucket::for_count(count),
            is_today: date == today,
        }));
    }

    Some(CalendarResponse {
        year,
        month,
        label: month_label(first),
        days,
        monthly_total: monthly_total(entries, year, month),
    })
}

/// Sum over entries whose date starts with `YYYY-MM`.
pub fn monthly_total(entries: &[Entry], year: i32, month: u32) -> u64 {
    let prefix = format!("{year:04}-{month:02}");
    let in_month: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.date.starts_with(&prefix))
        .cloned()
        .collect();
    total(&in_month)
}

/// Moves `offset` months forward (negative goes back), wrapping years.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + offset;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Short label used in entry lists, e.g. `Wed, Apr 1`.
pub fn day_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|date| date.format("%a, %b %-d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn days_in_month(first: NaiveDate) -> Option<u32> {
    let (year, month) = shift_month(first.year(), first.month(), 1);
    let next = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((next - first).num_days() as u32)
}
