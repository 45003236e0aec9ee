use crate::dates::{
    date_key, format_for_display, format_logged_time, format_month_title, parse_date_key,
    today_date,
};
use crate::models::{
    CalendarDay, CalendarResponse, EntryView, HistorySummary, MonthRef, MoodData, MoodEntry,
    mood_label,
};
use crate::storage::MoodStorage;
use chrono::{Datelike, Duration, NaiveDate, Utc};

const CALENDAR_CELLS: i64 = 42;
const RECENT_WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Every stored entry, newest date first.
pub fn sorted_entries(storage: &MoodStorage) -> Vec<MoodEntry> {
    sort_entries(storage.get_all())
}

pub fn sort_entries(data: MoodData) -> Vec<MoodEntry> {
    let mut entries: Vec<MoodEntry> = data.into_values().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

pub fn current_month_entries(storage: &MoodStorage) -> Vec<MoodEntry> {
    current_month_entries_at(storage, today_date())
}

/// Entries in the same month and year as `today`, newest first.
pub fn current_month_entries_at(storage: &MoodStorage, today: NaiveDate) -> Vec<MoodEntry> {
    sorted_entries(storage)
        .into_iter()
        .filter(|entry| match parse_date_key(&entry.date) {
            Ok(date) => date.year() == today.year() && date.month() == today.month(),
            Err(_) => false,
        })
        .collect()
}

pub fn entry_views(entries: Vec<MoodEntry>) -> Vec<EntryView> {
    entry_views_at(entries, today_date(), Utc::now().timestamp_millis())
}

pub fn entry_views_at(entries: Vec<MoodEntry>, today: NaiveDate, now_ms: i64) -> Vec<EntryView> {
    let today = date_key(today);
    entries
        .into_iter()
        .map(|entry| EntryView {
            display_date: format_for_display(&entry.date),
            logged_at: format_logged_time(entry.timestamp),
            is_today: entry.date == today,
            is_recent: now_ms.saturating_sub(entry.timestamp) < RECENT_WINDOW_MS,
            label: mood_label(&entry.mood).map(str::to_string),
            entry,
        })
        .collect()
}

/// Entry count and how many weeks that covers, one week minimum.
pub fn summarize(entries: &[MoodEntry]) -> HistorySummary {
    let total_entries = entries.len();
    HistorySummary {
        total_entries,
        weeks_tracked: total_entries.div_ceil(7).max(1),
    }
}

pub fn build_calendar(storage: &MoodStorage, year: i32, month: u32) -> Option<CalendarResponse> {
    build_calendar_at(&storage.get_all(), year, month, today_date())
}

/// Six Sunday-first weeks covering `year`/`month`, or `None` if the month
/// does not exist or the grid runs past the representable date range.
pub fn build_calendar_at(
    data: &MoodData,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<CalendarResponse> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let start = first.checked_sub_signed(Duration::days(
        first.weekday().num_days_from_sunday() as i64,
    ))?;

    let mut days = Vec::with_capacity(CALENDAR_CELLS as usize);
    for offset in 0..CALENDAR_CELLS {
        let date = start.checked_add_signed(Duration::days(offset))?;
        let key = date_key(date);
        days.push(CalendarDay {
            day: date.day(),
            in_month: date.month() == month && date.year() == year,
            is_today: date == today,
            entry: data.get(&key).cloned(),
            date: key,
        });
    }

    Some(CalendarResponse {
        year,
        month,
        title: format_month_title(year, month),
        prev: shift_month(year, month, -1),
        next: shift_month(year, month, 1),
        days,
    })
}

pub fn shift_month(year: i32, month: u32, delta: i32) -> MonthRef {
    let index = year * 12 + month as i32 - 1 + delta;
    MonthRef {
        year: index.div_euclid(12),
        month: index.rem_euclid(12) as u32 + 1,
    }
}
