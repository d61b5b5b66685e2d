use crate::models::{AttendanceRecord, MonthGroup, WeekInfo};
use chrono::{Datelike, Duration, NaiveDate};

pub const TRACKED_YEAR: i32 = 2026;
pub const WEEKS_PER_YEAR: u32 = 52;

pub const MONTH_NAMES: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

/// Sundays of `year`, numbered from 1, capped at 52 entries.
pub fn generate_year_weeks(year: i32) -> Vec<WeekInfo> {
    let Some(jan_first) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };
    let mut date = first_sunday_on_or_after(jan_first);

    let mut weeks = Vec::with_capacity(WEEKS_PER_YEAR as usize);
    let mut week = 1;
    while date.year() == year && week <= WEEKS_PER_YEAR {
        weeks.push(WeekInfo {
            week,
            date,
            month: date.month0(),
        });
        date += Duration::days(7);
        week += 1;
    }
    weeks
}

fn first_sunday_on_or_after(date: NaiveDate) -> NaiveDate {
    let offset = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(offset))
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

pub fn month_label(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("")
}

pub fn weeks_in_month(weeks: &[WeekInfo], month: u32) -> Vec<WeekInfo> {
    weeks.iter().filter(|w| w.month == month).copied().collect()
}

pub fn group_weeks_by_month(weeks: &[WeekInfo]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for info in weeks {
        match groups.last_mut() {
            Some(group) if group.month == info.month => group.weeks.push(*info),
            _ => groups.push(MonthGroup {
                month: info.month,
                label: month_label(info.month).to_string(),
                weeks: vec![*info],
            }),
        }
    }
    groups
}

/// Inside the tracked year: the week before the first Sunday strictly after
/// `today`, never below 1. Otherwise the latest recorded week, or 52.
pub fn resolve_current_week(
    today: NaiveDate,
    weeks: &[WeekInfo],
    records: &[AttendanceRecord],
) -> u32 {
    let tracked_year = weeks.first().map(|w| w.date.year());
    if tracked_year == Some(today.year()) {
        if let Some(upcoming) = weeks.iter().find(|w| w.date > today) {
            return upcoming.week.saturating_sub(1).max(1);
        }
    }

    records
        .iter()
        .map(|r| r.week)
        .max()
        .unwrap_or(WEEKS_PER_YEAR)
}
