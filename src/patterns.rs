use crate::models::{ActiveDate, DateRange, DayPattern, HeatmapCell, HistoryEntry, TimePattern};
use chrono::{Datelike, NaiveDate, TimeZone, Timelike};
use std::collections::HashMap;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// (hour, day-of-week from Sunday) for every dated entry, in `tz`
fn local_slots<'a, Tz: TimeZone>(
    entries: &'a [HistoryEntry],
    tz: &'a Tz,
) -> impl Iterator<Item = (u32, u32)> + 'a {
    entries.iter().filter_map(move |entry| {
        entry.timestamp.map(|ts| {
            let local = ts.with_timezone(tz);
            (local.hour(), local.weekday().num_days_from_sunday())
        })
    })
}

/// 24 hour buckets; undated entries are ignored
pub fn analyze_time_patterns<Tz: TimeZone>(entries: &[HistoryEntry], tz: &Tz) -> Vec<TimePattern> {
    let mut counts = [0usize; 24];
    for (hour, _) in local_slots(entries, tz) {
        counts[hour as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, &count)| TimePattern {
            hour: hour as u32,
            count,
        })
        .collect()
}

/// 7 day-of-week buckets, 0 = Sunday
pub fn analyze_day_patterns<Tz: TimeZone>(entries: &[HistoryEntry], tz: &Tz) -> Vec<DayPattern> {
    let mut counts = [0usize; 7];
    for (_, day) in local_slots(entries, tz) {
        counts[day as usize] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(day, &count)| DayPattern {
            day: day as u32,
            day_name: DAY_NAMES[day].to_string(),
            count,
        })
        .collect()
}

/// Hour x day grid, day-major (Sunday 0..23, Monday 0..23, ...)
pub fn hourly_heatmap<Tz: TimeZone>(entries: &[HistoryEntry], tz: &Tz) -> Vec<HeatmapCell> {
    let mut grid = [[0usize; 24]; 7];
    for (hour, day) in local_slots(entries, tz) {
        grid[day as usize][hour as usize] += 1;
    }

    let mut cells = Vec::with_capacity(24 * 7);
    for (day, hours) in grid.iter().enumerate() {
        for (hour, &count) in hours.iter().enumerate() {
            cells.push(HeatmapCell {
                hour: hour as u32,
                day: day as u32,
                count,
            });
        }
    }
    cells
}

/// First hour with the strictly greatest count; 0 when everything is empty
pub fn find_peak_hour(patterns: &[TimePattern]) -> u32 {
    let mut peak = 0;
    let mut max = 0;
    for pattern in patterns {
        if pattern.count > max {
            max = pattern.count;
            peak = pattern.hour;
        }
    }
    peak
}

/// Name of the busiest day; "Monday" when everything is empty
pub fn find_peak_day(patterns: &[DayPattern]) -> String {
    let mut peak = "Monday";
    let mut max = 0;
    for pattern in patterns {
        if pattern.count > max {
            max = pattern.count;
            peak = pattern.day_name.as_str();
        }
    }
    peak.to_string()
}

/// Busiest calendar date, grouped by the UTC date of each timestamp.
/// Ties go to the date seen first.
pub fn find_most_active_date(entries: &[HistoryEntry]) -> Option<ActiveDate> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();

    for ts in entries.iter().filter_map(|e| e.timestamp) {
        let date = ts.date_naive();
        let count = counts.entry(date).or_insert(0);
        if *count == 0 {
            order.push(date);
        }
        *count += 1;
    }

    let mut best: Option<ActiveDate> = None;
    for date in order {
        let count = counts[&date];
        if best.as_ref().map(|b| count > b.count).unwrap_or(true) {
            best = Some(ActiveDate { date, count });
        }
    }
    best
}

/// Earliest and latest timestamps
pub fn find_date_range(entries: &[HistoryEntry]) -> Option<DateRange> {
    let mut stamps = entries.iter().filter_map(|e| e.timestamp);
    let first = stamps.next()?;
    let (start, end) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
    Some(DateRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn at(secs: i64) -> HistoryEntry {
        HistoryEntry::new("ls", DateTime::from_timestamp(secs, 0), "ls")
    }

    fn undated() -> HistoryEntry {
        HistoryEntry::new("ls", None, "ls")
    }

    // 2024-01-01T00:00:00Z, a Monday
    const NEW_YEAR: i64 = 1704067200;
    const HOUR: i64 = 3600;
    const DAY: i64 = 86400;

    #[test]
    fn test_time_patterns_skip_undated() {
        let list = vec![at(NEW_YEAR + 14 * HOUR), at(NEW_YEAR + 14 * HOUR + 60), undated()];
        let patterns = analyze_time_patterns(&list, &Utc);
        assert_eq!(patterns.len(), 24);
        assert_eq!(patterns[14].count, 2);
        assert_eq!(patterns.iter().map(|p| p.count).sum::<usize>(), 2);
        assert_eq!(find_peak_hour(&patterns), 14);
    }

    #[test]
    fn test_time_patterns_follow_timezone() {
        let list = vec![at(NEW_YEAR + 23 * HOUR)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let patterns = analyze_time_patterns(&list, &plus_two);
        assert_eq!(patterns[1].count, 1);
        let days = analyze_day_patterns(&list, &plus_two);
        // Monday 23:00 UTC is Tuesday 01:00 at +02:00
        assert_eq!(days[2].count, 1);
    }

    #[test]
    fn test_day_patterns() {
        let list = vec![at(NEW_YEAR), at(NEW_YEAR + DAY), at(NEW_YEAR + DAY + HOUR)];
        let days = analyze_day_patterns(&list, &Utc);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day_name, "Sunday");
        assert_eq!(days[1].count, 1);
        assert_eq!(days[2].count, 2);
        assert_eq!(find_peak_day(&days), "Tuesday");
    }

    #[test]
    fn test_peaks_default_when_empty() {
        let list = vec![undated()];
        assert_eq!(find_peak_hour(&analyze_time_patterns(&list, &Utc)), 0);
        assert_eq!(find_peak_day(&analyze_day_patterns(&list, &Utc)), "Monday");
    }

    #[test]
    fn test_peak_ties_pick_first_bucket() {
        let list = vec![at(NEW_YEAR + 20 * HOUR), at(NEW_YEAR + 3 * HOUR)];
        assert_eq!(find_peak_hour(&analyze_time_patterns(&list, &Utc)), 3);
    }

    #[test]
    fn test_heatmap_layout() {
        let list = vec![at(NEW_YEAR + 9 * HOUR), at(NEW_YEAR + 9 * HOUR + 5)];
        let cells = hourly_heatmap(&list, &Utc);
        assert_eq!(cells.len(), 168);
        assert_eq!(cells[0].day, 0);
        assert_eq!(cells[0].hour, 0);
        let hit = &cells[24 + 9];
        assert_eq!((hit.day, hit.hour, hit.count), (1, 9, 2));
        assert_eq!(cells.iter().map(|c| c.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_most_active_date() {
        let list = vec![at(NEW_YEAR), at(NEW_YEAR + DAY), at(NEW_YEAR + DAY + 5), undated()];
        let active = find_most_active_date(&list).unwrap();
        assert_eq!(active.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(active.count, 2);

        let tie = vec![at(NEW_YEAR + DAY), at(NEW_YEAR)];
        assert_eq!(
            find_most_active_date(&tie).unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );

        assert!(find_most_active_date(&[undated()]).is_none());
    }

    #[test]
    fn test_date_range() {
        let list = vec![at(NEW_YEAR + DAY), undated(), at(NEW_YEAR), at(NEW_YEAR + 3 * DAY)];
        let range = find_date_range(&list).unwrap();
        assert_eq!(range.start.timestamp(), NEW_YEAR);
        assert_eq!(range.end.timestamp(), NEW_YEAR + 3 * DAY);
        assert!(find_date_range(&[undated()]).is_none());
    }
}
