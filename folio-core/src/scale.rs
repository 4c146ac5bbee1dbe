//! Date range derivation and the date <-> pixel mapping.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TimelineConfig;

/// Padded span of calendar days covered by the track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Range from Jan 1 of the year before the earliest date to Dec 31 of the
    /// year after the latest one.
    ///
    /// When every date is the same, the range is centered on that date so a
    /// lone item lands exactly in the middle of the track.
    pub fn padded<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), date| (lo.min(date), hi.max(date)));

        let start = NaiveDate::from_ymd_opt(min.year() - 1, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(max.year() + 1, 12, 31)?;
        if min != max {
            return Some(Self { start, end });
        }

        let half = (min - start).num_days().max((end - min).num_days());
        Some(Self {
            start: min.checked_sub_signed(Duration::days(half))?,
            end: min.checked_add_signed(Duration::days(half))?,
        })
    }

    pub fn total_days(&self) -> f64 {
        (self.end - self.start).num_days() as f64
    }

    pub fn days_from_start(&self, date: NaiveDate) -> f64 {
        (date - self.start).num_days() as f64
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// First day of every month that falls inside the range, ascending.
    pub fn month_boundaries(&self) -> Vec<NaiveDate> {
        let mut boundaries = Vec::new();
        let Some(mut cursor) = self.start.with_day(1) else {
            return boundaries;
        };
        if cursor < self.start {
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => return boundaries,
            }
        }
        while cursor <= self.end {
            boundaries.push(cursor);
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        boundaries
    }
}

/// Linear mapping between dates in a [`DateRange`] and horizontal offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    range: DateRange,
    margin_left: f64,
    track_width: f64,
    total_width: f64,
}

impl TimeScale {
    pub fn new(range: DateRange, total_width: f64, config: &TimelineConfig) -> Self {
        Self {
            range,
            margin_left: config.margin_left,
            track_width: config.track_width(total_width),
            total_width,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn margin_left(&self) -> f64 {
        self.margin_left
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Share of the range elapsed at `date`, in `[0, 1]` for dates inside it.
    /// A zero-length range maps everything to the middle.
    pub fn fraction(&self, date: NaiveDate) -> f64 {
        let total = self.range.total_days();
        if total <= 0.0 {
            return 0.5;
        }
        self.range.days_from_start(date) / total
    }

    pub fn percent(&self, date: NaiveDate) -> f64 {
        self.fraction(date) * 100.0
    }

    /// Horizontal offset of `date` within the full scrollable width.
    pub fn position(&self, date: NaiveDate) -> f64 {
        self.margin_left + self.fraction(date) * self.track_width
    }

    /// Inverse of [`TimeScale::position`], expressed as a track percentage.
    pub fn percent_at(&self, x: f64) -> f64 {
        if self.track_width <= 0.0 {
            return 50.0;
        }
        (x - self.margin_left) / self.track_width * 100.0
    }

    /// Calendar date at a track percentage, clamped into the range.
    pub fn date_at_percent(&self, percent: f64) -> NaiveDate {
        let share = percent.clamp(0.0, 100.0) / 100.0;
        let days = (share * self.range.total_days()).round() as i64;
        self.range
            .start
            .checked_add_signed(Duration::days(days))
            .unwrap_or(self.range.end)
            .min(self.range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn padded_range_adds_a_year_each_side() {
        let range = DateRange::padded([date(2024, 6, 18), date(2024, 1, 15)]).unwrap();
        assert_eq!(range.start, date(2023, 1, 1));
        assert_eq!(range.end, date(2025, 12, 31));
    }

    #[test]
    fn padded_range_of_nothing_is_none() {
        assert!(DateRange::padded(Vec::new()).is_none());
    }

    #[test]
    fn single_date_range_is_centered() {
        let only = date(2024, 3, 10);
        let range = DateRange::padded([only]).unwrap();
        assert_eq!(only - range.start, range.end - only);
        assert!(range.start <= date(2023, 1, 1));
        assert!(range.end >= date(2025, 12, 31));
    }

    #[test]
    fn month_boundaries_cover_every_month() {
        let range = DateRange::new(date(2023, 1, 1), date(2025, 12, 31));
        let months = range.month_boundaries();
        assert_eq!(months.len(), 36);
        assert_eq!(months[0], date(2023, 1, 1));
        assert_eq!(months[35], date(2025, 12, 1));
    }

    #[test]
    fn month_boundaries_skip_partial_first_month() {
        let range = DateRange::new(date(2023, 1, 15), date(2023, 3, 1));
        assert_eq!(range.month_boundaries(), vec![date(2023, 2, 1), date(2023, 3, 1)]);
    }

    #[test]
    fn inverse_mapping_recovers_dates() {
        let range = DateRange::new(date(2023, 1, 1), date(2025, 12, 31));
        let scale = TimeScale::new(range, 2000.0, &TimelineConfig::default());
        let target = date(2024, 6, 18);
        let x = scale.position(target);
        assert_eq!(scale.date_at_percent(scale.percent_at(x)), target);
    }

    #[test]
    fn date_at_percent_clamps() {
        let range = DateRange::new(date(2023, 1, 1), date(2025, 12, 31));
        let scale = TimeScale::new(range, 2000.0, &TimelineConfig::default());
        assert_eq!(scale.date_at_percent(-20.0), range.start);
        assert_eq!(scale.date_at_percent(140.0), range.end);
    }
}
