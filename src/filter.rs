//! Date-range filtering of the daily table.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::DailyRecord;

/// An inclusive `[start, end]` window of calendar dates.
///
/// `start > end` is allowed and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Fills unspecified bounds from the data's span, falling back to the
    /// widest representable dates when there is no data.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        span: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let (min, max) = span.unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            start: start.unwrap_or(min),
            end: end.unwrap_or(max),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Returns the rows dated within `[start, end]`, in input order.
pub fn filter_by_range(daily: &[DailyRecord], start: NaiveDate, end: NaiveDate) -> Vec<DailyRecord> {
    let range = DateRange::new(start, end);
    daily
        .iter()
        .filter(|record| range.contains(record.date))
        .copied()
        .collect()
}
