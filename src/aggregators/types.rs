//! Summary tables produced by the aggregation pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::filter::DateRange;
use crate::record::{Season, WeatherSituation};

/// Rentals summed per calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRentals {
    pub date: NaiveDate,
    pub rental_count: u64,
}

/// Rentals summed per hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyRentals {
    pub hour: u8,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayRentals {
    pub weekday: u8,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonalRentals {
    pub season: Season,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherRentals {
    pub weather_situation: WeatherSituation,
    pub total_count: u64,
}

/// Casual and registered rentals summed independently per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyUserRentals {
    pub month: u8,
    pub casual_sum: u64,
    pub registered_sum: u64,
}

/// Total rentals per month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRentals {
    pub month: u8,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyRentals {
    pub year: u8,
    pub total_count: u64,
}

/// Column names of a summary table, in the order its rows serialize.
pub trait TableColumns {
    const COLUMNS: &'static [&'static str];
}

macro_rules! table_columns {
    ($($row:ident => [$($column:literal),+];)+) => {
        $(
            impl TableColumns for $row {
                const COLUMNS: &'static [&'static str] = &[$($column),+];
            }
        )+
    };
}

table_columns! {
    DailyRentals => ["date", "rental_count"];
    HourlyRentals => ["hour", "total_count"];
    WeekdayRentals => ["weekday", "total_count"];
    SeasonalRentals => ["season", "total_count"];
    WeatherRentals => ["weather_situation", "total_count"];
    MonthlyUserRentals => ["month", "casual_sum", "registered_sum"];
    MonthlyRentals => ["month", "total_count"];
    YearlyRentals => ["year", "total_count"];
}

/// What to do with fixed-domain keys that have no input rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPolicy {
    /// Leave empty buckets out of the table.
    #[default]
    Omit,
    /// Emit a zero row for every key of the domain.
    ZeroFill,
}

/// Headline numbers over the filtered daily table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalMetrics {
    pub total_rentals: u64,
    pub average_per_day: f64,
    pub days: usize,
}

/// Everything the dashboard renders for one date range.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub range: DateRange,
    pub bucket_policy: BucketPolicy,
    pub metrics: RentalMetrics,
    pub daily: Vec<DailyRentals>,
    pub hourly: Vec<HourlyRentals>,
    pub weekday: Vec<WeekdayRentals>,
    pub seasonal: Vec<SeasonalRentals>,
    pub weather: Vec<WeatherRentals>,
    pub monthly_users: Vec<MonthlyUserRentals>,
    pub yearly: Vec<YearlyRentals>,
    /// Monthly totals over the whole daily table, ignoring the range.
    pub monthly_trend: Vec<MonthlyRentals>,
}
