//! Group-by-sum operations over the rental tables.
//!
//! Every aggregator makes one pass over its input and returns rows ordered by
//! key ascending. Keys with no input rows are absent; zero-filling is applied
//! afterwards in [`summary`](crate::aggregators::summary).

use crate::aggregators::types::{
    DailyRentals, HourlyRentals, MonthlyRentals, MonthlyUserRentals, RentalMetrics,
    SeasonalRentals, WeatherRentals, WeekdayRentals, YearlyRentals,
};
use crate::aggregators::utility::{KeyedRow, group_sum, mean, round2};
use crate::record::{DailyRecord, HourlyRecord, Season, WeatherSituation};
use std::collections::BTreeMap;

/// Rentals per calendar day, sorted by date.
///
/// Several rows on the same date collapse into a single sum.
pub fn aggregate_daily(daily: &[DailyRecord]) -> Vec<DailyRentals> {
    group_sum(daily, |r| r.date, |r| r.total_count)
        .into_iter()
        .map(|(date, rental_count)| DailyRentals { date, rental_count })
        .collect()
}

/// Rentals per hour of day over the whole hourly table.
pub fn aggregate_hourly(hourly: &[HourlyRecord]) -> Vec<HourlyRentals> {
    group_sum(hourly, |r| r.hour, |r| r.total_count)
        .into_iter()
        .map(|(hour, total_count)| HourlyRentals { hour, total_count })
        .collect()
}

pub fn aggregate_weekday(daily: &[DailyRecord]) -> Vec<WeekdayRentals> {
    group_sum(daily, |r| r.weekday, |r| r.total_count)
        .into_iter()
        .map(|(weekday, total_count)| WeekdayRentals {
            weekday,
            total_count,
        })
        .collect()
}

pub fn aggregate_season(daily: &[DailyRecord]) -> Vec<SeasonalRentals> {
    group_sum(daily, |r| r.season, |r| r.total_count)
        .into_iter()
        .map(|(season, total_count)| SeasonalRentals {
            season,
            total_count,
        })
        .collect()
}

pub fn aggregate_weather(daily: &[DailyRecord]) -> Vec<WeatherRentals> {
    group_sum(daily, |r| r.weather_situation, |r| r.total_count)
        .into_iter()
        .map(|(weather_situation, total_count)| WeatherRentals {
            weather_situation,
            total_count,
        })
        .collect()
}

/// Casual and registered rentals per month, summed independently.
pub fn aggregate_monthly_users(daily: &[DailyRecord]) -> Vec<MonthlyUserRentals> {
    let mut sums: BTreeMap<u8, (u64, u64)> = BTreeMap::new();
    for record in daily {
        let (casual, registered) = sums.entry(record.month).or_default();
        *casual += record.casual_count;
        *registered += record.registered_count;
    }

    sums.into_iter()
        .map(|(month, (casual_sum, registered_sum))| MonthlyUserRentals {
            month,
            casual_sum,
            registered_sum,
        })
        .collect()
}

/// Total rentals per month.
pub fn aggregate_monthly_totals(daily: &[DailyRecord]) -> Vec<MonthlyRentals> {
    group_sum(daily, |r| r.month, |r| r.total_count)
        .into_iter()
        .map(|(month, total_count)| MonthlyRentals { month, total_count })
        .collect()
}

pub fn aggregate_year(daily: &[DailyRecord]) -> Vec<YearlyRentals> {
    group_sum(daily, |r| r.year, |r| r.total_count)
        .into_iter()
        .map(|(year, total_count)| YearlyRentals { year, total_count })
        .collect()
}

/// Total and per-day average of a daily aggregate.
pub fn rental_metrics(daily: &[DailyRentals]) -> RentalMetrics {
    let counts: Vec<f64> = daily.iter().map(|d| d.rental_count as f64).collect();

    RentalMetrics {
        total_rentals: daily.iter().map(|d| d.rental_count).sum(),
        average_per_day: round2(mean(&counts)),
        days: daily.len(),
    }
}

macro_rules! keyed_row {
    ($row:ident, $key:ident: $key_ty:ty, $value:ident) => {
        impl KeyedRow for $row {
            type Key = $key_ty;

            fn key(&self) -> $key_ty {
                self.$key
            }

            fn empty(key: $key_ty) -> Self {
                $row {
                    $key: key,
                    $value: 0,
                }
            }
        }
    };
}

keyed_row!(HourlyRentals, hour: u8, total_count);
keyed_row!(WeekdayRentals, weekday: u8, total_count);
keyed_row!(SeasonalRentals, season: Season, total_count);
keyed_row!(WeatherRentals, weather_situation: WeatherSituation, total_count);
keyed_row!(MonthlyRentals, month: u8, total_count);
keyed_row!(YearlyRentals, year: u8, total_count);

impl KeyedRow for MonthlyUserRentals {
    type Key = u8;

    fn key(&self) -> u8 {
        self.month
    }

    fn empty(month: u8) -> Self {
        MonthlyUserRentals {
            month,
            casual_sum: 0,
            registered_sum: 0,
        }
    }
}
