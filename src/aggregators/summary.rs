use chrono::Utc;
use tracing::{debug, warn};

use crate::aggregators::aggregate::{
    aggregate_daily, aggregate_hourly, aggregate_monthly_totals, aggregate_monthly_users,
    aggregate_season, aggregate_weather, aggregate_weekday, aggregate_year, rental_metrics,
};
use crate::aggregators::types::{BucketPolicy, DashboardSummary};
use crate::aggregators::utility::{KeyedRow, zero_fill};
use crate::filter::{DateRange, filter_by_range};
use crate::record::{
    DailyRecord, HOURS, HourlyRecord, MONTHS, Season, WEEKDAYS, WeatherSituation, YEARS,
};

fn apply_policy<R: KeyedRow>(
    rows: Vec<R>,
    policy: BucketPolicy,
    domain: impl IntoIterator<Item = R::Key>,
) -> Vec<R> {
    match policy {
        BucketPolicy::Omit => rows,
        BucketPolicy::ZeroFill => zero_fill(rows, domain),
    }
}

/// Filters the daily table to `range` and runs every aggregator.
///
/// The hourly table and the monthly trend are computed over their whole
/// tables. The daily table is never zero-filled.
#[tracing::instrument(skip(hourly, daily))]
pub fn build_summary(
    hourly: &[HourlyRecord],
    daily: &[DailyRecord],
    range: DateRange,
    policy: BucketPolicy,
) -> DashboardSummary {
    if range.is_empty() {
        warn!(
            start = %range.start,
            end = %range.end,
            "Range starts after it ends; daily tables will be empty"
        );
    }

    let active = filter_by_range(daily, range.start, range.end);
    debug!(
        active_days = active.len(),
        total_days = daily.len(),
        "Daily table filtered"
    );

    let daily_rentals = aggregate_daily(&active);
    let metrics = rental_metrics(&daily_rentals);

    DashboardSummary {
        schema_version: 1,
        generated_at: Utc::now(),
        range,
        bucket_policy: policy,
        metrics,
        daily: daily_rentals,
        hourly: apply_policy(aggregate_hourly(hourly), policy, HOURS),
        weekday: apply_policy(aggregate_weekday(&active), policy, WEEKDAYS),
        seasonal: apply_policy(aggregate_season(&active), policy, Season::ALL),
        weather: apply_policy(aggregate_weather(&active), policy, WeatherSituation::ALL),
        monthly_users: apply_policy(aggregate_monthly_users(&active), policy, MONTHS),
        yearly: apply_policy(aggregate_year(&active), policy, YEARS),
        monthly_trend: apply_policy(aggregate_monthly_totals(daily), policy, MONTHS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily() -> Vec<DailyRecord> {
        vec![
            DailyRecord {
                date: date(2011, 1, 1),
                season: Season::Winter,
                year: 0,
                month: 1,
                weekday: 6,
                weather_situation: WeatherSituation::Mist,
                casual_count: 20,
                registered_count: 80,
                total_count: 100,
            },
            DailyRecord {
                date: date(2011, 1, 2),
                season: Season::Winter,
                year: 0,
                month: 1,
                weekday: 0,
                weather_situation: WeatherSituation::Clear,
                casual_count: 30,
                registered_count: 120,
                total_count: 150,
            },
        ]
    }

    fn hourly() -> Vec<HourlyRecord> {
        vec![HourlyRecord {
            date: date(2011, 1, 1),
            season: Season::Winter,
            year: 0,
            month: 1,
            hour: 9,
            weekday: 6,
            weather_situation: WeatherSituation::Clear,
            casual_count: 4,
            registered_count: 40,
            total_count: 44,
        }]
    }

    #[test]
    fn test_summary_over_full_range() {
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 2));
        let summary = build_summary(&hourly(), &daily(), range, BucketPolicy::Omit);

        assert_eq!(summary.metrics.total_rentals, 250);
        assert_eq!(summary.metrics.average_per_day, 125.0);
        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.weekday.len(), 2);
        assert_eq!(summary.hourly.len(), 1);
        assert_eq!(summary.monthly_users[0].casual_sum, 50);
        assert_eq!(summary.monthly_users[0].registered_sum, 200);
    }

    #[test]
    fn test_range_without_rows_empties_daily_tables_only() {
        let range = DateRange::new(date(2011, 1, 3), date(2011, 1, 3));
        let summary = build_summary(&hourly(), &daily(), range, BucketPolicy::Omit);

        assert!(summary.daily.is_empty());
        assert!(summary.weekday.is_empty());
        assert!(summary.seasonal.is_empty());
        assert!(summary.weather.is_empty());
        assert!(summary.monthly_users.is_empty());
        assert!(summary.yearly.is_empty());
        assert_eq!(summary.metrics.total_rentals, 0);

        // not range-bound
        assert_eq!(summary.hourly.len(), 1);
        assert_eq!(summary.monthly_trend.len(), 1);
    }

    #[test]
    fn test_zero_fill_covers_fixed_domains() {
        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 1));
        let summary = build_summary(&hourly(), &daily(), range, BucketPolicy::ZeroFill);

        assert_eq!(summary.hourly.len(), 24);
        assert_eq!(summary.hourly[9].total_count, 44);
        assert_eq!(summary.weekday.len(), 7);
        assert_eq!(summary.weekday[6].total_count, 100);
        assert_eq!(summary.seasonal.len(), 4);
        assert_eq!(summary.weather.len(), 4);
        assert_eq!(summary.monthly_users.len(), 12);
        assert_eq!(summary.yearly.len(), 2);
        assert_eq!(summary.monthly_trend.len(), 12);
        // daily stays sparse
        assert_eq!(summary.daily.len(), 1);
    }

    #[test]
    fn test_inverted_range_is_not_an_error() {
        let range = DateRange::new(date(2011, 1, 2), date(2011, 1, 1));
        let summary = build_summary(&hourly(), &daily(), range, BucketPolicy::Omit);

        assert!(summary.daily.is_empty());
        assert_eq!(summary.metrics.average_per_day, 0.0);
        assert_eq!(summary.range, range);
    }

    #[test]
    fn test_widening_range_never_decreases_totals() {
        let narrow = build_summary(
            &hourly(),
            &daily(),
            DateRange::new(date(2011, 1, 2), date(2011, 1, 2)),
            BucketPolicy::Omit,
        );
        let wide = build_summary(
            &hourly(),
            &daily(),
            DateRange::new(date(2010, 12, 1), date(2011, 1, 2)),
            BucketPolicy::Omit,
        );

        assert!(wide.metrics.total_rentals >= narrow.metrics.total_rentals);
        for season in &narrow.seasonal {
            let wider = wide
                .seasonal
                .iter()
                .find(|s| s.season == season.season)
                .unwrap();
            assert!(wider.total_count >= season.total_count);
        }
    }
}
