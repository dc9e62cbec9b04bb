//! Output formatting and persistence for dashboard summaries.
//!
//! Supports pretty JSON, a plain-text report, and a directory of CSV tables.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregators::labels::{
    calendar_year, month_label, season_label, weather_label, weekday_label,
};
use crate::aggregators::types::{DashboardSummary, TableColumns};

/// Writes the summary as pretty-printed JSON.
pub fn write_json<W: Write>(mut writer: W, summary: &DashboardSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    Ok(())
}

/// Renders the summary as a labelled plain-text report.
pub fn render_text(summary: &DashboardSummary) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, summary)?;
    Ok(out)
}

fn write_report(out: &mut String, s: &DashboardSummary) -> std::fmt::Result {
    writeln!(out, "Bike rentals {} to {}", s.range.start, s.range.end)?;
    writeln!(out, "  Total rentals:           {}", s.metrics.total_rentals)?;
    writeln!(out, "  Average rentals per day: {:.2}", s.metrics.average_per_day)?;
    writeln!(out, "  Days:                    {}", s.metrics.days)?;

    writeln!(out, "\nDaily rentals")?;
    for row in &s.daily {
        writeln!(out, "  {}  {:>8}", row.date, row.rental_count)?;
    }

    writeln!(out, "\nRentals by hour (all dates)")?;
    for row in &s.hourly {
        writeln!(out, "  {:02}:00  {:>10}", row.hour, row.total_count)?;
    }

    writeln!(out, "\nRentals by weekday")?;
    for row in &s.weekday {
        writeln!(out, "  {:<10} {:>10}", weekday_label(row.weekday), row.total_count)?;
    }

    writeln!(out, "\nRentals by season")?;
    for row in &s.seasonal {
        writeln!(out, "  {:<10} {:>10}", season_label(row.season), row.total_count)?;
    }

    writeln!(out, "\nRentals by weather")?;
    for row in &s.weather {
        writeln!(
            out,
            "  {:<10} {:>10}",
            weather_label(row.weather_situation),
            row.total_count
        )?;
    }

    writeln!(out, "\nMonthly rentals (casual / registered)")?;
    for row in &s.monthly_users {
        writeln!(
            out,
            "  {:<4} {:>10} {:>10}",
            month_label(row.month),
            row.casual_sum,
            row.registered_sum
        )?;
    }

    writeln!(out, "\nRentals by year")?;
    for row in &s.yearly {
        writeln!(out, "  {:<4} {:>10}", calendar_year(row.year), row.total_count)?;
    }

    writeln!(out, "\nMonthly trend (all dates)")?;
    for row in &s.monthly_trend {
        writeln!(out, "  {:<4} {:>10}", month_label(row.month), row.total_count)?;
    }

    Ok(())
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
///
/// An empty table still gets its header row.
pub fn write_table<T: Serialize + TableColumns>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    if rows.is_empty() {
        writer.write_record(T::COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes every table of the summary to `dir/<table>.csv`, plus the whole
/// summary as `dir/summary.json`. Returns the files written.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn export_summary(dir: &Path, summary: &DashboardSummary) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    export_table(dir, "daily_rentals", &summary.daily, &mut written)?;
    export_table(dir, "hourly_rentals", &summary.hourly, &mut written)?;
    export_table(dir, "weekday_rentals", &summary.weekday, &mut written)?;
    export_table(dir, "seasonal_rentals", &summary.seasonal, &mut written)?;
    export_table(dir, "weather_rentals", &summary.weather, &mut written)?;
    export_table(dir, "monthly_user_rentals", &summary.monthly_users, &mut written)?;
    export_table(dir, "yearly_rentals", &summary.yearly, &mut written)?;
    export_table(dir, "monthly_trend", &summary.monthly_trend, &mut written)?;

    let json_path = dir.join("summary.json");
    let file = File::create(&json_path)
        .with_context(|| format!("Failed to create {}", json_path.display()))?;
    write_json(file, summary)?;
    written.push(json_path);

    info!(files = written.len(), "Summary exported");
    Ok(written)
}

fn export_table<T: Serialize + TableColumns>(
    dir: &Path,
    name: &str,
    rows: &[T],
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = dir.join(format!("{}.csv", name));
    write_table(&path, rows)?;
    written.push(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::summary::build_summary;
    use crate::aggregators::types::BucketPolicy;
    use crate::filter::DateRange;
    use crate::record::{DailyRecord, HourlyRecord, Season, WeatherSituation};
    use chrono::NaiveDate;

    fn summary() -> DashboardSummary {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let daily = vec![DailyRecord {
            date,
            season: Season::Winter,
            year: 0,
            month: 1,
            weekday: 6,
            weather_situation: WeatherSituation::Mist,
            casual_count: 331,
            registered_count: 654,
            total_count: 985,
        }];
        let hourly = vec![HourlyRecord {
            date,
            season: Season::Winter,
            year: 0,
            month: 1,
            hour: 0,
            weekday: 6,
            weather_situation: WeatherSituation::Clear,
            casual_count: 3,
            registered_count: 13,
            total_count: 16,
        }];

        build_summary(
            &hourly,
            &daily,
            DateRange::new(date, date),
            BucketPolicy::Omit,
        )
    }

    #[test]
    fn test_write_json_uses_codes_for_categories() {
        let mut buf = Vec::new();
        write_json(&mut buf, &summary()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["metrics"]["total_rentals"], 985);
        assert_eq!(value["seasonal"][0]["season"], 1);
        assert_eq!(value["weather"][0]["weather_situation"], 2);
        assert_eq!(value["daily"][0]["date"], "2011-01-01");
        assert_eq!(value["bucket_policy"], "omit");
    }

    #[test]
    fn test_render_text_labels_categories() {
        let text = render_text(&summary()).unwrap();

        assert!(text.contains("Bike rentals 2011-01-01 to 2011-01-01"));
        assert!(text.contains("Saturday"));
        assert!(text.contains("Winter"));
        assert!(text.contains("Mist"));
        assert!(text.contains("2011"));
        assert!(text.contains("Jan"));
    }

    #[test]
    fn test_export_writes_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_summary(dir.path(), &summary()).unwrap();

        assert_eq!(written.len(), 9);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }

        let weekday = fs::read_to_string(dir.path().join("weekday_rentals.csv")).unwrap();
        assert_eq!(weekday, "weekday,total_count\n6,985\n");

        let users = fs::read_to_string(dir.path().join("monthly_user_rentals.csv")).unwrap();
        assert_eq!(users, "month,casual_sum,registered_sum\n1,331,654\n");
    }

    #[test]
    fn test_write_table_empty_rows_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let rows: Vec<crate::aggregators::types::YearlyRentals> = Vec::new();

        write_table(&path, &rows).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "year,total_count\n");
    }

    #[test]
    fn test_export_of_empty_range_writes_headers() {
        let mut summary = summary();
        summary.daily.clear();
        summary.monthly_users.clear();
        let dir = tempfile::tempdir().unwrap();

        export_summary(dir.path(), &summary).unwrap();

        let daily = fs::read_to_string(dir.path().join("daily_rentals.csv")).unwrap();
        assert_eq!(daily, "date,rental_count\n");
        let users = fs::read_to_string(dir.path().join("monthly_user_rentals.csv")).unwrap();
        assert_eq!(users, "month,casual_sum,registered_sum\n");
    }
}
