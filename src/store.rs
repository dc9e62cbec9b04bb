//! The in-memory record store: both rental tables, loaded once.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::aggregators::summary::build_summary;
use crate::aggregators::types::{BucketPolicy, DashboardSummary};
use crate::error::{SchemaError, TableKind};
use crate::filter::DateRange;
use crate::record::{DailyRecord, HourlyRecord, RawDailyRow, RawHourlyRow, RowContext};

/// Owns the hourly and daily tables for the lifetime of the process.
///
/// The tables are never mutated after loading; filtering and aggregation
/// always produce new tables.
#[derive(Debug, Default)]
pub struct RecordStore {
    hourly: Vec<HourlyRecord>,
    daily: Vec<DailyRecord>,
}

impl RecordStore {
    pub fn from_records(hourly: Vec<HourlyRecord>, daily: Vec<DailyRecord>) -> Self {
        Self { hourly, daily }
    }

    /// Reads both tables from CSV files.
    #[tracing::instrument(skip_all, fields(hourly = %hourly_path.display(), daily = %daily_path.display()))]
    pub fn load(hourly_path: &Path, daily_path: &Path) -> Result<Self> {
        let hourly_file = File::open(hourly_path)
            .with_context(|| format!("Failed to open hourly table {}", hourly_path.display()))?;
        let daily_file = File::open(daily_path)
            .with_context(|| format!("Failed to open daily table {}", daily_path.display()))?;

        let hourly = read_table(hourly_file, TableKind::Hourly, RawHourlyRow::into_record)
            .inspect_err(log_rejected_row)
            .with_context(|| format!("Invalid hourly table {}", hourly_path.display()))?;
        let daily = read_table(daily_file, TableKind::Daily, RawDailyRow::into_record)
            .inspect_err(log_rejected_row)
            .with_context(|| format!("Invalid daily table {}", daily_path.display()))?;

        info!(
            hourly_rows = hourly.len(),
            daily_rows = daily.len(),
            "Rental tables loaded"
        );

        Ok(Self { hourly, daily })
    }

    /// Reads both tables from CSV readers.
    pub fn from_readers<H: Read, D: Read>(hourly: H, daily: D) -> Result<Self, SchemaError> {
        Ok(Self {
            hourly: read_table(hourly, TableKind::Hourly, RawHourlyRow::into_record)?,
            daily: read_table(daily, TableKind::Daily, RawDailyRow::into_record)?,
        })
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    /// Earliest and latest date in the daily table.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.daily.iter().map(|r| r.date).min()?;
        let max = self.daily.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Runs the filter and every aggregator for `range`.
    pub fn summarize(&self, range: DateRange, policy: BucketPolicy) -> DashboardSummary {
        build_summary(&self.hourly, &self.daily, range, policy)
    }
}

fn log_rejected_row(err: &SchemaError) {
    error!(table = %err.table(), row = err.row(), error = %err, "Row rejected");
}

fn read_table<R, Raw, T>(
    reader: R,
    table: TableKind,
    convert: fn(Raw, RowContext) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError>
where
    R: Read,
    Raw: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize::<Raw>().enumerate() {
        let ctx = RowContext {
            table,
            row: index + 1,
        };
        let raw = result.map_err(|source| SchemaError::Malformed {
            table,
            row: ctx.row,
            source,
        })?;
        rows.push(convert(raw, ctx)?);
    }

    debug!(%table, rows = rows.len(), "Table parsed");
    Ok(rows)
}
