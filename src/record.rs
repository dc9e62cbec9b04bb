//! Typed rental records and the conversion from raw CSV rows.
//!
//! Raw rows are deserialized with every field optional so that a missing
//! column or an empty cell surfaces as [`SchemaError::MissingField`] rather
//! than a generic CSV error.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, TableKind};

pub const HOURS: RangeInclusive<u8> = 0..=23;
pub const WEEKDAYS: RangeInclusive<u8> = 0..=6;
pub const MONTHS: RangeInclusive<u8> = 1..=12;
pub const YEARS: RangeInclusive<u8> = 0..=1;

/// Season code as recorded in the source data (1 = winter … 4 = fall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Season {
    Winter = 1,
    Spring = 2,
    Summer = 3,
    Fall = 4,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Season::Winter),
            2 => Some(Season::Spring),
            3 => Some(Season::Summer),
            4 => Some(Season::Fall),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<Season> for u8 {
    fn from(season: Season) -> u8 {
        season.code()
    }
}

/// Weather situation code (1 = clear … 4 = heavy rain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum WeatherSituation {
    Clear = 1,
    Mist = 2,
    LightRain = 3,
    HeavyRain = 4,
}

impl WeatherSituation {
    pub const ALL: [WeatherSituation; 4] = [
        WeatherSituation::Clear,
        WeatherSituation::Mist,
        WeatherSituation::LightRain,
        WeatherSituation::HeavyRain,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(WeatherSituation::Clear),
            2 => Some(WeatherSituation::Mist),
            3 => Some(WeatherSituation::LightRain),
            4 => Some(WeatherSituation::HeavyRain),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<WeatherSituation> for u8 {
    fn from(weather: WeatherSituation) -> u8 {
        weather.code()
    }
}

/// One row of the daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub year: u8,
    pub month: u8,
    pub weekday: u8,
    pub weather_situation: WeatherSituation,
    pub casual_count: u64,
    pub registered_count: u64,
    pub total_count: u64,
}

/// One row of the hourly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    pub season: Season,
    pub year: u8,
    pub month: u8,
    pub hour: u8,
    pub weekday: u8,
    pub weather_situation: WeatherSituation,
    pub casual_count: u64,
    pub registered_count: u64,
    pub total_count: u64,
}

/// A row of `day_cleaned.csv` as it sits on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDailyRow {
    dteday: Option<NaiveDate>,
    season: Option<i64>,
    yr: Option<i64>,
    mnth: Option<i64>,
    weekday: Option<i64>,
    weathersit: Option<i64>,
    casual: Option<i64>,
    registered: Option<i64>,
    cnt: Option<i64>,
}

/// A row of `hour_cleaned.csv` as it sits on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct RawHourlyRow {
    dteday: Option<NaiveDate>,
    season: Option<i64>,
    yr: Option<i64>,
    mnth: Option<i64>,
    hr: Option<i64>,
    weekday: Option<i64>,
    weathersit: Option<i64>,
    casual: Option<i64>,
    registered: Option<i64>,
    cnt: Option<i64>,
}

/// Position of a raw row, carried into every error it produces.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowContext {
    pub(crate) table: TableKind,
    pub(crate) row: usize,
}

impl RowContext {
    fn required<T>(&self, value: Option<T>, field: &'static str) -> Result<T, SchemaError> {
        value.ok_or(SchemaError::MissingField {
            table: self.table,
            row: self.row,
            field,
        })
    }

    fn out_of_domain(&self, field: &'static str, value: i64, expected: &'static str) -> SchemaError {
        SchemaError::OutOfDomain {
            table: self.table,
            row: self.row,
            field,
            value,
            expected,
        }
    }

    fn code(
        &self,
        value: Option<i64>,
        field: &'static str,
        domain: RangeInclusive<u8>,
        expected: &'static str,
    ) -> Result<u8, SchemaError> {
        let value = self.required(value, field)?;
        u8::try_from(value)
            .ok()
            .filter(|code| domain.contains(code))
            .ok_or_else(|| self.out_of_domain(field, value, expected))
    }

    fn count(&self, value: Option<i64>, field: &'static str) -> Result<u64, SchemaError> {
        let value = self.required(value, field)?;
        u64::try_from(value).map_err(|_| self.out_of_domain(field, value, "non-negative counts"))
    }

    fn season(&self, value: Option<i64>) -> Result<Season, SchemaError> {
        let code = self.code(value, "season", 1..=4, "1..=4")?;
        Season::from_code(code).ok_or_else(|| self.out_of_domain("season", code.into(), "1..=4"))
    }

    fn weather(&self, value: Option<i64>) -> Result<WeatherSituation, SchemaError> {
        let code = self.code(value, "weathersit", 1..=4, "1..=4")?;
        WeatherSituation::from_code(code)
            .ok_or_else(|| self.out_of_domain("weathersit", code.into(), "1..=4"))
    }
}

impl RawDailyRow {
    pub(crate) fn into_record(self, ctx: RowContext) -> Result<DailyRecord, SchemaError> {
        Ok(DailyRecord {
            date: ctx.required(self.dteday, "dteday")?,
            season: ctx.season(self.season)?,
            year: ctx.code(self.yr, "yr", YEARS, "0..=1")?,
            month: ctx.code(self.mnth, "mnth", MONTHS, "1..=12")?,
            weekday: ctx.code(self.weekday, "weekday", WEEKDAYS, "0..=6")?,
            weather_situation: ctx.weather(self.weathersit)?,
            casual_count: ctx.count(self.casual, "casual")?,
            registered_count: ctx.count(self.registered, "registered")?,
            total_count: ctx.count(self.cnt, "cnt")?,
        })
    }
}

impl RawHourlyRow {
    pub(crate) fn into_record(self, ctx: RowContext) -> Result<HourlyRecord, SchemaError> {
        Ok(HourlyRecord {
            date: ctx.required(self.dteday, "dteday")?,
            season: ctx.season(self.season)?,
            year: ctx.code(self.yr, "yr", YEARS, "0..=1")?,
            month: ctx.code(self.mnth, "mnth", MONTHS, "1..=12")?,
            hour: ctx.code(self.hr, "hr", HOURS, "0..=23")?,
            weekday: ctx.code(self.weekday, "weekday", WEEKDAYS, "0..=6")?,
            weather_situation: ctx.weather(self.weathersit)?,
            casual_count: ctx.count(self.casual, "casual")?,
            registered_count: ctx.count(self.registered, "registered")?,
            total_count: ctx.count(self.cnt, "cnt")?,
        })
    }
}
