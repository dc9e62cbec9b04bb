pub mod aggregators;
pub mod error;
pub mod filter;
pub mod output;
pub mod record;
pub mod store;

pub use error::{SchemaError, TableKind};
pub use filter::{DateRange, filter_by_range};
pub use record::{DailyRecord, HourlyRecord, Season, WeatherSituation};
pub use store::RecordStore;
