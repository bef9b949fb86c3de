pub mod building;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod loader;
pub mod numeric;
pub mod query;
pub mod schedule_entry;
pub mod store;

pub use building::Building;
pub use config::DirectoryConfig;
pub use error::{ConfigError, LoadError, LoadResult, QueryError};
pub use query::{BUILDING_RESULT_LIMIT, NEAREST_FRIEND_COUNT, Point};
pub use schedule_entry::{ClassLocation, ScheduleEntry};
pub use store::{DirectorySnapshot, DirectoryStore, LoadSummary};
