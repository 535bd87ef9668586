mod fetch;
mod filter;
mod parse;
mod record;

pub use fetch::fetch_snapshot;
pub use filter::{DEFAULT_RANGE, RANGE_LABELS, WarningFilters, visible_records};
pub use record::{AssetRecord, Snapshot};
