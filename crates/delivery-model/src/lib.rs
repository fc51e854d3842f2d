//! `delivery-model` defines the core in-memory delivery-schedule data structures.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the grid ingestion layer (`delivery-import`)
//! - the grouping/aggregation engine (`delivery-engine`)
//! - the shared-document sync boundary via `serde` (JSON-safe schema)

mod dates;
mod filter;
mod record;
mod stats;
mod status;

pub use dates::{excel_serial_to_date, normalize_date, EXCEL_EPOCH_OFFSET_DAYS};
pub use filter::FilterState;
pub use record::{DateField, DeliveryRecord, RecordField, RecordId};
pub use stats::StatusCounts;
pub use status::DeliveryStatus;
