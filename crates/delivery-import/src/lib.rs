//! `delivery-import` turns an already-decoded spreadsheet grid into the
//! canonical record set.
//!
//! Binary workbook decoding is an external collaborator: the input here is a
//! 2-D grid of scalar cells plus the workbook's sheet names. This crate owns
//! the parts with real failure modes: picking the schedule sheet, locating
//! the header row, mapping columns with positional fallbacks, and the
//! keep/drop rule for rows. The load itself is all-or-nothing.

mod builder;
mod columns;
mod grid;
mod sheet;

pub use builder::{build_from_workbook, build_records, ImportError};
pub use columns::{find_header_row, ColumnMap, HEADER_FALLBACK_ROW};
pub use grid::{Cell, SheetGrid};
pub use sheet::{select_delivery_grid, select_delivery_sheet, SHEET_KEYWORDS};
