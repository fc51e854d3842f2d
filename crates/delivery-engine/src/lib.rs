//! `delivery-engine` computes every derived view of the canonical record set:
//! the filtered subset, per-day groups, per-group and global status counts,
//! and per-carrier delivery ratios.
//!
//! Everything here is pure (records are read, never mutated), so a view can
//! be recomputed from scratch after any state change without ordering
//! hazards.

mod filter;
mod group;
mod stats;
mod view;

pub use filter::apply_filters;
pub use group::{group_by_day, DailyGroup, GroupKey};
pub use stats::{carrier_breakdown, CarrierStat, UNKNOWN_CARRIER};
pub use view::{dashboard, DashboardView, DayView};
