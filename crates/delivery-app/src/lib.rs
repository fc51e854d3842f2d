//! `delivery-app` owns the application state of the delivery dashboard and
//! funnels every mutation through a named operation, preserving the
//! single-writer rule: record fields change only via the gated status
//! machine and `edit_field`, wholesale replacement only via file load and
//! inbound sync.
//!
//! Presentation is an external collaborator. This crate hands out derived
//! view models ([`delivery_engine::DashboardView`], [`ReportDocument`]) and
//! typed [`Notice`] events; rendering, i18n and widgets live elsewhere.

pub mod cli;
mod error;
mod export;
mod gate;
mod session;
mod state;

pub use error::AppError;
pub use export::{report_document, write_csv, ReportDocument, REPORT_TITLE};
pub use gate::{
    AutoConfirm, ConfirmPrompt, ConfirmationGate, ExportKind, Notice, Notifier, Severity,
};
pub use session::{ExportOutcome, Session};
pub use state::{AppState, StatusOutcome, StatusPolicy};
