use async_trait::async_trait;
use delivery_model::{DeliveryStatus, RecordField};

/// What a confirmation dialog is asking about.
///
/// Only one gate is active at a time: every gated operation suspends on
/// `confirm` and the UI presents dialogs serially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmPrompt {
    /// Irreversible-feeling status change; shows the record identifier and
    /// the target state.
    StatusChange {
        record_label: String,
        target: DeliveryStatus,
    },
    /// Exporting the current dataset to a file artifact.
    Export { kind: ExportKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Report,
}

/// The yes/no gate presented to the acting user.
///
/// Declining is a normal negative outcome, not an error: the initiating
/// operation reverts any speculative state and leaves the record unchanged.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Gate that approves everything, for headless use and for tests that are
/// not about gating.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationGate for AutoConfirm {
    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Severity of a user-facing notice, mapping onto the toast styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// Typed notification events. String lookup and formatting are the
/// renderer's concern; the core only says what happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SheetLoaded {
        sheet: String,
        record_count: usize,
    },
    StatusUpdated {
        record_label: String,
        status: DeliveryStatus,
    },
    FieldUpdated {
        field: RecordField,
    },
    LogoUpdated,
    ExportReady {
        kind: ExportKind,
        rows: usize,
    },
    /// An outbound push failed; local state stays ahead of remote until the
    /// next successful push.
    SyncPushFailed {
        detail: String,
    },
    /// The remote subscription reported an error; local state remains
    /// usable offline.
    SyncListenFailed {
        detail: String,
    },
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::SheetLoaded { .. }
            | Notice::StatusUpdated { .. }
            | Notice::FieldUpdated { .. }
            | Notice::LogoUpdated
            | Notice::ExportReady { .. } => Severity::Success,
            Notice::SyncPushFailed { .. } | Notice::SyncListenFailed { .. } => Severity::Warning,
        }
    }
}

/// Toast boundary. Implementations must be cheap and non-blocking.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
