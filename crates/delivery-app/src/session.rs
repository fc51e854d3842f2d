use std::io::Write;

use chrono::Utc;
use delivery_engine::DashboardView;
use delivery_import::SheetGrid;
use delivery_model::{DeliveryStatus, RecordField, RecordId};
use delivery_sync::{RemoteDocument, SharedSnapshot, SnapshotPatch, SyncReconciler};

use crate::{
    export, AppError, AppState, ConfirmPrompt, ConfirmationGate, ExportKind, Notice, Notifier,
    ReportDocument, StatusOutcome,
};

/// Outcome of a gated export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { rows: usize },
    Declined,
}

/// One client's live session: the owned state wired to the confirmation
/// gate, the notifier and the sync reconciler.
///
/// Every mutating operation follows the same shape: mutate through the
/// state's named operation, notify, then hand the resulting patch to the
/// reconciler. Push failures are reported as connectivity warnings and
/// never fail the local mutation: local state stays authoritative for
/// continued offline use.
pub struct Session<R, G, N> {
    state: AppState,
    sync: SyncReconciler<R>,
    gate: G,
    notifier: N,
}

impl<R, G, N> Session<R, G, N>
where
    R: RemoteDocument,
    G: ConfirmationGate,
    N: Notifier,
{
    pub fn new(state: AppState, sync: SyncReconciler<R>, gate: G, notifier: N) -> Self {
        Self {
            state,
            sync,
            gate,
            notifier,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dashboard(&self) -> DashboardView<'_> {
        self.state.dashboard()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.set_search_query(query);
    }

    pub fn toggle_status_filter(&mut self, status: DeliveryStatus) {
        self.state.toggle_status_filter(status);
    }

    /// Load a decoded sheet, replacing the dataset. The rejection path
    /// returns the error without touching state or pushing anything.
    pub async fn load_sheet(&mut self, grid: &SheetGrid) -> Result<(), AppError> {
        let patch = self.state.load_grid(grid)?;
        self.notifier.notify(Notice::SheetLoaded {
            sheet: self.state.source_sheet().to_string(),
            record_count: self.state.records().len(),
        });
        self.push(patch).await;
        Ok(())
    }

    /// Run one status transition through the gate. Only a confirmed change
    /// notifies and syncs; `Unchanged`, `Declined` and `Locked` are quiet.
    pub async fn change_status(
        &mut self,
        id: RecordId,
        target: DeliveryStatus,
    ) -> Result<StatusOutcome, AppError> {
        let outcome = self.state.set_status(id, target, &self.gate).await?;
        if let StatusOutcome::Updated {
            record_label,
            status,
            patch,
        } = &outcome
        {
            self.notifier.notify(Notice::StatusUpdated {
                record_label: record_label.clone(),
                status: *status,
            });
            self.push(patch.clone()).await;
        }
        Ok(outcome)
    }

    pub async fn edit_field(
        &mut self,
        id: RecordId,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<(), AppError> {
        let patch = self.state.edit_field(id, field, value)?;
        self.notifier.notify(Notice::FieldUpdated { field });
        self.push(patch).await;
        Ok(())
    }

    pub async fn update_logo(&mut self, data_url: impl Into<String>) {
        let patch = self.state.set_logo(data_url);
        self.notifier.notify(Notice::LogoUpdated);
        self.push(patch).await;
    }

    /// Inbound path: a remote snapshot arrived on the subscription.
    ///
    /// Suppression is armed before state is replaced, so any listener echo
    /// of this client's own write inside the window cannot push again.
    pub fn apply_remote_snapshot(&mut self, snapshot: SharedSnapshot) {
        self.sync.note_remote_update();
        self.state.apply_remote_snapshot(snapshot);
    }

    /// Surface a subscription failure as a connectivity warning. Local
    /// state remains usable; reconnection is the transport's concern.
    pub fn report_listener_failure(&self, detail: impl Into<String>) {
        let detail = detail.into();
        log::warn!("shared-document listener failed: {detail}");
        self.notifier.notify(Notice::SyncListenFailed { detail });
    }

    /// Export the current records as CSV, behind the confirmation gate.
    pub async fn export_csv<W: Write>(&self, out: W) -> Result<ExportOutcome, AppError> {
        if self.state.records().is_empty() {
            return Err(AppError::NoData);
        }
        let prompt = ConfirmPrompt::Export {
            kind: ExportKind::Csv,
        };
        if !self.gate.confirm(&prompt).await {
            return Ok(ExportOutcome::Declined);
        }
        let rows = export::write_csv(self.state.records(), out)?;
        self.notifier.notify(Notice::ExportReady {
            kind: ExportKind::Csv,
            rows,
        });
        Ok(ExportOutcome::Written { rows })
    }

    /// Build the paginated report layout, behind the same gate as the CSV
    /// export. `None` means the user declined.
    pub async fn export_report(&self) -> Result<Option<ReportDocument>, AppError> {
        if self.state.records().is_empty() {
            return Err(AppError::NoData);
        }
        let prompt = ConfirmPrompt::Export {
            kind: ExportKind::Report,
        };
        if !self.gate.confirm(&prompt).await {
            return Ok(None);
        }
        let document = export::report_document(self.state.records(), Utc::now())?;
        self.notifier.notify(Notice::ExportReady {
            kind: ExportKind::Report,
            rows: document.rows.len(),
        });
        Ok(Some(document))
    }

    async fn push(&self, patch: SnapshotPatch) {
        match self.sync.push_local(patch).await {
            Ok(_) => {}
            Err(err) => {
                // Not retried: the next mutation (or explicit reload) will
                // carry the full record set again.
                log::warn!("outbound sync push failed: {err}");
                self.notifier.notify(Notice::SyncPushFailed {
                    detail: err.to_string(),
                });
            }
        }
    }
}
