use chrono::{DateTime, Utc};
use delivery_engine::{dashboard, DashboardView};
use delivery_import::{build_records, SheetGrid};
use delivery_model::{DeliveryRecord, DeliveryStatus, FilterState, RecordField, RecordId};
use delivery_sync::{SharedSnapshot, SnapshotPatch};

use crate::{AppError, ConfirmPrompt, ConfirmationGate};

/// Policy knob for the status machine.
///
/// The default keeps terminal records editable (every change still passes
/// the confirmation gate). `lock_terminal` implements the stricter variant
/// where `Delivered`/`Canceled` records become read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPolicy {
    pub lock_terminal: bool,
}

/// Outcome of a status-change request.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusOutcome {
    /// Requested state equals the current state: nothing happened, no gate
    /// was shown, nothing syncs.
    Unchanged,
    /// The user declined the gate; the record is untouched.
    Declined,
    /// The record is terminal and the active policy locks terminal records.
    Locked,
    /// The transition was confirmed and applied.
    Updated {
        record_label: String,
        status: DeliveryStatus,
        /// Outbound patch for the reconciler.
        patch: SnapshotPatch,
    },
}

/// The owned application state: the canonical record set plus the active
/// view filter and load provenance.
///
/// All mutation goes through the named operations below. Everything else
/// (grouping, statistics, search) reads the records through
/// [`AppState::dashboard`] and never writes.
#[derive(Debug, Default)]
pub struct AppState {
    records: Vec<DeliveryRecord>,
    filter: FilterState,
    source_sheet: String,
    loaded_at: Option<DateTime<Utc>>,
    company_logo: Option<String>,
    policy: StatusPolicy,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: StatusPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[DeliveryRecord] {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&DeliveryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn source_sheet(&self) -> &str {
        &self.source_sheet
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn company_logo(&self) -> Option<&str> {
        self.company_logo.as_deref()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status_filter(&mut self, status: Option<DeliveryStatus>) {
        self.filter.status = status;
    }

    pub fn toggle_status_filter(&mut self, status: DeliveryStatus) {
        self.filter.toggle_status(status);
    }

    /// Recompute the derived view over the current records and filter.
    pub fn dashboard(&self) -> DashboardView<'_> {
        dashboard(&self.records, &self.filter)
    }

    /// The full local state as an outbound patch: records, provenance and
    /// logo together. Every mutation pushes this whole patch, so a write
    /// lost to a connection failure is healed by the next successful push
    /// regardless of which field the next mutation touched.
    pub fn snapshot_patch(&self) -> SnapshotPatch {
        SnapshotPatch {
            records: Some(self.records.clone()),
            last_update: None,
            last_update_source: (!self.source_sheet.is_empty())
                .then(|| self.source_sheet.clone()),
            company_logo: self.company_logo.clone(),
        }
    }

    /// Replace the dataset with a freshly decoded sheet.
    ///
    /// All-or-nothing: on error the previous records, filter and provenance
    /// are untouched. On success the filter resets and record ids restart
    /// from zero.
    pub fn load_grid(&mut self, grid: &SheetGrid) -> Result<SnapshotPatch, AppError> {
        let records = build_records(grid)?;
        self.records = records;
        self.filter.clear();
        self.source_sheet = grid.name.clone();
        self.loaded_at = Some(Utc::now());
        Ok(self.snapshot_patch())
    }

    /// Request a status transition, gated by user confirmation.
    ///
    /// Any state may transition to any other state; a request for the
    /// current state is a no-op that never reaches the gate.
    pub async fn set_status(
        &mut self,
        id: RecordId,
        target: DeliveryStatus,
        gate: &dyn ConfirmationGate,
    ) -> Result<StatusOutcome, AppError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(AppError::UnknownRecord(id))?;

        if self.records[index].status == target {
            return Ok(StatusOutcome::Unchanged);
        }
        if self.policy.lock_terminal && self.records[index].status.is_terminal() {
            return Ok(StatusOutcome::Locked);
        }

        let record_label = self.records[index].display_label().to_string();
        let prompt = ConfirmPrompt::StatusChange {
            record_label: record_label.clone(),
            target,
        };
        if !gate.confirm(&prompt).await {
            return Ok(StatusOutcome::Declined);
        }

        self.records[index].status = target;
        Ok(StatusOutcome::Updated {
            record_label,
            status: target,
            patch: self.snapshot_patch(),
        })
    }

    /// Edit one free-text field of a record. The status field is rejected:
    /// it only changes through [`AppState::set_status`].
    pub fn edit_field(
        &mut self,
        id: RecordId,
        field: RecordField,
        value: impl Into<String>,
    ) -> Result<SnapshotPatch, AppError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::UnknownRecord(id))?;
        if !record.set_field_text(field, value) {
            return Err(AppError::GatedStatusField);
        }
        Ok(self.snapshot_patch())
    }

    /// Adopt a new company logo (a data URL produced by the UI layer).
    pub fn set_logo(&mut self, data_url: impl Into<String>) -> SnapshotPatch {
        self.company_logo = Some(data_url.into());
        self.snapshot_patch()
    }

    /// Replace local state wholesale with a remote snapshot.
    ///
    /// The filter and search query reset so the new dataset is never viewed
    /// through a stale predicate; the logo is adopted when present.
    pub fn apply_remote_snapshot(&mut self, snapshot: SharedSnapshot) {
        self.records = snapshot.records;
        self.filter.clear();
        self.loaded_at = snapshot.last_update;
        if !snapshot.last_update_source.is_empty() {
            self.source_sheet = snapshot.last_update_source;
        }
        if let Some(logo) = snapshot.company_logo {
            if !logo.is_empty() {
                self.company_logo = Some(logo);
            }
        }
    }
}
