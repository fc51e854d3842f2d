use async_trait::async_trait;
use chrono::{DateTime, Utc};
use delivery_model::DeliveryRecord;
use serde::{Deserialize, Serialize};

use crate::SyncError;

/// Full state of the shared document.
///
/// Field names follow the document's JSON payload. Deserialization is
/// lenient end to end: absent or malformed sections default (an unreadable
/// `records` array becomes the empty set rather than a failed inbound
/// update).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharedSnapshot {
    pub records: Vec<DeliveryRecord>,
    pub last_update: Option<DateTime<Utc>>,
    pub last_update_source: String,
    pub company_logo: Option<String>,
}

impl SharedSnapshot {
    /// Decode an inbound document payload. Malformed payloads degrade to the
    /// empty snapshot instead of erroring: the listener must never wedge the
    /// client on bad remote data.
    pub fn from_json(value: serde_json::Value) -> SharedSnapshot {
        serde_json::from_value(value).unwrap_or_else(|err| {
            log::warn!("malformed shared-document payload, treating as empty: {err}");
            SharedSnapshot::default()
        })
    }
}

/// A partial-merge update to the shared document.
///
/// Fields left `None` are untouched on the remote side. The application
/// layer fills every field from its full local state on each push; the
/// optionality belongs to the merge-write contract, not to minimal diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<DeliveryRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl SnapshotPatch {
    pub fn records(records: Vec<DeliveryRecord>) -> Self {
        Self {
            records: Some(records),
            ..Default::default()
        }
    }

    pub fn logo(data_url: impl Into<String>) -> Self {
        Self {
            company_logo: Some(data_url.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.last_update_source = Some(source.into());
        self
    }

    /// Merge this patch over a snapshot, leaving absent fields untouched.
    pub fn apply_to(&self, snapshot: &mut SharedSnapshot) {
        if let Some(records) = &self.records {
            snapshot.records = records.clone();
        }
        if let Some(ts) = self.last_update {
            snapshot.last_update = Some(ts);
        }
        if let Some(source) = &self.last_update_source {
            snapshot.last_update_source = source.clone();
        }
        if let Some(logo) = &self.company_logo {
            snapshot.company_logo = Some(logo.clone());
        }
    }
}

/// Transport boundary to the shared document store.
///
/// Implementations write with merge semantics and are expected to deliver
/// inbound snapshots by pushing them into the reconciler (subscription, not
/// polling). The reconciler never retries a failed write.
#[async_trait]
pub trait RemoteDocument: Send + Sync {
    async fn write_merge(&self, patch: &SnapshotPatch) -> Result<(), SyncError>;
}
