use chrono::Utc;
use thiserror::Error;
use tokio::time::{Duration, Instant};

use crate::{RemoteDocument, SnapshotPatch};

/// How long inbound-triggered echo suppression stays armed. Long enough to
/// absorb the listener re-trigger caused by the client's own completed
/// write, short enough that genuinely new local edits still sync.
pub const ECHO_SUPPRESSION_WINDOW: Duration = Duration::from_millis(250);

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("connection to the shared document failed: {0}")]
    Connection(String),
}

/// Result of an outbound push attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The patch was written to the remote document.
    Pushed,
    /// The push was skipped because the echo-suppression window was armed:
    /// the mutation originated from a remote update, not a local edit.
    SuppressedEcho,
}

/// Drives the outbound half of the reconciliation loop and tracks the
/// echo-suppression window for the inbound half.
///
/// Single-threaded cooperative by design: suppression is a plain deadline
/// that lapses on its own, so no background task or lock is involved. The
/// deadline uses [`tokio::time::Instant`] so paused-clock tests can step
/// across the window deterministically.
pub struct SyncReconciler<R> {
    remote: R,
    source_name: String,
    suppression_window: Duration,
    suppressed_until: Option<Instant>,
}

impl<R: RemoteDocument> SyncReconciler<R> {
    pub fn new(remote: R, source_name: impl Into<String>) -> Self {
        Self {
            remote,
            source_name: source_name.into(),
            suppression_window: ECHO_SUPPRESSION_WINDOW,
            suppressed_until: None,
        }
    }

    /// Override the suppression window (tests, slow transports).
    pub fn with_suppression_window(mut self, window: Duration) -> Self {
        self.suppression_window = window;
        self
    }

    /// True while the echo-suppression window is armed.
    pub fn is_echo_suppressed(&self) -> bool {
        self.suppressed_until
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Arm echo suppression. Called on entry of every inbound remote
    /// snapshot, before local state is replaced.
    pub fn note_remote_update(&mut self) {
        self.suppressed_until = Some(Instant::now() + self.suppression_window);
    }

    /// Push a local mutation to the remote document.
    ///
    /// While suppressed the push is skipped entirely; this is the loop
    /// breaker, not an error. Otherwise the patch is stamped with the
    /// current time and this client's source name (unless the caller set
    /// them) and written with merge semantics. A failed write is reported
    /// to the caller and not retried; local state stays ahead of remote
    /// until the next successful push.
    pub async fn push_local(&self, mut patch: SnapshotPatch) -> Result<PushOutcome, SyncError> {
        if self.is_echo_suppressed() {
            log::debug!("echo suppression armed, skipping outbound push");
            return Ok(PushOutcome::SuppressedEcho);
        }

        patch.last_update.get_or_insert_with(Utc::now);
        patch
            .last_update_source
            .get_or_insert_with(|| self.source_name.clone());

        self.remote.write_merge(&patch).await?;
        Ok(PushOutcome::Pushed)
    }
}
