//! `delivery-sync` reconciles local delivery state against a remote shared
//! document under last-writer-wins semantics.
//!
//! The remote document is the source of truth shared by all clients; this
//! crate owns the two flows around it:
//! - **outbound**: local mutations become partial-merge patches, skipped
//!   entirely while the echo-suppression window is armed;
//! - **inbound**: a pushed remote snapshot replaces local records wholesale,
//!   arming suppression so the client's own listener callback for its
//!   just-completed write cannot trigger a second push.
//!
//! Transport (the actual document store and its subscription) sits behind
//! [`RemoteDocument`]; connection failures surface as [`SyncError`] values
//! and never crash the process.

mod document;
mod reconciler;

pub use document::{RemoteDocument, SharedSnapshot, SnapshotPatch};
pub use reconciler::{PushOutcome, SyncError, SyncReconciler, ECHO_SUPPRESSION_WINDOW};
