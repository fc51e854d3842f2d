use serde::{Deserialize, Serialize};

use crate::DeliveryStatus;

/// Process-local view filter. Never persisted and never synced.
///
/// Both predicates AND together; an unset status and an empty query each
/// match everything for their dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// `Some(Pending)` is a catch-all for records not explicitly in one of
    /// the other four states, mirroring the derived-pending aggregation.
    pub status: Option<DeliveryStatus>,
    /// Free-text substring query over every record field.
    pub query: String,
}

impl FilterState {
    /// Reset both predicates to match-all. Remote snapshots apply this so a
    /// replaced dataset is never presented through a stale filter.
    pub fn clear(&mut self) {
        self.status = None;
        self.query.clear();
    }

    pub fn is_clear(&self) -> bool {
        self.status.is_none() && self.query.trim().is_empty()
    }

    /// Toggle semantics of the dashboard summary cards: selecting the active
    /// status again clears the status predicate.
    pub fn toggle_status(&mut self, status: DeliveryStatus) {
        self.status = if self.status == Some(status) {
            None
        } else {
            Some(status)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_both_predicates() {
        let mut filter = FilterState {
            status: Some(DeliveryStatus::Delivered),
            query: "maersk".into(),
        };
        assert!(!filter.is_clear());
        filter.clear();
        assert!(filter.is_clear());
    }

    #[test]
    fn toggling_the_active_status_clears_it() {
        let mut filter = FilterState::default();
        filter.toggle_status(DeliveryStatus::Canceled);
        assert_eq!(filter.status, Some(DeliveryStatus::Canceled));
        filter.toggle_status(DeliveryStatus::Canceled);
        assert_eq!(filter.status, None);
        filter.toggle_status(DeliveryStatus::Canceled);
        filter.toggle_status(DeliveryStatus::Delivered);
        assert_eq!(filter.status, Some(DeliveryStatus::Delivered));
    }
}
