use serde::{Deserialize, Serialize};

use crate::DeliveryStatus;

/// Mutually exclusive status tallies over a set of records.
///
/// `pending` is derived by subtraction rather than counted: any status value
/// that fell outside the closed enumeration was already folded into `Pending`
/// at parse time, so the subtraction can never go negative and
/// `sum(per-status counts) == total` holds by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub delivered: usize,
    pub in_transit: usize,
    pub postponed: usize,
    pub canceled: usize,
}

impl StatusCounts {
    pub fn tally(statuses: impl IntoIterator<Item = DeliveryStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.add(status);
        }
        counts
    }

    pub fn add(&mut self, status: DeliveryStatus) {
        self.total += 1;
        match status {
            DeliveryStatus::Delivered => self.delivered += 1,
            DeliveryStatus::InTransit => self.in_transit += 1,
            DeliveryStatus::Postponed => self.postponed += 1,
            DeliveryStatus::Canceled => self.canceled += 1,
            DeliveryStatus::Pending => {}
        }
    }

    /// Derived pending count.
    pub fn pending(&self) -> usize {
        self.total - self.delivered - self.in_transit - self.postponed - self.canceled
    }

    /// Count for a specific status, mirroring the five dashboard cards.
    pub fn for_status(&self, status: DeliveryStatus) -> usize {
        match status {
            DeliveryStatus::Pending => self.pending(),
            DeliveryStatus::InTransit => self.in_transit,
            DeliveryStatus::Postponed => self.postponed,
            DeliveryStatus::Delivered => self.delivered,
            DeliveryStatus::Canceled => self.canceled,
        }
    }
}
