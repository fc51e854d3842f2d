use delivery_model::{DeliveryRecord, FilterState, StatusCounts};

use crate::{apply_filters, carrier_breakdown, group_by_day, CarrierStat, GroupKey};

/// One day tab of the dashboard: its records plus derived statistics.
#[derive(Debug, Clone)]
pub struct DayView<'a> {
    pub key: GroupKey,
    pub records: Vec<&'a DeliveryRecord>,
    pub counts: StatusCounts,
    pub carriers: Vec<CarrierStat>,
}

/// The complete derived view model handed to an external renderer.
///
/// `totals` mirrors the per-group computation over the entire filtered set,
/// so `sum(totals per status) == totals.total` holds exactly as it does per
/// group.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub groups: Vec<DayView<'a>>,
    pub totals: StatusCounts,
}

/// Filter and aggregate in one pass. Pure: recomputed wholesale after every
/// mutation or remote replacement.
pub fn dashboard<'a>(records: &'a [DeliveryRecord], filter: &FilterState) -> DashboardView<'a> {
    let filtered = apply_filters(records, filter);
    let totals = StatusCounts::tally(filtered.iter().map(|r| r.status));

    let groups = group_by_day(filtered.iter().copied())
        .into_iter()
        .map(|group| {
            let counts = StatusCounts::tally(group.records.iter().map(|r| r.status));
            let carriers = carrier_breakdown(group.records.iter().copied());
            DayView {
                key: group.key,
                records: group.records,
                counts,
                carriers,
            }
        })
        .collect();

    DashboardView { groups, totals }
}
