use delivery_model::{DeliveryRecord, FilterState};

/// Evaluate the compound filter over `records`, preserving input order.
///
/// The status predicate is equality on the parsed status. Because every
/// unrecognized raw status already folded into `Pending` at build time,
/// equality with `Pending` is exactly the catch-all the dashboard needs:
/// "not explicitly in one of the other four states".
///
/// The query predicate is a case-insensitive substring match over every
/// field's string form (including the raw date text and the status token).
/// Both predicates AND; a cleared filter returns the full set unchanged.
pub fn apply_filters<'a>(
    records: &'a [DeliveryRecord],
    filter: &FilterState,
) -> Vec<&'a DeliveryRecord> {
    let needle = filter.query.trim().to_lowercase();

    records
        .iter()
        .filter(|record| match filter.status {
            Some(status) => record.status == status,
            None => true,
        })
        .filter(|record| needle.is_empty() || record.matches_query(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivery_model::{DateField, DeliveryStatus};
    use pretty_assertions::assert_eq;

    fn record(id: u32, container: &str, carrier: &str, status: DeliveryStatus) -> DeliveryRecord {
        DeliveryRecord {
            id,
            container_id: container.into(),
            carrier: carrier.into(),
            delivery_date: DateField::from_raw("13/05/2024"),
            status,
            ..Default::default()
        }
    }

    fn dataset() -> Vec<DeliveryRecord> {
        vec![
            record(0, "MSKU1", "Maersk", DeliveryStatus::InTransit),
            record(1, "TCLU2", "MSC", DeliveryStatus::InTransit),
            record(2, "MSKU3", "Maersk", DeliveryStatus::Delivered),
            record(3, "HLCU4", "Hapag", DeliveryStatus::Pending),
        ]
    }

    #[test]
    fn cleared_filter_returns_the_full_set_in_order() {
        let records = dataset();
        let out = apply_filters(&records, &FilterState::default());
        let ids: Vec<u32> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn status_and_query_predicates_and_together() {
        let records = dataset();
        let filter = FilterState {
            status: Some(DeliveryStatus::InTransit),
            query: "MAERSK".into(),
        };
        let out = apply_filters(&records, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 0);
    }

    #[test]
    fn pending_filter_is_the_catch_all_bucket() {
        let mut records = dataset();
        // A record whose source status was garbage parses as Pending and
        // must land in the pending bucket.
        records.push(record(4, "XXXX5", "Maersk", DeliveryStatus::from_raw("???")));
        let filter = FilterState {
            status: Some(DeliveryStatus::Pending),
            query: String::new(),
        };
        let ids: Vec<u32> = apply_filters(&records, &filter)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn query_matches_any_field_case_insensitively() {
        let records = dataset();
        let filter = FilterState {
            status: None,
            query: "  hapag  ".into(),
        };
        let out = apply_filters(&records, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 3);
        // The status token is searchable too.
        let filter = FilterState {
            status: None,
            query: "entregue".into(),
        };
        assert_eq!(apply_filters(&records, &filter).len(), 1);
    }
}
