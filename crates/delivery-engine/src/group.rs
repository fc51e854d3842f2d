use std::collections::BTreeMap;

use chrono::NaiveDate;
use delivery_model::DeliveryRecord;
use serde::Serialize;

/// Grouping key for one dashboard day tab.
///
/// The derived `Ord` gives exactly the required tab order: dated keys
/// ascending, then undated raw-text keys lexicographically, with the unset
/// bucket last no matter how many undated key forms coexist.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// Normalized calendar date.
    Date(NaiveDate),
    /// Date text that did not normalize; kept verbatim (trimmed) so
    /// distinct spellings form distinct groups by design.
    RawText(String),
    /// No date information at all.
    Unset,
}

impl GroupKey {
    pub fn for_record(record: &DeliveryRecord) -> GroupKey {
        if let Some(date) = record.delivery_date.date {
            return GroupKey::Date(date);
        }
        let raw = record.delivery_date.raw.trim();
        if raw.is_empty() {
            GroupKey::Unset
        } else {
            GroupKey::RawText(raw.to_string())
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Date(date) => write!(f, "{}", date.format("%d/%m/%Y")),
            GroupKey::RawText(raw) => f.write_str(raw),
            GroupKey::Unset => f.write_str("no date"),
        }
    }
}

/// One day's worth of records, in input order.
#[derive(Debug, Clone)]
pub struct DailyGroup<'a> {
    pub key: GroupKey,
    pub records: Vec<&'a DeliveryRecord>,
}

/// Group records by delivery day, sorted ascending with undated keys after
/// all dated ones and the unset bucket last. Records keep their relative
/// order within each group.
pub fn group_by_day<'a>(
    records: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> Vec<DailyGroup<'a>> {
    let mut groups: BTreeMap<GroupKey, Vec<&'a DeliveryRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(GroupKey::for_record(record))
            .or_default()
            .push(record);
    }
    groups
        .into_iter()
        .map(|(key, records)| DailyGroup { key, records })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivery_model::DateField;
    use pretty_assertions::assert_eq;

    fn dated(id: u32, raw: &str) -> DeliveryRecord {
        DeliveryRecord {
            id,
            container_id: format!("C{id}"),
            delivery_date: DateField::from_raw(raw),
            ..Default::default()
        }
    }

    #[test]
    fn dated_groups_sort_ascending_with_unset_last() {
        let records = vec![
            dated(0, "14/05/2024"),
            dated(1, ""),
            dated(2, "13/05/2024"),
            dated(3, "TBD"),
            dated(4, "13/05/2024"),
        ];
        let groups = group_by_day(&records);
        let keys: Vec<&GroupKey> = groups.iter().map(|g| &g.key).collect();
        assert_eq!(
            keys,
            vec![
                &GroupKey::Date(NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()),
                &GroupKey::Date(NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()),
                &GroupKey::RawText("TBD".into()),
                &GroupKey::Unset,
            ]
        );
        // Same-day records keep input order.
        let first_ids: Vec<u32> = groups[0].records.iter().map(|r| r.id).collect();
        assert_eq!(first_ids, vec![2, 4]);
    }

    #[test]
    fn multiple_raw_text_keys_sort_lexicographically_before_unset() {
        let records = vec![dated(0, ""), dated(1, "week 2"), dated(2, "week 1")];
        let groups = group_by_day(&records);
        let keys: Vec<&GroupKey> = groups.iter().map(|g| &g.key).collect();
        assert_eq!(
            keys,
            vec![
                &GroupKey::RawText("week 1".into()),
                &GroupKey::RawText("week 2".into()),
                &GroupKey::Unset,
            ]
        );
    }

    #[test]
    fn raw_keys_are_trimmed_but_not_canonicalized() {
        let records = vec![dated(0, " TBD "), dated(1, "tbd")];
        let groups = group_by_day(&records);
        // Case variants stay separate groups by design.
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, GroupKey::RawText("TBD".into()));
        assert_eq!(groups[1].key, GroupKey::RawText("tbd".into()));
    }
}
