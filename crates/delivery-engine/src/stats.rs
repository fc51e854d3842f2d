use delivery_model::{DeliveryRecord, DeliveryStatus};
use serde::Serialize;

/// Label used when a record has no carrier text at all.
pub const UNKNOWN_CARRIER: &str = "N/A";

/// Delivery performance of one carrier within a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierStat {
    pub carrier: String,
    pub total: usize,
    pub delivered: usize,
}

impl CarrierStat {
    /// Fraction of this carrier's records already delivered; 0 when the
    /// carrier has no records at all.
    pub fn delivered_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.delivered as f64 / self.total as f64
        }
    }
}

/// Tally records by carrier name.
///
/// Carrier text is trimmed but otherwise uncanonicalized, so case or
/// punctuation variants form separate rows (a known data-quality
/// limitation, preserved deliberately). Output is sorted descending by total
/// with ties left in first-encountered order.
pub fn carrier_breakdown<'a>(
    records: impl IntoIterator<Item = &'a DeliveryRecord>,
) -> Vec<CarrierStat> {
    let mut stats: Vec<CarrierStat> = Vec::new();
    for record in records {
        let name = record.carrier.trim();
        let name = if name.is_empty() { UNKNOWN_CARRIER } else { name };
        let index = match stats.iter().position(|s| s.carrier == name) {
            Some(index) => index,
            None => {
                stats.push(CarrierStat {
                    carrier: name.to_string(),
                    total: 0,
                    delivered: 0,
                });
                stats.len() - 1
            }
        };
        stats[index].total += 1;
        if record.status == DeliveryStatus::Delivered {
            stats[index].delivered += 1;
        }
    }
    // Stable sort keeps first-encountered order on equal totals.
    stats.sort_by(|a, b| b.total.cmp(&a.total));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(carrier: &str, status: DeliveryStatus) -> DeliveryRecord {
        DeliveryRecord {
            container_id: "C".into(),
            carrier: carrier.into(),
            status,
            ..Default::default()
        }
    }

    #[test]
    fn sorts_by_total_descending_with_stable_ties() {
        let records = vec![
            record("Hapag", DeliveryStatus::Pending),
            record("Maersk", DeliveryStatus::Delivered),
            record("Maersk", DeliveryStatus::Pending),
            record("MSC", DeliveryStatus::Delivered),
        ];
        let stats = carrier_breakdown(&records);
        let names: Vec<&str> = stats.iter().map(|s| s.carrier.as_str()).collect();
        // Hapag and MSC tie at 1; Hapag was seen first.
        assert_eq!(names, vec!["Maersk", "Hapag", "MSC"]);
        assert_eq!(stats[0].delivered, 1);
        assert!((stats[0].delivered_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_carriers_collapse_into_the_unknown_label() {
        let records = vec![
            record("", DeliveryStatus::Delivered),
            record("   ", DeliveryStatus::Pending),
        ];
        let stats = carrier_breakdown(&records);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].carrier, UNKNOWN_CARRIER);
        assert_eq!(stats[0].total, 2);
    }

    #[test]
    fn case_variants_stay_separate_rows() {
        let records = vec![
            record("Maersk", DeliveryStatus::Pending),
            record("MAERSK", DeliveryStatus::Pending),
        ];
        assert_eq!(carrier_breakdown(&records).len(), 2);
    }

    #[test]
    fn ratio_of_an_empty_stat_is_zero() {
        let stat = CarrierStat {
            carrier: "X".into(),
            total: 0,
            delivered: 0,
        };
        assert_eq!(stat.delivered_ratio(), 0.0);
    }
}
