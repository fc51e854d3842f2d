use std::io::Write;

use chrono::{DateTime, Utc};
use delivery_model::{DeliveryRecord, RecordField};
use serde::Serialize;

use crate::AppError;

/// Title of the paginated report artifact.
pub const REPORT_TITLE: &str = "Container Delivery Schedule";

/// Write the record set as CSV: one column per field in declaration order,
/// source-document headers, internal id excluded. Returns the number of
/// data rows written.
pub fn write_csv<W: Write>(records: &[DeliveryRecord], out: W) -> Result<usize, AppError> {
    if records.is_empty() {
        return Err(AppError::NoData);
    }

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(RecordField::ALL.iter().map(|f| f.header()))?;
    for record in records {
        writer.write_record(RecordField::ALL.iter().map(|&f| record.field_text(f)))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(records.len())
}

/// Flat layout of the paginated report, handed to an external renderer that
/// owns pagination, fonts and the actual byte artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Build the report layout over the current record set.
pub fn report_document(
    records: &[DeliveryRecord],
    generated_at: DateTime<Utc>,
) -> Result<ReportDocument, AppError> {
    if records.is_empty() {
        return Err(AppError::NoData);
    }
    Ok(ReportDocument {
        title: REPORT_TITLE.to_string(),
        generated_at,
        columns: RecordField::ALL.iter().map(|f| f.header()).collect(),
        rows: records
            .iter()
            .map(|record| {
                RecordField::ALL
                    .iter()
                    .map(|&f| record.field_text(f).to_string())
                    .collect()
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use delivery_model::{DateField, DeliveryStatus};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<DeliveryRecord> {
        vec![DeliveryRecord {
            id: 7,
            delivery_date: DateField::from_raw("13/05/2024"),
            container_id: "MSKU1".into(),
            bill_of_lading: "BL1".into(),
            carrier: "Maersk".into(),
            status: DeliveryStatus::Delivered,
            ..Default::default()
        }]
    }

    #[test]
    fn csv_uses_source_headers_and_excludes_the_id() {
        let mut out = Vec::new();
        let rows = write_csv(&records(), &mut out).unwrap();
        assert_eq!(rows, 1);
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "DELIVERY AT BYD,CONTAINER,BL,VESSEL,TRANSPORTATION COMPANY,\
             BONDED WAREHOUSE,LOT,TYPE OF MATERIAL,NOTES,STATUS"
        );
        let data = lines.next().unwrap();
        assert_eq!(data, "13/05/2024,MSKU1,BL1,,Maersk,,,,,ENTREGUE");
        assert!(!text.contains('7'));
    }

    #[test]
    fn empty_datasets_refuse_to_export() {
        let mut out = Vec::new();
        assert!(matches!(write_csv(&[], &mut out), Err(AppError::NoData)));
        assert!(matches!(
            report_document(&[], Utc::now()),
            Err(AppError::NoData)
        ));
    }

    #[test]
    fn report_rows_mirror_the_csv_layout() {
        let doc = report_document(&records(), Utc::now()).unwrap();
        assert_eq!(doc.title, REPORT_TITLE);
        assert_eq!(doc.columns.len(), 10);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0][1], "MSKU1");
        assert_eq!(doc.rows[0][9], "ENTREGUE");
    }
}
