use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{normalize_date, DeliveryStatus};

/// Stable ordinal identity of a record within one loaded dataset.
///
/// Ids are assigned by the record builder in kept-row order. They survive
/// re-filtering and re-sorting of the same dataset but are reassigned whenever
/// a new file is loaded, so they must never be persisted across loads.
pub type RecordId = u32;

/// A delivery date as it appeared in the source plus its normalized form.
///
/// The raw text is kept verbatim because it doubles as the grouping key when
/// normalization fails, and because exports must reproduce the source value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateField {
    #[serde(default)]
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl DateField {
    pub fn new(raw: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            raw: raw.into(),
            date,
        }
    }

    /// Build from raw text, deriving the normalized date.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let date = normalize_date(&raw);
        Self { raw, date }
    }
}

/// The editable fields of a [`DeliveryRecord`], in export column order.
///
/// The internal id is deliberately not represented here: it is not a document
/// field and never appears in exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    DeliveryDate,
    Container,
    BillOfLading,
    Vessel,
    Carrier,
    Warehouse,
    Lot,
    MaterialType,
    Notes,
    Status,
}

impl RecordField {
    /// All fields in declaration (= export column) order.
    pub const ALL: [RecordField; 10] = [
        RecordField::DeliveryDate,
        RecordField::Container,
        RecordField::BillOfLading,
        RecordField::Vessel,
        RecordField::Carrier,
        RecordField::Warehouse,
        RecordField::Lot,
        RecordField::MaterialType,
        RecordField::Notes,
        RecordField::Status,
    ];

    /// Source-document column header for this field.
    pub fn header(self) -> &'static str {
        match self {
            RecordField::DeliveryDate => "DELIVERY AT BYD",
            RecordField::Container => "CONTAINER",
            RecordField::BillOfLading => "BL",
            RecordField::Vessel => "VESSEL",
            RecordField::Carrier => "TRANSPORTATION COMPANY",
            RecordField::Warehouse => "BONDED WAREHOUSE",
            RecordField::Lot => "LOT",
            RecordField::MaterialType => "TYPE OF MATERIAL",
            RecordField::Notes => "NOTES",
            RecordField::Status => "STATUS",
        }
    }
}

/// One row of the delivery schedule in canonical form.
///
/// Every expected field is present (possibly empty); a record only exists at
/// all if it carried a container id or a bill of lading at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    pub id: RecordId,
    #[serde(default)]
    pub delivery_date: DateField,
    #[serde(default)]
    pub container_id: String,
    #[serde(default)]
    pub bill_of_lading: String,
    #[serde(default)]
    pub vessel: String,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub warehouse: String,
    #[serde(default)]
    pub lot: String,
    #[serde(default)]
    pub material_type: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: DeliveryStatus,
}

impl DeliveryRecord {
    /// Keep rule: a row is a real record only if it identifies a shipment.
    pub fn has_identity(&self) -> bool {
        !self.container_id.trim().is_empty() || !self.bill_of_lading.trim().is_empty()
    }

    /// Human-facing identifier used in confirmation prompts and notices:
    /// the container id, falling back to the bill of lading.
    pub fn display_label(&self) -> &str {
        if self.container_id.trim().is_empty() {
            &self.bill_of_lading
        } else {
            &self.container_id
        }
    }

    /// String form of a field as it appears in exports and search.
    pub fn field_text(&self, field: RecordField) -> &str {
        match field {
            RecordField::DeliveryDate => &self.delivery_date.raw,
            RecordField::Container => &self.container_id,
            RecordField::BillOfLading => &self.bill_of_lading,
            RecordField::Vessel => &self.vessel,
            RecordField::Carrier => &self.carrier,
            RecordField::Warehouse => &self.warehouse,
            RecordField::Lot => &self.lot,
            RecordField::MaterialType => &self.material_type,
            RecordField::Notes => &self.notes,
            RecordField::Status => self.status.token(),
        }
    }

    /// Set a free-text field. [`RecordField::Status`] is not assignable here:
    /// status changes go through the confirmation-gated status machine.
    ///
    /// Editing the delivery date re-derives its normalized form.
    pub fn set_field_text(&mut self, field: RecordField, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            RecordField::DeliveryDate => self.delivery_date = DateField::from_raw(value),
            RecordField::Container => self.container_id = value,
            RecordField::BillOfLading => self.bill_of_lading = value,
            RecordField::Vessel => self.vessel = value,
            RecordField::Carrier => self.carrier = value,
            RecordField::Warehouse => self.warehouse = value,
            RecordField::Lot => self.lot = value,
            RecordField::MaterialType => self.material_type = value,
            RecordField::Notes => self.notes = value,
            RecordField::Status => return false,
        }
        true
    }

    /// True when any field's string form contains `needle` case-insensitively.
    ///
    /// `needle` must already be lower-cased by the caller (the filter layer
    /// lower-cases the query once instead of per record).
    pub fn matches_query(&self, needle: &str) -> bool {
        RecordField::ALL
            .iter()
            .any(|&f| self.field_text(f).to_lowercase().contains(needle))
    }
}
