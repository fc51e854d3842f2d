use delivery_model::{
    excel_serial_to_date, normalize_date, DateField, DeliveryRecord, RecordField, RecordId,
};
use thiserror::Error;

use crate::{find_header_row, Cell, ColumnMap, SheetGrid};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("the workbook contains no sheets")]
    NoSheets,
    #[error("the scheduling sheet is empty")]
    EmptySheet,
}

/// Workbook-level entry: pick the schedule sheet, then build its records.
pub fn build_from_workbook(
    sheets: &[SheetGrid],
) -> Result<(&SheetGrid, Vec<DeliveryRecord>), ImportError> {
    let sheet = crate::select_delivery_grid(sheets).ok_or(ImportError::NoSheets)?;
    let records = build_records(sheet)?;
    Ok((sheet, records))
}

/// Build the canonical record set from a decoded sheet.
///
/// Rows above and including the header are skipped; of the rest, only rows
/// with a container id or bill of lading survive (anything else is a blank or
/// separator row). Ids are ordinals over the kept rows.
///
/// The load is all-or-nothing: on [`ImportError::EmptySheet`] the caller
/// keeps its previous dataset untouched.
pub fn build_records(grid: &SheetGrid) -> Result<Vec<DeliveryRecord>, ImportError> {
    if grid.rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    let header_row = find_header_row(grid);
    let map = ColumnMap::from_header(grid, header_row);

    let mut records = Vec::new();
    for row in (header_row + 1)..grid.rows.len() {
        let identity_present = !map.cell(grid, row, RecordField::Container).is_empty()
            || !map.cell(grid, row, RecordField::BillOfLading).is_empty();
        if !identity_present {
            continue;
        }
        records.push(build_record(grid, &map, row, records.len() as RecordId));
    }

    if records.is_empty() {
        log::debug!(
            "sheet {:?}: no data rows below header row {}",
            grid.name,
            header_row
        );
        return Err(ImportError::EmptySheet);
    }
    Ok(records)
}

fn build_record(grid: &SheetGrid, map: &ColumnMap, row: usize, id: RecordId) -> DeliveryRecord {
    let text = |field: RecordField| map.cell(grid, row, field).text();

    DeliveryRecord {
        id,
        delivery_date: date_field(map.cell(grid, row, RecordField::DeliveryDate)),
        container_id: text(RecordField::Container),
        bill_of_lading: text(RecordField::BillOfLading),
        vessel: text(RecordField::Vessel),
        carrier: text(RecordField::Carrier),
        warehouse: text(RecordField::Warehouse),
        lot: text(RecordField::Lot),
        material_type: text(RecordField::MaterialType),
        notes: text(RecordField::Notes),
        status: delivery_model::DeliveryStatus::from_raw(&text(RecordField::Status)),
    }
}

/// Normalize a date cell, routing serial numbers through the epoch-offset
/// conversion so fractional serials are not lost to text parsing.
fn date_field(cell: &Cell) -> DateField {
    match cell {
        Cell::Number(serial) => DateField::new(cell.text(), excel_serial_to_date(*serial)),
        _ => {
            let raw = cell.text();
            let date = normalize_date(&raw);
            DateField::new(raw, date)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use delivery_model::DeliveryStatus;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    fn schedule_grid() -> SheetGrid {
        SheetGrid::new(
            "Delivery Monday",
            vec![
                row(&["Weekly delivery plan"]),
                row(&[
                    "DELIVERY AT BYD",
                    "CONTAINER",
                    "BL",
                    "STATUS",
                    "TRANSPORTATION COMPANY",
                ]),
                row(&["13/05/2024", "MSKU1", "BL1", "ENTREGUE", "Maersk"]),
                row(&["", "", "", "", ""]),
                row(&["14/05/2024", "", "BL2", "", "MSC"]),
            ],
        )
    }

    #[test]
    fn keeps_only_rows_with_identity_and_assigns_ordinal_ids() {
        let records = build_records(&schedule_grid()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].container_id, "MSKU1");
        assert_eq!(records[0].status, DeliveryStatus::Delivered);
        assert_eq!(
            records[0].delivery_date.date,
            NaiveDate::from_ymd_opt(2024, 5, 13)
        );
        // Second record survives on bill of lading alone, status defaults.
        assert_eq!(records[1].id, 1);
        assert_eq!(records[1].container_id, "");
        assert_eq!(records[1].bill_of_lading, "BL2");
        assert_eq!(records[1].status, DeliveryStatus::Pending);
    }

    #[test]
    fn serial_date_cells_are_decoded_numerically() {
        let grid = SheetGrid::new(
            "S",
            vec![
                row(&["DELIVERY AT BYD", "CONTAINER"]),
                vec![Cell::Number(45_292.75), Cell::from("MSKU9")],
            ],
        );
        let records = build_records(&grid).unwrap();
        assert_eq!(
            records[0].delivery_date.date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(records[0].delivery_date.raw, "45292.75");
    }

    #[test]
    fn rows_without_identity_yield_empty_sheet_error() {
        let grid = SheetGrid::new(
            "S",
            vec![row(&["DELIVERY AT BYD", "CONTAINER", "BL"]), row(&["15/05/2024", "", ""])],
        );
        assert!(matches!(build_records(&grid), Err(ImportError::EmptySheet)));
        assert!(matches!(
            build_records(&SheetGrid::default()),
            Err(ImportError::EmptySheet)
        ));
    }

    #[test]
    fn workbook_entry_picks_the_schedule_sheet() {
        let workbook = vec![
            SheetGrid::new("Summary", vec![row(&["totals"])]),
            schedule_grid(),
        ];
        let (sheet, records) = build_from_workbook(&workbook).unwrap();
        assert_eq!(sheet.name, "Delivery Monday");
        assert_eq!(records.len(), 2);

        assert!(matches!(
            build_from_workbook(&[]),
            Err(ImportError::NoSheets)
        ));
    }

    #[test]
    fn missing_bl_column_does_not_drop_container_rows() {
        // Only CONTAINER and STATUS are named; BL falls back to column 11,
        // which is out of range here and reads empty.
        let grid = SheetGrid::new(
            "S",
            vec![
                row(&["CONTAINER", "STATUS"]),
                row(&["A1", ""]),
                row(&["A2", "ENTREGUE"]),
            ],
        );
        let records = build_records(&grid).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, DeliveryStatus::Pending);
        assert_eq!(records[1].status, DeliveryStatus::Delivered);
    }
}
