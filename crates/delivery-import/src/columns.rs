use delivery_model::RecordField;

use crate::{Cell, SheetGrid};

/// Header row assumed when no anchor column name is found and the grid is
/// long enough. Real exports bury the header under seven rows of title and
/// legend blocks; shorter grids fall back to row 0.
pub const HEADER_FALLBACK_ROW: usize = 7;

/// Column names that anchor the header row. A row containing either of
/// these (upper-cased, trimmed) is the header.
const ANCHOR_COLUMNS: [&str; 2] = ["CONTAINER", "DELIVERY AT BYD"];

/// Locate the header row. Never fails: a grid without anchors gets the
/// positional fallback row.
pub fn find_header_row(grid: &SheetGrid) -> usize {
    for (index, row) in grid.rows.iter().enumerate() {
        let found = row
            .iter()
            .any(|cell| ANCHOR_COLUMNS.contains(&cell.header_token().as_str()));
        if found {
            return index;
        }
    }
    if grid.rows.len() > HEADER_FALLBACK_ROW {
        HEADER_FALLBACK_ROW
    } else {
        0
    }
}

/// Field-to-column mapping for one sheet.
///
/// Built from the header row by name, with fixed positional fallbacks for
/// fields the export is known to keep at stable positions. A fallback hit on
/// a reordered sheet silently reads the wrong column; that is the accepted
/// price of loading header-less exports at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    delivery_date: Option<usize>,
    container: Option<usize>,
    bill_of_lading: Option<usize>,
    vessel: Option<usize>,
    carrier: Option<usize>,
    warehouse: Option<usize>,
    lot: Option<usize>,
    material_type: Option<usize>,
    notes: Option<usize>,
    status: Option<usize>,
}

impl ColumnMap {
    /// Build the map from the header row at `header_row`.
    pub fn from_header(grid: &SheetGrid, header_row: usize) -> Self {
        let headers: Vec<String> = grid
            .rows
            .get(header_row)
            .map(|row| row.iter().map(Cell::header_token).collect())
            .unwrap_or_default();

        let by_name = |name: &str| headers.iter().position(|h| h == name);

        let mut map = Self::default();
        for field in RecordField::ALL {
            let found = by_name(field.header()).or(Self::positional_fallback(field));
            map.set(field, found);
        }
        map
    }

    /// Hard-coded column positions used when the name lookup misses.
    /// Fields without an entry simply read as empty.
    fn positional_fallback(field: RecordField) -> Option<usize> {
        match field {
            RecordField::DeliveryDate => Some(0),
            RecordField::Carrier => Some(3),
            RecordField::Container => Some(10),
            RecordField::BillOfLading => Some(11),
            RecordField::Vessel => Some(12),
            RecordField::Warehouse => Some(13),
            RecordField::Lot => Some(18),
            RecordField::MaterialType | RecordField::Notes | RecordField::Status => None,
        }
    }

    pub fn column(&self, field: RecordField) -> Option<usize> {
        match field {
            RecordField::DeliveryDate => self.delivery_date,
            RecordField::Container => self.container,
            RecordField::BillOfLading => self.bill_of_lading,
            RecordField::Vessel => self.vessel,
            RecordField::Carrier => self.carrier,
            RecordField::Warehouse => self.warehouse,
            RecordField::Lot => self.lot,
            RecordField::MaterialType => self.material_type,
            RecordField::Notes => self.notes,
            RecordField::Status => self.status,
        }
    }

    fn set(&mut self, field: RecordField, index: Option<usize>) {
        match field {
            RecordField::DeliveryDate => self.delivery_date = index,
            RecordField::Container => self.container = index,
            RecordField::BillOfLading => self.bill_of_lading = index,
            RecordField::Vessel => self.vessel = index,
            RecordField::Carrier => self.carrier = index,
            RecordField::Warehouse => self.warehouse = index,
            RecordField::Lot => self.lot = index,
            RecordField::MaterialType => self.material_type = index,
            RecordField::Notes => self.notes = index,
            RecordField::Status => self.status = index,
        }
    }

    /// Cell for `field` within `row`, empty when the field has no column.
    pub fn cell<'a>(&self, grid: &'a SheetGrid, row: usize, field: RecordField) -> &'a Cell {
        const EMPTY: &Cell = &Cell::Empty;
        match self.column(field) {
            Some(col) => grid.cell(row, col),
            None => EMPTY,
        }
    }
}
