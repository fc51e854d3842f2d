/// Sheet-name tokens that mark a delivery schedule, in English and
/// Portuguese as they occur in the field. Matching is case-insensitive
/// substring containment.
pub const SHEET_KEYWORDS: [&str; 16] = [
    "DELIVERY",
    "SCHEDULE",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
    "SEGUNDA",
    "TERÇA",
    "QUARTA",
    "QUINTA",
    "SEXTA",
    "SÁBADO",
    "DOMINGO",
];

/// Pick the schedule sheet out of a workbook's sheet names.
///
/// The first name containing any keyword wins; otherwise the first sheet is
/// used. `None` only when the workbook has no sheets at all.
pub fn select_delivery_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| {
            let upper = name.to_uppercase();
            SHEET_KEYWORDS.iter().any(|key| upper.contains(key))
        })
        .or_else(|| names.first())
        .map(String::as_str)
}

/// [`select_delivery_sheet`] over decoded grids rather than bare names.
pub fn select_delivery_grid(sheets: &[crate::SheetGrid]) -> Option<&crate::SheetGrid> {
    let names: Vec<String> = sheets.iter().map(|s| s.name.clone()).collect();
    let name = select_delivery_sheet(&names)?;
    sheets.iter().find(|s| s.name == name)
}
