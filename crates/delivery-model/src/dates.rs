use chrono::{DateTime, NaiveDate};

/// Days between the spreadsheet serial epoch (1899-12-30 in the 1900 date
/// system, as serialized by common exporters) and the Unix epoch.
pub const EXCEL_EPOCH_OFFSET_DAYS: f64 = 25_569.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// Convert a spreadsheet serial day count to a calendar date.
///
/// Serials below 1 have no meaningful date and return `None`. Fractional day
/// parts (the time-of-day component) are discarded: only the UTC Y/M/D of the
/// resulting instant survives, so the timezone of the serial's origin is
/// irrelevant. The day count is floored, not truncated, so pre-1970 serials
/// keep their calendar day as well.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = (serial - EXCEL_EPOCH_OFFSET_DAYS).floor() as i64;
    DateTime::from_timestamp(days * SECONDS_PER_DAY, 0).map(|dt| dt.date_naive())
}

/// Normalize a raw textual date into a calendar date.
///
/// Accepted forms, in order:
/// - slash- or dash-separated day/month/year (`"13/05/2024"`, `"13-05-24"`).
///   Two-digit years are shifted into the 2000s. When the middle component
///   exceeds 12 the first two components are swapped, reinterpreting a
///   month-first export as day-first.
/// - an all-digit string, treated as a spreadsheet serial.
///
/// Everything else (including the empty string and impossible calendar
/// dates such as `"31/02/2024"`) is `None`. The function is total: no input
/// panics.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }

    if cleaned.contains('/') || cleaned.contains('-') {
        let parts: Vec<&str> = cleaned.split(['/', '-']).collect();
        if parts.len() != 3 {
            return None;
        }
        let mut day: i32 = parts[0].trim().parse().ok()?;
        let mut month: i32 = parts[1].trim().parse().ok()?;
        let mut year: i32 = parts[2].trim().parse().ok()?;
        if year < 100 {
            year += 2000;
        }
        if month > 12 {
            std::mem::swap(&mut day, &mut month);
        }
        return NaiveDate::from_ymd_opt(year, month as u32, day as u32);
    }

    if cleaned.bytes().all(|b| b.is_ascii_digit()) {
        let serial: i64 = cleaned.parse().ok()?;
        return excel_serial_to_date(serial as f64);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn serial_one_is_last_day_of_1899() {
        assert_eq!(excel_serial_to_date(1.0), Some(ymd(1899, 12, 31)));
    }

    #[test]
    fn serials_below_one_are_unset() {
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(0.5), None);
        assert_eq!(excel_serial_to_date(-3.0), None);
        assert_eq!(excel_serial_to_date(f64::NAN), None);
    }

    #[test]
    fn serial_epoch_offset_lands_on_unix_epoch() {
        assert_eq!(excel_serial_to_date(25_569.0), Some(ymd(1970, 1, 1)));
        assert_eq!(excel_serial_to_date(45_292.0), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn fractional_day_component_is_discarded() {
        assert_eq!(excel_serial_to_date(45_292.75), Some(ymd(2024, 1, 1)));
    }

    #[test]
    fn pre_1970_serials_floor_toward_the_start_of_the_day() {
        // Truncation toward zero would land this on 1900-01-01.
        assert_eq!(excel_serial_to_date(1.99999), Some(ymd(1899, 12, 31)));
        assert_eq!(excel_serial_to_date(1.5), Some(ymd(1899, 12, 31)));
        assert_eq!(excel_serial_to_date(2.0), Some(ymd(1900, 1, 1)));
    }

    #[test]
    fn day_first_strings_parse_directly() {
        assert_eq!(normalize_date("13/05/2024"), Some(ymd(2024, 5, 13)));
        assert_eq!(normalize_date("01-02-2024"), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn month_first_strings_are_reinterpreted_when_middle_exceeds_twelve() {
        // "05/13/2024" cannot be day=5 month=13, so the components swap.
        assert_eq!(normalize_date("05/13/2024"), Some(ymd(2024, 5, 13)));
    }

    #[test]
    fn two_digit_years_shift_into_the_2000s() {
        assert_eq!(normalize_date("13/05/24"), Some(ymd(2024, 5, 13)));
    }

    #[test]
    fn digit_strings_fall_through_to_serial_handling() {
        assert_eq!(normalize_date("45292"), Some(ymd(2024, 1, 1)));
        assert_eq!(normalize_date("0"), None);
    }

    #[test]
    fn garbage_is_unset_not_an_error() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("TBD"), None);
        assert_eq!(normalize_date("31/02/2024"), None);
        assert_eq!(normalize_date("1/2"), None);
        assert_eq!(normalize_date("a/b/c"), None);
        assert_eq!(normalize_date("-5"), None);
    }
}
