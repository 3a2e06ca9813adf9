use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Numeric parse
// ---------------------------------------------------------------------------

/// Parse a numeric literal that spans the whole of `s` (surrounding
/// whitespace allowed): `"42"`, `" -3.5 "`, `"1e3"`, `".5"`.
///
/// Accepts decimal literals and `Infinity` only; `"inf"`, `"NaN"`, `"0x10"`
/// and strings with trailing text such as `"12kg"` or `"2023-01-01"` fail.
pub fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    let (value, consumed) = scan_float(t)?;
    (consumed == t.len()).then_some(value)
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace and
/// anything after the number: `"12.5kg"` → `12.5`, `"2023-01-01"` → `2023`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    scan_float(s.trim_start()).map(|(value, _)| value)
}

/// Scan the longest numeric prefix of `t`, returning its value and length.
fn scan_float(t: &str) -> Option<(f64, usize)> {
    let bytes = t.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if t[end..].starts_with("Infinity") {
        let sign = if bytes[0] == b'-' { -1.0 } else { 1.0 };
        return Some((sign * f64::INFINITY, end + "Infinity".len()));
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value = t[..end].parse::<f64>().ok()?;
    Some((value, end))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Finite numeric reading of a cell, if it has one. Text cells are read by
/// their numeric prefix.
pub fn numeric_value(cell: &CellValue) -> Option<f64> {
    let v = match cell {
        CellValue::Number(v) => *v,
        CellValue::Text(s) => parse_leading_float(s)?,
        CellValue::Null => return None,
    };
    v.is_finite().then_some(v)
}

// ---------------------------------------------------------------------------
// Date detection
// ---------------------------------------------------------------------------

/// Largest representable timestamp, in milliseconds either side of the epoch.
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Whether a cell reads as a calendar date or timestamp.
///
/// Numbers are taken as epoch milliseconds.
pub fn is_date(cell: &CellValue) -> bool {
    match cell {
        CellValue::Number(v) => v.is_finite() && v.abs() <= MAX_TIMESTAMP_MS,
        CellValue::Text(s) => parses_as_date(s.trim()),
        CellValue::Null => false,
    }
}

fn parses_as_date(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }
    if DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }
    // Year-month only, e.g. "2023-04".
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_literals_are_parsed() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("  -3.5 "), Some(-3.5));
        assert_eq!(parse_number("+1e3"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("7."), Some(7.0));
    }

    #[test]
    fn partial_or_non_numeric_text_fails() {
        for s in ["abc", "", ".", "-", "NaN", "inf", "12kg", "1e", "2023-01-01", "0x10"] {
            assert_eq!(parse_number(s), None, "{s}");
        }
    }

    #[test]
    fn infinity_parses_but_is_not_numeric() {
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(numeric_value(&CellValue::Text("Infinity".into())), None);
        assert_eq!(numeric_value(&CellValue::Number(f64::NAN)), None);
        assert_eq!(numeric_value(&CellValue::Null), None);
        assert_eq!(numeric_value(&CellValue::Number(3.0)), Some(3.0));
        assert_eq!(numeric_value(&CellValue::Text(" 4.25".into())), Some(4.25));
    }

    #[test]
    fn cells_are_read_by_numeric_prefix() {
        assert_eq!(parse_leading_float("  12.5kg"), Some(12.5));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("2023-01-01"), Some(2023.0));
        assert_eq!(parse_leading_float("kg12"), None);
        assert_eq!(numeric_value(&CellValue::Text("30kg".into())), Some(30.0));
        assert_eq!(numeric_value(&CellValue::Text("2019-01-01".into())), Some(2019.0));
        assert_eq!(numeric_value(&CellValue::Text("-Infinity and more".into())), None);
        assert_eq!(numeric_value(&CellValue::Text("n/a".into())), None);
    }

    #[test]
    fn common_date_shapes_are_detected() {
        for s in [
            "2023-01-01",
            "2023/02/15",
            "03/15/2023",
            "2023-01-01T10:30:00Z",
            "2023-01-01 10:30:00",
            "2023-04",
            "Tue, 1 Jul 2003 10:52:37 +0200",
            "Mar 5, 2021",
        ] {
            assert!(is_date(&CellValue::Text(s.into())), "{s}");
        }
    }

    #[test]
    fn non_dates_are_rejected() {
        assert!(!is_date(&CellValue::Text("apple".into())));
        assert!(!is_date(&CellValue::Text("2023-13-45".into())));
        assert!(!is_date(&CellValue::Null));
        assert!(is_date(&CellValue::Number(1_700_000_000_000.0)));
    }
}
