//! Monetary literals: parsing user-typed amounts and rendering them back.
//!
//! Amounts are whole Rupiah in practice. Separators are not interpreted, so
//! `5.000.000` (Indonesian) and `5,000,000` (English) both mean five million.

/// Parse an amount, reporting whether the literal was actually numeric.
///
/// `.` and `,` are stripped before parsing. Non-finite results (`inf`, `NaN`)
/// are treated as failures.
pub fn try_parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ','))
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an amount, falling back to `0.0` for anything unparseable.
///
/// Callers that must tell "zero" from "garbage" use [`try_parse_amount`].
pub fn parse_amount(raw: &str) -> f64 {
    try_parse_amount(raw).unwrap_or(0.0)
}

/// Format a value as a whole number with `,` thousands separators.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Rp 1,250,000`
pub fn rupiah(value: f64) -> String {
    format!("Rp {}", format_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_are_ignored() {
        assert_eq!(parse_amount("5.000.000"), 5_000_000.0);
        assert_eq!(parse_amount("5,000,000"), 5_000_000.0);
        assert_eq!(parse_amount("1000000"), 1_000_000.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
    }

    #[test]
    fn test_try_parse_distinguishes_zero_from_failure() {
        assert_eq!(try_parse_amount("0"), Some(0.0));
        assert_eq!(try_parse_amount("invalid"), None);
        assert_eq!(try_parse_amount(" 50000 "), Some(50_000.0));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_000.0), "1,000");
        assert_eq!(format_amount(30_000_000.0), "30,000,000");
        assert_eq!(format_amount(999_999_999_999_999.0), "999,999,999,999,999");
        assert_eq!(format_amount(-1_500.0), "-1,500");
        assert_eq!(format_amount(937_500.4), "937,500");
        assert_eq!(format_amount(-0.4), "0");
    }

    #[test]
    fn test_format_amount_beyond_i64() {
        assert_eq!(format_amount(1e21), "1,000,000,000,000,000,000,000");
        let shown = format_amount(1e23);
        assert_eq!(shown.len(), 23 + 7);
        assert!(!shown.contains("9,223,372,036,854,775,807"));
        assert_eq!(parse_amount(&shown), 1e23);
    }

    #[test]
    fn test_rendered_amount_parses_back() {
        use crate::command::{Command, Entry};
        use crate::responder::render;

        let reply = render(&Command::Income(Entry::new(5_000_000.0, "gaji", "bonus")), None);
        let start = reply.find("Rp ").map(|i| i + 3).unwrap();
        let figure: String = reply[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ',')
            .collect();
        assert_eq!(figure, "5,000,000");
        assert_eq!(parse_amount(&figure), 5_000_000.0);
    }
}
