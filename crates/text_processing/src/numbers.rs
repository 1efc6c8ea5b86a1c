//! Locale-ambiguous number parsing and display formatting
//!
//! Amounts arrive written the Latin-American way, with either `.` or `,`
//! as the thousands separator and the other one as decimal mark. The
//! parser guesses which is which; the formatters always print `,` for
//! thousands and `.` for decimals.

/// Number-like substring as it appears after a label.
///
/// Grouped thousands (`1.500.000`, `2,000,000.50`) are tried first; a
/// plain digit run with an optional fraction covers everything else, so
/// `1000000` is captured whole.
pub const NUMBER_PATTERN: &str = r"\d{1,3}(?:[.,]\d{3})+(?:[.,]\d+)?|\d+(?:[.,]\d+)?";

/// Parse a numeric literal, auto-detecting the separator convention.
///
/// * Both `,` and `.` present: the later one is the decimal mark.
/// * Only one kind present: it is a thousands separator when the last group
///   has exactly three digits and the first group at most three, otherwise
///   a decimal mark.
///
/// Three-digit tails are inherently ambiguous (`1,234` is read as 1234).
pub fn parse_number(raw: &str) -> Option<f64> {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return None;
    }

    let has_comma = compact.contains(',');
    let has_dot = compact.contains('.');

    let cleaned = match (has_comma, has_dot) {
        (true, true) => {
            let last_comma = compact.rfind(',').unwrap_or(0);
            let last_dot = compact.rfind('.').unwrap_or(0);
            let (decimal, thousands) = if last_comma > last_dot {
                (',', '.')
            } else {
                ('.', ',')
            };
            compact
                .chars()
                .filter(|c| *c != thousands)
                .map(|c| if c == decimal { '.' } else { c })
                .collect()
        }
        (true, false) => {
            if is_thousands_grouping(&compact, ',') {
                compact.replace(',', "")
            } else {
                compact.replace(',', ".")
            }
        }
        (false, true) => {
            if is_thousands_grouping(&compact, '.') {
                compact.replace('.', "")
            } else {
                compact
            }
        }
        (false, false) => compact,
    };

    cleaned.parse::<f64>().ok()
}

fn is_thousands_grouping(raw: &str, separator: char) -> bool {
    let first = raw.split(separator).next().unwrap_or_default();
    let last = raw.rsplit(separator).next().unwrap_or_default();
    last.len() == 3 && first.len() <= 3
}

/// `$1,666,667`; the sign follows the dollar, `$-500,000`.
pub fn format_currency(value: f64) -> String {
    let body = group_thousands(value.abs(), 0);
    if value < 0.0 && body != "0" {
        format!("$-{}", body)
    } else {
        format!("${}", body)
    }
}

/// Two decimal places, e.g. `1.33`.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fraction as a percentage with one decimal, e.g. `0.4` -> `40.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Quantity with thousands grouping and one decimal, e.g. `1,666.7`.
pub fn format_units(value: f64) -> String {
    let body = group_thousands(value.abs(), 1);
    if value < 0.0 && body != "0.0" {
        format!("-{}", body)
    } else {
        body
    }
}

/// Round a non-negative value to `decimals` places and insert `,` every
/// three integer digits.
fn group_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_separator() {
        assert_eq!(parse_number("1.234"), Some(1234.0));
        assert_eq!(parse_number("1,234"), Some(1234.0));
        assert_eq!(parse_number("1234,56"), Some(1234.56));
        assert_eq!(parse_number("1234.56"), Some(1234.56));
    }

    #[test]
    fn test_parse_mixed_separators() {
        assert_eq!(parse_number("1.234.567,89"), Some(1234567.89));
        assert_eq!(parse_number("1,234,567.89"), Some(1234567.89));
        assert_eq!(parse_number("2.000.000"), Some(2000000.0));
    }

    #[test]
    fn test_parse_plain_and_spaces() {
        assert_eq!(parse_number("1000000"), Some(1000000.0));
        assert_eq!(parse_number("1 000"), Some(1000.0));
        assert_eq!(parse_number("0,5"), Some(0.5));
    }

    #[test]
    fn test_parse_failures_are_absent() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        // Repeated decimal marks do not form a number
        assert_eq!(parse_number("1,23,4"), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1666666.67), "$1,666,667");
        assert_eq!(format_currency(500000.0), "$500,000");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-500000.0), "$-500,000");
        assert_eq!(format_currency(-1234.6), "$-1,235");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn test_format_ratio_and_percent() {
        assert_eq!(format_ratio(4.0 / 3.0), "1.33");
        assert_eq!(format_ratio(0.0), "0.00");
        assert_eq!(format_percent(0.4), "40.0%");
        assert_eq!(format_percent(0.125), "12.5%");
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(1_000_000.0 / 6_000.0), "166.7");
        assert_eq!(format_units(1666.66), "1,666.7");
        assert_eq!(format_units(1234567.0), "1,234,567.0");
    }
}
