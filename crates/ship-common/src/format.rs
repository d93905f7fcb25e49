//! Text formatting for report output.

/// Renders a value with thousands separators and exactly two decimals.
///
/// # Examples
///
/// ```
/// use ship_common::format_grouped;
///
/// assert_eq!(format_grouped(1234567.891), "1,234,567.89");
/// assert_eq!(format_grouped(-5.0), "-5.00");
/// ```
pub fn format_grouped(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}

/// Renders a currency amount with a `$` prefix, grouping and two decimals.
///
/// # Examples
///
/// ```
/// use ship_common::format_currency;
///
/// assert_eq!(format_currency(70.7), "$70.70");
/// assert_eq!(format_currency(12500.0), "$12,500.00");
/// assert_eq!(format_currency(-3.5), "-$3.50");
/// ```
pub fn format_currency(value: f64) -> String {
    let grouped = format_grouped(value);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${grouped}"),
    }
}

/// Renders a percentage with exactly one decimal digit (no `%` sign).
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Title-cases text: the first letter of every run of letters is uppercased
/// and the rest lowercased.
///
/// # Examples
///
/// ```
/// use ship_common::title_case;
///
/// assert_eq!(title_case("new york"), "New York");
/// assert_eq!(title_case("FEDEX ground"), "Fedex Ground");
/// assert_eq!(title_case("o'hare"), "O'Hare");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// Abbreviations kept uppercase in display names.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("Id", "ID"),
    ("Eta", "ETA"),
    ("Kg", "KG"),
    ("Lb", "LB"),
    ("Lbs", "LBS"),
    ("Usd", "USD"),
    ("Api", "API"),
    ("Url", "URL"),
    ("Sms", "SMS"),
    ("Gps", "GPS"),
];

/// Converts a column name to a human-readable label.
///
/// # Examples
///
/// ```
/// use ship_common::display_name;
///
/// assert_eq!(display_name("shipment_id"), "Shipment ID");
/// assert_eq!(display_name("weight-kg"), "Weight KG");
/// ```
pub fn display_name(column: &str) -> String {
    let spaced = column.replace(['_', '-'], " ");
    title_case(spaced.trim())
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(from, _)| *from == word)
                .map_or_else(|| word.to_string(), |(_, to)| (*to).to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_rounds_to_cents() {
        assert_eq!(format_currency(25.5), "$25.50");
        assert_eq!(format_currency(35.35), "$35.35");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(format_grouped(999.0), "999.00");
        assert_eq!(format_grouped(1000.0), "1,000.00");
        assert_eq!(format_grouped(100000.0), "100,000.00");
    }

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(format_percent(50.0), "50.0");
        assert_eq!(format_percent(100.0 / 3.0), "33.3");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        let once = title_case("  los ANGELES ");
        assert_eq!(once, "  Los Angeles ");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn test_display_name_abbreviations() {
        assert_eq!(display_name("eta"), "ETA");
        assert_eq!(display_name("cost_usd"), "Cost USD");
        assert_eq!(display_name("Origin City"), "Origin City");
    }
}
