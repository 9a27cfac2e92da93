//! Cell formatting for grids and the timeline.

use chrono::{DateTime, NaiveDate, Utc};

use crate::derived::parse_decimal;

/// `plug_and_abandon` → `Plug And Abandon`.
pub fn enum_label(value: &str) -> String {
    let spaced = value
        .split(['_', '-'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_lowercase();

    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

pub fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// USD with thousands separators and at most two fraction digits.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}

/// Format a decimal string as money; unparseable input is shown as is.
pub fn format_money_str(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(raw) => parse_decimal(raw)
            .map(format_money)
            .unwrap_or_else(|| raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn enum_labels_are_title_case() {
        assert_eq!(enum_label("plug_and_abandon"), "Plug And Abandon");
        assert_eq!(enum_label("rig-campaign"), "Rig Campaign");
        assert_eq!(enum_label("IN_PROGRESS"), "In Progress");
        assert_eq!(enum_label("uwild"), "Uwild");
        assert_eq!(enum_label(""), "");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(1_550_000.0), "$1,550,000");
        assert_eq!(format_money(999.0), "$999");
        assert_eq!(format_money(1234.5), "$1,234.5");
        assert_eq!(format_money(1234.567), "$1,234.57");
        assert_eq!(format_money(-42_000.0), "-$42,000");
        assert_eq!(format_money(0.0), "$0");
    }

    #[test]
    fn money_string_passes_through_garbage() {
        assert_eq!(format_money_str(Some("50000.00")), "$50,000");
        assert_eq!(format_money_str(Some("tbd")), "tbd");
        assert_eq!(format_money_str(None), "");
    }

    #[test]
    fn dates_render_iso() {
        assert_eq!(format_date("2024-01-15".parse().ok()), "2024-01-15");
        assert_eq!(format_date(None), "");
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 5, 0).unwrap();
        assert_eq!(format_datetime(Some(ts)), "2024-03-01 08:05");
    }
}
