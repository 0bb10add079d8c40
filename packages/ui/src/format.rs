//! # Formatting helpers
//!
//! Currency, dates, phone numbers and CSV export. Everything here works on
//! plain strings and numbers so it runs identically on WASM and on the
//! server renderer — timestamps arrive from the API as RFC 3339 strings and
//! are sliced, never parsed into a date type.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub use api::models::clean_phone;

/// Format a value in Brazilian reais: `1500.5` → `"R$ 1.500,50"`.
/// Thousands are separated with `.`, decimals with `,`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// `"2026-08-05T13:45:00+00:00"` → `"05/08/2026"`. Returns the input
/// unchanged when it is too short to be a timestamp.
pub fn format_date(rfc3339: &str) -> String {
    match (rfc3339.get(0..4), rfc3339.get(5..7), rfc3339.get(8..10)) {
        (Some(y), Some(m), Some(d)) => format!("{d}/{m}/{y}"),
        _ => rfc3339.to_string(),
    }
}

/// `"2026-08-05T13:45:00+00:00"` → `"05/08"`.
pub fn format_date_short(rfc3339: &str) -> String {
    match (rfc3339.get(5..7), rfc3339.get(8..10)) {
        (Some(m), Some(d)) => format!("{d}/{m}"),
        _ => rfc3339.to_string(),
    }
}

/// `"2026-08-05T13:45:00+00:00"` → `"05/08/2026 13:45"`.
pub fn format_datetime(rfc3339: &str) -> String {
    match (rfc3339.get(11..16), rfc3339.len() >= 16) {
        (Some(hm), true) => format!("{} {hm}", format_date(rfc3339)),
        _ => format_date(rfc3339),
    }
}

/// Format a stored phone for display: 13 digits (country + area + number)
/// become `(XX) XXXXX-XXXX`; anything else is returned as-is.
pub fn format_phone(phone: &str) -> String {
    let cleaned = clean_phone(phone);
    if cleaned.len() == 13 {
        format!("({}) {}-{}", &cleaned[2..4], &cleaned[4..9], &cleaned[9..])
    } else {
        phone.to_string()
    }
}

/// Build a `wa.me` link with the template placeholders filled in:
/// `{nome}` → lead name, `{vendedor}` → salesperson name.
pub fn whatsapp_link(phone: &str, message: &str, vendedor: &str, nome: &str) -> String {
    let personalized = message.replace("{nome}", nome).replace("{vendedor}", vendedor);
    let encoded = utf8_percent_encode(&personalized, NON_ALPHANUMERIC);
    format!("https://wa.me/{}?text={}", clean_phone(phone), encoded)
}

/// Quote a CSV field when it contains a comma or a quote, doubling embedded
/// quotes. Only the export path quotes; the importer does not unquote.
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render rows into CSV text with a header line.
pub fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = headers.join(",");
    for row in rows {
        out.push('\n');
        let escaped: Vec<String> = row.iter().map(|v| csv_escape(v)).collect();
        out.push_str(&escaped.join(","));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_uses_comma_decimals() {
        assert_eq!(format_currency(3500.0), "R$ 3.500,00");
        assert_eq!(format_currency(1500.5), "R$ 1.500,50");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(999.99), "R$ 999,99");
        assert_eq!(format_currency(1_234_567.89), "R$ 1.234.567,89");
        assert_eq!(format_currency(-42.5), "-R$ 42,50");
    }

    #[test]
    fn dates_render_brazilian_style() {
        assert_eq!(format_date("2026-08-05T13:45:00+00:00"), "05/08/2026");
        assert_eq!(format_date_short("2026-08-05T13:45:00Z"), "05/08");
        assert_eq!(format_datetime("2026-08-05T13:45:00Z"), "05/08/2026 13:45");
        assert_eq!(format_date("n/a"), "n/a");
    }

    #[test]
    fn phones_format_when_fully_qualified() {
        assert_eq!(format_phone("5511999998888"), "(11) 99999-8888");
        assert_eq!(format_phone("11999998888"), "11999998888");
    }

    #[test]
    fn whatsapp_link_fills_template_and_encodes() {
        let link = whatsapp_link(
            "+55 (11) 99999-8888",
            "Olá {nome}, aqui é {vendedor}!",
            "Vera",
            "Carlos",
        );
        assert!(link.starts_with("https://wa.me/5511999998888?text="));
        assert!(link.contains("Carlos"));
        assert!(link.contains("Vera"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn csv_escape_quotes_only_when_needed() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn to_csv_joins_headers_and_rows() {
        let csv = to_csv(
            &["Nome", "Empresa"],
            &[vec!["Ana".to_string(), "Acme, SA".to_string()]],
        );
        assert_eq!(csv, "Nome,Empresa\nAna,\"Acme, SA\"");
    }
}
