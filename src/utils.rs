use chrono::{Datelike, NaiveDate};

/// `125` -> `"2h 5m"`. Missing or zero runtimes render as an empty string.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => String::new(),
    }
}

/// One decimal place, halves rounded away from zero. A missing or zero
/// average reads as `"N/A"`.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r != 0.0 && r.is_finite() => format!("{:.1}", (r * 10.0).round() / 10.0),
        _ => "N/A".to_string(),
    }
}

/// Year of a `YYYY-MM-DD` release date, or an empty string.
pub fn format_year(date: Option<&str>) -> String {
    date.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}

/// Fallback used wherever an overview is missing or blank.
pub fn overview_or_default(overview: Option<&str>) -> &str {
    match overview {
        Some(o) if !o.trim().is_empty() => o,
        _ => "No overview available.",
    }
}
