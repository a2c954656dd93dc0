//! Display helpers shared by the views.

use chrono::{DateTime, Local};

/// Backend timestamp (RFC 3339) in local time, or the raw text if unparsable.
pub fn datetime(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

pub fn optional_datetime(raw: Option<&str>) -> String {
    raw.map(datetime).unwrap_or_else(|| "-".to_string())
}

pub fn price_per_hour(price: Option<f64>) -> String {
    match price {
        Some(p) => format!("Bs {p:.2} / h"),
        None => "Price not set".to_string(),
    }
}

pub fn rating(avg: Option<f64>, count: Option<u32>) -> String {
    match (avg, count.unwrap_or(0)) {
        (Some(avg), n) if n > 0 => format!("{avg:.1} ★ ({n} reviews)"),
        (Some(avg), _) => format!("{avg:.1} ★"),
        (None, _) => "No reviews yet".to_string(),
    }
}

pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn distance(km: Option<f64>) -> String {
    match km {
        Some(km) if km < 1.0 => format!("{:.0} m", km * 1000.0),
        Some(km) => format!("{km:.1} km"),
        None => "-".to_string(),
    }
}

pub fn coordinates(lat: f64, lng: f64) -> String {
    format!("{lat:.5}, {lng:.5}")
}

pub fn duration_minutes(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m >= 60 && m % 60 == 0 => format!("{} h", m / 60),
        Some(m) if m >= 60 => format!("{} h {} min", m / 60, m % 60),
        Some(m) => format!("{m} min"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_datetime_is_shown_raw() {
        assert_eq!(datetime("tomorrow"), "tomorrow");
        assert_eq!(optional_datetime(None), "-");
        assert_eq!(datetime("2024-01-01T10:00:00Z").len(), 16);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(price_per_hour(Some(25.0)), "Bs 25.00 / h");
        assert_eq!(rating(Some(4.66), Some(3)), "4.7 ★ (3 reviews)");
        assert_eq!(rating(None, None), "No reviews yet");
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(distance(Some(0.8)), "800 m");
        assert_eq!(distance(Some(2.34)), "2.3 km");
        assert_eq!(duration_minutes(Some(90)), "1 h 30 min");
        assert_eq!(duration_minutes(Some(120)), "2 h");
    }
}
