use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

pub fn format_price(value: f64) -> String {
    if value >= 1000.0 {
        format!("${}", format_compact(value))
    } else if value >= 1.0 {
        format!("${value:.2}")
    } else {
        format!("${value:.6}")
    }
}

pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.2}B", value / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{value:.2}")
    }
}

pub fn format_percent(value: f32) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        for symbol in ["BTC", "ETH", "DOGE", "a-very-long-symbol-name"] {
            let first = stable_pair(symbol);
            let second = stable_pair(symbol);
            assert_eq!(first, second);
            assert!((-1.0..=1.0).contains(&first.0));
            assert!((-1.0..=1.0).contains(&first.1));
        }
    }

    #[test]
    fn compact_formatting_picks_suffixes() {
        assert_eq!(format_compact(12.3), "12.30");
        assert_eq!(format_compact(4_560.0), "4.56K");
        assert_eq!(format_compact(7_890_000.0), "7.89M");
        assert_eq!(format_compact(1_200_000_000.0), "1.20B");
    }

    #[test]
    fn percent_formatting_keeps_sign() {
        assert_eq!(format_percent(3.25), "+3.25%");
        assert_eq!(format_percent(-1.5), "-1.50%");
    }
}
