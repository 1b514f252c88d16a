use chrono::{DateTime, Utc};

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `45_200_000` -> `45.2M`.
pub fn compact_millions(value: u64) -> String {
    format!("{:.1}M", value as f64 / 1_000_000.0)
}

/// `892_000` -> `892K`.
pub fn compact_thousands(value: u64) -> String {
    format!("{:.0}K", value as f64 / 1_000.0)
}

/// Human age of `then` relative to `now`, e.g. `12s ago`.
pub fn relative_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    match seconds {
        s if s < 1 => "just now".to_string(),
        s if s < 60 => format!("{s}s ago"),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s => format!("{}d ago", s / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn compacts_large_counts() {
        assert_eq!(compact_millions(45_200_000), "45.2M");
        assert_eq!(compact_thousands(892_000), "892K");
    }

    #[test]
    fn ages_pick_the_coarsest_unit() {
        let now = Utc::now();
        assert_eq!(relative_age(now, now), "just now");
        assert_eq!(relative_age(now + Duration::seconds(4), now), "just now");
        assert_eq!(relative_age(now - Duration::seconds(12), now), "12s ago");
        assert_eq!(relative_age(now - Duration::seconds(125), now), "2m ago");
        assert_eq!(relative_age(now - Duration::hours(5), now), "5h ago");
        assert_eq!(relative_age(now - Duration::days(3), now), "3d ago");
    }
}
