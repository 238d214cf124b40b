//! Rounding, unit conversion and label helpers.

/// Milliseconds in a minute.
pub const MS_PER_MINUTE: f64 = 60_000.0;
/// Milliseconds in an hour.
pub const MS_PER_HOUR: f64 = 3_600_000.0;
/// Milliseconds in a day.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Rounds to `decimals` places.
///
/// Rounds the exact binary value of `value`, so 0.05 (stored a little above
/// 0.05) becomes 0.1. Values exactly halfway go to even.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    // Fixed-precision formatting rounds the exact value, unlike scaling by 10^n.
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Rounds to the nearest integer, ties to even.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Whole minutes in `ms`.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn ms_to_minutes(ms: u64) -> u64 {
    round_whole(ms as f64 / MS_PER_MINUTE).max(0) as u64
}

/// Hours in `ms`, one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn ms_to_hours(ms: u64) -> f64 {
    round_to(ms as f64 / MS_PER_HOUR, 1)
}

/// Days in `ms`, one decimal.
#[allow(clippy::cast_precision_loss)]
pub fn ms_to_days(ms: u64) -> f64 {
    round_to(ms as f64 / MS_PER_DAY, 1)
}

/// `part / whole` as an integer percentage, 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: u64, whole: u64) -> i64 {
    if whole == 0 {
        return 0;
    }
    round_whole(part as f64 / whole as f64 * 100.0)
}

/// Formats a count with thousands separators: `12345` becomes `12,345`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Truncates a label to at most `max_chars` characters with an ellipsis.
pub fn truncate_label(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_whole(0.5), 0);
        assert_eq!(round_whole(1.5), 2);
        assert_eq!(round_whole(2.5), 2);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(1.23456, 2), 1.23);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // 0.05 and 0.15 are stored slightly above and below their decimal text.
        assert_eq!(round_to(0.05, 1), 0.1);
        assert_eq!(round_to(0.15, 1), 0.1);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(-0.05, 1), -0.1);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(ms_to_minutes(90_000), 2); // 1.5 rounds to 2
        assert_eq!(ms_to_minutes(150_000), 2); // 2.5 rounds to 2
        assert_eq!(ms_to_hours(5_400_000), 1.5);
        assert_eq!(ms_to_hours(180_000), 0.1); // 0.05 h
        assert_eq!(ms_to_hours(540_000), 0.1); // 0.15 h
        assert_eq!(ms_to_days(129_600_000), 1.5);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short", 20), "Short");
        assert_eq!(truncate_label("Canción muy larga", 8), "Canción…");
    }
}
