//! Parsing of human-friendly durations such as `7d` or `15m`.

/// Upper bound for any configured duration: ten years.
pub const MAX_DURATION_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Parse `3600`, `30s`, `15m`, `1h`, `7d` or `1w` into seconds.
///
/// A bare number is taken as seconds. Zero and anything above
/// [`MAX_DURATION_SECS`] are rejected.
pub fn parse_duration_secs(input: &str) -> Result<i64, String> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, unit) = input.split_at(split);

    if digits.is_empty() {
        return Err("expected a number optionally followed by s, m, h, d or w".to_string());
    }

    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", digits))?;

    let multiplier = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        "w" => 7 * 24 * 60 * 60,
        other => return Err(format!("unknown unit '{}'", other)),
    };

    match amount.checked_mul(multiplier) {
        Some(0) => Err("duration must be greater than zero".to_string()),
        Some(secs) if secs <= MAX_DURATION_SECS => Ok(secs),
        _ => Err("duration must not exceed 10 years".to_string()),
    }
}
