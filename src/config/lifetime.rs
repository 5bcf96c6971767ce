use std::time::Duration;

/// Parse a token lifetime such as `"7d"`, `"12h"`, `"90m"` or `"3600"`.
///
/// A bare number is read as seconds. Units: `ms`, `s`, `m`, `h`, `d`, `w`, `y`
/// plus their long forms (`days`, `hours`, ...). Zero is rejected.
pub fn parse_lifetime(raw: &str) -> Result<Duration, String> {
    let value = raw.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let amount: f64 = number
        .parse()
        .map_err(|_| format!("'{}' is not a duration", raw))?;

    let unit_millis: f64 = match unit.trim().to_ascii_lowercase().as_str() {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1_000.0,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000.0,
        "d" | "day" | "days" => 86_400_000.0,
        "w" | "week" | "weeks" => 604_800_000.0,
        "y" | "yr" | "yrs" | "year" | "years" => 31_557_600_000.0,
        other => return Err(format!("unknown duration unit '{}'", other)),
    };

    let millis = amount * unit_millis;
    if !millis.is_finite() || millis < 1_000.0 {
        return Err(format!("'{}' must be at least one second", raw));
    }

    Ok(Duration::from_millis(millis.round() as u64))
}
