//! Display formatting for durations, xp, and levels.

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Format seconds as `"{d}d {h}h {m}m {s}s"`
///
/// Each field is a floor division of the remainder left by the previous one,
/// truncated to an integer.
pub fn format_time(seconds: f64) -> String {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let remainder = seconds.rem_euclid(SECONDS_PER_DAY);
    let hours = remainder.div_euclid(SECONDS_PER_HOUR);
    let remainder = remainder.rem_euclid(SECONDS_PER_HOUR);
    let minutes = remainder.div_euclid(SECONDS_PER_MINUTE);
    let remainder = remainder.rem_euclid(SECONDS_PER_MINUTE);

    format!(
        "{}d {}h {}m {}s",
        days as i64, hours as i64, minutes as i64, remainder as i64
    )
}

/// Experience is shown without decimals
pub fn format_xp(xp: u64) -> String {
    xp.to_string()
}

/// Levels are shown with two decimals, e.g. `"10.00"`
pub fn format_level(level: u32) -> String {
    format!("{:.2}", f64::from(level))
}
