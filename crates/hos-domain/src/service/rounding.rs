//! Quarter-hour rounding and interval helpers

/// Round to the nearest 0.25, ties to even.
pub fn round_to_quarter(x: f64) -> f64 {
    (x * 4.0).round_ties_even() / 4.0
}

/// Length of the intersection of `[a, b)` and `[c, d)`, never negative.
pub fn overlap(a: f64, b: f64, c: f64, d: f64) -> f64 {
    (b.min(d) - a.max(c)).max(0.0)
}

/// Render an hour amount with at least one decimal place: `5.0`, `6.5`, `0.25`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.1}", hours)
    } else {
        format!("{}", hours)
    }
}
