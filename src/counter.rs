//! A persisted tally of the time saved by not formatting reports by hand.
use std::path::Path;

/// Minutes of manual work replaced by one run.
pub const SAVED_MINUTES_PER_RUN: u64 = 30;

/// Add [`SAVED_MINUTES_PER_RUN`] to the minutes stored in the file at `path` and return the new total.
///
/// A missing or broken counter starts over at zero, and a failure to store the new total is
/// only logged.
pub fn increment(path: &Path) -> u64 {
    let saved = match std::fs::read_to_string(path) {
        Ok(content) => content.trim().parse::<u64>().unwrap_or_else(|err| {
            tracing::warn!(
                "Counter at '{}' is broken, starting over: {err}",
                path.display()
            );
            0
        }),
        Err(err) => {
            tracing::warn!(
                "Could not read counter at '{}', starting over: {err}",
                path.display()
            );
            0
        }
    };

    let saved = saved.saturating_add(SAVED_MINUTES_PER_RUN);
    if let Err(err) = std::fs::write(path, format!("{saved}\n")) {
        tracing::warn!("Could not write counter at '{}': {err}", path.display());
    }
    saved
}

/// Break `total_minutes` down into years, months, days, hours and minutes, leaving out
/// units that are zero. Months have 30 days and years 12 months.
pub fn describe(total_minutes: u64) -> String {
    let day = time::Duration::DAY;
    let units = [
        ("years", day * 360),
        ("months", day * 30),
        ("days", day),
        ("hours", time::Duration::HOUR),
        ("minutes", time::Duration::MINUTE),
    ];

    let mut remainder = total_minutes;
    let mut parts = Vec::new();
    for (name, unit) in units {
        let unit = unit.whole_minutes().unsigned_abs();
        let count = remainder / unit;
        remainder %= unit;
        if count > 0 {
            parts.push(format!("{count} {name}"));
        }
    }
    parts.join(", ")
}
