//! Pure time comparisons for cooldowns, streaks, and daily resets.
//!
//! Instants are stored in UTC; day boundaries are computed in the local
//! timezone at evaluation time. Everything here is deterministic given
//! an injected "now" so that poll cadence never affects correctness.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};

/// Local calendar day of an instant, as "%Y-%m-%d".
pub fn local_day(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Local calendar day one day before the instant's.
pub fn previous_local_day(t: DateTime<Utc>) -> String {
    local_day(t - Duration::days(1))
}

/// The instant a completion cooldown expires: the next local midnight
/// strictly after `t`.
pub fn next_local_midnight(t: DateTime<Utc>) -> DateTime<Utc> {
    let local = t.with_timezone(&Local);
    let next_day = match local.date_naive().succ_opt() {
        Some(day) => day,
        // Unreachable for any realistic date; fall back to +24h.
        None => return t + Duration::hours(24),
    };
    let midnight = next_day
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.to_utc(),
        // DST gap at midnight; +24h is close enough for a cooldown.
        None => t + Duration::hours(24),
    }
}

/// True if a cooldown anchored at `anchor` is still running at `now`.
pub fn cooldown_active(anchor: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now < next_local_midnight(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .earliest()
            .unwrap()
            .to_utc()
    }

    #[test]
    fn test_cooldown_blocks_until_next_midnight() {
        let completed = local_utc(2026, 3, 10, 14, 30);
        let same_evening = local_utc(2026, 3, 10, 23, 59);
        let next_morning = local_utc(2026, 3, 11, 0, 1);

        assert!(cooldown_active(completed, same_evening));
        assert!(!cooldown_active(completed, next_morning));
    }

    #[test]
    fn test_cooldown_just_before_midnight() {
        let completed = local_utc(2026, 3, 10, 23, 58);
        let one_minute_later = local_utc(2026, 3, 10, 23, 59);
        let after_midnight = local_utc(2026, 3, 11, 0, 0);

        assert!(cooldown_active(completed, one_minute_later));
        assert!(!cooldown_active(completed, after_midnight));
    }

    #[test]
    fn test_local_day_strings() {
        let t = local_utc(2026, 7, 4, 12, 0);
        assert_eq!(local_day(t), "2026-07-04");
        assert_eq!(previous_local_day(t), "2026-07-03");
    }
}
