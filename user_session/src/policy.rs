//! Renewal and expiry arithmetic. Pure functions of integers, no clock.

const SECONDS_PER_DAY: u64 = 86_400;

/// Decide whether a session should be reissued with a refreshed issue time.
///
/// True iff the remaining lifetime is inside the trailing renewal window,
/// boundary included. Does not reject already-elapsed sessions; callers
/// enforcing hard expiry check [`is_expired`] first.
pub fn needs_renew(issued_at: i64, now: i64, max_age_seconds: u64, renew_window_days: u64) -> bool {
    let expires_at = issued_at.saturating_add(max_age_seconds as i64);
    let remaining = expires_at.saturating_sub(now);
    remaining <= (renew_window_days * SECONDS_PER_DAY) as i64
}

/// True once the session's full lifetime has elapsed.
pub fn is_expired(issued_at: i64, now: i64, max_age_seconds: u64) -> bool {
    let expires_at = issued_at.saturating_add(max_age_seconds as i64);
    expires_at.saturating_sub(now) < 0
}
