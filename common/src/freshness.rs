//! Freshness policy for the cached canonical dataset.
//!
//! Both cache layers (the browser-side product cache and the backend dataset
//! proxy) share this single definition of "stale": a cache entry older than
//! the 24-hour window, or one whose capture timestamp is unknown. Time is
//! passed in explicitly so the predicate stays deterministic under test.

/// How long a cached dataset copy stays usable, in milliseconds.
pub const FRESHNESS_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

/// Returns whether a cache entry captured at `fetched_at_ms` is stale at
/// `now_ms`.
///
/// - `None` (no entry, or a missing/malformed stored timestamp) is always
///   stale: the age is treated as infinite.
/// - A timestamp in the future is fresh; the age saturates at zero instead
///   of underflowing.
/// - An entry exactly at the window edge is still fresh; staleness requires
///   strictly exceeding the window.
pub fn is_stale(fetched_at_ms: Option<u64>, now_ms: u64) -> bool {
    match fetched_at_ms {
        Some(fetched_at) => now_ms.saturating_sub(fetched_at) > FRESHNESS_WINDOW_MS,
        None => true,
    }
}

/// Age of an entry captured at `fetched_at_ms`, saturating at zero.
pub fn age_ms(fetched_at_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(fetched_at_ms)
}
