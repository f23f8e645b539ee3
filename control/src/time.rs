//! Monotonic time as seen by the self-test.
//!
//! The board keeps a 64-bit microsecond counter. All components receive the
//! current [`Instant`] from the caller and never read the clock themselves.

/// Point in time on the microsecond monotonic clock.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// Span of time on the microsecond monotonic clock.
pub type Duration = fugit::TimerDurationU64<1_000_000>;

/// Time passed between `since` and `now`.
///
/// The difference is taken on raw ticks with wrapping arithmetic, so a
/// clock overflow between the two readings still yields the real distance.
#[must_use]
pub fn elapsed(since: Instant, now: Instant) -> Duration {
    Duration::from_ticks(now.ticks().wrapping_sub(since.ticks()))
}
