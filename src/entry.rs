use std::time::{Duration, Instant};

/// Cap on TTL values so `Instant + ttl` can never overflow.
/// Used at creation and on every refresh, keeping the
/// `expires_at == last_access + ttl` invariant intact either way.
pub(crate) const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A stored value together with its TTL and current expiration time.
///
/// The TTL is fixed at creation; each refresh re-arms `expires_at` to
/// the full TTL from the moment of access (sliding expiration).
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    ttl: Duration,
    expires_at: Instant,
}

impl<V> Entry<V> {
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let ttl = ttl.min(MAX_TTL);
        Self {
            value,
            ttl,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Returns a reference to the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the duration granted on each refresh.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current expiration time.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Re-arms the expiry to a full TTL from now.
    ///
    /// Called on every successful read. Refreshing works even when the old
    /// expiry has already passed: expiration is sweep-driven, so a read
    /// resurrects an entry the sweep has not yet collected.
    pub fn refresh(&mut self) {
        self.expires_at = Instant::now() + self.ttl;
    }

    /// Checks whether this entry is past its expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against an externally sampled clock, so one sweep
    /// evaluates every entry against the same instant.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at < now
    }
}
