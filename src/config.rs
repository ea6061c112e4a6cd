use std::time::Duration;

/// Configuration for the store's background sweep task.
///
/// # Example
///
/// ```rust
/// use slidekv::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_cleanup_interval(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Interval between sweep runs (default: 60 seconds).
    pub cleanup_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sweep interval.
    ///
    /// This determines how often the background task runs to remove expired
    /// entries, and so bounds the worst-case reclamation delay: an entry may
    /// outlive its TTL by up to one interval before the sweep collects it.
    /// Intervals below one millisecond are clamped up to one millisecond.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}
