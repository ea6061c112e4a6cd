//! # slidekv
//!
//! An in-process key-value store with sliding TTL expiration.
//!
//! ## Features
//!
//! - Thread-safe: clone the store handle and share it across threads
//! - Sliding expiration: every successful read re-arms the entry's full TTL,
//!   so only entries unread for a whole TTL window expire
//! - Sweep-driven eviction: a per-store background task removes expired
//!   entries on a fixed interval; reads never invalidate, they resurrect
//! - Generic payloads: the store is agnostic to the value type
//!
//! ## Example
//!
//! ```rust,no_run
//! use slidekv::{Store, StoreConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Create a store with a 30 second sweep interval
//!     let config = StoreConfig::default()
//!         .with_cleanup_interval(Duration::from_secs(30));
//!     let store: Store<String> = Store::with_config(config);
//!
//!     // Store a value with a 60 second TTL
//!     store.set("user:123", "John Doe".to_string(), Duration::from_secs(60));
//!
//!     // Each read pushes the expiry out another 60 seconds
//!     if let Some(value) = store.get("user:123") {
//!         println!("User: {}", value);
//!     }
//!
//!     // Delete a key
//!     store.delete("user:123");
//!
//!     // Manual sweep (also done automatically by the background task)
//!     let removed_count = store.purge_expired();
//!     let _ = removed_count;
//! }
//! ```

mod config;
mod entry;
mod store;

pub use config::StoreConfig;
pub use entry::Entry;
pub use store::Store;
