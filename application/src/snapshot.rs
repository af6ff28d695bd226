//! Atomically replaceable shared data
//!
//! The roster and the locale fallback tables are read by every resolution
//! and replaced wholesale on reload. [`SharedSnapshot`] hands out `Arc`s to
//! the current value; a reader keeps whatever it loaded even if a reload
//! lands while it is still working.
//!
//! ```text
//! reload ──replace()──► ArcSwap ──snapshot()──► Arc<T> (held for one batch)
//! ```

use arc_swap::ArcSwap;
use std::sync::Arc;
use vetting_domain::{LocaleFallback, VoterRoster};

/// Current value of some shared, immutable data
#[derive(Debug)]
pub struct SharedSnapshot<T> {
    current: ArcSwap<T>,
}

/// The voter registry as seen by resolutions
pub type SharedRoster = SharedSnapshot<VoterRoster>;

/// Parent-locale data as seen by baseline lookups
pub type SharedFallback = SharedSnapshot<LocaleFallback>;

impl<T> SharedSnapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: ArcSwap::from_pointee(value),
        }
    }

    /// The current value
    pub fn snapshot(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Publish a new value, returning the one it replaced
    pub fn replace(&self, value: T) -> Arc<T> {
        self.current.swap(Arc::new(value))
    }
}

impl<T: Default> Default for SharedSnapshot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
