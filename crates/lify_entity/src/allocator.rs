//! Entity identity allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Allocates monotonically increasing entity identities.
///
/// Each allocation is a single `fetch_add`, so concurrent callers never
/// receive the same identity and no identity in the issued range is skipped.
/// Identities start at 1; 0 is reserved for
/// [`Entity::INVALID_ID`](crate::Entity::INVALID_ID). A free-list for
/// recycling identities can be added once entities can be destroyed.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last_id: AtomicU64,
}

impl IdAllocator {
    /// Creates a new allocator. The first identity issued is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_id: AtomicU64::new(0),
        }
    }

    /// Allocates a fresh identity.
    pub fn allocate(&self) -> u64 {
        // Relaxed is enough: uniqueness only depends on the RMW being atomic.
        self.last_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Returns the last identity issued, or 0 if none has been.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.last_id.load(Ordering::Relaxed)
    }
}
