//! In-memory cart store.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use crate::store::{CartSnapshot, CartStore, StoreError};

/// A [`CartStore`] holding the snapshot in process memory. Clones share the
/// same slot, so a test can keep a handle while the session owns another.
///
/// Saves can be made to fail on demand to exercise the engine's
/// persistence-failure path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    slot: Mutex<Option<CartSnapshot>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The currently stored snapshot, if any.
    #[must_use]
    pub fn stored(&self) -> Option<CartSnapshot> {
        self.inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CartStore for MemoryStore {
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(std::io::Error::other(
                "injected save failure",
            )));
        }

        *self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());

        Ok(())
    }

    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        Ok(self.stored())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self
            .inner
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;

        Ok(())
    }
}
