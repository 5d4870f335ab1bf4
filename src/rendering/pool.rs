use crate::prelude::HashSet;
use std::hash::Hash;

/// A rendering resource owned by the map widget, such as a native marker
/// object.
///
/// Handles are cheap references (clone shares the underlying object) and
/// compare equal when they refer to the same object.
pub trait MarkerHandle: Clone + Eq + Hash {
    /// Remove the marker from the map it is drawn on
    fn detach(&self);

    /// Drop every event listener attached to the marker
    fn clear_listeners(&self);
}

/// Recycles marker handles across viewport changes.
///
/// Each handle the pool knows is either free or active, never both. Handles
/// the caller creates join the pool the first time they are released.
#[derive(Debug)]
pub struct MarkerPool<H: MarkerHandle> {
    /// Free handles, most recently released last
    free: Vec<H>,
    /// Membership index over `free`
    free_index: HashSet<H>,
    /// Handles currently handed out
    active: HashSet<H>,
}

impl<H: MarkerHandle> MarkerPool<H> {
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            free_index: HashSet::default(),
            active: HashSet::default(),
        }
    }

    /// Pool pre-filled with free handles
    pub fn with_handles(handles: impl IntoIterator<Item = H>) -> Self {
        let mut pool = Self::new();
        for handle in handles {
            pool.release_handle(&handle);
        }
        pool
    }

    /// Take a free handle and mark it active.
    ///
    /// `None` means the pool is empty and the caller should create a new
    /// handle.
    pub fn get_handle(&mut self) -> Option<H> {
        let handle = self.free.pop()?;
        self.free_index.remove(&handle);
        self.active.insert(handle.clone());
        Some(handle)
    }

    /// Detach a handle and return it to the free set.
    ///
    /// Releasing a free handle does nothing. A handle the pool has never seen
    /// is detached and registered as free.
    pub fn release_handle(&mut self, handle: &H) {
        if self.active.remove(handle) {
            Self::reset(handle);
            self.push_free(handle.clone());
        } else if !self.free_index.contains(handle) {
            Self::reset(handle);
            self.push_free(handle.clone());
            log::trace!("pool registered a new handle ({} total)", self.len());
        }
    }

    /// Release every active handle
    pub fn release_all(&mut self) {
        let active: Vec<H> = self.active.drain().collect();
        for handle in &active {
            Self::reset(handle);
        }
        log::debug!("released {} active marker handles", active.len());
        for handle in active {
            self.push_free(handle);
        }
    }

    /// Shrink the free set to at most `max_free` handles.
    ///
    /// The longest-idle handles are evicted first and returned so the caller
    /// can destroy them. Active handles are never touched.
    pub fn trim(&mut self, max_free: usize) -> Vec<H> {
        let excess = self.free.len().saturating_sub(max_free);
        let evicted: Vec<H> = self.free.drain(..excess).collect();
        for handle in &evicted {
            self.free_index.remove(handle);
        }
        if !evicted.is_empty() {
            log::debug!("trimmed {} idle marker handles", evicted.len());
        }
        evicted
    }

    /// Release everything and hand every handle back for destruction
    pub fn destroy(&mut self) -> Vec<H> {
        self.release_all();
        self.free_index.clear();
        std::mem::take(&mut self.free)
    }

    pub fn is_active(&self, handle: &H) -> bool {
        self.active.contains(handle)
    }

    pub fn is_free(&self, handle: &H) -> bool {
        self.free_index.contains(handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Total number of handles the pool knows
    pub fn len(&self) -> usize {
        self.active.len() + self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push_free(&mut self, handle: H) {
        self.free_index.insert(handle.clone());
        self.free.push(handle);
    }

    fn reset(handle: &H) {
        handle.detach();
        handle.clear_listeners();
    }
}

impl<H: MarkerHandle> Default for MarkerPool<H> {
    fn default() -> Self {
        Self::new()
    }
}
