//! Load-once guard for the external map library.
//!
//! The widget owns a `MapLoader` and passes it by reference to whatever needs
//! the map. There is no process-wide instance.

use crate::{MapError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

type ReadyCallback = Box<dyn FnOnce() + Send>;

pub struct MapLoader {
    state: LoaderState,
    waiting: Vec<ReadyCallback>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self {
            state: LoaderState::Idle,
            waiting: Vec::new(),
        }
    }

    pub fn state(&self) -> &LoaderState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoaderState::Loaded
    }

    /// Claim the load.
    ///
    /// Returns `true` when the caller must start loading the library, `false`
    /// when a load is already in flight or finished. A failed load may be
    /// retried.
    pub fn begin_load(&mut self) -> bool {
        match self.state {
            LoaderState::Idle | LoaderState::Failed(_) => {
                log::debug!("map library load started");
                self.state = LoaderState::Loading;
                true
            }
            LoaderState::Loading | LoaderState::Loaded => false,
        }
    }

    /// Run `callback` once the library is loaded, immediately if it already is
    pub fn on_ready(&mut self, callback: impl FnOnce() + Send + 'static) {
        if self.is_loaded() {
            callback();
        } else {
            self.waiting.push(Box::new(callback));
        }
    }

    /// Mark the library loaded and run every queued callback in order
    pub fn mark_loaded(&mut self) -> Result<()> {
        if self.state != LoaderState::Loading {
            return Err(MapError::Loader(format!(
                "cannot finish a load from state {:?}",
                self.state
            )));
        }

        self.state = LoaderState::Loaded;
        let waiting = std::mem::take(&mut self.waiting);
        log::debug!("map library loaded, {} callbacks queued", waiting.len());
        for callback in waiting {
            callback();
        }
        Ok(())
    }

    /// Record a failed load; queued callbacks are dropped
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::warn!("map library failed to load: {}", reason);
        self.waiting.clear();
        self.state = LoaderState::Failed(reason);
    }
}

impl Default for MapLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MapLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapLoader")
            .field("state", &self.state)
            .field("waiting", &self.waiting.len())
            .finish()
    }
}
