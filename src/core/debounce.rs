use crate::core::constants::DEFAULT_DEBOUNCE_MS;
use crate::core::viewport::ViewportState;
use crate::prelude::Duration;
use instant::Instant;

/// Holds back viewport changes until the view has been still for `delay`.
///
/// Poll-driven: the caller pushes every change as it happens and polls from
/// its frame loop. A push replaces any pending state, so only the settled
/// viewport reaches the pipeline.
#[derive(Debug, Clone)]
pub struct ViewportDebouncer {
    delay: Duration,
    pending: Option<(ViewportState, Instant)>,
}

impl ViewportDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a viewport change observed at `now`
    pub fn push(&mut self, state: ViewportState, now: Instant) {
        self.pending = Some((state, now));
    }

    /// Settled viewport, once `delay` has passed since the last push
    pub fn poll(&mut self, now: Instant) -> Option<ViewportState> {
        let ready = match &self.pending {
            Some((_, pushed_at)) => now >= *pushed_at && now.duration_since(*pushed_at) >= self.delay,
            None => false,
        };

        if ready {
            self.pending.take().map(|(state, _)| state)
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending change without emitting it
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for ViewportDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLngBounds;

    fn state(zoom: u8) -> ViewportState {
        ViewportState::from_bounds(LatLngBounds::from_coords(0.0, 0.0, 1.0, 1.0), zoom)
    }

    #[test]
    fn test_emits_after_quiet_period() {
        let mut debouncer = ViewportDebouncer::default();
        let t0 = Instant::now();

        debouncer.push(state(10), t0);
        assert!(debouncer.poll(t0 + Duration::from_millis(299)).is_none());

        let settled = debouncer.poll(t0 + Duration::from_millis(300)).unwrap();
        assert_eq!(settled.zoom, 10);
        assert!(!debouncer.has_pending());
        assert!(debouncer.poll(t0 + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_newer_push_supersedes() {
        let mut debouncer = ViewportDebouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();

        debouncer.push(state(10), t0);
        debouncer.push(state(11), t0 + Duration::from_millis(80));
        debouncer.push(state(12), t0 + Duration::from_millis(160));

        assert!(debouncer.poll(t0 + Duration::from_millis(200)).is_none());
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(260)).unwrap().zoom, 12);
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = ViewportDebouncer::default();
        let t0 = Instant::now();
        debouncer.push(state(3), t0);
        debouncer.cancel();
        assert!(debouncer.poll(t0 + Duration::from_secs(1)).is_none());
    }
}
