#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use floating_chat::{OverlayError, OverlayHost, ViewProps};

/// In-memory stand-in for the browser: counts boundaries and mounted views.
pub struct FakeHost {
    next_boundary: usize,
    pub live_boundaries: Vec<usize>,
    pub mounted: Vec<(usize, ViewProps)>,
    pub affordance_visible: bool,
    pub isolation_supported: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            next_boundary: 0,
            live_boundaries: Vec::new(),
            mounted: Vec::new(),
            affordance_visible: true,
            isolation_supported: true,
        }
    }

    pub fn boundary_present(&self) -> bool {
        !self.live_boundaries.is_empty()
    }

    pub fn mounted_view(&self) -> Option<&ViewProps> {
        self.mounted.last().map(|(_, view)| view)
    }
}

impl OverlayHost for FakeHost {
    type Boundary = usize;

    fn create_boundary(&mut self) -> Result<usize, OverlayError> {
        if !self.isolation_supported {
            return Err(OverlayError::IsolationUnavailable(
                "attachShadow is not supported".to_string(),
            ));
        }
        self.next_boundary += 1;
        self.live_boundaries.push(self.next_boundary);
        Ok(self.next_boundary)
    }

    fn attach_view(&mut self, boundary: &mut usize, view: ViewProps) -> Result<(), OverlayError> {
        self.mounted.push((*boundary, view));
        Ok(())
    }

    fn detach_view(&mut self, boundary: &mut usize) {
        self.mounted.retain(|(id, _)| id != boundary);
    }

    fn destroy_boundary(&mut self, boundary: usize) {
        self.live_boundaries.retain(|id| *id != boundary);
    }

    fn set_affordance_visible(&mut self, visible: bool) {
        self.affordance_visible = visible;
    }
}

/// Deterministic timer queue. Events due at the same instant fire in
/// scheduling order.
pub struct VirtualClock<E> {
    now_ms: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), E>,
}

impl<E> VirtualClock<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000 + self.now_ms as i64)
            .unwrap()
    }

    pub fn schedule(&mut self, after_ms: u32, event: E) {
        self.next_seq += 1;
        self.queue
            .insert((self.now_ms + u64::from(after_ms), self.next_seq), event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move time forward by `ms`, returning due events in firing order.
    pub fn advance(&mut self, ms: u64) -> Vec<(u64, E)> {
        let target = self.now_ms + ms;
        let later = self.queue.split_off(&(target + 1, 0));
        let due = std::mem::replace(&mut self.queue, later);
        self.now_ms = target;
        due.into_iter().map(|((at, _), event)| (at, event)).collect()
    }
}
