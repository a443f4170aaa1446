use std::collections::VecDeque;

use crate::config::field::Retention;
use crate::field::rng::RandomSource;
use crate::foundation::core::{Point, Viewport};

/// A generative anchor point. Hubs have no identity beyond their position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hub {
    /// Position in surface pixels.
    pub position: Point,
}

impl Hub {
    /// Hub at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

/// Ordered collection of hubs, oldest first.
///
/// Owned by the orchestrator and handed to the generator for each pass. Growth is bounded by
/// the [`Retention`] policy.
#[derive(Clone, Debug)]
pub struct HubRegistry {
    retention: Retention,
    hubs: VecDeque<Hub>,
    evicted: u64,
}

impl HubRegistry {
    /// Empty registry with the given retention policy.
    pub fn new(retention: Retention) -> Self {
        Self {
            retention,
            hubs: VecDeque::new(),
            evicted: 0,
        }
    }

    /// Number of hubs currently held.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    /// True when no hubs are held.
    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    /// Total hubs dropped by ring eviction since construction.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Hubs in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Hub> {
        self.hubs.iter()
    }

    /// Drop every hub.
    pub fn clear(&mut self) {
        self.hubs.clear();
    }

    /// Append one hub, evicting the oldest if a ring capacity is reached.
    pub fn push(&mut self, hub: Hub) {
        if let Retention::Ring { capacity } = self.retention {
            while self.hubs.len() >= capacity {
                if self.hubs.pop_front().is_none() {
                    break;
                }
                self.evicted = self.evicted.saturating_add(1);
            }
        }
        self.hubs.push_back(hub);
    }

    /// Start a pass: apply retention, then append `count` hubs placed uniformly within
    /// `viewport`. Draws `x` then `y` for each hub.
    pub fn begin_pass<R: RandomSource + ?Sized>(
        &mut self,
        viewport: Viewport,
        count: usize,
        rng: &mut R,
    ) {
        if self.retention == Retention::Fresh {
            self.clear();
        }

        let evicted_before = self.evicted;
        let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));
        for _ in 0..count {
            let x = rng.next_f64() * w;
            let y = rng.next_f64() * h;
            self.push(Hub::new(x, y));
        }

        let evicted = self.evicted - evicted_before;
        if evicted > 0 {
            tracing::debug!(evicted, retained = self.hubs.len(), "hub ring evicted oldest hubs");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/registry.rs"]
mod tests;
