//! One-shot viewport intersection tracking.
//!
//! Every watched element is registered with its document-space [`Rect`].
//! Each scroll or resize sample is fed to [`ViewportObserver::observe`], which
//! reports the targets whose box overlapped the (margin-shrunk) viewport for
//! the first time. A target that has fired is unsubscribed and its latch
//! stays `true` for the rest of the session; scrolling away and back never
//! fires it again.
//!
//! Targets may register at any time. A late registration is checked against
//! the most recent viewport straight away, so an element mounted while it is
//! already on screen does not wait for the next scroll event.
//!
//! ## Fail-open
//!
//! Without an intersection primitive ([`IntersectionSupport::Unavailable`])
//! every target is considered visible the moment it registers. Content is
//! never left hidden because the environment cannot tell where it is.

use super::scroll::ScrollState;
use crate::types::TargetId;
use std::collections::BTreeMap;
use tracing::debug;

/// Root margin used by the page: the trigger region ends 100px above the
/// bottom edge of the viewport.
pub const DEFAULT_BOTTOM_MARGIN: f64 = -100.0;

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible part of the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll: ScrollState,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll: ScrollState, height: f64) -> Self {
        Self { scroll, height }
    }
}

/// Whether the host can report intersections at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionSupport {
    #[default]
    Available,
    Unavailable,
}

#[derive(Debug)]
pub struct ViewportObserver {
    bottom_margin: f64,
    support: IntersectionSupport,
    subscriptions: BTreeMap<TargetId, Rect>,
    latches: BTreeMap<TargetId, bool>,
    last_viewport: Option<Viewport>,
}

impl ViewportObserver {
    /// `bottom_margin` grows (positive) or shrinks (negative) the trigger
    /// region at the bottom edge of the viewport.
    pub fn new(bottom_margin: f64, support: IntersectionSupport) -> Self {
        Self {
            bottom_margin,
            support,
            subscriptions: BTreeMap::new(),
            latches: BTreeMap::new(),
            last_viewport: None,
        }
    }

    /// Start watching `id`. Returns `true` when the target latched during
    /// registration (already visible, or fail-open).
    ///
    /// Registering a target that has already latched is a no-op: the entrance
    /// it triggered has played and must not play again.
    pub fn register(&mut self, id: TargetId, rect: Rect) -> bool {
        let latched = self.latches.entry(id.clone()).or_insert(false);
        if *latched {
            return false;
        }

        let visible = match (self.support, self.last_viewport) {
            (IntersectionSupport::Unavailable, _) => true,
            (IntersectionSupport::Available, Some(viewport)) => self.intersects(viewport, rect),
            (IntersectionSupport::Available, None) => false,
        };

        if visible {
            debug!(target_id = %id, "target visible at registration");
            self.latches.insert(id, true);
        } else {
            self.subscriptions.insert(id, rect);
        }
        visible
    }

    /// Mark `id` as seen without a box to test, as for fail-open. Returns
    /// `false` when it had already latched.
    pub fn latch(&mut self, id: TargetId) -> bool {
        self.subscriptions.remove(&id);
        let latched = self.latches.entry(id).or_insert(false);
        !std::mem::replace(latched, true)
    }

    /// Stop watching `id`. Its latch, if set, is kept.
    pub fn unregister(&mut self, id: &TargetId) -> bool {
        self.subscriptions.remove(id).is_some()
    }

    /// Drop every subscription. Latches are kept.
    pub fn disconnect(&mut self) {
        self.subscriptions.clear();
    }

    /// Feed a new viewport sample; returns the targets that entered it for
    /// the first time, in id order.
    pub fn observe(&mut self, viewport: Viewport) -> Vec<TargetId> {
        self.last_viewport = Some(viewport);

        let entered: Vec<TargetId> = self
            .subscriptions
            .iter()
            .filter(|(_, rect)| self.intersects(viewport, **rect))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &entered {
            self.subscriptions.remove(id);
            self.latches.insert(id.clone(), true);
        }
        entered
    }

    pub fn has_entered(&self, id: &TargetId) -> bool {
        self.latches.get(id).copied().unwrap_or(false)
    }

    pub fn is_subscribed(&self, id: &TargetId) -> bool {
        self.subscriptions.contains_key(id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn intersects(&self, viewport: Viewport, rect: Rect) -> bool {
        let top = viewport.scroll.offset_y();
        let mut bottom = top + viewport.height + self.bottom_margin;
        // A margin larger than the viewport would leave no trigger region.
        if bottom <= top {
            bottom = top + viewport.height;
        }
        rect.top < bottom && rect.bottom() > top
    }
}
