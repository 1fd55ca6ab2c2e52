//! One page session: the engine pieces wired together.
//!
//! ```text
//! scroll ──┬──► ViewportObserver ──► RevealAnimator ──► started animations
//!          ├──► NavState (header mode)
//!          └──► ParallaxController (hero background)
//! click  ─────► NavState (menu)
//! resize ─────► ViewportObserver
//! ```
//!
//! A session is created by [`PageSession::mount`], which subscribes to the
//! scroll, resize and click listeners and returns the first [`Frame`]. Events
//! are delivered with [`PageSession::dispatch`] until [`PageSession::unmount`]
//! releases the listeners; after that, dispatch reports that nobody is
//! listening.

use super::nav::{self, HeaderMode, MenuState, NavEvent, NavState};
use super::observer::{IntersectionSupport, Rect, Viewport, ViewportObserver};
use super::parallax::{ParallaxController, ParallaxOffset};
use super::reveal::{RevealAnimator, RevealSpec, ScheduledAnimation};
use super::scroll::ScrollState;
use crate::types::TargetId;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::{debug, trace};

/// Numbers the session needs from the site configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub header_threshold: f64,
    pub parallax: ParallaxController,
    pub bottom_margin: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            header_threshold: nav::DEFAULT_HEADER_THRESHOLD,
            parallax: ParallaxController::default(),
            bottom_margin: super::observer::DEFAULT_BOTTOM_MARGIN,
        }
    }
}

/// Document-space boxes of the reveal targets.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    rects: BTreeMap<TargetId, Rect>,
}

impl PageLayout {
    pub fn insert(&mut self, id: TargetId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn get(&self, id: &TargetId) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, &Rect)> {
        self.rects.iter()
    }
}

impl FromIterator<(TargetId, Rect)> for PageLayout {
    fn from_iter<I: IntoIterator<Item = (TargetId, Rect)>>(iter: I) -> Self {
        Self {
            rects: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Scroll,
    Resize,
    Click,
}

/// Input events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Scroll { offset_y: f64 },
    Resize { height: f64 },
    ToggleMenu,
    FollowLink(String),
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::ToggleMenu | PageEvent::FollowLink(_) => EventKind::Click,
        }
    }
}

/// What the page looks like after an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: HeaderMode,
    pub menu: MenuState,
    pub parallax: ParallaxOffset,
    /// Entrance animations started by this event.
    pub started: Vec<ScheduledAnimation>,
}

#[derive(Debug)]
pub struct PageSession {
    settings: EngineSettings,
    nav: NavState,
    viewport: Viewport,
    observer: ViewportObserver,
    animator: RevealAnimator,
    listeners: BTreeSet<EventKind>,
}

impl PageSession {
    /// Mount the page at `viewport` and register every reveal target.
    ///
    /// Targets already inside the viewport start their entrance in the
    /// returned frame, without waiting for a scroll event. A target with no
    /// box in `layout` cannot be located and is revealed straight away.
    pub fn mount(
        settings: EngineSettings,
        reveals: Vec<RevealSpec>,
        layout: &PageLayout,
        viewport: Viewport,
        support: IntersectionSupport,
        now: Duration,
    ) -> (Self, Frame) {
        let mut session = Self {
            settings,
            nav: NavState {
                scroll: viewport.scroll,
                menu: MenuState::Closed,
            },
            viewport,
            observer: ViewportObserver::new(settings.bottom_margin, support),
            animator: RevealAnimator::new(),
            listeners: [EventKind::Scroll, EventKind::Resize, EventKind::Click]
                .into_iter()
                .collect(),
        };

        // Seed the observer so registrations are checked against the viewport.
        session.observer.observe(viewport);

        let mut started = Vec::new();
        for spec in reveals {
            let id = spec.id.clone();
            started.extend(session.attach(spec, layout.get(&id), now));
        }
        debug!(
            targets = session.observer.subscription_count(),
            started = started.len(),
            "page session mounted"
        );

        let frame = session.frame(started);
        (session, frame)
    }

    /// Deliver one event. Returns `None` when no listener is registered for
    /// its kind (the session was unmounted).
    pub fn dispatch(&mut self, event: PageEvent, now: Duration) -> Option<Frame> {
        if !self.listeners.contains(&event.kind()) {
            trace!(?event, "event without listener dropped");
            return None;
        }

        let mut started = Vec::new();
        match event {
            PageEvent::Scroll { offset_y } => {
                let scroll = ScrollState::new(offset_y);
                self.nav = nav::transition(self.nav, &NavEvent::Scroll(scroll));
                self.viewport.scroll = scroll;
                started = self.observe(now);
            }
            PageEvent::Resize { height } => {
                self.viewport.height = height;
                started = self.observe(now);
            }
            PageEvent::ToggleMenu => {
                self.nav = nav::transition(self.nav, &NavEvent::ToggleMenu);
            }
            PageEvent::FollowLink(anchor) => {
                self.nav = nav::transition(self.nav, &NavEvent::FollowLink(anchor));
            }
        }
        Some(self.frame(started))
    }

    /// Register a target mounted after the initial load. Nothing is
    /// registered once the session is unmounted.
    pub fn register_late(
        &mut self,
        spec: RevealSpec,
        rect: Rect,
        now: Duration,
    ) -> Vec<ScheduledAnimation> {
        if !self.is_mounted() {
            return Vec::new();
        }
        self.attach(spec, Some(rect), now)
    }

    /// Stop watching a target. An entrance that already played is unaffected.
    pub fn unregister(&mut self, id: &TargetId) -> bool {
        self.observer.unregister(id)
    }

    /// Release every listener and observer subscription.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        self.observer.disconnect();
        debug!("page session unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn header_mode(&self) -> HeaderMode {
        self.nav.header_mode(self.settings.header_threshold)
    }

    pub fn menu(&self) -> MenuState {
        self.nav.menu
    }

    pub fn has_entered(&self, id: &TargetId) -> bool {
        self.observer.has_entered(id)
    }

    pub fn has_played(&self, id: &TargetId) -> bool {
        self.animator.has_played(id)
    }

    fn attach(&mut self, spec: RevealSpec, rect: Option<Rect>, now: Duration) -> Vec<ScheduledAnimation> {
        let id = spec.id.clone();
        self.animator.register(spec);
        let visible = match rect {
            Some(rect) => self.observer.register(id.clone(), rect),
            None => {
                debug!(target_id = %id, "no layout box, revealing immediately");
                self.observer.latch(id.clone())
            }
        };
        if visible {
            self.animator.on_entered(&id, now)
        } else {
            Vec::new()
        }
    }

    fn observe(&mut self, now: Duration) -> Vec<ScheduledAnimation> {
        self.observer
            .observe(self.viewport)
            .iter()
            .flat_map(|id| self.animator.on_entered(id, now))
            .collect()
    }

    fn frame(&self, started: Vec<ScheduledAnimation>) -> Frame {
        Frame {
            header: self.header_mode(),
            menu: self.nav.menu,
            parallax: self.settings.parallax.offset(self.viewport.scroll),
            started,
        }
    }
}
