//! Entrance animations driven by the viewport observer.
//!
//! A [`RevealSpec`] describes either a single element or a group of siblings.
//! When its target first enters the viewport, [`RevealAnimator::on_entered`]
//! schedules its animations relative to the trigger time:
//!
//! ```text
//! trigger ──┬─ delay ─┬─ interval ─┬─ interval ─┬─ ...
//!           │         child 0      child 1      child 2
//! ```
//!
//! Children keep the order they were declared in, which for the services
//! grid is the catalog order. Each target plays exactly once per session.

use crate::types::TargetId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::trace;

/// Timing function of every entrance transition.
pub const EASING: &str = "ease-out";

/// Default entrance duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// Default delay between consecutive siblings of a staggered group.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);

/// Starting position of an element relative to its resting place, in px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn below(px: f64) -> Self {
        Self { x: 0.0, y: px }
    }

    pub const fn beside(px: f64) -> Self {
        Self { x: px, y: 0.0 }
    }
}

/// Opacity 0→1 combined with a move from `from` back to rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub duration: Duration,
    pub delay: Duration,
    pub from: Offset,
}

impl Transition {
    pub fn new(duration: Duration, from: Offset) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            from,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum RevealKind {
    Single,
    /// Siblings animated one after another; `children` are stable keys in
    /// declaration order.
    Group {
        interval: Duration,
        children: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealSpec {
    pub id: TargetId,
    pub transition: Transition,
    pub kind: RevealKind,
}

impl RevealSpec {
    pub fn single(id: impl Into<TargetId>, transition: Transition) -> Self {
        Self {
            id: id.into(),
            transition,
            kind: RevealKind::Single,
        }
    }

    pub fn group(
        id: impl Into<TargetId>,
        transition: Transition,
        interval: Duration,
        children: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            transition,
            kind: RevealKind::Group { interval, children },
        }
    }

    /// Start of each animation relative to the trigger, in play order.
    ///
    /// A single element yields one `(None, delay)` entry; a group yields one
    /// `(Some(child), delay + i * interval)` entry per child.
    pub fn start_offsets(&self) -> Vec<(Option<&str>, Duration)> {
        let delay = self.transition.delay;
        match &self.kind {
            RevealKind::Single => vec![(None, delay)],
            RevealKind::Group { interval, children } => children
                .iter()
                .enumerate()
                .map(|(i, child)| {
                    let steps = u32::try_from(i).unwrap_or(u32::MAX);
                    (Some(child.as_str()), delay + interval.saturating_mul(steps))
                })
                .collect(),
        }
    }
}

/// An entrance animation that has been started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledAnimation {
    pub target: TargetId,
    /// Child key for group members, `None` for single elements.
    pub child: Option<String>,
    /// Session time at which the animation starts.
    pub start: Duration,
    pub duration: Duration,
    pub from: Offset,
}

#[derive(Debug, Default)]
pub struct RevealAnimator {
    specs: BTreeMap<TargetId, RevealSpec>,
    played: BTreeSet<TargetId>,
}

impl RevealAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reveal target. Returns `false` and keeps the existing spec
    /// when the id is already known.
    pub fn register(&mut self, spec: RevealSpec) -> bool {
        if self.specs.contains_key(&spec.id) {
            return false;
        }
        self.specs.insert(spec.id.clone(), spec);
        true
    }

    /// Schedule the entrance of `id`, triggered at session time `now`.
    ///
    /// Returns nothing for unknown targets and for targets that already
    /// played.
    pub fn on_entered(&mut self, id: &TargetId, now: Duration) -> Vec<ScheduledAnimation> {
        let Some(spec) = self.specs.get(id) else {
            return Vec::new();
        };
        if !self.played.insert(id.clone()) {
            return Vec::new();
        }

        let scheduled: Vec<ScheduledAnimation> = spec
            .start_offsets()
            .into_iter()
            .map(|(child, offset)| ScheduledAnimation {
                target: id.clone(),
                child: child.map(str::to_string),
                start: now + offset,
                duration: spec.transition.duration,
                from: spec.transition.from,
            })
            .collect();
        trace!(target_id = %id, count = scheduled.len(), "reveal scheduled");
        scheduled
    }

    pub fn has_played(&self, id: &TargetId) -> bool {
        self.played.contains(id)
    }

    pub fn specs(&self) -> impl Iterator<Item = &RevealSpec> {
        self.specs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(children: &[&str]) -> RevealSpec {
        RevealSpec::group(
            "services-grid",
            Transition::new(DEFAULT_DURATION, Offset::below(40.0)),
            DEFAULT_STAGGER,
            children.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn group_children_start_at_multiples_of_interval() {
        let mut animator = RevealAnimator::new();
        let keys: Vec<String> = (1..=8).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        animator.register(grid(&refs));

        let trigger = Duration::from_millis(1500);
        let scheduled = animator.on_entered(&TargetId::new("services-grid"), trigger);
        assert_eq!(scheduled.len(), 8);
        for (i, anim) in scheduled.iter().enumerate() {
            assert_eq!(anim.start, trigger + DEFAULT_STAGGER * i as u32);
            assert_eq!(anim.child.as_deref(), Some(keys[i].as_str()));
        }
    }

    #[test]
    fn children_keep_declaration_order() {
        let mut animator = RevealAnimator::new();
        animator.register(grid(&["7", "2", "5"]));
        let order: Vec<String> = animator
            .on_entered(&TargetId::new("services-grid"), Duration::ZERO)
            .into_iter()
            .filter_map(|a| a.child)
            .collect();
        assert_eq!(order, vec!["7", "2", "5"]);
    }

    #[test]
    fn plays_only_once() {
        let mut animator = RevealAnimator::new();
        animator.register(grid(&["1", "2"]));
        let id = TargetId::new("services-grid");
        assert_eq!(animator.on_entered(&id, Duration::ZERO).len(), 2);
        assert!(animator.on_entered(&id, Duration::from_secs(10)).is_empty());
        assert!(animator.has_played(&id));
    }

    #[test]
    fn unknown_target_schedules_nothing() {
        let mut animator = RevealAnimator::new();
        assert!(animator
            .on_entered(&TargetId::new("missing"), Duration::ZERO)
            .is_empty());
        assert!(!animator.has_played(&TargetId::new("missing")));
    }

    #[test]
    fn single_element_honours_delay() {
        let mut animator = RevealAnimator::new();
        let transition =
            Transition::new(DEFAULT_DURATION, Offset::below(40.0)).with_delay(Duration::from_millis(300));
        animator.register(RevealSpec::single("services-cta", transition));
        let scheduled = animator.on_entered(&TargetId::new("services-cta"), Duration::from_secs(2));
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].start, Duration::from_millis(2300));
        assert_eq!(scheduled[0].child, None);
    }

    #[test]
    fn group_delay_shifts_every_child() {
        let spec = RevealSpec::group(
            "hero-content",
            Transition::new(DEFAULT_DURATION, Offset::below(30.0)).with_delay(Duration::from_millis(200)),
            Duration::from_millis(200),
            vec!["title".into(), "subtitle".into(), "actions".into(), "facts".into()],
        );
        let starts: Vec<u128> = spec
            .start_offsets()
            .into_iter()
            .map(|(_, d)| d.as_millis())
            .collect();
        assert_eq!(starts, vec![200, 400, 600, 800]);
    }

    #[test]
    fn duplicate_registration_keeps_first_spec() {
        let mut animator = RevealAnimator::new();
        assert!(animator.register(grid(&["1"])));
        assert!(!animator.register(grid(&["1", "2", "3"])));
        let spec = animator.specs().next().unwrap();
        assert_eq!(spec.start_offsets().len(), 1);
    }
}
