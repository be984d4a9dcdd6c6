//! Reveal call sites: a visibility controller plus what it animates.
//!
//! A [`Reveal`] is either a single element or a staggered container. Both are
//! driven by exactly one controller observing the container.

use super::stagger::StaggerSchedule;
use super::visibility::{
    AnimationSignal, Crossing, ObserveOptions, Observation, RevealKey, VisibilityController,
};
use std::time::Duration;

/// Shape of a reveal call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    /// The observed element animates itself.
    Single,
    /// The observed container animates `children` items with a stagger.
    Staggered {
        schedule: StaggerSchedule,
        children: usize,
    },
}

/// Declaration of one reveal call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSpec {
    pub key: RevealKey,
    pub kind: RevealKind,
    pub options: ObserveOptions,
    /// Preset applied to the element (or to each child).
    pub preset: &'static str,
}

/// Animation instruction produced by a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCue {
    /// `None` targets the observed element itself.
    pub child: Option<usize>,
    pub signal: AnimationSignal,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct Reveal {
    controller: VisibilityController,
    kind: RevealKind,
    preset: &'static str,
}

impl Reveal {
    #[must_use]
    pub fn new(spec: RevealSpec) -> Self {
        Self {
            controller: VisibilityController::new(spec.key, spec.options),
            kind: spec.kind,
            preset: spec.preset,
        }
    }

    #[must_use]
    pub const fn preset(&self) -> &'static str {
        self.preset
    }

    #[must_use]
    pub const fn kind(&self) -> RevealKind {
        self.kind
    }

    #[must_use]
    pub const fn controller(&self) -> &VisibilityController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut VisibilityController {
        &mut self.controller
    }

    pub fn observe(&mut self, mounted: bool) -> Option<Observation> {
        self.controller.observe(mounted)
    }

    /// Replaces the declared child count with the number actually mounted.
    ///
    /// Single reveals have no children and ignore this.
    pub fn set_children(&mut self, count: usize) {
        if let RevealKind::Staggered { children, .. } = &mut self.kind {
            *children = count;
        }
    }

    pub fn release(&mut self) -> bool {
        self.controller.release()
    }

    /// Feeds an intersection ratio and expands the resulting signal into cues.
    pub fn on_intersection(&mut self, ratio: f64) -> (Vec<RevealCue>, bool) {
        let Crossing { signal, released } = self.controller.on_intersection(ratio);
        let Some(signal) = signal else {
            return (Vec::new(), released);
        };

        let cues = match self.kind {
            RevealKind::Single => vec![RevealCue {
                child: None,
                signal,
                delay: Duration::ZERO,
            }],
            RevealKind::Staggered { schedule, children } => schedule
                .cues(children, signal)
                .into_iter()
                .map(|cue| RevealCue {
                    child: Some(cue.index),
                    signal: cue.signal,
                    delay: cue.delay,
                })
                .collect(),
        };

        (cues, released)
    }
}
