//! Visibility-triggered animation controller.
//!
//! Binds one element's intersection with the viewport to an animation signal.
//! The controller only decides *when* to signal; applying the signal (and any
//! layout or drawing) is the host's job.
//!
//! # State Machine
//!
//! ```text
//!            ratio ≥ threshold / Animate
//! NotVisible ───────────────────────────▶ Visible
//!     ▲                                      │
//!     └──────────────────────────────────────┘
//!        ratio < threshold / Reset (Repeat policy only)
//! ```
//!
//! With [`TriggerPolicy::Once`] the first crossing is the only one that
//! signals; the controller then releases its observation and stays `Visible`.

use crate::timing::{crosses_threshold, ChangeNotifier, RootMargin, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one reveal call site (and the DOM element it observes).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevealKey(pub String);

impl RevealKey {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for RevealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a controller may fire more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerPolicy {
    /// Fire on the first crossing only.
    Once,
    /// Fire on every entry and reset on every exit.
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityState {
    NotVisible,
    Visible,
}

/// Signal sent to the animated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationSignal {
    /// Transition to the preset's `animate` state.
    Animate,
    /// Transition back to the preset's `initial` state.
    Reset,
}

/// Observation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserveOptions {
    /// Fraction of the element (0..=1) that must be inside the root.
    pub threshold: f64,
    pub margin: RootMargin,
    pub policy: TriggerPolicy,
}

impl ObserveOptions {
    /// Section titles and content blocks.
    #[must_use]
    pub const fn section() -> Self {
        Self {
            threshold: 0.1,
            margin: RootMargin::vertical(-100.0),
            policy: TriggerPolicy::Once,
        }
    }

    /// Containers whose children animate in sequence.
    #[must_use]
    pub const fn staggered() -> Self {
        Self {
            threshold: 0.1,
            margin: RootMargin::vertical(-50.0),
            policy: TriggerPolicy::Once,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: TriggerPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Handle describing an observation the host must register.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub key: RevealKey,
    pub threshold: f64,
    pub margin: RootMargin,
}

/// Result of feeding one intersection sample to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crossing {
    /// Signal to apply, if the sample crossed the threshold.
    pub signal: Option<AnimationSignal>,
    /// Whether the controller stopped observing as a result.
    pub released: bool,
}

/// Renderable view of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySnapshot {
    pub state: VisibilityState,
    pub has_triggered: bool,
    pub observing: bool,
}

#[derive(Debug)]
pub struct VisibilityController {
    key: RevealKey,
    options: ObserveOptions,
    state: VisibilityState,
    has_triggered: bool,
    observing: bool,
    notifier: ChangeNotifier<VisibilitySnapshot>,
}

impl VisibilityController {
    #[must_use]
    pub fn new(key: RevealKey, options: ObserveOptions) -> Self {
        Self {
            key,
            options,
            state: VisibilityState::NotVisible,
            has_triggered: false,
            observing: false,
            notifier: ChangeNotifier::default(),
        }
    }

    #[must_use]
    pub const fn key(&self) -> &RevealKey {
        &self.key
    }

    #[must_use]
    pub const fn options(&self) -> &ObserveOptions {
        &self.options
    }

    /// Begins monitoring the element.
    ///
    /// Returns `None` (and does nothing) when the element is not mounted yet,
    /// when the controller is already observing, or when a once-only
    /// controller has already fired.
    pub fn observe(&mut self, mounted: bool) -> Option<Observation> {
        if !mounted {
            tracing::debug!(key = %self.key, "element not mounted, skipping observe");
            return None;
        }
        if self.observing || self.is_settled() {
            return None;
        }

        self.observing = true;
        self.emit();

        Some(Observation {
            key: self.key.clone(),
            threshold: self.options.threshold,
            margin: self.options.margin,
        })
    }

    /// Feeds an intersection ratio measured against the margin-adjusted root.
    pub fn on_intersection(&mut self, ratio: f64) -> Crossing {
        if !self.observing {
            return Crossing::default();
        }

        let visible = crosses_threshold(ratio, self.options.threshold);
        let signal = match (self.state, visible) {
            (VisibilityState::NotVisible, true) => {
                self.state = VisibilityState::Visible;
                self.has_triggered = true;
                Some(AnimationSignal::Animate)
            }
            (VisibilityState::Visible, false) if self.options.policy == TriggerPolicy::Repeat => {
                self.state = VisibilityState::NotVisible;
                Some(AnimationSignal::Reset)
            }
            _ => None,
        };

        if signal.is_none() {
            return Crossing::default();
        }

        tracing::debug!(key = %self.key, ratio, signal = ?signal, "visibility crossing");

        let released = self.is_settled() && self.release_quietly();
        self.emit();

        Crossing { signal, released }
    }

    /// Stops monitoring (element removed or owner unmounted).
    ///
    /// Returns `true` if an observation was actually released.
    pub fn release(&mut self) -> bool {
        let released = self.release_quietly();
        if released {
            self.emit();
        }
        released
    }

    /// A once-only controller that has fired can never change again.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.options.policy == TriggerPolicy::Once && self.has_triggered
    }

    #[must_use]
    pub const fn current_state(&self) -> VisibilitySnapshot {
        VisibilitySnapshot {
            state: self.state,
            has_triggered: self.has_triggered,
            observing: self.observing,
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(&VisibilitySnapshot) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    fn release_quietly(&mut self) -> bool {
        std::mem::replace(&mut self.observing, false)
    }

    fn emit(&mut self) {
        let snapshot = self.current_state();
        self.notifier.notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller(policy: TriggerPolicy) -> VisibilityController {
        let mut c = VisibilityController::new(
            RevealKey::new("about.title"),
            ObserveOptions::section().with_policy(policy),
        );
        assert!(c.observe(true).is_some());
        c
    }

    #[test]
    fn unmounted_element_is_not_observed() {
        let mut c = VisibilityController::new(RevealKey::new("x"), ObserveOptions::section());
        assert!(c.observe(false).is_none());
        assert!(!c.current_state().observing);
        assert_eq!(c.on_intersection(1.0), Crossing::default());
    }

    #[test]
    fn once_policy_fires_a_single_time_across_any_crossings() {
        let mut c = controller(TriggerPolicy::Once);
        let ratios = [0.0, 0.5, 0.0, 0.9, 0.05, 1.0, 0.0, 0.3];

        let fired = ratios
            .iter()
            .filter(|ratio| c.on_intersection(**ratio).signal == Some(AnimationSignal::Animate))
            .count();

        assert_eq!(fired, 1);
        assert_eq!(c.current_state().state, VisibilityState::Visible);
        assert!(c.observe(true).is_none());
    }

    #[test]
    fn once_policy_releases_observation_after_firing() {
        let mut c = controller(TriggerPolicy::Once);
        let crossing = c.on_intersection(0.4);
        assert_eq!(crossing.signal, Some(AnimationSignal::Animate));
        assert!(crossing.released);
        assert!(!c.current_state().observing);
    }

    #[test]
    fn repeat_policy_resets_on_exit_and_fires_again() {
        let mut c = controller(TriggerPolicy::Repeat);
        assert_eq!(c.on_intersection(0.5).signal, Some(AnimationSignal::Animate));
        assert_eq!(c.on_intersection(0.6).signal, None);
        assert_eq!(c.on_intersection(0.0).signal, Some(AnimationSignal::Reset));
        assert_eq!(c.on_intersection(0.0).signal, None);
        assert_eq!(c.on_intersection(0.2).signal, Some(AnimationSignal::Animate));
        assert!(c.current_state().observing);
    }

    #[test]
    fn below_threshold_is_not_a_crossing() {
        let mut c = controller(TriggerPolicy::Repeat);
        assert_eq!(c.on_intersection(0.05).signal, None);
        assert_eq!(c.current_state().state, VisibilityState::NotVisible);
    }

    #[test]
    fn release_stops_further_signals() {
        let mut c = controller(TriggerPolicy::Repeat);
        assert!(c.release());
        assert!(!c.release());
        assert_eq!(c.on_intersection(1.0).signal, None);
    }

    #[test]
    fn listeners_see_each_transition() {
        let mut c = VisibilityController::new(RevealKey::new("k"), ObserveOptions::section());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        c.on_change(move |snap| sink.borrow_mut().push((snap.state, snap.observing)));

        c.observe(true);
        c.on_intersection(1.0);

        assert_eq!(
            *seen.borrow(),
            vec![
                (VisibilityState::NotVisible, true),
                (VisibilityState::Visible, false),
            ]
        );
    }
}
