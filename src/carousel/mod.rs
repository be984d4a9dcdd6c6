//! Autoplaying image carousel for project screenshots.
//!
//! One carousel per project card. It preloads the first few images, waits a
//! moment after they resolve, then advances on an interval while the card is
//! visible and the pointer is not over it.
//!
//! # State Machine
//!
//! ```text
//! Loading ──(first min(3, len) preloads resolved)──▶ ReadyPaused
//!                                                       │  ▲
//!                        start delay & visible,         │  │ hover enter,
//!                        hover leave & visible          ▼  │ hidden
//!                                                    ReadyPlaying
//!
//! any state ──dispose()──▶ Disposed
//! ```
//!
//! # Autoplay Timer
//!
//! The interval runs iff `len > 1 ∧ ready ∧ ¬paused ∧ visible`. It is
//! re-created only when one of those inputs changes, so manual navigation
//! never restarts or duplicates it.

use crate::domain::{PortfolioError, ProjectId, Result};
use crate::timing::{
    ChangeNotifier, SubscriptionId, TimerCommand, TimerId, TimerOwner, TimerPurpose, TimerSlot,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

/// Carousel timing and preload window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Interval between automatic advances.
    pub autoplay_interval: Duration,
    /// Delay between becoming ready and starting autoplay.
    pub start_delay: Duration,
    /// Number of leading images that must resolve before the carousel is ready.
    pub preload_count: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(5000),
            start_delay: Duration::from_millis(1000),
            preload_count: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CarouselPhase {
    Loading,
    ReadyPaused,
    ReadyPlaying,
    Disposed,
}

/// How a preload attempt resolved. Both count towards readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded,
    Failed,
}

/// Renderable view of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselSnapshot {
    pub phase: CarouselPhase,
    pub current_index: usize,
    pub image_count: usize,
    /// Image to display; `None` once the carousel has degraded to a placeholder.
    pub image: Option<String>,
    pub degraded: bool,
    pub autoplay_active: bool,
    /// Navigation buttons and dots are shown only when ready with more than one image.
    pub show_controls: bool,
}

type AutoplayInputs = (bool, bool, bool, usize);

#[derive(Debug)]
pub struct Carousel {
    id: ProjectId,
    images: Vec<String>,
    config: CarouselConfig,
    current: usize,
    paused: bool,
    ready: bool,
    visible: bool,
    hovered: bool,
    awaiting_visibility: bool,
    degraded: bool,
    disposed: bool,
    resolved: BTreeSet<usize>,
    start_slot: TimerSlot,
    autoplay_slot: TimerSlot,
    autoplay_inputs: Option<AutoplayInputs>,
    notifier: ChangeNotifier<CarouselSnapshot>,
}

impl Carousel {
    /// Creates a carousel in the `Loading` state.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if `images` is empty.
    pub fn new(id: ProjectId, images: Vec<String>, visible: bool, config: CarouselConfig) -> Result<Self> {
        if images.is_empty() {
            return Err(PortfolioError::Config(format!(
                "carousel for {id} needs at least one image"
            )));
        }

        Ok(Self {
            start_slot: TimerSlot::new(TimerOwner::Carousel(id.clone()), TimerPurpose::AutoplayStart),
            autoplay_slot: TimerSlot::new(TimerOwner::Carousel(id.clone()), TimerPurpose::Autoplay),
            id,
            images,
            config,
            current: 0,
            paused: true,
            ready: false,
            visible,
            hovered: false,
            awaiting_visibility: false,
            degraded: false,
            disposed: false,
            resolved: BTreeSet::new(),
            autoplay_inputs: None,
            notifier: ChangeNotifier::default(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> &ProjectId {
        &self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    fn preload_window(&self) -> usize {
        self.config.preload_count.min(self.images.len())
    }

    /// Images the host should preload, with their indices.
    #[must_use]
    pub fn preload_targets(&self) -> Vec<(usize, &str)> {
        self.images
            .iter()
            .take(self.preload_window())
            .enumerate()
            .map(|(i, url)| (i, url.as_str()))
            .collect()
    }

    /// Records one resolved preload attempt.
    ///
    /// Late callbacks (after dispose or after ready) and indices outside the
    /// preload window are ignored.
    pub fn on_preload_resolved(&mut self, index: usize, outcome: PreloadOutcome) -> Vec<TimerCommand> {
        if self.disposed || self.ready || index >= self.preload_window() {
            return Vec::new();
        }

        self.resolved.insert(index);
        tracing::trace!(carousel = %self.id, index, outcome = ?outcome, resolved = self.resolved.len(), "preload resolved");

        if self.resolved.len() < self.preload_window() {
            return Vec::new();
        }

        self.ready = true;
        tracing::debug!(carousel = %self.id, "carousel ready");

        let mut commands = self.start_slot.arm(self.config.start_delay, false);
        commands.extend(self.reconcile_autoplay());
        self.emit();
        commands
    }

    /// Handles a timer fire. Returns `None` if the timer is not live for this carousel.
    pub fn on_timer(&mut self, id: &TimerId) -> Option<Vec<TimerCommand>> {
        if self.disposed {
            return None;
        }

        if self.start_slot.fire(id) {
            if !self.visible {
                self.awaiting_visibility = true;
            } else if !self.hovered {
                self.paused = false;
            }
            let commands = self.reconcile_autoplay();
            self.emit();
            return Some(commands);
        }

        if self.autoplay_slot.fire(id) {
            self.step_forward();
            self.emit();
            return Some(Vec::new());
        }

        None
    }

    /// Updates the visibility input from the parent card.
    pub fn set_visible(&mut self, visible: bool) -> Vec<TimerCommand> {
        if self.disposed || self.visible == visible {
            return Vec::new();
        }

        self.visible = visible;
        if visible && self.awaiting_visibility && !self.hovered {
            self.awaiting_visibility = false;
            self.paused = false;
        }

        let commands = self.reconcile_autoplay();
        self.emit();
        commands
    }

    /// Pointer entered (`true`) or left (`false`) the carousel.
    pub fn set_hovered(&mut self, hovered: bool) -> Vec<TimerCommand> {
        if self.disposed {
            return Vec::new();
        }

        self.hovered = hovered;
        if !self.ready {
            return Vec::new();
        }

        if hovered {
            self.paused = true;
        } else if self.visible {
            self.paused = false;
            self.awaiting_visibility = false;
        }

        let commands = self.reconcile_autoplay();
        self.emit();
        commands
    }

    /// Shows the next image, wrapping to the first. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if !self.navigable() {
            return false;
        }
        let changed = self.step_forward();
        if changed {
            self.emit();
        }
        changed
    }

    /// Shows the previous image, wrapping to the last. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        if !self.navigable() {
            return false;
        }
        let len = self.images.len();
        self.set_index((self.current + len - 1) % len)
    }

    /// Jumps to `index`. Out-of-range indices are rejected.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.navigable() || index >= self.images.len() {
            return false;
        }
        self.set_index(index)
    }

    /// The currently displayed image failed to load; switch to the placeholder for good.
    pub fn on_display_error(&mut self) {
        if self.disposed || self.degraded {
            return;
        }
        tracing::debug!(carousel = %self.id, index = self.current, "image failed, showing placeholder");
        self.degraded = true;
        self.emit();
    }

    /// Releases every timer and listener. Further input is ignored.
    pub fn dispose(&mut self) -> Vec<TimerCommand> {
        if self.disposed {
            return Vec::new();
        }
        self.disposed = true;
        self.notifier.clear();
        self.start_slot
            .disarm()
            .into_iter()
            .chain(self.autoplay_slot.disarm())
            .collect()
    }

    #[must_use]
    pub const fn phase(&self) -> CarouselPhase {
        if self.disposed {
            CarouselPhase::Disposed
        } else if !self.ready {
            CarouselPhase::Loading
        } else if self.paused || !self.visible {
            CarouselPhase::ReadyPaused
        } else {
            CarouselPhase::ReadyPlaying
        }
    }

    #[must_use]
    pub const fn autoplay_active(&self) -> bool {
        self.autoplay_slot.is_armed()
    }

    #[must_use]
    pub fn current_state(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            phase: self.phase(),
            current_index: self.current,
            image_count: self.images.len(),
            image: if self.degraded {
                None
            } else {
                self.images.get(self.current).cloned()
            },
            degraded: self.degraded,
            autoplay_active: self.autoplay_active(),
            show_controls: self.ready && self.images.len() > 1,
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(&CarouselSnapshot) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    const fn navigable(&self) -> bool {
        self.ready && !self.disposed
    }

    fn step_forward(&mut self) -> bool {
        let next = (self.current + 1) % self.images.len();
        let changed = next != self.current;
        self.current = next;
        changed
    }

    fn set_index(&mut self, index: usize) -> bool {
        if index == self.current {
            return false;
        }
        self.current = index;
        self.emit();
        true
    }

    fn should_autoplay(&self) -> bool {
        self.images.len() > 1 && self.ready && !self.paused && self.visible && !self.disposed
    }

    /// Re-creates the autoplay interval when any of its inputs changed.
    fn reconcile_autoplay(&mut self) -> Vec<TimerCommand> {
        let inputs = (self.paused, self.ready, self.visible, self.images.len());
        if self.autoplay_inputs == Some(inputs) {
            return Vec::new();
        }
        self.autoplay_inputs = Some(inputs);

        let mut commands: Vec<TimerCommand> = self.autoplay_slot.disarm().into_iter().collect();
        if self.should_autoplay() {
            commands.extend(self.autoplay_slot.arm(self.config.autoplay_interval, true));
        }

        tracing::trace!(carousel = %self.id, active = self.autoplay_slot.is_armed(), "autoplay reconciled");
        commands
    }

    fn emit(&mut self) {
        if self.notifier.is_empty() {
            return;
        }
        let snapshot = self.current_state();
        self.notifier.notify(&snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("/shots/{i}.png")).collect()
    }

    fn carousel(n: usize, visible: bool) -> Carousel {
        Carousel::new(ProjectId::from("demo"), images(n), visible, CarouselConfig::default()).unwrap()
    }

    fn start_id(commands: &[TimerCommand], purpose: TimerPurpose) -> Option<TimerId> {
        commands.iter().find_map(|c| match c {
            TimerCommand::Start { id, .. } if id.purpose == purpose => Some(id.clone()),
            _ => None,
        })
    }

    /// Resolves the preload window and returns the start-delay timer id.
    fn make_ready(c: &mut Carousel) -> TimerId {
        let targets: Vec<usize> = c.preload_targets().into_iter().map(|(i, _)| i).collect();
        let mut commands = Vec::new();
        for i in targets {
            commands.extend(c.on_preload_resolved(i, PreloadOutcome::Loaded));
        }
        start_id(&commands, TimerPurpose::AutoplayStart).unwrap()
    }

    /// Ready and past the start delay; returns the autoplay interval id if armed.
    fn playing(n: usize) -> (Carousel, Option<TimerId>) {
        let mut c = carousel(n, true);
        let start = make_ready(&mut c);
        let commands = c.on_timer(&start).unwrap();
        (c, start_id(&commands, TimerPurpose::Autoplay))
    }

    #[test]
    fn empty_image_list_is_rejected() {
        let err = Carousel::new(ProjectId::from("x"), Vec::new(), true, CarouselConfig::default()).unwrap_err();
        assert!(matches!(err, PortfolioError::Config(_)));
    }

    #[test]
    fn becomes_ready_after_preload_window_even_with_failures() {
        let mut c = carousel(6, true);
        assert_eq!(c.preload_targets().len(), 3);
        assert!(c.on_preload_resolved(0, PreloadOutcome::Failed).is_empty());
        assert!(c.on_preload_resolved(0, PreloadOutcome::Loaded).is_empty());
        assert!(c.on_preload_resolved(1, PreloadOutcome::Loaded).is_empty());
        assert_eq!(c.phase(), CarouselPhase::Loading);

        let commands = c.on_preload_resolved(2, PreloadOutcome::Failed);
        assert!(start_id(&commands, TimerPurpose::AutoplayStart).is_some());
        assert_eq!(c.phase(), CarouselPhase::ReadyPaused);
        assert!(!c.autoplay_active());
    }

    #[test]
    fn preload_window_shrinks_for_short_lists() {
        let c = carousel(2, true);
        assert_eq!(c.preload_targets().len(), 2);
    }

    #[test]
    fn start_delay_begins_autoplay_when_visible() {
        let (c, autoplay) = playing(4);
        assert!(autoplay.is_some());
        assert_eq!(c.phase(), CarouselPhase::ReadyPlaying);
    }

    #[test]
    fn hidden_carousel_waits_for_visibility_before_playing() {
        let mut c = carousel(4, false);
        let start = make_ready(&mut c);
        assert!(c.on_timer(&start).unwrap().is_empty());
        assert_eq!(c.phase(), CarouselPhase::ReadyPaused);

        let commands = c.set_visible(true);
        assert!(start_id(&commands, TimerPurpose::Autoplay).is_some());
        assert_eq!(c.phase(), CarouselPhase::ReadyPlaying);
    }

    #[test]
    fn next_and_prev_cycle_back_to_start() {
        for n in [2, 3, 7] {
            let (mut c, _) = playing(n);
            c.go_to(n - 1);
            let start = c.current_index();
            for _ in 0..n {
                c.next();
            }
            assert_eq!(c.current_index(), start);
            for _ in 0..n {
                c.prev();
            }
            assert_eq!(c.current_index(), start);
        }
    }

    #[test]
    fn single_image_never_arms_autoplay_and_stays_at_zero() {
        let mut c = carousel(1, true);
        let start = make_ready(&mut c);
        let commands = c.on_timer(&start).unwrap();
        assert!(start_id(&commands, TimerPurpose::Autoplay).is_none());
        assert!(!c.next());
        assert!(!c.prev());
        assert_eq!(c.current_index(), 0);
        assert!(c.set_hovered(false).is_empty());
        assert!(!c.autoplay_active());
        assert!(!c.current_state().show_controls);
    }

    #[test]
    fn autoplay_tick_advances() {
        let (mut c, autoplay) = playing(3);
        let id = autoplay.unwrap();
        assert!(c.on_timer(&id).unwrap().is_empty());
        assert!(c.on_timer(&id).is_some());
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let (mut c, autoplay) = playing(3);
        let commands = c.set_hovered(true);
        assert_eq!(commands, vec![TimerCommand::Cancel { id: autoplay.clone().unwrap() }]);
        assert_eq!(c.phase(), CarouselPhase::ReadyPaused);
        assert!(c.on_timer(&autoplay.unwrap()).is_none());

        let commands = c.set_hovered(false);
        assert!(start_id(&commands, TimerPurpose::Autoplay).is_some());
    }

    #[test]
    fn hover_leave_does_not_resume_while_hidden() {
        let (mut c, _) = playing(3);
        c.set_hovered(true);
        c.set_visible(false);
        assert!(c.set_hovered(false).is_empty());
        assert!(!c.autoplay_active());
    }

    #[test]
    fn hiding_cancels_autoplay_and_showing_restarts_it() {
        let (mut c, autoplay) = playing(3);
        let old = autoplay.unwrap();

        let commands = c.set_visible(false);
        assert_eq!(commands, vec![TimerCommand::Cancel { id: old.clone() }]);
        assert!(c.on_timer(&old).is_none());
        assert_eq!(c.current_index(), 0);

        let commands = c.set_visible(true);
        let fresh = start_id(&commands, TimerPurpose::Autoplay).unwrap();
        assert_ne!(fresh, old);
    }

    #[test]
    fn go_to_current_index_is_a_no_op() {
        let (mut c, autoplay) = playing(4);
        c.go_to(2);
        let before = c.current_state();
        assert!(!c.go_to(2));
        assert_eq!(c.current_state(), before);
        assert!(c.on_timer(&autoplay.unwrap()).is_some());
    }

    #[test]
    fn navigation_is_ignored_while_loading() {
        let mut c = carousel(3, true);
        assert!(!c.next());
        assert!(!c.go_to(1));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn out_of_range_go_to_is_rejected() {
        let (mut c, _) = playing(3);
        assert!(!c.go_to(3));
    }

    #[test]
    fn display_error_degrades_permanently() {
        let (mut c, _) = playing(3);
        c.on_display_error();
        c.next();
        let snapshot = c.current_state();
        assert!(snapshot.degraded);
        assert!(snapshot.image.is_none());
    }

    #[test]
    fn dispose_cancels_timers_and_ignores_late_callbacks() {
        let mut c = carousel(3, true);
        c.on_preload_resolved(0, PreloadOutcome::Loaded);
        let commands = c.dispose();
        assert!(commands.is_empty());
        assert!(c.on_preload_resolved(1, PreloadOutcome::Loaded).is_empty());
        assert!(c.on_preload_resolved(2, PreloadOutcome::Loaded).is_empty());
        assert_eq!(c.phase(), CarouselPhase::Disposed);

        let (mut c, autoplay) = playing(3);
        let commands = c.dispose();
        assert_eq!(commands, vec![TimerCommand::Cancel { id: autoplay.clone().unwrap() }]);
        assert!(c.on_timer(&autoplay.unwrap()).is_none());
    }

    #[test]
    fn hover_during_start_delay_keeps_it_paused() {
        let mut c = carousel(3, true);
        let start = make_ready(&mut c);
        c.set_hovered(true);
        assert!(c.on_timer(&start).unwrap().is_empty());
        assert_eq!(c.phase(), CarouselPhase::ReadyPaused);
    }
}
