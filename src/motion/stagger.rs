//! Stagger schedules for sibling animations.
//!
//! A staggered container shares one visibility trigger among its children and
//! offsets each child's start so they animate in index order.

use super::visibility::AnimationSignal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-child start offsets: `child_delay + index × stagger_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaggerSchedule {
    pub child_delay: Duration,
    pub stagger_delay: Duration,
}

impl StaggerSchedule {
    #[must_use]
    pub const fn new(child_delay: Duration, stagger_delay: Duration) -> Self {
        Self {
            child_delay,
            stagger_delay,
        }
    }

    /// Start offset of the child at `index`, relative to the container trigger.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio::motion::StaggerSchedule;
    /// use std::time::Duration;
    ///
    /// let schedule = StaggerSchedule::new(Duration::from_millis(200), Duration::from_millis(100));
    /// assert_eq!(schedule.offset(3), Duration::from_millis(500));
    /// ```
    #[must_use]
    pub fn offset(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.child_delay
            .saturating_add(self.stagger_delay.saturating_mul(steps))
    }

    /// Cues for `count` children reacting to one container signal.
    ///
    /// `Animate` cues are offset by [`StaggerSchedule::offset`]; `Reset` cues all
    /// start immediately.
    #[must_use]
    pub fn cues(&self, count: usize, signal: AnimationSignal) -> Vec<ChildCue> {
        (0..count)
            .map(|index| ChildCue {
                index,
                signal,
                delay: match signal {
                    AnimationSignal::Animate => self.offset(index),
                    AnimationSignal::Reset => Duration::ZERO,
                },
            })
            .collect()
    }
}

/// Start instruction for one child of a staggered container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildCue {
    pub index: usize,
    pub signal: AnimationSignal,
    pub delay: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_offsets_grow_by_the_stagger_in_index_order() {
        let schedule = StaggerSchedule::new(Duration::from_millis(200), Duration::from_millis(150));
        let cues = schedule.cues(5, AnimationSignal::Animate);

        assert_eq!(cues.len(), 5);
        for (i, cue) in cues.iter().enumerate() {
            assert_eq!(cue.index, i);
            assert!(cue.delay >= Duration::from_millis(200 + 150 * i as u64));
        }
        assert!(cues.windows(2).all(|pair| pair[0].delay <= pair[1].delay));
    }

    #[test]
    fn zero_stagger_starts_all_children_together() {
        let schedule = StaggerSchedule::new(Duration::from_millis(50), Duration::ZERO);
        assert!(schedule
            .cues(3, AnimationSignal::Animate)
            .iter()
            .all(|cue| cue.delay == Duration::from_millis(50)));
    }

    #[test]
    fn reset_cues_have_no_delay() {
        let schedule = StaggerSchedule::new(Duration::from_millis(200), Duration::from_millis(100));
        assert!(schedule
            .cues(4, AnimationSignal::Reset)
            .iter()
            .all(|cue| cue.delay.is_zero() && cue.signal == AnimationSignal::Reset));
    }
}
