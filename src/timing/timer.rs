//! Scoped timer handles.
//!
//! State machines never own a platform timer directly. They hold a [`TimerSlot`]
//! per purpose and emit [`TimerCommand`]s that the host executes. Every arm
//! bumps the slot generation, so a fire delivered for an older generation (or
//! for an owner that no longer exists) is recognised as stale and dropped.

use crate::domain::ProjectId;
use std::time::Duration;

/// Component instance a timer belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimerOwner {
    Carousel(ProjectId),
    Typewriter,
}

/// What a timer is for, within its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    /// One-shot delay between a carousel becoming ready and autoplay starting.
    AutoplayStart,
    /// Repeating carousel advance.
    Autoplay,
    /// One-shot typewriter step.
    Typing,
}

/// Identity of one armed timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub owner: TimerOwner,
    pub purpose: TimerPurpose,
    pub generation: u64,
}

/// Instruction for the host's timer facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a timeout (`repeat == false`) or an interval (`repeat == true`).
    Start {
        id: TimerId,
        delay: Duration,
        repeat: bool,
    },
    /// Cancel a previously started timer. Cancelling an unknown id is a no-op.
    Cancel { id: TimerId },
}

impl TimerCommand {
    /// Id the command refers to.
    #[must_use]
    pub const fn id(&self) -> &TimerId {
        match self {
            Self::Start { id, .. } | Self::Cancel { id } => id,
        }
    }
}

/// A single timer slot: at most one live timer at a time.
///
/// Arming always cancels the previous timer first, and [`TimerSlot::disarm`]
/// releases unconditionally, so leaving a state through any path frees the
/// timer it acquired.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    owner: TimerOwner,
    purpose: TimerPurpose,
    generation: u64,
    active: Option<(TimerId, bool)>,
}

impl TimerSlot {
    #[must_use]
    pub const fn new(owner: TimerOwner, purpose: TimerPurpose) -> Self {
        Self {
            owner,
            purpose,
            generation: 0,
            active: None,
        }
    }

    /// Starts a new timer, cancelling the current one if armed.
    pub fn arm(&mut self, delay: Duration, repeat: bool) -> Vec<TimerCommand> {
        let mut commands: Vec<TimerCommand> = self.disarm().into_iter().collect();

        self.generation += 1;
        let id = TimerId {
            owner: self.owner.clone(),
            purpose: self.purpose,
            generation: self.generation,
        };

        tracing::trace!(timer = ?id, delay_ms = delay.as_millis(), repeat, "arming timer");

        self.active = Some((id.clone(), repeat));
        commands.push(TimerCommand::Start { id, delay, repeat });
        commands
    }

    /// Cancels the live timer, if any.
    pub fn disarm(&mut self) -> Option<TimerCommand> {
        self.active.take().map(|(id, _)| {
            tracing::trace!(timer = ?id, "disarming timer");
            TimerCommand::Cancel { id }
        })
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Id of the live timer, if any.
    #[must_use]
    pub fn active_id(&self) -> Option<&TimerId> {
        self.active.as_ref().map(|(id, _)| id)
    }

    /// Accepts a fire notification.
    ///
    /// Returns `true` only when `id` is the live timer of this slot. A one-shot
    /// timer is considered spent after firing; an interval stays armed.
    pub fn fire(&mut self, id: &TimerId) -> bool {
        match &self.active {
            Some((live, repeat)) if live == id => {
                if !*repeat {
                    self.active = None;
                }
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> TimerSlot {
        TimerSlot::new(TimerOwner::Typewriter, TimerPurpose::Typing)
    }

    #[test]
    fn arming_twice_cancels_the_first_timer() {
        let mut slot = slot();
        let first = slot.arm(Duration::from_millis(10), false);
        assert_eq!(first.len(), 1);
        let first_id = first[0].id().clone();

        let second = slot.arm(Duration::from_millis(10), false);
        assert_eq!(second[0], TimerCommand::Cancel { id: first_id.clone() });
        assert!(matches!(&second[1], TimerCommand::Start { id, .. } if id.generation == 2));
        assert!(!slot.fire(&first_id));
    }

    #[test]
    fn one_shot_is_spent_after_firing_but_interval_is_not() {
        let mut once = slot();
        let id = once.arm(Duration::from_millis(5), false)[0].id().clone();
        assert!(once.fire(&id));
        assert!(!once.is_armed());
        assert!(!once.fire(&id));

        let mut every = slot();
        let id = every.arm(Duration::from_millis(5), true)[0].id().clone();
        assert!(every.fire(&id));
        assert!(every.fire(&id));
        assert!(every.is_armed());
    }

    #[test]
    fn disarm_on_empty_slot_emits_nothing() {
        let mut slot = slot();
        assert!(slot.disarm().is_none());
    }
}
