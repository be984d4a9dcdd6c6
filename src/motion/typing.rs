//! Typewriter effect for the hero banner.
//!
//! Types one message a character at a time, holds it, clears it, and moves on
//! to the next message, wrapping around forever.

use crate::timing::{ChangeNotifier, SubscriptionId, TimerCommand, TimerId, TimerOwner, TimerPurpose, TimerSlot};
use std::time::Duration;

/// Typing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay between characters.
    pub type_delay: Duration,
    /// How long a fully typed message stays on screen.
    pub hold_delay: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(60),
            hold_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug)]
pub struct Typewriter {
    messages: Vec<String>,
    index: usize,
    typed: usize,
    config: TypewriterConfig,
    slot: TimerSlot,
    notifier: ChangeNotifier<String>,
}

impl Typewriter {
    #[must_use]
    pub fn new(messages: Vec<String>, config: TypewriterConfig) -> Self {
        Self {
            messages,
            index: 0,
            typed: 0,
            config,
            slot: TimerSlot::new(TimerOwner::Typewriter, TimerPurpose::Typing),
            notifier: ChangeNotifier::default(),
        }
    }

    /// Arms the first step. Does nothing without messages.
    pub fn start(&mut self) -> Vec<TimerCommand> {
        if self.messages.is_empty() {
            return Vec::new();
        }
        self.schedule_next()
    }

    /// Advances on a timer fire. Returns `None` for stale or foreign timers.
    pub fn on_timer(&mut self, id: &TimerId) -> Option<Vec<TimerCommand>> {
        if !self.slot.fire(id) {
            return None;
        }

        let Some(message_len) = self.messages.get(self.index).map(|m| m.chars().count()) else {
            return Some(Vec::new());
        };

        if self.typed < message_len {
            self.typed += 1;
        } else {
            self.typed = 0;
            self.index = (self.index + 1) % self.messages.len();
        }

        let text = self.text();
        self.notifier.notify(&text);

        Some(self.schedule_next())
    }

    /// Currently visible text.
    #[must_use]
    pub fn text(&self) -> String {
        self.messages
            .get(self.index)
            .map(|m| m.chars().take(self.typed).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn message_index(&self) -> usize {
        self.index
    }

    /// Releases the pending step timer.
    pub fn dispose(&mut self) -> Option<TimerCommand> {
        self.notifier.clear();
        self.slot.disarm()
    }

    pub fn on_change(&mut self, listener: impl FnMut(&String) + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    fn schedule_next(&mut self) -> Vec<TimerCommand> {
        let full = self
            .messages
            .get(self.index)
            .is_some_and(|m| self.typed >= m.chars().count());
        let delay = if full {
            self.config.hold_delay
        } else {
            self.config.type_delay
        };
        self.slot.arm(delay, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(messages: &[&str]) -> (Typewriter, TimerId) {
        let mut tw = Typewriter::new(
            messages.iter().map(|s| (*s).to_string()).collect(),
            TypewriterConfig::default(),
        );
        let commands = tw.start();
        let id = commands[0].id().clone();
        (tw, id)
    }

    fn step(tw: &mut Typewriter, id: &TimerId) -> (TimerId, Duration) {
        let commands = tw.on_timer(id).unwrap();
        match commands.last().unwrap() {
            TimerCommand::Start { id, delay, .. } => (id.clone(), *delay),
            TimerCommand::Cancel { .. } => panic!("expected a start"),
        }
    }

    #[test]
    fn types_holds_then_moves_to_next_message() {
        let (mut tw, mut id) = started(&["ab", "c"]);

        let (next, delay) = step(&mut tw, &id);
        assert_eq!(tw.text(), "a");
        assert_eq!(delay, Duration::from_millis(60));
        id = next;

        let (next, delay) = step(&mut tw, &id);
        assert_eq!(tw.text(), "ab");
        assert_eq!(delay, Duration::from_millis(2000));
        id = next;

        step(&mut tw, &id);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.message_index(), 1);
    }

    #[test]
    fn wraps_around_after_the_last_message() {
        let (mut tw, mut id) = started(&["x"]);
        for _ in 0..2 {
            id = step(&mut tw, &id).0;
        }
        assert_eq!(tw.message_index(), 0);
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn stale_fire_is_ignored() {
        let (mut tw, id) = started(&["hello"]);
        step(&mut tw, &id);
        assert!(tw.on_timer(&id).is_none());
        assert_eq!(tw.text(), "h");
    }

    #[test]
    fn empty_message_list_never_arms() {
        let mut tw = Typewriter::new(Vec::new(), TypewriterConfig::default());
        assert!(tw.start().is_empty());
        assert!(tw.dispose().is_none());
    }
}
