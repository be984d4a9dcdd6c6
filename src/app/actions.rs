//! Actions representing side effects to be executed by the page host.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing DOM, timer, or network events.
//! Actions bridge pure state transitions and effectful operations like starting
//! timers, registering intersection observers, or posting the contact form.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The host executes them in
//! order; a `Cancel` for a timer always precedes the `Start` that replaces it.
//!
//! # Example
//!
//! ```rust
//! use portfolio::app::Action;
//! use portfolio::domain::Section;
//!
//! let actions = vec![Action::ScrollTo(Section::Contact)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::contact::ContactFields;
use crate::domain::{ProjectId, Section};
use crate::motion::{AnimationPreset, AnimationSignal, RevealKey};
use crate::timing::{RootMargin, TimerCommand};
use std::time::Duration;

/// Commands representing side effects to be executed by the page host.
///
/// Actions are produced by the event handler and executed by the host. They
/// are the boundary between the state machines and the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Starts or cancels a platform timer.
    ///
    /// When the timer fires the host sends back `Event::TimerFired` with the
    /// same id. Cancelling an id that already fired is a no-op.
    Timer(TimerCommand),

    /// Registers an intersection observation for a reveal element.
    ///
    /// The host reports every threshold crossing as `Event::Intersection`.
    Observe {
        /// Element to observe.
        key: RevealKey,
        /// Visible fraction that counts as "in view".
        threshold: f64,
        /// Root margin applied to the viewport.
        margin: RootMargin,
    },

    /// Stops observing a reveal element.
    Unobserve {
        /// Element to stop observing.
        key: RevealKey,
    },

    /// Transitions an element (or one child of a staggered container).
    Animate {
        /// Observed element the animation belongs to.
        key: RevealKey,
        /// Child index within a staggered container; `None` for the element itself.
        child: Option<usize>,
        /// Whether to move to the preset's `animate` or `initial` state.
        signal: AnimationSignal,
        /// Delay before the transition starts.
        delay: Duration,
        /// Visual states and transition timing.
        preset: AnimationPreset,
    },

    /// Loads a carousel image off-screen.
    ///
    /// The host answers with `Event::PreloadResolved` on load or error.
    PreloadImage {
        /// Card the image belongs to.
        project: ProjectId,
        /// Position within the card's image list.
        index: usize,
        /// Relative image URL.
        url: String,
    },

    /// Posts the contact payload as JSON.
    ///
    /// The host answers with `Event::SubmissionResolved`. Emitted at most once
    /// per pending submission.
    PostContact {
        /// Form relay URL.
        endpoint: String,
        /// Body fields.
        payload: ContactFields,
    },

    /// Smoothly scrolls a section into view. A missing element is a no-op.
    ScrollTo(Section),
}

impl Action {
    /// Wraps timer commands produced by a state machine.
    pub fn timers(commands: impl IntoIterator<Item = TimerCommand>) -> impl Iterator<Item = Self> {
        commands.into_iter().map(Self::Timer)
    }
}
