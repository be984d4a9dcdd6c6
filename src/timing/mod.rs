//! Shared timing and observation utilities.
//!
//! Everything here is platform-agnostic: timers are described as commands for
//! the host, intersection is plain geometry, and change notification is an
//! in-process listener list.
//!
//! - [`timer`]: Scoped timer slots and the commands they emit
//! - [`intersection`]: Root-margin aware intersection ratios
//! - [`notify`]: Change subscriptions for state machine snapshots

pub mod intersection;
pub mod notify;
pub mod timer;

pub use intersection::{crosses_threshold, intersection_ratio, ElementRect, RootMargin};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use timer::{TimerCommand, TimerId, TimerOwner, TimerPurpose, TimerSlot};
