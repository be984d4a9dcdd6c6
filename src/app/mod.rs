//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the page host (`main.rs` in the browser build)
//! and the state machines in [`motion`](crate::motion),
//! [`carousel`](crate::carousel), and [`contact`](crate::contact).
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! DOM / Timers / Fetch → Events → Event Handler → State Mutations → Actions → Host
//!          ↑                                                                   │
//!          └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`layout`]: Reveal call sites and page content
//! - [`modes`]: Menu and project filter types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod layout;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{CategoryFilter, MenuMode};
pub use state::AppState;
