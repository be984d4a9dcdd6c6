//! View model types representing renderable page state.
//!
//! This module defines immutable view models computed from application state.
//! View models contain display-ready data only: which menu state to draw, the
//! hero's typed text, each visible project card with its carousel frame, and
//! the contact form with its inline status message.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the host's renderer. They are serializable so a JavaScript renderer can take
//! them as JSON.
//!
//! # Example
//!
//! ```rust
//! use portfolio::ui::viewmodel::{ContactView, MenuView};
//! use portfolio::contact::{ContactFields, SubmissionStatus};
//!
//! let contact = ContactView {
//!     fields: ContactFields::default(),
//!     status: SubmissionStatus::Idle,
//!     status_message: None,
//!     invalid_field: None,
//!     inputs_enabled: true,
//! };
//! let menu = MenuView { open: false, sections: vec![] };
//! assert!(contact.inputs_enabled && !menu.open);
//! ```

use crate::carousel::CarouselPhase;
use crate::contact::{ContactFields, Field, SubmissionStatus};
use crate::domain::{ProjectCategory, ProjectId, Section};
use serde::Serialize;

/// Complete page view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageViewModel {
    /// Navigation bar and mobile menu.
    pub menu: MenuView,

    /// Text currently typed in the hero banner.
    pub hero_text: String,

    /// Label of the active project filter.
    pub active_category: &'static str,

    /// Filter buttons in display order.
    pub categories: Vec<&'static str>,

    /// Cards admitted by the active filter, in catalog order.
    pub projects: Vec<ProjectView>,

    /// Contact form.
    pub contact: ContactView,
}

/// Navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    /// Whether the mobile menu is expanded.
    pub open: bool,

    /// Sections linked from the navigation bar.
    pub sections: Vec<Section>,
}

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub title: String,
    pub category: ProjectCategory,

    /// `None` for cards without screenshots ("coming soon").
    pub carousel: Option<CarouselView>,
}

/// Carousel frame of a project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub phase: CarouselPhase,
    pub current_index: usize,
    pub image_count: usize,

    /// Image URL to display. `None` while loading or once degraded to a placeholder.
    pub image: Option<String>,

    /// Shows the loading spinner.
    pub loading: bool,

    /// Shows the "image unavailable" placeholder.
    pub degraded: bool,

    /// Shows arrows and dots.
    pub show_controls: bool,
}

/// Contact form fields and submission feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub fields: ContactFields,
    pub status: SubmissionStatus,

    /// Inline message under the submit button.
    pub status_message: Option<&'static str>,

    /// Field to highlight after a rejected local validation.
    pub invalid_field: Option<Field>,

    /// `false` while a submission is pending.
    pub inputs_enabled: bool,
}
