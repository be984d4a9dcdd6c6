//! Presentation layer.
//!
//! The crate does not draw anything itself. It computes a [`PageViewModel`]
//! that the host renders:
//!
//! ```text
//! AppState → compute_viewmodel → PageViewModel → host renderer → DOM
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable page state

pub mod viewmodel;

pub use viewmodel::{CarouselView, ContactView, MenuView, PageViewModel, ProjectView};
