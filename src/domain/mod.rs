//! Domain layer for the portfolio page.
//!
//! Plain data types shared by every state machine, independent of the browser.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`project`]: Project cards and categories
//! - [`section`]: Page sections and anchor resolution

pub mod error;
pub mod project;
pub mod section;

pub use error::{PortfolioError, Result};
pub use project::{ProjectCard, ProjectCategory, ProjectId};
pub use section::Section;
