//! Page-level mode types.
//!
//! These enums control page chrome that is not owned by any single state
//! machine: whether the mobile navigation menu is open, and which project
//! category the projects section is filtered to.
//!
//! # Example
//!
//! ```rust
//! use portfolio::app::modes::{CategoryFilter, MenuMode};
//! use portfolio::domain::ProjectCategory;
//!
//! let menu = MenuMode::Closed.toggled();
//! assert_eq!(menu, MenuMode::Open);
//! assert!(CategoryFilter::All.admits(ProjectCategory::Backend));
//! ```

use crate::domain::ProjectCategory;
use serde::{Deserialize, Serialize};

/// Mobile navigation menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuMode {
    /// Only the hamburger button is shown.
    #[default]
    Closed,
    /// The section list is expanded over the page.
    Open,
}

impl MenuMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Category filter applied to the projects section.
///
/// Changing the filter unmounts cards that no longer match. Their carousels
/// are disposed; cards that become visible get fresh carousels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every project.
    #[default]
    All,
    /// Only projects in one category.
    Only(ProjectCategory),
}

impl CategoryFilter {
    /// Filter buttons in display order.
    pub const CHOICES: [Self; 3] = [
        Self::All,
        Self::Only(ProjectCategory::FullStack),
        Self::Only(ProjectCategory::Backend),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Parses a filter button label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::CHOICES.into_iter().find(|choice| choice.label() == label)
    }

    #[must_use]
    pub fn admits(self, category: ProjectCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_buttons() {
        for choice in CategoryFilter::CHOICES {
            assert_eq!(CategoryFilter::from_label(choice.label()), Some(choice));
        }
        assert_eq!(CategoryFilter::from_label("Frontend"), None);
    }

    #[test]
    fn single_category_filter_excludes_others() {
        let backend = CategoryFilter::Only(ProjectCategory::Backend);
        assert!(backend.admits(ProjectCategory::Backend));
        assert!(!backend.admits(ProjectCategory::FullStack));
    }
}
