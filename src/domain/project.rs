//! Project card model and category filtering.
//!
//! A project card carries the fixed list of screenshot URLs that its carousel
//! cycles through. Cards without screenshots render a static "coming soon"
//! panel instead and never own a carousel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a project card.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Category a project is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[serde(rename = "Full Stack")]
    FullStack,
    Backend,
}

impl ProjectCategory {
    /// Label shown on the card and on the filter buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullStack => "Full Stack",
            Self::Backend => "Backend",
        }
    }
}

/// Project card as listed in the projects section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: ProjectId,
    pub title: String,
    pub category: ProjectCategory,
    /// Screenshot URLs, in display order. Empty for "coming soon" cards.
    #[serde(default)]
    pub images: Vec<String>,
}

impl ProjectCard {
    #[must_use]
    pub fn new(id: &str, title: &str, category: ProjectCategory, images: &[&str]) -> Self {
        Self {
            id: ProjectId::from(id),
            title: title.to_string(),
            category,
            images: images.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Whether the card shows a carousel.
    #[must_use]
    pub fn has_gallery(&self) -> bool {
        !self.images.is_empty()
    }
}
