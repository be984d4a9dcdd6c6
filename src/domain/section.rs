//! Page sections and anchor resolution.
//!
//! Each section of the page has a stable anchor id used as a scroll target.
//! Navigation controls pass either `#id` or the bare id; anything that does not
//! name a known section resolves to `None` and the navigation is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level section of the page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    About,
    Experience,
    Skills,
    Projects,
    Education,
    Achievements,
    Contact,
}

impl Section {
    /// All sections in document order.
    pub const ALL: [Self; 8] = [
        Self::Home,
        Self::About,
        Self::Experience,
        Self::Skills,
        Self::Projects,
        Self::Education,
        Self::Achievements,
        Self::Contact,
    ];

    /// Anchor id of the section element.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Education => "education",
            Self::Achievements => "achievements",
            Self::Contact => "contact",
        }
    }

    /// Resolves an anchor reference such as `#about` or `about`.
    ///
    /// # Examples
    ///
    /// ```
    /// use portfolio::domain::Section;
    ///
    /// assert_eq!(Section::from_anchor("#skills"), Some(Section::Skills));
    /// assert_eq!(Section::from_anchor("contact"), Some(Section::Contact));
    /// assert_eq!(Section::from_anchor("#blog"), None);
    /// ```
    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let id = anchor.trim().trim_start_matches('#');
        Self::ALL.into_iter().find(|section| section.anchor() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_resolves_from_its_own_anchor() {
        for section in Section::ALL {
            assert_eq!(Section::from_anchor(section.anchor()), Some(section));
            assert_eq!(Section::from_anchor(&format!("#{section}")), Some(section));
        }
    }

    #[test]
    fn unknown_and_empty_anchors_resolve_to_none() {
        assert_eq!(Section::from_anchor(""), None);
        assert_eq!(Section::from_anchor("#"), None);
        assert_eq!(Section::from_anchor("#About"), None);
    }
}
