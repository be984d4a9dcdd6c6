//! Animation presets as immutable value objects.
//!
//! A preset describes where an element starts, where it ends up, and how it
//! gets there. Presets are plain configuration: they are loaded once (from the
//! embedded TOML or a caller-supplied document) and handed to whoever needs
//! them. There is no process-wide registry.
//!
//! # Format
//!
//! ```toml
//! [presets.fade-in-up]
//! initial = { opacity = 0.0, y = 60.0 }
//! animate = { opacity = 1.0, y = 0.0 }
//! transition = { duration_ms = 600, easing = "ease-out" }
//! ```

use crate::domain::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const FADE_IN_UP: &str = "fade-in-up";
pub const FADE_IN_DOWN: &str = "fade-in-down";
pub const FADE_IN_LEFT: &str = "fade-in-left";
pub const FADE_IN_RIGHT: &str = "fade-in-right";
pub const SCALE_IN: &str = "scale-in";
pub const STAGGER_ITEM: &str = "stagger-item";
pub const SLIDE_IN_FROM_BOTTOM: &str = "slide-in-from-bottom";

/// Easing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// CSS timing-function keyword.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }
}

/// Visual properties an animation interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualState {
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    pub scale: f64,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl VisualState {
    /// CSS `transform` value for the offsets and scale.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.x, self.y, self.scale)
    }
}

/// Timing of a transition between two visual states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u64,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl Transition {
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// One named animation: initial state, target state, and transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationPreset {
    pub initial: VisualState,
    pub animate: VisualState,
    pub transition: Transition,
}

/// Immutable set of named presets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetLibrary {
    presets: BTreeMap<String, AnimationPreset>,
}

impl PresetLibrary {
    /// Parses a preset document.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Preset`] if the TOML is malformed or a preset
    /// is missing a required field.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PortfolioError::Preset(e.to_string()))
    }

    /// Loads a preset document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Io`] if the file cannot be read, or
    /// [`PortfolioError::Preset`] if it does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// The presets shipped with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded document is broken.
    pub fn built_in() -> Result<Self> {
        Self::from_toml(include_str!("../../presets/motion.toml"))
    }

    /// Returns a library where presets from `overrides` replace same-named ones.
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut presets = self.presets.clone();
        presets.extend(overrides.presets.iter().map(|(k, v)| (k.clone(), *v)));
        Self { presets }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnimationPreset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetLibrary {
    /// Returns the built-in presets.
    ///
    /// # Panics
    ///
    /// Panics if the embedded preset document fails to parse (should never occur).
    fn default() -> Self {
        Self::built_in().expect("Built-in motion presets should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_library_has_every_named_preset() {
        let library = PresetLibrary::default();
        for name in [
            FADE_IN_UP,
            FADE_IN_DOWN,
            FADE_IN_LEFT,
            FADE_IN_RIGHT,
            SCALE_IN,
            STAGGER_ITEM,
            SLIDE_IN_FROM_BOTTOM,
        ] {
            assert!(library.get(name).is_some(), "missing preset {name}");
        }
    }

    #[test]
    fn omitted_visual_fields_take_defaults() {
        let library = PresetLibrary::default();
        let scale_in = library.get(SCALE_IN).unwrap();
        assert!((scale_in.initial.scale - 0.8).abs() < f64::EPSILON);
        assert!(scale_in.initial.x.abs() < f64::EPSILON);
        assert_eq!(scale_in.transition.duration(), Duration::from_millis(500));
        assert_eq!(scale_in.transition.easing, Easing::EaseOut);
    }

    #[test]
    fn overrides_replace_same_named_presets() {
        let custom = PresetLibrary::from_toml(
            r#"
            [presets.fade-in-up]
            initial = { opacity = 0.0, y = 20.0 }
            animate = {}
            transition = { duration_ms = 300, easing = "linear" }
            "#,
        )
        .unwrap();

        let merged = PresetLibrary::default().merged_with(&custom);
        let preset = merged.get(FADE_IN_UP).unwrap();
        assert!((preset.initial.y - 20.0).abs() < f64::EPSILON);
        assert_eq!(preset.animate, VisualState::default());
        assert_eq!(preset.transition.easing, Easing::Linear);
        assert_eq!(merged.len(), PresetLibrary::default().len());
    }

    #[test]
    fn malformed_document_is_a_preset_error() {
        let err = PresetLibrary::from_toml("[presets.broken]\ninitial = 3").unwrap_err();
        assert!(matches!(err, PortfolioError::Preset(_)));
    }

    #[test]
    fn loads_presets_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[presets.pop]\ninitial = {{ scale = 0.5 }}\nanimate = {{}}\ntransition = {{ duration_ms = 200 }}"
        )
        .unwrap();

        let library = PresetLibrary::from_file(file.path()).unwrap();
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["pop"]);
        assert_eq!(library.get("pop").unwrap().transition.delay(), Duration::ZERO);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PresetLibrary::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PortfolioError::Io(_)));
    }
}
