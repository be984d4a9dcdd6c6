//! Scroll-triggered motion.
//!
//! - [`visibility`]: Visibility-triggered animation controller
//! - [`stagger`]: Per-child start offsets for staggered containers
//! - [`reveal`]: Reveal call sites combining a controller with its targets
//! - [`preset`]: Immutable animation presets loaded from TOML
//! - [`typing`]: Hero typewriter effect

pub mod preset;
pub mod reveal;
pub mod stagger;
pub mod typing;
pub mod visibility;

pub use preset::{AnimationPreset, Easing, PresetLibrary, Transition, VisualState};
pub use reveal::{Reveal, RevealCue, RevealKind, RevealSpec};
pub use stagger::{ChildCue, StaggerSchedule};
pub use typing::{Typewriter, TypewriterConfig};
pub use visibility::{
    AnimationSignal, Crossing, ObserveOptions, Observation, RevealKey, TriggerPolicy,
    VisibilityController, VisibilitySnapshot, VisibilityState,
};
