//! Portfolio: the state machines behind a single-page personal portfolio.
//!
//! The page has eight anchored sections, scroll-triggered reveal animations,
//! autoplaying screenshot carousels on project cards, a typewriter hero banner,
//! and a contact form that posts to a third-party relay. This crate owns every
//! piece of behavior; the browser host only measures, draws, and performs I/O.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Browser Host (main.rs, feature "web")              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event routing
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Motion        │   │ Carousel      │   │ Contact       │
//! │ (motion/)     │   │ (carousel/)   │   │ (contact/)    │
//! │ - Reveals     │   │ - Preload     │   │ - Validation  │
//! │ - Stagger     │   │ - Autoplay    │   │ - Submission  │
//! │ - Presets     │   │ - Hover/hide  │   │ - Transport   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Timing & Domain Layers                             │
//! │  - Timer slots, intersection geometry (timing/)     │
//! │  - Sections, projects, errors (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, console sink                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state with the event/action model
//! - [`carousel`]: Project screenshot carousel
//! - [`contact`]: Contact form and submission transport
//! - [`domain`]: Core domain types (sections, projects, errors)
//! - [`motion`]: Visibility-triggered reveals, stagger, presets, typewriter
//! - [`observability`]: Tracing subscriber setup
//! - [`timing`]: Timer slots, intersection geometry, change notification
//! - [`ui`]: View models for the host renderer
//!
//! # Configuration
//!
//! The host reads configuration from `data-*` attributes on the mount element:
//!
//! ```html
//! <main id="portfolio"
//!       data-contact-endpoint="https://formspree.io/f/manwkpkn"
//!       data-reveal-threshold="0.1"
//!       data-autoplay-interval-ms="5000"
//!       data-trace-level="debug">
//! </main>
//! ```
//!
//! # Timers
//!
//! State machines never touch platform timers. They emit
//! [`TimerCommand`](timing::TimerCommand)s wrapped in [`Action::Timer`]; the
//! host starts and cancels the real timers and reports fires back as
//! [`Event::TimerFired`]. Fires for superseded or disposed timers are dropped.
//!
//! # Example
//!
//! ```rust
//! use portfolio::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default())?;
//!
//! let (_, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::PreloadImage { .. })));
//! # Ok::<(), portfolio::PortfolioError>(())
//! ```

pub mod app;
pub mod carousel;
pub mod contact;
pub mod domain;
pub mod motion;
pub mod observability;
pub mod timing;
pub mod ui;

pub use app::{handle_event, Action, AppState, CategoryFilter, Event, MenuMode};
pub use domain::{PortfolioError, Result};
pub use ui::PageViewModel;

use carousel::CarouselConfig;
use motion::{PresetLibrary, Typewriter, TypewriterConfig};
use std::collections::BTreeMap;
use std::time::Duration;

/// Page configuration parsed from the host's mount element.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Form relay that receives contact submissions.
    ///
    /// Default: [`contact::DEFAULT_ENDPOINT`]
    pub contact_endpoint: String,

    /// Visible fraction that triggers a reveal, in `0.0..=1.0`. Default: `0.1`
    pub reveal_threshold: f64,

    /// Interval between carousel advances. Default: 5000
    pub autoplay_interval_ms: u64,

    /// Delay between a carousel becoming ready and its first autoplay. Default: 1000
    pub autoplay_start_delay_ms: u64,

    /// Delay between typed characters in the hero banner. Default: 60
    pub typing_speed_ms: u64,

    /// `EnvFilter` directive for the tracing subscriber. Default: `"info"`
    pub trace_level: Option<String>,

    /// Inline preset TOML whose entries replace same-named built-ins.
    pub presets: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let carousel = CarouselConfig::default();
        Self {
            contact_endpoint: contact::DEFAULT_ENDPOINT.to_string(),
            reveal_threshold: 0.1,
            autoplay_interval_ms: duration_ms(carousel.autoplay_interval),
            autoplay_start_delay_ms: duration_ms(carousel.start_delay),
            typing_speed_ms: duration_ms(TypewriterConfig::default().type_delay),
            trace_level: None,
            presets: None,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Config {
    /// Parses configuration from the host's key/value map.
    ///
    /// Keys are the `data-*` attribute names with the prefix removed and
    /// dashes turned into underscores. Values that fail to parse fall back
    /// to their defaults, as do zero durations.
    ///
    /// # Parsing Rules
    ///
    /// - `contact_endpoint`: non-blank string
    /// - `reveal_threshold`: `f64` within `0.0..=1.0`
    /// - `autoplay_interval_ms`, `autoplay_start_delay_ms`, `typing_speed_ms`: positive `u64`
    /// - `trace_level`, `presets`: string
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use portfolio::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("reveal_threshold".to_string(), "0.25".to_string());
    /// map.insert("autoplay_interval_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.reveal_threshold, 0.25);
    /// assert_eq!(config.autoplay_interval_ms, 5000);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let millis = |key: &str, fallback: u64| {
            config
                .get(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(fallback)
        };

        let contact_endpoint = config
            .get("contact_endpoint")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or(defaults.contact_endpoint.clone(), String::from);

        let reveal_threshold = config
            .get("reveal_threshold")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(defaults.reveal_threshold);

        Self {
            contact_endpoint,
            reveal_threshold,
            autoplay_interval_ms: millis("autoplay_interval_ms", defaults.autoplay_interval_ms),
            autoplay_start_delay_ms: millis("autoplay_start_delay_ms", defaults.autoplay_start_delay_ms),
            typing_speed_ms: millis("typing_speed_ms", defaults.typing_speed_ms),
            trace_level: config.get("trace_level").cloned(),
            presets: config.get("presets").cloned(),
        }
    }

    #[must_use]
    pub fn carousel(&self) -> CarouselConfig {
        CarouselConfig {
            autoplay_interval: Duration::from_millis(self.autoplay_interval_ms),
            start_delay: Duration::from_millis(self.autoplay_start_delay_ms),
            ..CarouselConfig::default()
        }
    }

    #[must_use]
    pub fn typewriter(&self) -> TypewriterConfig {
        TypewriterConfig {
            type_delay: Duration::from_millis(self.typing_speed_ms),
            ..TypewriterConfig::default()
        }
    }
}

/// Builds the page state from configuration.
///
/// Inline presets that fail to parse are logged and ignored; the built-in
/// presets are used instead.
///
/// # Errors
///
/// Returns [`PortfolioError::Preset`] if the built-in presets are broken or a
/// reveal call site references a preset that does not exist.
///
/// # Example
///
/// ```rust
/// use portfolio::{initialize, Config};
///
/// let config = Config {
///     presets: Some("not toml".to_string()),
///     ..Default::default()
/// };
///
/// let state = initialize(&config)?;
/// assert_eq!(state.contact_endpoint, config.contact_endpoint);
/// # Ok::<(), portfolio::PortfolioError>(())
/// ```
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!(endpoint = %config.contact_endpoint, threshold = config.reveal_threshold, "initializing portfolio page");

    let built_in = PresetLibrary::built_in()?;
    let presets = config.presets.as_deref().map_or_else(
        || built_in.clone(),
        |source| match PresetLibrary::from_toml(source) {
            Ok(overrides) => built_in.merged_with(&overrides),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse inline presets, using built-ins");
                built_in.clone()
            }
        },
    );

    let typewriter = Typewriter::new(
        app::layout::HERO_MESSAGES.iter().map(|m| (*m).to_string()).collect(),
        config.typewriter(),
    );

    AppState::new(
        app::layout::project_catalog(),
        app::layout::page_reveals(config.reveal_threshold),
        presets,
        typewriter,
        config.carousel(),
        config.contact_endpoint.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn out_of_range_threshold_falls_back() {
        let map = BTreeMap::from([("reveal_threshold".to_string(), "1.5".to_string())]);
        assert_eq!(Config::from_map(&map).reveal_threshold, 0.1);
    }

    #[test]
    fn blank_endpoint_falls_back() {
        let map = BTreeMap::from([("contact_endpoint".to_string(), "  ".to_string())]);
        assert_eq!(Config::from_map(&map).contact_endpoint, contact::DEFAULT_ENDPOINT);
    }

    #[test]
    fn zero_durations_fall_back() {
        let map = BTreeMap::from([
            ("autoplay_interval_ms".to_string(), "0".to_string()),
            ("autoplay_start_delay_ms".to_string(), " 0 ".to_string()),
            ("typing_speed_ms".to_string(), "0".to_string()),
        ]);
        let config = Config::from_map(&map);
        assert_eq!(config.autoplay_interval_ms, 5000);
        assert_eq!(config.autoplay_start_delay_ms, 1000);
        assert_eq!(config.typing_speed_ms, Config::default().typing_speed_ms);
        assert_eq!(config.carousel().autoplay_interval, Duration::from_millis(5000));
    }

    #[test]
    fn inline_presets_override_built_ins() {
        let config = Config {
            presets: Some(
                r#"
                [presets.fade-in-up]
                initial = { opacity = 0.0, y = 20.0 }
                animate = { opacity = 1.0 }
                transition = { duration_ms = 300 }
                "#
                .to_string(),
            ),
            ..Config::default()
        };
        let state = initialize(&config).unwrap();
        let preset = state.presets.get(motion::preset::FADE_IN_UP).unwrap();
        assert_eq!(preset.transition.duration_ms, 300);
        assert!(state.presets.get(motion::preset::SCALE_IN).is_some());
    }

    #[test]
    fn timings_flow_into_state_machines() {
        let map = BTreeMap::from([
            ("autoplay_interval_ms".to_string(), "3000".to_string()),
            ("typing_speed_ms".to_string(), "40".to_string()),
        ]);
        let config = Config::from_map(&map);
        assert_eq!(config.carousel().autoplay_interval, Duration::from_millis(3000));
        assert_eq!(config.carousel().preload_count, 3);
        assert_eq!(config.typewriter().type_delay, Duration::from_millis(40));
    }
}
