//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes DOM events,
//! timer fires, and network completions, translating them into state changes
//! and action sequences. It is the only entry point the host calls.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the host (DOM listeners, timers, observers, fetch)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` and the state machines it owns
//! 4. Actions are collected and returned for execution
//!
//! The returned `bool` tells the host whether the view model changed and the
//! page should be re-rendered.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Start`, `Stop`
//! - **Reveals**: `ElementMounted`, `ElementRemoved`, `Intersection`
//! - **Carousels**: `PreloadResolved`, `CardVisibility`, `CarouselHover`,
//!   `CarouselNext`, `CarouselPrev`, `CarouselGoTo`, `ImageError`
//! - **Timers**: `TimerFired`
//! - **Chrome**: `Navigate`, `ToggleMenu`, `SetCategory`
//! - **Contact**: `FieldChanged`, `SubmitContact`, `SubmissionResolved`
//!
//! # Example
//!
//! ```rust
//! use portfolio::app::{handle_event, Event};
//! use portfolio::{initialize, Config};
//!
//! let mut state = initialize(&Config::default())?;
//! let (render, actions) = handle_event(&mut state, &Event::ToggleMenu)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), portfolio::PortfolioError>(())
//! ```

use super::actions::Action;
use super::modes::CategoryFilter;
use super::state::AppState;
use crate::carousel::PreloadOutcome;
use crate::contact::{Delivery, Field, SubmitOutcome};
use crate::domain::{ProjectId, Result, Section};
use crate::motion::RevealKey;
use crate::timing::TimerId;

/// Events reported by the page host.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes them one at a time on the
/// host's event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The page has mounted. Starts the typewriter and mounts carousels.
    Start,

    /// The page is being torn down. Cancels every timer and observation.
    Stop,

    /// A reveal element is now in the document.
    ElementMounted {
        key: RevealKey,
        /// Staggered items found under the element, if the host counted them.
        children: Option<usize>,
    },

    /// A reveal element left the document.
    ElementRemoved(RevealKey),

    /// An observed reveal element crossed one of its thresholds.
    Intersection {
        /// Observed element.
        key: RevealKey,
        /// Visible fraction within the margin-adjusted viewport.
        ratio: f64,
    },

    /// A preload requested by `Action::PreloadImage` finished.
    PreloadResolved {
        project: ProjectId,
        index: usize,
        outcome: PreloadOutcome,
    },

    /// A project card scrolled in or out of view.
    CardVisibility { project: ProjectId, visible: bool },

    /// Pointer entered or left a carousel.
    CarouselHover { project: ProjectId, entered: bool },

    /// Next-arrow click.
    CarouselNext(ProjectId),

    /// Previous-arrow click.
    CarouselPrev(ProjectId),

    /// Dot click.
    CarouselGoTo { project: ProjectId, index: usize },

    /// The displayed carousel image failed to load.
    ImageError(ProjectId),

    /// A timer started by `Action::Timer` fired.
    TimerFired(TimerId),

    /// Navigation link click with an anchor such as `#skills`.
    Navigate(String),

    /// Hamburger button click.
    ToggleMenu,

    /// Project filter button click.
    SetCategory(CategoryFilter),

    /// Contact input changed.
    FieldChanged { field: Field, value: String },

    /// Contact form submitted.
    SubmitContact,

    /// The POST started by `Action::PostContact` completed.
    SubmissionResolved(Delivery),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view model may have changed, and the side
/// effects to execute in order.
///
/// # Errors
///
/// - [`PortfolioError::UnknownProject`](crate::PortfolioError::UnknownProject)
///   when a carousel control refers to a card that is not mounted
/// - [`PortfolioError::Preset`](crate::PortfolioError::Preset) when a reveal
///   preset is missing
///
/// Errors leave the state consistent; the host logs them and carries on.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => {
            let mut actions: Vec<Action> = Action::timers(state.typewriter.start()).collect();
            actions.extend(state.mount_carousels()?);
            tracing::debug!(actions = actions.len(), "page started");
            Ok((true, actions))
        }
        Event::Stop => {
            let actions = state.shutdown();
            tracing::debug!(actions = actions.len(), "page stopped");
            Ok((false, actions))
        }
        Event::ElementMounted { key, children } => Ok((false, state.observe(key, *children))),
        Event::ElementRemoved(key) => Ok((false, state.release(key))),
        Event::Intersection { key, ratio } => {
            let actions = state.intersect(key, *ratio)?;
            Ok((false, actions))
        }
        Event::PreloadResolved { project, index, outcome } => {
            // Late callbacks for unmounted cards are expected after a filter change.
            let Some(carousel) = state.carousels.get_mut(project) else {
                tracing::trace!(project = %project, index, "preload for unmounted card ignored");
                return Ok((false, vec![]));
            };
            let was_ready = carousel.is_ready();
            let actions = Action::timers(carousel.on_preload_resolved(*index, *outcome)).collect();
            Ok((carousel.is_ready() != was_ready, actions))
        }
        Event::CardVisibility { project, visible } => {
            let Some(carousel) = state.carousels.get_mut(project) else {
                return Ok((false, vec![]));
            };
            let actions = Action::timers(carousel.set_visible(*visible)).collect();
            Ok((true, actions))
        }
        Event::CarouselHover { project, entered } => {
            // A pointer leaving a card the filter just removed still reports mouseout.
            let Some(carousel) = state.carousels.get_mut(project) else {
                return Ok((false, vec![]));
            };
            let actions = Action::timers(carousel.set_hovered(*entered)).collect();
            Ok((false, actions))
        }
        Event::CarouselNext(project) => Ok((state.carousel_mut(project)?.next(), vec![])),
        Event::CarouselPrev(project) => Ok((state.carousel_mut(project)?.prev(), vec![])),
        Event::CarouselGoTo { project, index } => {
            Ok((state.carousel_mut(project)?.go_to(*index), vec![]))
        }
        Event::ImageError(project) => {
            state.carousel_mut(project)?.on_display_error();
            Ok((true, vec![]))
        }
        Event::TimerFired(id) => {
            let actions = state.dispatch_timer(id);
            Ok((true, actions))
        }
        Event::Navigate(anchor) => {
            state.menu = super::modes::MenuMode::Closed;
            let Some(section) = Section::from_anchor(anchor) else {
                tracing::debug!(anchor = %anchor, "navigation to unknown section ignored");
                return Ok((true, vec![]));
            };
            Ok((true, vec![Action::ScrollTo(section)]))
        }
        Event::ToggleMenu => {
            state.menu = state.menu.toggled();
            Ok((true, vec![]))
        }
        Event::SetCategory(filter) => {
            let actions = state.set_category(*filter)?;
            Ok((true, actions))
        }
        Event::FieldChanged { field, value } => Ok((state.contact.set_field(*field, value), vec![])),
        Event::SubmitContact => match state.contact.submit() {
            SubmitOutcome::Ignored => Ok((false, vec![])),
            SubmitOutcome::Invalid(field) => {
                tracing::debug!(field = %field, "contact form invalid");
                Ok((true, vec![]))
            }
            SubmitOutcome::Send(payload) => {
                tracing::debug!(endpoint = %state.contact_endpoint, "submitting contact form");
                Ok((
                    true,
                    vec![Action::PostContact {
                        endpoint: state.contact_endpoint.clone(),
                        payload,
                    }],
                ))
            }
        },
        Event::SubmissionResolved(delivery) => {
            let changed = state.contact.resolve(&delivery.clone().into_result());
            Ok((changed, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{initialize, Config, PortfolioError};

    #[test]
    fn navigate_closes_menu_and_scrolls() {
        let mut state = initialize(&Config::default()).unwrap();
        handle_event(&mut state, &Event::ToggleMenu).unwrap();
        assert!(state.menu.is_open());

        let (_, actions) = handle_event(&mut state, &Event::Navigate("#skills".into())).unwrap();
        assert_eq!(actions, vec![Action::ScrollTo(Section::Skills)]);
        assert!(!state.menu.is_open());
    }

    #[test]
    fn unknown_anchor_is_a_silent_no_op() {
        let mut state = initialize(&Config::default()).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Navigate("#blog".into())).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn controls_on_unmounted_card_report_unknown_project() {
        let mut state = initialize(&Config::default()).unwrap();
        let err = handle_event(&mut state, &Event::CarouselNext(ProjectId::from("pixiai"))).unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownProject(id) if id == "pixiai"));
    }

    #[test]
    fn late_preload_for_unmounted_card_is_ignored() {
        let mut state = initialize(&Config::default()).unwrap();
        let event = Event::PreloadResolved {
            project: ProjectId::from("pixiai"),
            index: 0,
            outcome: PreloadOutcome::Loaded,
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    #[test]
    fn hover_on_unmounted_card_is_ignored() {
        let mut state = initialize(&Config::default()).unwrap();
        let event = Event::CarouselHover {
            project: ProjectId::from("pixiai"),
            entered: false,
        };
        assert_eq!(handle_event(&mut state, &event).unwrap(), (false, vec![]));
    }

    #[test]
    fn removed_element_releases_its_observation() {
        let mut state = initialize(&Config::default()).unwrap();
        let key = RevealKey::new("skills.items");
        handle_event(&mut state, &Event::ElementMounted { key: key.clone(), children: None }).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ElementRemoved(key.clone())).unwrap();
        assert_eq!(actions, vec![Action::Unobserve { key: key.clone() }]);

        let (_, again) = handle_event(&mut state, &Event::ElementRemoved(key)).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn mounted_child_count_overrides_the_declared_one() {
        let mut state = initialize(&Config::default()).unwrap();
        let key = RevealKey::new("skills.items");
        handle_event(&mut state, &Event::ElementMounted { key: key.clone(), children: Some(11) }).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Intersection { key, ratio: 0.5 }).unwrap();
        let children: Vec<usize> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Animate { child, .. } => *child,
                _ => None,
            })
            .collect();
        assert_eq!(children, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn mounted_element_is_observed_once() {
        let mut state = initialize(&Config::default()).unwrap();
        let key = RevealKey::new("about.title");
        let (_, first) = handle_event(&mut state, &Event::ElementMounted { key: key.clone(), children: None }).unwrap();
        assert!(matches!(first.as_slice(), [Action::Observe { key: k, .. }] if *k == key));
        let (_, second) = handle_event(&mut state, &Event::ElementMounted { key, children: None }).unwrap();
        assert!(second.is_empty());
    }
}
