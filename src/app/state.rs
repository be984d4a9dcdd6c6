//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the page,
//! along with the methods the event handler uses to route events to the right
//! state machine. It is the single owner of every reveal controller, carousel,
//! the typewriter, and the contact form.
//!
//! # State Components
//!
//! - **Reveals**: One visibility controller per animated call site, keyed by [`RevealKey`]
//! - **Carousels**: One per mounted project card with screenshots
//! - **Typewriter**: Hero banner text
//! - **Contact**: Form fields and submission status
//! - **Chrome**: Mobile menu and project category filter
//!
//! # Ownership
//!
//! Carousels exist only for cards admitted by the current filter. Removing a
//! card disposes its carousel and cancels its timers in the same step, so a
//! late timer or preload callback finds no owner and is dropped.
//!
//! # Example
//!
//! ```rust
//! use portfolio::{initialize, Config};
//!
//! let state = initialize(&Config::default())?;
//! let viewmodel = state.compute_viewmodel();
//! assert!(!viewmodel.menu.open);
//! # Ok::<(), portfolio::PortfolioError>(())
//! ```

use super::actions::Action;
use super::modes::{CategoryFilter, MenuMode};
use crate::carousel::{Carousel, CarouselConfig, CarouselPhase};
use crate::contact::ContactForm;
use crate::domain::{PortfolioError, ProjectCard, ProjectId, Result, Section};
use crate::motion::{AnimationPreset, PresetLibrary, Reveal, RevealKey, RevealSpec, Typewriter};
use crate::timing::{TimerId, TimerOwner};
use crate::ui::{CarouselView, ContactView, MenuView, PageViewModel, ProjectView};
use std::collections::BTreeMap;

/// Central application state container.
///
/// Mutated only by the event handler. View models are computed on demand.
#[derive(Debug)]
pub struct AppState {
    /// Every project card, in display order.
    pub projects: Vec<ProjectCard>,

    /// Carousels of the currently mounted cards.
    pub carousels: BTreeMap<ProjectId, Carousel>,

    /// Timing used for carousels created from now on.
    pub carousel_config: CarouselConfig,

    /// Reveal call sites keyed by the element they observe.
    pub reveals: BTreeMap<RevealKey, Reveal>,

    /// Presets referenced by the reveal call sites.
    pub presets: PresetLibrary,

    /// Hero banner typewriter.
    pub typewriter: Typewriter,

    /// Contact form state.
    pub contact: ContactForm,

    /// Where contact submissions are posted.
    pub contact_endpoint: String,

    /// Mobile menu state.
    pub menu: MenuMode,

    /// Active project filter.
    pub category: CategoryFilter,
}

impl AppState {
    /// Creates the page state with nothing mounted yet.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Preset`] if a reveal references a preset that
    /// `presets` does not define.
    pub fn new(
        projects: Vec<ProjectCard>,
        reveals: Vec<RevealSpec>,
        presets: PresetLibrary,
        typewriter: Typewriter,
        carousel_config: CarouselConfig,
        contact_endpoint: String,
    ) -> Result<Self> {
        if let Some(missing) = reveals.iter().find(|spec| presets.get(spec.preset).is_none()) {
            return Err(PortfolioError::Preset(format!(
                "reveal {} uses unknown preset {}",
                missing.key, missing.preset
            )));
        }

        Ok(Self {
            projects,
            carousels: BTreeMap::new(),
            carousel_config,
            reveals: reveals
                .into_iter()
                .map(|spec| (spec.key.clone(), Reveal::new(spec)))
                .collect(),
            presets,
            typewriter,
            contact: ContactForm::new(),
            contact_endpoint,
            menu: MenuMode::Closed,
            category: CategoryFilter::All,
        })
    }

    /// Cards admitted by the active filter.
    pub fn shown_projects(&self) -> impl Iterator<Item = &ProjectCard> {
        let filter = self.category;
        self.projects.iter().filter(move |card| filter.admits(card.category))
    }

    /// Creates carousels for shown cards that lack one and requests their preloads.
    ///
    /// # Errors
    ///
    /// Propagates [`Carousel::new`] failures.
    pub fn mount_carousels(&mut self) -> Result<Vec<Action>> {
        let filter = self.category;
        let mut actions = Vec::new();

        for card in &self.projects {
            if !filter.admits(card.category) || !card.has_gallery() || self.carousels.contains_key(&card.id) {
                continue;
            }

            let carousel = Carousel::new(card.id.clone(), card.images.clone(), true, self.carousel_config)?;
            actions.extend(carousel.preload_targets().into_iter().map(|(index, url)| {
                Action::PreloadImage {
                    project: card.id.clone(),
                    index,
                    url: url.to_string(),
                }
            }));

            tracing::debug!(project = %card.id, images = card.images.len(), "carousel mounted");
            self.carousels.insert(card.id.clone(), carousel);
        }

        Ok(actions)
    }

    /// Switches the project filter, unmounting and mounting carousels as needed.
    ///
    /// # Errors
    ///
    /// Propagates [`AppState::mount_carousels`] failures.
    pub fn set_category(&mut self, filter: CategoryFilter) -> Result<Vec<Action>> {
        if self.category == filter {
            return Ok(Vec::new());
        }

        let _span = tracing::debug_span!("set_category", from = self.category.label(), to = filter.label()).entered();
        self.category = filter;

        let hidden: Vec<ProjectId> = self
            .carousels
            .keys()
            .filter(|id| {
                !self
                    .projects
                    .iter()
                    .any(|card| &card.id == *id && filter.admits(card.category))
            })
            .cloned()
            .collect();

        let mut actions = Vec::new();
        for id in hidden {
            if let Some(mut carousel) = self.carousels.remove(&id) {
                tracing::debug!(project = %id, "carousel unmounted");
                actions.extend(Action::timers(carousel.dispose()));
            }
        }

        actions.extend(self.mount_carousels()?);
        Ok(actions)
    }

    /// Carousel of a mounted card.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::UnknownProject`] if the card is not mounted.
    pub fn carousel_mut(&mut self, id: &ProjectId) -> Result<&mut Carousel> {
        self.carousels
            .get_mut(id)
            .ok_or_else(|| PortfolioError::UnknownProject(id.to_string()))
    }

    fn preset(&self, name: &str) -> Result<AnimationPreset> {
        self.presets
            .get(name)
            .copied()
            .ok_or_else(|| PortfolioError::Preset(format!("unknown preset {name}")))
    }

    /// Starts observing a freshly mounted reveal element.
    ///
    /// `children` is the staggered item count found in the document; when
    /// present it replaces the declared count so every item gets a cue.
    pub fn observe(&mut self, key: &RevealKey, children: Option<usize>) -> Vec<Action> {
        let Some(reveal) = self.reveals.get_mut(key) else {
            tracing::debug!(key = %key, "no reveal declared for element");
            return Vec::new();
        };

        if let Some(count) = children {
            reveal.set_children(count);
        }

        reveal
            .observe(true)
            .map(|observation| Action::Observe {
                key: observation.key,
                threshold: observation.threshold,
                margin: observation.margin,
            })
            .into_iter()
            .collect()
    }

    /// Stops observing a removed reveal element.
    pub fn release(&mut self, key: &RevealKey) -> Vec<Action> {
        if self.reveals.get_mut(key).is_some_and(Reveal::release) {
            vec![Action::Unobserve { key: key.clone() }]
        } else {
            Vec::new()
        }
    }

    /// Feeds an intersection sample to a reveal and expands it into animations.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Preset`] if the reveal's preset is missing.
    pub fn intersect(&mut self, key: &RevealKey, ratio: f64) -> Result<Vec<Action>> {
        let Some(reveal) = self.reveals.get_mut(key) else {
            return Ok(Vec::new());
        };

        let preset_name = reveal.preset();
        let (cues, released) = reveal.on_intersection(ratio);
        let mut actions = Vec::with_capacity(cues.len() + 1);
        if !cues.is_empty() {
            let preset = self.preset(preset_name)?;
            actions.extend(cues.into_iter().map(|cue| Action::Animate {
                key: key.clone(),
                child: cue.child,
                signal: cue.signal,
                delay: cue.delay,
                preset,
            }));
        }

        if released {
            actions.push(Action::Unobserve { key: key.clone() });
        }
        Ok(actions)
    }

    /// Routes a timer fire to its owner. Stale fires produce no actions.
    pub fn dispatch_timer(&mut self, id: &TimerId) -> Vec<Action> {
        let commands = match &id.owner {
            TimerOwner::Carousel(project) => self
                .carousels
                .get_mut(project)
                .and_then(|carousel| carousel.on_timer(id)),
            TimerOwner::Typewriter => self.typewriter.on_timer(id),
        };

        commands.map_or_else(
            || {
                tracing::trace!(timer = ?id, "stale timer fire ignored");
                Vec::new()
            },
            |commands| Action::timers(commands).collect(),
        )
    }

    /// Releases every timer and observation the page holds.
    pub fn shutdown(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = Action::timers(self.typewriter.dispose()).collect();

        for (id, mut carousel) in std::mem::take(&mut self.carousels) {
            tracing::debug!(project = %id, "carousel disposed on shutdown");
            actions.extend(Action::timers(carousel.dispose()));
        }

        for (key, reveal) in &mut self.reveals {
            if reveal.release() {
                actions.push(Action::Unobserve { key: key.clone() });
            }
        }

        actions
    }

    /// Computes a renderable view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> PageViewModel {
        let projects = self
            .shown_projects()
            .map(|card| ProjectView {
                id: card.id.clone(),
                title: card.title.clone(),
                category: card.category,
                carousel: self.carousels.get(&card.id).map(|carousel| {
                    let snapshot = carousel.current_state();
                    let loading = snapshot.phase == CarouselPhase::Loading;
                    CarouselView {
                        phase: snapshot.phase,
                        current_index: snapshot.current_index,
                        image_count: snapshot.image_count,
                        image: if loading { None } else { snapshot.image },
                        loading,
                        degraded: snapshot.degraded,
                        show_controls: snapshot.show_controls,
                    }
                }),
            })
            .collect();

        let contact = self.contact.current_state();

        PageViewModel {
            menu: MenuView {
                open: self.menu.is_open(),
                sections: Section::ALL.to_vec(),
            },
            hero_text: self.typewriter.text(),
            active_category: self.category.label(),
            categories: CategoryFilter::CHOICES.iter().map(|c| c.label()).collect(),
            projects,
            contact: ContactView {
                fields: contact.fields,
                status: contact.status,
                status_message: contact.status.message(),
                invalid_field: contact.invalid_field,
                inputs_enabled: contact.inputs_enabled,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::layout;
    use crate::domain::ProjectCategory;
    use crate::motion::TypewriterConfig;
    use crate::timing::TimerCommand;

    fn state() -> AppState {
        AppState::new(
            layout::project_catalog(),
            layout::page_reveals(0.1),
            PresetLibrary::built_in().unwrap(),
            Typewriter::new(vec!["hi".into()], TypewriterConfig::default()),
            CarouselConfig::default(),
            "https://relay.test/f".into(),
        )
        .unwrap()
    }

    #[test]
    fn mounting_preloads_first_three_images_of_each_gallery() {
        let mut state = state();
        let actions = state.mount_carousels().unwrap();
        let galleries = state.projects.iter().filter(|p| p.has_gallery()).count();
        assert_eq!(state.carousels.len(), galleries);
        assert_eq!(actions.len(), galleries * 3);
        assert!(state.mount_carousels().unwrap().is_empty());
    }

    #[test]
    fn filter_disposes_hidden_carousels() {
        let mut state = state();
        state.mount_carousels().unwrap();

        state
            .set_category(CategoryFilter::Only(ProjectCategory::Backend))
            .unwrap();
        assert_eq!(state.carousels.len(), 1);
        assert!(state.carousels.contains_key(&ProjectId::from("careinvoice")));

        let actions = state.set_category(CategoryFilter::All).unwrap();
        assert_eq!(state.carousels.len(), 4);
        assert!(actions.iter().all(|a| matches!(a, Action::PreloadImage { .. })));
    }

    #[test]
    fn unknown_preset_is_rejected_up_front() {
        let mut reveals = layout::page_reveals(0.1);
        reveals[0].preset = "wobble";
        let err = AppState::new(
            Vec::new(),
            reveals,
            PresetLibrary::built_in().unwrap(),
            Typewriter::new(Vec::new(), TypewriterConfig::default()),
            CarouselConfig::default(),
            String::new(),
        )
        .unwrap_err();
        assert!(matches!(err, PortfolioError::Preset(_)));
    }

    #[test]
    fn shutdown_cancels_typewriter() {
        let mut state = state();
        let started = state.typewriter.start();
        let id = started[0].id().clone();
        let actions = state.shutdown();
        assert!(actions.contains(&Action::Timer(TimerCommand::Cancel { id })));
    }

    #[test]
    fn viewmodel_hides_loading_frames() {
        let mut state = state();
        state.mount_carousels().unwrap();
        let vm = state.compute_viewmodel();
        let card = vm.projects.iter().find(|p| p.id.0 == "pixiai").unwrap();
        let carousel = card.carousel.as_ref().unwrap();
        assert!(carousel.loading);
        assert!(carousel.image.is_none());
        assert!(vm.projects.iter().any(|p| p.carousel.is_none()));
    }
}
