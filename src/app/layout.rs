//! Page content and reveal call sites.
//!
//! Every animated element on the page is declared here with its own trigger
//! policy, so no call site relies on an implicit default.

use crate::domain::{ProjectCard, ProjectCategory, Section};
use crate::motion::preset::{FADE_IN_LEFT, FADE_IN_RIGHT, FADE_IN_UP, STAGGER_ITEM};
use crate::motion::{ObserveOptions, RevealKey, RevealKind, RevealSpec, StaggerSchedule};
use std::time::Duration;

/// Delay before the first child of a staggered list starts.
pub const CHILD_DELAY: Duration = Duration::from_millis(200);

const LIST_STAGGER: Duration = Duration::from_millis(200);
const SKILLS_STAGGER: Duration = Duration::from_millis(100);

/// Messages cycled by the hero typewriter.
pub const HERO_MESSAGES: [&str; 6] = [
    "Building scalable Java applications...",
    "Designing efficient SQL databases...",
    "Creating Spring Boot microservices...",
    "Developing full-stack solutions...",
    "Optimizing database performance...",
    "Implementing REST APIs...",
];

/// Key of a section's title reveal, e.g. `skills.title`.
#[must_use]
pub fn title_key(section: Section) -> RevealKey {
    RevealKey(format!("{}.title", section.anchor()))
}

fn single(key: &str, preset: &'static str, options: ObserveOptions) -> RevealSpec {
    RevealSpec {
        key: RevealKey::new(key),
        kind: RevealKind::Single,
        options,
        preset,
    }
}

fn staggered(key: &str, stagger: Duration, children: usize, options: ObserveOptions) -> RevealSpec {
    RevealSpec {
        key: RevealKey::new(key),
        kind: RevealKind::Staggered {
            schedule: StaggerSchedule::new(CHILD_DELAY, stagger),
            children,
        },
        options,
        preset: STAGGER_ITEM,
    }
}

/// All reveal call sites, with `threshold` applied to each of them.
#[must_use]
pub fn page_reveals(threshold: f64) -> Vec<RevealSpec> {
    let section = ObserveOptions::section().with_threshold(threshold);
    let list = ObserveOptions::staggered().with_threshold(threshold);

    let mut reveals: Vec<RevealSpec> = Section::ALL
        .into_iter()
        .filter(|s| *s != Section::Home)
        .map(|s| RevealSpec {
            key: title_key(s),
            kind: RevealKind::Single,
            options: section,
            preset: FADE_IN_UP,
        })
        .collect();

    reveals.extend([
        single("about.content", FADE_IN_LEFT, section),
        single("contact.content", FADE_IN_LEFT, section),
        single("contact.form", FADE_IN_RIGHT, section),
        staggered("experience.items", LIST_STAGGER, 2, list),
        staggered("skills.items", SKILLS_STAGGER, 8, list),
        staggered("education.items", LIST_STAGGER, 2, list),
        staggered("achievements.items", LIST_STAGGER, 3, list),
    ]);

    reveals
}

/// Project cards in display order.
#[must_use]
pub fn project_catalog() -> Vec<ProjectCard> {
    vec![
        ProjectCard::new(
            "invoiceus",
            "InvoiceUs",
            ProjectCategory::FullStack,
            &[
                "/Invoice Us/InvoiceUs1.png",
                "/Invoice Us/InvoiceUs2.png",
                "/Invoice Us/InvoiceUs3.png",
                "/Invoice Us/InvoiceUs4.png",
                "/Invoice Us/InvoiceUs5.png",
                "/Invoice Us/InvoiceUs6.png",
            ],
        ),
        ProjectCard::new(
            "pixiai",
            "PixiAI",
            ProjectCategory::FullStack,
            &[
                "/PixiAI/pixi1.png",
                "/PixiAI/pixi2.png",
                "/PixiAI/pixi3.png",
                "/PixiAI/pixi4.png",
                "/PixiAI/pixi5.png",
                "/PixiAI/pixi6.png",
                "/PixiAI/pixi7.png",
                "/PixiAI/pixi8.png",
            ],
        ),
        ProjectCard::new(
            "pure-sounds",
            "Pure Sounds",
            ProjectCategory::FullStack,
            &[
                "/PureSound/Puresound1.png",
                "/PureSound/Puresound2.png",
                "/PureSound/Puresound3.png",
                "/PureSound/Puresound4.png",
            ],
        ),
        ProjectCard::new(
            "careinvoice",
            "CareInvoice",
            ProjectCategory::Backend,
            &[
                "/CareInvoice/care1.png",
                "/CareInvoice/care2.png",
                "/CareInvoice/care3.png",
                "/CareInvoice/care4.png",
                "/CareInvoice/care5.png",
                "/CareInvoice/care6.png",
                "/CareInvoice/care7.png",
                "/CareInvoice/care8.png",
                "/CareInvoice/care9.png",
            ],
        ),
        ProjectCard::new("docsmanager", "DocsManager", ProjectCategory::Backend, &[]),
    ]
}
