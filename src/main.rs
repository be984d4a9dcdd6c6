//! Browser host and entry point.
//!
//! This binary is the thin integration layer between the portfolio library and
//! the DOM. It translates DOM, observer, timer, and fetch callbacks into library
//! [`Event`]s, executes the returned [`Action`]s, and applies the computed view
//! model to the static page markup.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  DOM listeners / observers   │ ─┐
//! │  setTimeout / setInterval    │  │ Event
//! │  fetch (spawn_local)         │  │
//! └──────────────────────────────┘  ▼
//!                        ┌────────────────────┐
//!                        │  Host::dispatch    │ → handle_event → Vec<Action>
//!                        └────────────────────┘                    │
//!                                  ▲                               ▼
//!                                  └──────────── Host::execute ────┘
//! ```
//!
//! # Markup Contract
//!
//! The host binds to data attributes in the page:
//!
//! - `#portfolio` mount element carrying `data-*` configuration
//! - `[data-reveal="key"]` animated elements, `[data-reveal-child]` staggered items
//! - `[data-nav="#id"]`, `[data-toggle-menu]`, `[data-category="Backend"]`
//! - `[data-project="id"]` cards containing `[data-carousel="id"]` with
//!   `[data-carousel-image]`, `[data-carousel-spinner]`, `[data-carousel-placeholder]`,
//!   `[data-carousel-controls]`, `[data-carousel-prev]`, `[data-carousel-next]`,
//!   and `[data-carousel-dot][data-index]`
//! - `[data-hero-text]`, `[data-contact-form]` with named inputs, `[data-contact-status]`
//!
//! # Lifecycle
//!
//! 1. **Load**: Read config, initialize tracing, build `AppState`
//! 2. **Bind**: Install delegated listeners and the card visibility observer
//! 3. **Start**: Dispatch `Event::Start` and one `ElementMounted` per reveal element
//! 4. **Watch**: A mutation observer dispatches `ElementRemoved` for detached reveals
//! 5. **Unload**: `pagehide` dispatches `Event::Stop`, cancelling every timer

#![allow(clippy::multiple_crate_versions)]

use portfolio::app::{handle_event, Action, AppState, CategoryFilter, Event};
use portfolio::carousel::PreloadOutcome;
use portfolio::contact::{send_submission, Delivery, FetchTransport, Field};
use portfolio::domain::{ProjectId, Section};
use portfolio::motion::{AnimationPreset, AnimationSignal, RevealKey};
use portfolio::timing::{RootMargin, TimerCommand, TimerId};
use portfolio::ui::{CarouselView, PageViewModel};
use portfolio::Config;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
    MutationObserver, MutationObserverInit, MutationRecord, Node, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, Window,
};

/// Id of the element carrying configuration attributes.
const MOUNT_ID: &str = "portfolio";

/// Configuration keys read from `data-*` attributes on the mount element.
const CONFIG_KEYS: [&str; 7] = [
    "contact_endpoint",
    "reveal_threshold",
    "autoplay_interval_ms",
    "autoplay_start_delay_ms",
    "typing_speed_ms",
    "trace_level",
    "presets",
];

type Callback = Closure<dyn FnMut()>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A live platform timer and the closure it calls.
struct LiveTimer {
    handle: i32,
    repeat: bool,
    _callback: Callback,
}

/// An off-screen image load waiting for `load` or `error`.
struct PendingPreload {
    _image: HtmlImageElement,
    _on_load: Callback,
    _on_error: Callback,
}

/// Everything a closure may need to keep alive until it is safe to drop.
enum Retired {
    Timer(LiveTimer),
    Preload(PendingPreload),
    Observer(IntersectionObserver, ObserverCallback),
}

/// Page host wrapping the library state with its DOM bindings.
struct Host {
    app: AppState,
    window: Window,
    document: Document,
    timers: HashMap<TimerId, LiveTimer>,
    observers: BTreeMap<RevealKey, (IntersectionObserver, ObserverCallback)>,
    preloads: HashMap<(ProjectId, usize), PendingPreload>,
    /// Released bindings whose closures may still be on the call stack.
    /// Swept by a zero-delay timeout.
    retired: Vec<Retired>,
    this: Weak<RefCell<Self>>,
}

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = run() {
        web_sys::console::error_1(&e);
    }
}

fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let config = read_config(&document);
    portfolio::observability::init_tracing(&config);

    let span = tracing::debug_span!("host_load");
    let _guard = span.entered();

    let app = portfolio::initialize(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    tracing::debug!("app state initialized");

    let host = Rc::new_cyclic(|this| {
        RefCell::new(Host {
            app,
            window,
            document: document.clone(),
            timers: HashMap::new(),
            observers: BTreeMap::new(),
            preloads: HashMap::new(),
            retired: Vec::new(),
            this: this.clone(),
        })
    });

    bind_listeners(&host, &document)?;
    observe_cards(&host, &document)?;
    watch_reveal_removals(&host, &document)?;

    dispatch(&host, Event::Start);
    for element in elements(document.query_selector_all("[data-reveal]")) {
        if let Some(event) = mounted_event(&element) {
            dispatch(&host, event);
        }
    }

    tracing::debug!("host load complete");
    Ok(())
}

/// Reads configuration attributes (`data-contact-endpoint`, ...) from the mount element.
fn read_config(document: &Document) -> Config {
    let Some(mount) = document.get_element_by_id(MOUNT_ID) else {
        return Config::default();
    };

    let map: BTreeMap<String, String> = CONFIG_KEYS
        .iter()
        .filter_map(|key| {
            let attribute = format!("data-{}", key.replace('_', "-"));
            mount.get_attribute(&attribute).map(|value| ((*key).to_string(), value))
        })
        .collect();

    Config::from_map(&map)
}

/// Runs one event through the library and executes the resulting actions.
fn dispatch(host: &Rc<RefCell<Host>>, event: Event) {
    let Ok(mut host) = host.try_borrow_mut() else {
        tracing::warn!(event = ?event, "re-entrant event dropped");
        return;
    };

    match handle_event(&mut host.app, &event) {
        Ok((render, actions)) => {
            for action in actions {
                host.execute(action);
            }
            if render {
                host.render();
            }
        }
        Err(e) => tracing::warn!(error = %e, "event handling failed"),
    }
}

/// Dispatches through a weak handle; a dropped host means the page is gone.
fn dispatch_weak(host: &Weak<RefCell<Host>>, event: Event) {
    if let Some(host) = host.upgrade() {
        dispatch(&host, event);
    }
}

fn elements(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `ElementMounted` for a reveal element, with its staggered items counted.
fn mounted_event(element: &Element) -> Option<Event> {
    let key = element.get_attribute("data-reveal")?;
    let children = elements(element.query_selector_all("[data-reveal-child]")).len();
    Some(Event::ElementMounted {
        key: RevealKey(key),
        children: Some(children),
    })
}

/// Reveal elements in a detached subtree, the root included.
fn reveals_within(node: &Node) -> Vec<Element> {
    let Some(root) = node.dyn_ref::<Element>() else {
        return Vec::new();
    };
    let mut found = Vec::new();
    if root.matches("[data-reveal]").unwrap_or(false) {
        found.push(root.clone());
    }
    found.extend(elements(root.query_selector_all("[data-reveal]")));
    found
}

fn closest(target: Option<web_sys::EventTarget>, selector: &str) -> Option<Element> {
    target
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

fn millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl Host {
    fn execute(&mut self, action: Action) {
        match action {
            Action::Timer(TimerCommand::Start { id, delay, repeat }) => self.start_timer(id, delay, repeat),
            Action::Timer(TimerCommand::Cancel { id }) => self.cancel_timer(&id),
            Action::Observe { key, threshold, margin } => self.observe(key, threshold, margin),
            Action::Unobserve { key } => {
                if let Some((observer, callback)) = self.observers.remove(&key) {
                    observer.disconnect();
                    self.retire(Retired::Observer(observer, callback));
                }
            }
            Action::Animate { key, child, signal, delay, preset } => {
                self.animate(&key, child, signal, delay, &preset);
            }
            Action::PreloadImage { project, index, url } => self.preload(project, index, &url),
            Action::PostContact { endpoint, payload } => {
                let this = self.this.clone();
                spawn_local(async move {
                    let result = send_submission(&FetchTransport, &endpoint, &payload).await;
                    dispatch_weak(&this, Event::SubmissionResolved(Delivery::from_result(&result)));
                });
            }
            Action::ScrollTo(section) => self.scroll_to(section),
        }
    }

    fn start_timer(&mut self, id: TimerId, delay: Duration, repeat: bool) {
        let this = self.this.clone();
        let fired = id.clone();
        let callback: Callback = Closure::new(move || {
            let Some(host) = this.upgrade() else {
                return;
            };
            dispatch(&host, Event::TimerFired(fired.clone()));
            if repeat {
                return;
            }
            let Ok(mut host) = host.try_borrow_mut() else {
                return;
            };
            host.cancel_timer(&fired);
        });
        let function = callback.as_ref().unchecked_ref();

        let handle = if repeat {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(function, millis(delay))
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(function, millis(delay))
        };

        match handle {
            Ok(handle) => {
                if let Some(previous) = self.timers.insert(id, LiveTimer { handle, repeat, _callback: callback }) {
                    self.clear(&previous);
                    self.retire(Retired::Timer(previous));
                }
            }
            Err(e) => tracing::warn!(error = ?e, "failed to start timer"),
        }
    }

    fn cancel_timer(&mut self, id: &TimerId) {
        if let Some(timer) = self.timers.remove(id) {
            self.clear(&timer);
            self.retire(Retired::Timer(timer));
        }
    }

    /// Parks a released binding until the current callback has returned.
    fn retire(&mut self, binding: Retired) {
        if self.retired.is_empty() {
            let this = self.this.clone();
            let sweep = Closure::once_into_js(move || {
                let Some(host) = this.upgrade() else {
                    return;
                };
                let Ok(mut host) = host.try_borrow_mut() else {
                    return;
                };
                host.retired.clear();
            });
            let _ = self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(sweep.unchecked_ref(), 0);
        }
        self.retired.push(binding);
    }

    fn clear(&self, timer: &LiveTimer) {
        if timer.repeat {
            self.window.clear_interval_with_handle(timer.handle);
        } else {
            self.window.clear_timeout_with_handle(timer.handle);
        }
    }

    fn reveal_element(&self, key: &RevealKey) -> Option<Element> {
        self.document
            .query_selector(&format!("[data-reveal=\"{key}\"]"))
            .ok()
            .flatten()
    }

    fn observe(&mut self, key: RevealKey, threshold: f64, margin: RootMargin) {
        let Some(element) = self.reveal_element(&key) else {
            tracing::debug!(key = %key, "reveal element missing, not observing");
            return;
        };

        let this = self.this.clone();
        let observed = key.clone();
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                dispatch_weak(
                    &this,
                    Event::Intersection {
                        key: observed.clone(),
                        ratio: entry.intersection_ratio(),
                    },
                );
            }
        });

        let init = IntersectionObserverInit::new();
        let thresholds = js_sys::Array::of2(&JsValue::from_f64(0.0), &JsValue::from_f64(threshold));
        init.set_threshold(&thresholds);
        init.set_root_margin(&margin.to_string());

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                self.observers.insert(key, (observer, callback));
            }
            Err(e) => tracing::warn!(key = %key, error = ?e, "failed to create intersection observer"),
        }
    }

    fn animate(&self, key: &RevealKey, child: Option<usize>, signal: AnimationSignal, delay: Duration, preset: &AnimationPreset) {
        let Some(root) = self.reveal_element(key) else {
            return;
        };
        let target = match child {
            None => Some(root),
            Some(index) => elements(root.query_selector_all("[data-reveal-child]")).into_iter().nth(index),
        };
        let Some(target) = target.and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };

        let visual = match signal {
            AnimationSignal::Animate => preset.animate,
            AnimationSignal::Reset => preset.initial,
        };
        let duration = preset.transition.duration_ms;
        let easing = preset.transition.easing.css();
        let start = millis(delay + preset.transition.delay());

        let style = target.style();
        let _ = style.set_property(
            "transition",
            &format!("opacity {duration}ms {easing} {start}ms, transform {duration}ms {easing} {start}ms"),
        );
        let _ = style.set_property("opacity", &visual.opacity.to_string());
        let _ = style.set_property("transform", &visual.css_transform());
    }

    fn preload(&mut self, project: ProjectId, index: usize, url: &str) {
        let Ok(image) = HtmlImageElement::new() else {
            return;
        };

        let resolver = |outcome: PreloadOutcome| -> Callback {
            let this = self.this.clone();
            let project = project.clone();
            Closure::new(move || {
                let Some(host) = this.upgrade() else {
                    return;
                };
                dispatch(&host, Event::PreloadResolved { project: project.clone(), index, outcome });
                let Ok(mut host) = host.try_borrow_mut() else {
                    return;
                };
                if let Some(pending) = host.preloads.remove(&(project.clone(), index)) {
                    host.retire(Retired::Preload(pending));
                }
            })
        };

        let on_load = resolver(PreloadOutcome::Loaded);
        let on_error = resolver(PreloadOutcome::Failed);
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        image.set_src(url);

        self.preloads.insert(
            (project, index),
            PendingPreload {
                _image: image,
                _on_load: on_load,
                _on_error: on_error,
            },
        );
    }

    fn scroll_to(&self, section: Section) {
        let Some(element) = self.document.get_element_by_id(section.anchor()) else {
            tracing::debug!(section = %section, "scroll target missing");
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn render(&self) {
        let vm = self.app.compute_viewmodel();

        if let Ok(Some(hero)) = self.document.query_selector("[data-hero-text]") {
            hero.set_text_content(Some(&vm.hero_text));
        }

        if let Some(mount) = self.document.get_element_by_id(MOUNT_ID) {
            let _ = mount.set_attribute("data-menu", if vm.menu.open { "open" } else { "closed" });
        }

        for button in elements(self.document.query_selector_all("[data-category]")) {
            let pressed = button.get_attribute("data-category").as_deref() == Some(vm.active_category);
            let _ = button.set_attribute("aria-pressed", if pressed { "true" } else { "false" });
        }

        self.render_projects(&vm);
        self.render_contact(&vm);
    }

    fn render_projects(&self, vm: &PageViewModel) {
        for card in elements(self.document.query_selector_all("[data-project]")) {
            let id = card.get_attribute("data-project").unwrap_or_default();
            let view = vm.projects.iter().find(|p| p.id.0 == id);
            set_hidden(&card, view.is_none());

            if let Some(carousel) = view.and_then(|p| p.carousel.as_ref()) {
                render_carousel(&card, carousel);
            }
        }
    }

    fn render_contact(&self, vm: &PageViewModel) {
        let contact = &vm.contact;

        if let Ok(Some(status)) = self.document.query_selector("[data-contact-status]") {
            status.set_text_content(contact.status_message);
            let _ = status.set_attribute("data-status", &format!("{:?}", contact.status).to_lowercase());
        }

        let Ok(Some(form)) = self.document.query_selector("[data-contact-form]") else {
            return;
        };
        for input in elements(form.query_selector_all("input, textarea, button")) {
            let name = input.get_attribute("name");
            let field = Field::ALL.into_iter().find(|f| name.as_deref() == Some(f.key()));
            let invalid = field.is_some() && field == contact.invalid_field;

            if invalid {
                let _ = input.set_attribute("aria-invalid", "true");
            } else {
                let _ = input.remove_attribute("aria-invalid");
            }

            if let Some(el) = input.dyn_ref::<HtmlInputElement>() {
                el.set_disabled(!contact.inputs_enabled);
                if let Some(field) = field {
                    sync_value(&el.value(), contact.fields.get(field), |v| el.set_value(v));
                }
            } else if let Some(el) = input.dyn_ref::<HtmlTextAreaElement>() {
                el.set_disabled(!contact.inputs_enabled);
                if let Some(field) = field {
                    sync_value(&el.value(), contact.fields.get(field), |v| el.set_value(v));
                }
            } else if let Some(el) = input.dyn_ref::<web_sys::HtmlButtonElement>() {
                el.set_disabled(!contact.inputs_enabled);
            }
        }
    }
}

fn sync_value(current: &str, wanted: &str, set: impl FnOnce(&str)) {
    if current != wanted {
        set(wanted);
    }
}

fn set_hidden(element: &Element, hidden: bool) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        el.set_hidden(hidden);
    }
}

fn render_carousel(card: &Element, view: &CarouselView) {
    let find = |selector: &str| card.query_selector(selector).ok().flatten();

    if let Some(img) = find("[data-carousel-image]").and_then(|el| el.dyn_into::<HtmlImageElement>().ok()) {
        match &view.image {
            Some(url) => {
                if img.get_attribute("src").as_deref() != Some(url.as_str()) {
                    img.set_src(url);
                }
                img.set_hidden(false);
            }
            None => img.set_hidden(true),
        }
    }

    if let Some(el) = find("[data-carousel-spinner]") {
        set_hidden(&el, !view.loading);
    }
    if let Some(el) = find("[data-carousel-placeholder]") {
        set_hidden(&el, !view.degraded);
    }
    if let Some(el) = find("[data-carousel-controls]") {
        set_hidden(&el, !view.show_controls);
    }

    for dot in elements(card.query_selector_all("[data-carousel-dot]")) {
        let current = dot
            .get_attribute("data-index")
            .and_then(|i| i.parse::<usize>().ok())
            == Some(view.current_index);
        let _ = dot.set_attribute("aria-current", if current { "true" } else { "false" });
    }
}

/// Maps a click to a library event using the markup contract.
fn click_event(event: &web_sys::Event) -> Option<Event> {
    if let Some(link) = closest(event.target(), "[data-nav]") {
        event.prevent_default();
        return link.get_attribute("data-nav").map(Event::Navigate);
    }
    if closest(event.target(), "[data-toggle-menu]").is_some() {
        return Some(Event::ToggleMenu);
    }
    if let Some(button) = closest(event.target(), "[data-category]") {
        let label = button.get_attribute("data-category")?;
        return CategoryFilter::from_label(&label).map(Event::SetCategory);
    }

    let carousel = closest(event.target(), "[data-carousel]")?;
    let project = ProjectId(carousel.get_attribute("data-carousel")?);

    if closest(event.target(), "[data-carousel-next]").is_some() {
        return Some(Event::CarouselNext(project));
    }
    if closest(event.target(), "[data-carousel-prev]").is_some() {
        return Some(Event::CarouselPrev(project));
    }
    let dot = closest(event.target(), "[data-carousel-dot]")?;
    let index = dot.get_attribute("data-index")?.parse().ok()?;
    Some(Event::CarouselGoTo { project, index })
}

/// Maps `mouseover`/`mouseout` to hover changes, ignoring moves within the carousel.
fn hover_event(event: &web_sys::Event, entered: bool) -> Option<Event> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let carousel = closest(event.target(), "[data-carousel]")?;
    let related = mouse.related_target().and_then(|t| t.dyn_into::<Node>().ok());
    if carousel.contains(related.as_ref()) {
        return None;
    }
    let project = ProjectId(carousel.get_attribute("data-carousel")?);
    Some(Event::CarouselHover { project, entered })
}

fn input_event(event: &web_sys::Event) -> Option<Event> {
    closest(event.target(), "[data-contact-form]")?;
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let name = target.get_attribute("name")?;
    let field = Field::ALL.into_iter().find(|f| f.key() == name)?;

    let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        target.dyn_ref::<HtmlTextAreaElement>()?.value()
    };
    Some(Event::FieldChanged { field, value })
}

fn image_error_event(event: &web_sys::Event) -> Option<Event> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.get_attribute("data-carousel-image")?;
    let carousel = target.closest("[data-carousel]").ok()??;
    Some(Event::ImageError(ProjectId(carousel.get_attribute("data-carousel")?)))
}

/// Installs one delegated listener per DOM event type. Listeners live as long as the page.
fn bind_listeners(host: &Rc<RefCell<Host>>, document: &Document) -> Result<(), JsValue> {
    type Mapper = fn(&web_sys::Event) -> Option<Event>;

    let bindings: [(&str, bool, Mapper); 6] = [
        ("click", false, click_event),
        ("mouseover", false, |e| hover_event(e, true)),
        ("mouseout", false, |e| hover_event(e, false)),
        ("input", false, input_event),
        ("submit", false, |e| {
            closest(e.target(), "[data-contact-form]")?;
            e.prevent_default();
            Some(Event::SubmitContact)
        }),
        // Image errors do not bubble; listen in the capture phase.
        ("error", true, image_error_event),
    ];

    for (name, capture, mapper) in bindings {
        let host = Rc::clone(host);
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(event) = mapper(&event) {
                dispatch(&host, event);
            }
        });
        document.add_event_listener_with_callback_and_bool(name, listener.as_ref().unchecked_ref(), capture)?;
        listener.forget();
    }

    let window = web_sys::window().ok_or("no window")?;
    let host = Rc::clone(host);
    let on_hide = Closure::<dyn FnMut()>::new(move || dispatch(&host, Event::Stop));
    window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
    on_hide.forget();

    Ok(())
}

/// Reports project card visibility so hidden carousels stop autoplaying.
fn observe_cards(host: &Rc<RefCell<Host>>, document: &Document) -> Result<(), JsValue> {
    let host = Rc::downgrade(host);
    let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let Some(id) = entry.target().get_attribute("data-project") else {
                continue;
            };
            dispatch_weak(
                &host,
                Event::CardVisibility {
                    project: ProjectId(id),
                    visible: entry.is_intersecting(),
                },
            );
        }
    });

    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for card in elements(document.query_selector_all("[data-project]")) {
        observer.observe(&card);
    }
    callback.forget();
    Ok(())
}

/// Releases observations of reveal elements that leave the document.
fn watch_reveal_removals(host: &Rc<RefCell<Host>>, document: &Document) -> Result<(), JsValue> {
    let host = Rc::downgrade(host);
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _: MutationObserver| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<MutationRecord>() else {
                    continue;
                };
                let removed = record.removed_nodes();
                for node in (0..removed.length()).filter_map(|i| removed.get(i)) {
                    for element in reveals_within(&node) {
                        if let Some(key) = element.get_attribute("data-reveal") {
                            dispatch_weak(&host, Event::ElementRemoved(RevealKey(key)));
                        }
                    }
                }
            }
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    observer.observe_with_options(document, &init)?;
    callback.forget();
    Ok(())
}
