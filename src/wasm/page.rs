//! FolioPage: binds `Page` to the live document
//!
//! Mounting queries every selector once. Components receive `WebElement`s;
//! listeners translate DOM events into `Page` calls:
//!
//! | Target | Event | Call |
//! |--------|-------|------|
//! | window | scroll / resize / load | `on_scroll` / `on_resize` / `on_load` |
//! | document | keydown / mousemove | `on_key` / `on_mouse_move` |
//! | `.menu-toggle`, `.nav-link` | click | toggle / close mobile menu |
//! | `a[href^="#"]` | click | smooth scroll to target − 80px |
//! | `.theme-toggle` | click | toggle theme |
//! | carousel buttons, dots | click | prev / next / go to slide |
//! | carousel track | touch, hover | swipe, pause / resume autoplay |
//! | `.contact-form` | submit | simulated send |
//! | floating and project cards | pointer | hover lift, tilt |
//!
//! Reveal targets go to an `IntersectionObserver`; a target is unobserved as
//! soon as it reveals.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent, NodeList, ScrollBehavior, ScrollToOptions, TouchEvent, Window,
};

use super::{greet, log, BrowserTimers, LocalPreferences, WebElement};
use crate::carousel::CarouselElements;
use crate::config::{PageConfig, RevealConfig};
use crate::contact::ContactElements;
use crate::core::clock::Scheduler;
use crate::core::element::Element;
use crate::core::prefs::Preferences;
use crate::core::selectors::{carousel, contact, hero, nav, reveal, theme};
use crate::effects::EffectsElements;
use crate::nav::NavElements;
use crate::page::{Environment, Page, PageElements};
use crate::reveal::RevealTarget;
use crate::theme::ThemeElements;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// The mounted page, exported to JavaScript
#[wasm_bindgen]
pub struct FolioPage {
    page: Rc<Page>,
    listeners: RefCell<Vec<EventListener>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
}

#[wasm_bindgen]
impl FolioPage {
    /// Mount on the current document. `config` is an optional object with
    /// any subset of the page configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FolioPage, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            PageConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        Self::mount(config)
    }

    /// Mount with a configuration given as a JSON string
    #[wasm_bindgen(js_name = "fromJson")]
    pub fn from_json(json: &str) -> Result<FolioPage, JsValue> {
        let config = PageConfig::from_json(json).map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        Self::mount(config)
    }

    /// Switch themes; returns the new theme name
    #[wasm_bindgen(js_name = "toggleTheme")]
    pub fn toggle_theme(&self) -> String {
        self.page.toggle_theme().as_str().to_string()
    }

    #[wasm_bindgen]
    pub fn theme(&self) -> String {
        self.page.theme().theme().as_str().to_string()
    }

    #[wasm_bindgen]
    pub fn next(&self) {
        if let Some(carousel) = self.page.carousel() {
            carousel.next();
        }
    }

    #[wasm_bindgen]
    pub fn prev(&self) {
        if let Some(carousel) = self.page.carousel() {
            carousel.prev();
        }
    }

    #[wasm_bindgen(js_name = "goToSlide")]
    pub fn go_to_slide(&self, index: usize) {
        if let Some(carousel) = self.page.carousel() {
            carousel.go_to_slide(index);
        }
    }

    /// Remove every listener and stop every timer
    #[wasm_bindgen]
    pub fn dispose(&self) {
        self.listeners.borrow_mut().clear();
        if let Some((observer, _callback)) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.page.dispose();
    }
}

impl FolioPage {
    fn mount(config: PageConfig) -> Result<FolioPage, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

        let reveal_config = config.reveal.clone();
        let anchor_offset = config.nav.anchor_offset_px;
        let environment = environment(&window);
        let elements = collect_elements(&document);

        let page = Rc::new(Page::mount(
            elements,
            config,
            Scheduler::Browser(BrowserTimers::new()),
            Preferences::Local(LocalPreferences::new()),
            environment,
        ));

        let folio = FolioPage {
            page,
            listeners: RefCell::new(Vec::new()),
            observer: RefCell::new(None),
        };
        folio.install_window_listeners(&window, &document);
        folio.install_nav_listeners(&window, &document, anchor_offset);
        folio.install_component_listeners(&document);
        folio.install_observer(&reveal_config)?;

        greet();
        log!("[FolioPage] mounted");
        Ok(folio)
    }

    fn install_window_listeners(&self, window: &Window, document: &Document) {
        let mut listeners = self.listeners.borrow_mut();

        let page = Rc::clone(&self.page);
        let win = window.clone();
        listeners.push(EventListener::new(window, "scroll", move |_event| {
            page.on_scroll(win.scroll_y().unwrap_or(0.0));
        }));

        let page = Rc::clone(&self.page);
        let win = window.clone();
        listeners.push(EventListener::new(window, "resize", move |_event| {
            let (width, height) = viewport(&win);
            page.on_resize(width, height);
        }));

        let page = Rc::clone(&self.page);
        listeners.push(EventListener::new(window, "load", move |_event| {
            page.on_load();
        }));

        let page = Rc::clone(&self.page);
        listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                page.on_key(&event.key());
            }
        }));

        let page = Rc::clone(&self.page);
        listeners.push(EventListener::new(document, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                page.on_mouse_move(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        }));
    }

    fn install_nav_listeners(&self, window: &Window, document: &Document, anchor_offset: f64) {
        let mut listeners = self.listeners.borrow_mut();

        if let Some(toggle) = query(document, nav::MENU_TOGGLE) {
            let page = Rc::clone(&self.page);
            listeners.push(EventListener::new(&toggle, "click", move |_event| {
                page.nav().toggle_menu();
            }));
        }

        for link in self.page.nav().links().iter().filter_map(web) {
            let page = Rc::clone(&self.page);
            listeners.push(EventListener::new(link, "click", move |_event| {
                page.nav().on_link_click();
            }));
        }

        for anchor in html_elements(document.query_selector_all(nav::ANCHORS).ok()) {
            let page = Rc::clone(&self.page);
            let win = window.clone();
            let doc = document.clone();
            let target = anchor.clone();
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    let Some(href) = target.get_attribute("href") else { return };
                    let top = page.nav().scroll_target(&href).or_else(|| {
                        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
                        let el = doc.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()?;
                        Some(f64::from(el.offset_top()) - anchor_offset)
                    });
                    if let Some(top) = top {
                        let options = ScrollToOptions::new();
                        options.set_top(top);
                        options.set_behavior(ScrollBehavior::Smooth);
                        win.scroll_to_with_scroll_to_options(&options);
                    }
                },
            ));
        }
    }

    fn install_component_listeners(&self, document: &Document) {
        let mut listeners = self.listeners.borrow_mut();

        if let Some(toggle) = query(document, theme::TOGGLE) {
            let page = Rc::clone(&self.page);
            listeners.push(EventListener::new(&toggle, "click", move |_event| {
                page.toggle_theme();
            }));
        }

        if let Some(slides) = self.page.carousel() {
            for (selector, forward) in [(carousel::PREV, false), (carousel::NEXT, true)] {
                let Some(button) = query(document, selector) else { continue };
                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(&button, "click", move |_event| {
                    if let Some(carousel) = page.carousel() {
                        if forward { carousel.next() } else { carousel.prev() }
                    }
                }));
            }

            for (index, dot) in slides.dots().iter().enumerate() {
                let Some(dot) = web(dot) else { continue };
                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(dot, "click", move |_event| {
                    if let Some(carousel) = page.carousel() {
                        carousel.go_to_slide(index);
                    }
                }));
            }

            if let Some(track) = query(document, carousel::TRACK) {
                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(&track, "touchstart", move |event: &Event| {
                    let Some(touch) = event.dyn_ref::<TouchEvent>().and_then(|e| e.touches().get(0)) else {
                        return;
                    };
                    if let Some(carousel) = page.carousel() {
                        carousel.on_touch_start(f64::from(touch.client_x()));
                    }
                }));

                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(&track, "touchend", move |event: &Event| {
                    let Some(touch) = event.dyn_ref::<TouchEvent>().and_then(|e| e.changed_touches().get(0)) else {
                        return;
                    };
                    if let Some(carousel) = page.carousel() {
                        carousel.on_touch_end(f64::from(touch.client_x()));
                    }
                }));

                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(&track, "mouseenter", move |_event| {
                    if let Some(carousel) = page.carousel() {
                        carousel.pause_autoplay();
                    }
                }));

                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new(&track, "mouseleave", move |_event| {
                    if let Some(carousel) = page.carousel() {
                        carousel.resume_autoplay();
                    }
                }));
            }
        }

        if self.page.contact().is_some() {
            if let Some(form) = query(document, contact::FORM) {
                let page = Rc::clone(&self.page);
                listeners.push(EventListener::new_with_options(
                    &form,
                    "submit",
                    EventListenerOptions::enable_prevent_default(),
                    move |event: &Event| {
                        event.prevent_default();
                        if let Some(contact) = page.contact() {
                            contact.submit();
                        }
                    },
                ));
            }
        }

        let effects = self.page.effects().elements();
        for card in effects.floating_cards.iter().filter_map(web) {
            let page = Rc::clone(&self.page);
            let el = Element::Web(WebElement::new(card.clone()));
            listeners.push(EventListener::new(card, "mouseenter", move |_event| {
                page.effects().on_floating_enter(&el);
            }));

            let page = Rc::clone(&self.page);
            let el = Element::Web(WebElement::new(card.clone()));
            listeners.push(EventListener::new(card, "mouseleave", move |_event| {
                page.effects().on_floating_leave(&el);
            }));
        }

        for card in effects.tilt_cards.iter().filter_map(web) {
            let page = Rc::clone(&self.page);
            let el = Element::Web(WebElement::new(card.clone()));
            listeners.push(EventListener::new(card, "mousemove", move |event: &Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    page.effects().on_card_move(&el, f64::from(event.client_x()), f64::from(event.client_y()));
                }
            }));

            let page = Rc::clone(&self.page);
            let el = Element::Web(WebElement::new(card.clone()));
            listeners.push(EventListener::new(card, "mouseleave", move |_event| {
                page.effects().on_card_leave(&el);
            }));
        }
    }

    fn install_observer(&self, config: &RevealConfig) -> Result<(), JsValue> {
        let page = Rc::clone(&self.page);
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                let target = entry.target();
                let Some(element) = WebElement::from_element(target.clone()) else { continue };
                if page.on_intersection(&Element::Web(element), entry.is_intersecting()) {
                    observer.unobserve(&target);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin);
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for element in self.page.reveal().watching() {
            if let Some(el) = web(&element) {
                observer.observe(el);
            }
        }
        *self.observer.borrow_mut() = Some((observer, callback));
        Ok(())
    }
}

// =============================================================================
// DOCUMENT QUERIES
// =============================================================================

fn web(element: &Element) -> Option<&HtmlElement> {
    match element {
        Element::Web(el) => Some(el.inner()),
        _ => None,
    }
}

fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document.query_selector(selector).ok().flatten()?.dyn_into::<HtmlElement>().ok()
}

fn query_in(parent: &HtmlElement, selector: &str) -> Option<HtmlElement> {
    parent.query_selector(selector).ok().flatten()?.dyn_into::<HtmlElement>().ok()
}

fn html_elements(list: Option<NodeList>) -> Vec<HtmlElement> {
    let Some(list) = list else { return Vec::new() };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn handle(el: HtmlElement) -> Element {
    Element::Web(WebElement::new(el))
}

fn one(document: &Document, selector: &str) -> Option<Element> {
    query(document, selector).map(handle)
}

fn all(document: &Document, selector: &str) -> Vec<Element> {
    html_elements(document.query_selector_all(selector).ok()).into_iter().map(handle).collect()
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

fn environment(window: &Window) -> Environment {
    let prefers_light = window
        .match_media(theme::PREFERS_LIGHT)
        .ok()
        .flatten()
        .map(|query| query.matches());
    let (viewport_width, viewport_height) = viewport(window);
    Environment { prefers_light, viewport_width, viewport_height }
}

fn reveal_targets(document: &Document) -> Vec<RevealTarget> {
    let mut targets = Vec::new();
    for selector in reveal::ALL {
        for el in html_elements(document.query_selector_all(selector).ok()) {
            let target = match *selector {
                reveal::SKILL_CATEGORY => {
                    let bars = html_elements(el.query_selector_all(reveal::SKILL_BAR).ok());
                    RevealTarget::skills(handle(el), bars.into_iter().map(handle).collect())
                }
                reveal::STAT_CARD => {
                    let number = query_in(&el, reveal::STAT_NUMBER).map(handle);
                    RevealTarget::stat(handle(el), number)
                }
                _ => RevealTarget::plain(handle(el)),
            };
            targets.push(target);
        }
    }
    targets
}

fn collect_elements(document: &Document) -> PageElements {
    let body = document.body().map(handle);
    let head = document.head().map(|head| handle(head.into()));

    let form = query(document, contact::FORM);
    let contact = ContactElements {
        submit: form.as_ref().and_then(|f| query_in(f, contact::SUBMIT)).map(handle),
        fields: form
            .as_ref()
            .map(|f| html_elements(f.query_selector_all(contact::FIELDS).ok()))
            .unwrap_or_default()
            .into_iter()
            .map(handle)
            .collect(),
        form: form.map(handle),
    };

    PageElements {
        nav: NavElements {
            navbar: one(document, nav::NAVBAR),
            toggle: one(document, nav::MENU_TOGGLE),
            panel: one(document, nav::PANEL),
            links: all(document, nav::LINKS),
            sections: all(document, nav::SECTIONS),
            body: body.clone(),
        },
        theme: ThemeElements { root: body.clone(), toggle: one(document, theme::TOGGLE) },
        typed_output: one(document, hero::TYPED_OUTPUT),
        reveal: reveal_targets(document),
        carousel: CarouselElements {
            track: one(document, carousel::TRACK),
            cards: all(document, carousel::CARDS),
            prev: one(document, carousel::PREV),
            next: one(document, carousel::NEXT),
            dots: one(document, carousel::DOTS),
        },
        contact,
        effects: EffectsElements {
            hero: one(document, hero::HERO),
            hero_content: one(document, hero::CONTENT),
            floating_cards: all(document, hero::FLOATING_CARDS),
            orbs: all(document, hero::ORBS),
            tilt_cards: all(document, reveal::PROJECT_CARD),
            head,
            body,
        },
    }
}
