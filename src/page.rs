//! Page: composition root for every behavior on the portfolio page
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!   events ──────►│             Page             │
//!                 │                              │
//!                 │  NavigationController        │
//!                 │  ThemeController             │
//!                 │  TypingAnimator      (opt)   │
//!                 │  RevealObserver              │
//!                 │  ProjectsCarousel    (opt)   │
//!                 │  ContactFormHandler  (opt)   │
//!                 │  DecorativeEffects           │
//!                 └──────────────┬───────────────┘
//!                                │
//!                 Scheduler · Preferences · Element
//! ```
//!
//! Components never see each other. Each one skips itself when its
//! elements are missing, so a page without a carousel or a contact form
//! mounts the rest unchanged.
//!
//! | Event | Receivers |
//! |-------|-----------|
//! | scroll | nav (scrolled flag, debounced highlight), hero parallax |
//! | resize | carousel page size |
//! | key | carousel arrows, Konami detector |
//! | mouse move | gradient orbs |
//! | load | body fade |

use std::cell::Cell;

use tracing::info;

use crate::carousel::{CarouselElements, ProjectsCarousel};
use crate::config::PageConfig;
use crate::contact::{ContactElements, ContactFormHandler};
use crate::core::clock::Scheduler;
use crate::core::element::Element;
use crate::core::prefs::Preferences;
use crate::effects::{DecorativeEffects, EffectsElements};
use crate::nav::{NavElements, NavigationController};
use crate::reveal::{RevealObserver, RevealTarget};
use crate::theme::{Theme, ThemeController, ThemeElements};
use crate::typing::TypingAnimator;

/// Every element handle the page works with
#[derive(Debug, Clone, Default)]
pub struct PageElements {
    pub nav: NavElements,
    pub theme: ThemeElements,
    pub typed_output: Option<Element>,
    pub reveal: Vec<RevealTarget>,
    pub carousel: CarouselElements,
    pub contact: ContactElements,
    pub effects: EffectsElements,
}

/// What the host knows about the viewport at mount time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// `None` when the host cannot answer the color-scheme query
    pub prefers_light: Option<bool>,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self { prefers_light: None, viewport_width: 1280.0, viewport_height: 800.0 }
    }
}

pub struct Page {
    nav: NavigationController,
    theme: ThemeController,
    typing: Option<TypingAnimator>,
    reveal: RevealObserver,
    carousel: Option<ProjectsCarousel>,
    contact: Option<ContactFormHandler>,
    effects: DecorativeEffects,
    viewport: Cell<(f64, f64)>,
}

impl Page {
    /// Build every component and start the typing loop
    pub fn mount(
        elements: PageElements,
        config: PageConfig,
        scheduler: Scheduler,
        preferences: Preferences,
        environment: Environment,
    ) -> Self {
        let nav = NavigationController::new(elements.nav, config.nav, scheduler.clone());
        let theme = ThemeController::new(
            elements.theme,
            config.theme,
            preferences,
            scheduler.clone(),
            environment.prefers_light,
        );

        let typing = TypingAnimator::new(elements.typed_output, config.typing, scheduler.clone());
        if let Some(typing) = &typing {
            typing.start();
        }

        let reveal = RevealObserver::new(config.reveal, scheduler.clone());
        let targets = elements.reveal.len();
        for target in elements.reveal {
            reveal.observe(target);
        }

        let carousel = ProjectsCarousel::new(
            elements.carousel,
            config.carousel,
            scheduler.clone(),
            environment.viewport_width,
        );
        let contact = ContactFormHandler::new(elements.contact, config.contact, scheduler.clone());
        let effects = DecorativeEffects::new(elements.effects, config.effects, scheduler);

        info!(
            theme = theme.theme().as_str(),
            typing = typing.is_some(),
            reveal_targets = targets,
            carousel = carousel.is_some(),
            contact = contact.is_some(),
            "page mounted"
        );

        Self {
            nav,
            theme,
            typing,
            reveal,
            carousel,
            contact,
            effects,
            viewport: Cell::new((environment.viewport_width, environment.viewport_height)),
        }
    }

    pub fn nav(&self) -> &NavigationController { &self.nav }
    pub fn theme(&self) -> &ThemeController { &self.theme }
    pub fn typing(&self) -> Option<&TypingAnimator> { self.typing.as_ref() }
    pub fn reveal(&self) -> &RevealObserver { &self.reveal }
    pub fn carousel(&self) -> Option<&ProjectsCarousel> { self.carousel.as_ref() }
    pub fn contact(&self) -> Option<&ContactFormHandler> { self.contact.as_ref() }
    pub fn effects(&self) -> &DecorativeEffects { &self.effects }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.toggle()
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        self.nav.on_scroll(scroll_y);
        self.effects.on_scroll(scroll_y);
    }

    pub fn on_resize(&self, viewport_width: f64, viewport_height: f64) {
        self.viewport.set((viewport_width, viewport_height));
        if let Some(carousel) = &self.carousel {
            carousel.recompute_on_resize(viewport_width);
        }
    }

    /// Document keydown; returns whether the carousel handled the key
    pub fn on_key(&self, key: &str) -> bool {
        let handled = self.carousel.as_ref().map(|c| c.on_key(key)).unwrap_or(false);
        self.effects.on_key(key);
        handled
    }

    pub fn on_mouse_move(&self, client_x: f64, client_y: f64) {
        let (width, height) = self.viewport.get();
        self.effects.on_mouse_move(client_x, client_y, width, height);
    }

    pub fn on_load(&self) {
        self.effects.on_load();
    }

    /// Visibility report from the host's intersection observer
    pub fn on_intersection(&self, element: &Element, intersecting: bool) -> bool {
        self.reveal.on_intersection(element, intersecting)
    }

    /// Stop every timer the page owns
    pub fn dispose(&self) {
        if let Some(typing) = &self.typing {
            typing.stop();
        }
        if let Some(carousel) = &self.carousel {
            carousel.dispose();
        }
        if let Some(contact) = &self.contact {
            contact.dispose();
        }
        self.nav.dispose();
        self.theme.dispose();
        self.reveal.dispose();
        self.effects.dispose();
        info!("page disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::VirtualClock;
    use crate::core::element::MemoryElement;
    use crate::core::prefs::MemoryPreferences;

    #[test]
    fn empty_page_mounts_and_ignores_events() {
        let clock = VirtualClock::new();
        let page = Page::mount(
            PageElements::default(),
            PageConfig::default(),
            clock.clone().into(),
            MemoryPreferences::new().into(),
            Environment::default(),
        );
        assert!(page.typing().is_none());
        assert!(page.carousel().is_none());
        assert!(page.contact().is_none());

        page.on_scroll(400.0);
        page.on_resize(500.0, 800.0);
        assert!(!page.on_key("ArrowRight"));
        page.on_mouse_move(10.0, 10.0);
        page.on_load();
        clock.advance(1000);
        page.dispose();
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn dispose_stops_typing() {
        let clock = VirtualClock::new();
        let output = MemoryElement::new("span");
        let elements = PageElements { typed_output: Some(output.clone().into()), ..Default::default() };
        let page = Page::mount(
            elements,
            PageConfig::default(),
            clock.clone().into(),
            MemoryPreferences::new().into(),
            Environment::default(),
        );
        clock.advance(1100);
        assert_eq!(output.inner_html(), "UI");
        page.dispose();
        assert_eq!(clock.pending(), 0);
    }
}
