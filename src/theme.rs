//! Theme: light/dark switch with a persisted preference
//!
//! Initial theme resolution:
//!
//! | Stored value | System prefers light | Result |
//! |--------------|----------------------|--------|
//! | `"light"` / `"dark"` | ignored | stored value |
//! | absent, unreadable or unknown | `true` | light |
//! | absent, unreadable or unknown | `false` / unknown | dark |
//!
//! Persistence is best effort. A storage failure is logged and the theme
//! keeps working in memory for the rest of the session.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::ThemeConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;
use crate::core::prefs::Preferences;
use crate::core::selectors::{attr, class};

const SUN_ICON: &str = r#"<i class="fas fa-sun"></i>"#;
const MOON_ICON: &str = r#"<i class="fas fa-moon"></i>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self { Self::Dark }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle icon markup: the icon shows the theme a click switches to
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => MOON_ICON,
            Theme::Dark => SUN_ICON,
        }
    }

    pub fn resolve(stored: Option<&str>, prefers_light: Option<bool>) -> Self {
        if let Some(theme) = stored.and_then(Theme::from_str) {
            return theme;
        }
        match prefers_light {
            Some(true) => Theme::Light,
            _ => Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeElements {
    /// Element carrying the theme class and `data-theme` (body or html)
    pub root: Option<Element>,
    pub toggle: Option<Element>,
}

pub struct ThemeController {
    elements: ThemeElements,
    config: ThemeConfig,
    preferences: Preferences,
    scheduler: Scheduler,
    theme: Cell<Theme>,
    animation: Rc<Cell<Option<TimerId>>>,
}

impl ThemeController {
    pub fn new(
        elements: ThemeElements,
        config: ThemeConfig,
        preferences: Preferences,
        scheduler: Scheduler,
        prefers_light: Option<bool>,
    ) -> Self {
        let stored = match preferences.get(&config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                warn!("theme preference unreadable, using defaults: {}", e);
                None
            }
        };
        let theme = Theme::resolve(stored.as_deref(), prefers_light);
        debug!(theme = theme.as_str(), ?stored, ?prefers_light, "theme resolved");

        let controller = Self {
            elements,
            config,
            preferences,
            scheduler,
            theme: Cell::new(theme),
            animation: Rc::new(Cell::new(None)),
        };
        controller.apply(theme);
        controller
    }

    pub fn theme(&self) -> Theme { self.theme.get() }

    /// Swap themes, animate the toggle and persist the new value
    pub fn toggle(&self) -> Theme {
        let theme = self.theme.get().toggled();
        self.theme.set(theme);
        self.apply(theme);
        self.animate();

        if let Err(e) = self.preferences.set(&self.config.storage_key, theme.as_str()) {
            warn!("theme preference not saved: {}", e);
        }
        debug!(theme = theme.as_str(), "theme toggled");
        theme
    }

    fn apply(&self, theme: Theme) {
        if let Some(root) = &self.elements.root {
            root.set_class(class::LIGHT_THEME, theme == Theme::Light);
            root.set_attribute(attr::THEME, theme.as_str());
        }
        if let Some(toggle) = &self.elements.toggle {
            toggle.set_inner_html(theme.icon());
            toggle.set_attribute(attr::ARIA_LABEL, &format!("Switch to {} theme", theme.toggled().as_str()));
        }
    }

    fn animate(&self) {
        let Some(toggle) = self.elements.toggle.clone() else { return };
        if let Some(id) = self.animation.take() {
            self.scheduler.clear(id);
        }
        toggle.add_class(class::ANIMATING);

        let slot = self.animation.clone();
        let id = self.scheduler.set_timeout(self.config.animation_ms, move || {
            toggle.remove_class(class::ANIMATING);
            slot.set(None);
        });
        self.animation.set(Some(id));
    }

    pub fn dispose(&self) {
        if let Some(id) = self.animation.take() {
            self.scheduler.clear(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::VirtualClock;
    use crate::core::element::MemoryElement;
    use crate::core::prefs::MemoryPreferences;

    fn elements() -> ThemeElements {
        ThemeElements {
            root: Some(MemoryElement::new("body").into()),
            toggle: Some(MemoryElement::new("button").into()),
        }
    }

    #[test]
    fn resolution_order() {
        assert_eq!(Theme::resolve(Some("light"), Some(false)), Theme::Light);
        assert_eq!(Theme::resolve(Some("dark"), Some(true)), Theme::Dark);
        assert_eq!(Theme::resolve(None, Some(true)), Theme::Light);
        assert_eq!(Theme::resolve(None, Some(false)), Theme::Dark);
        assert_eq!(Theme::resolve(None, None), Theme::Dark);
        assert_eq!(Theme::resolve(Some("sepia"), Some(true)), Theme::Light);
    }

    #[test]
    fn double_toggle_is_identity() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_ne!(theme.icon(), theme.toggled().icon());
        }
    }

    #[test]
    fn persisted_value_tracks_toggles() {
        let clock = VirtualClock::new();
        let prefs = MemoryPreferences::new();
        let els = elements();
        let root = els.root.clone().unwrap();
        let controller = ThemeController::new(els, ThemeConfig::default(), prefs.clone().into(), clock.into(), None);

        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(prefs.get("theme").unwrap(), None);

        let mut expected = Theme::Dark;
        for _ in 0..5 {
            expected = expected.toggled();
            assert_eq!(controller.toggle(), expected);
            assert_eq!(prefs.get("theme").unwrap().as_deref(), Some(expected.as_str()));
        }
        assert_eq!(root.has_class("light-theme"), expected == Theme::Light);
        assert_eq!(root.attribute("data-theme").as_deref(), Some(expected.as_str()));
    }

    #[test]
    fn animating_flag_clears_after_500ms() {
        let clock = VirtualClock::new();
        let els = elements();
        let toggle = els.toggle.clone().unwrap();
        let controller =
            ThemeController::new(els, ThemeConfig::default(), MemoryPreferences::new().into(), clock.clone().into(), None);

        controller.toggle();
        assert!(toggle.has_class("animating"));
        assert_eq!(toggle.inner_html(), MOON_ICON);
        clock.advance(499);
        assert!(toggle.has_class("animating"));
        clock.advance(1);
        assert!(!toggle.has_class("animating"));
    }

    #[test]
    fn denied_storage_falls_back_to_memory() {
        let prefs = MemoryPreferences::new();
        prefs.set("theme", "light").unwrap();
        prefs.deny();

        let controller =
            ThemeController::new(elements(), ThemeConfig::default(), prefs.clone().into(), VirtualClock::new().into(), Some(false));
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);

        prefs.allow();
        assert_eq!(prefs.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn preference_is_stored_as_bare_literal() {
        let prefs = MemoryPreferences::new();
        let controller =
            ThemeController::new(elements(), ThemeConfig::default(), prefs.clone().into(), VirtualClock::new().into(), None);
        controller.toggle();
        assert_eq!(prefs.get("theme").unwrap().as_deref(), Some("light"));

        // A bare value written by a page script is honored; a quoted one is not
        let bare = MemoryPreferences::new();
        bare.set("theme", "light").unwrap();
        let controller =
            ThemeController::new(elements(), ThemeConfig::default(), bare.into(), VirtualClock::new().into(), Some(false));
        assert_eq!(controller.theme(), Theme::Light);

        let quoted = MemoryPreferences::new();
        quoted.set("theme", "\"light\"").unwrap();
        let controller =
            ThemeController::new(elements(), ThemeConfig::default(), quoted.into(), VirtualClock::new().into(), Some(false));
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn stored_preference_wins() {
        let prefs = MemoryPreferences::new();
        prefs.set("theme", "light").unwrap();
        let els = elements();
        let toggle = els.toggle.clone().unwrap();
        let controller = ThemeController::new(els, ThemeConfig::default(), prefs.into(), VirtualClock::new().into(), Some(false));
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(toggle.inner_html(), MOON_ICON);
    }
}
