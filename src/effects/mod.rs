//! Decorative effects: hero parallax, floating cards, orbs, card tilt,
//! load fade and the Konami easter egg
//!
//! None of these carry state the rest of the page depends on. Every handler
//! is a pure style write except the easter egg, which owns two timers:
//!
//! ```text
//! konami match ─► <style> rainbow keyframes into head
//!               ─► overlay into body
//!                     │ 3000ms
//!                     ▼
//!               overlay animation reversed
//!                     │ 500ms
//!                     ▼
//!               overlay removed
//! ```

pub mod konami;
pub mod motion;

pub use konami::KonamiBuffer;
pub use motion::{orb_offset, Parallax, Tilt};

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::EffectsConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;

const RAINBOW_CSS: &str = "
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}
.gradient-orb, .skill-progress, .btn-primary, .category-icon {
    animation: rainbow 2s linear infinite !important;
}
";

const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "50%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%)"),
    ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("color", "white"),
    ("padding", "30px 50px"),
    ("border-radius", "20px"),
    ("font-size", "24px"),
    ("font-weight", "bold"),
    ("z-index", "10000"),
    ("animation", "scaleIn 0.5s ease"),
    ("box-shadow", "0 20px 60px rgba(0,0,0,0.5)"),
];

pub const EASTER_EGG_MESSAGE: &str = "🎉 You found the secret! 🎉";

const FLOATING_HOVER: &str = "translateY(-30px) scale(1.1)";

#[derive(Debug, Clone, Default)]
pub struct EffectsElements {
    pub hero: Option<Element>,
    /// Moves and fades with the parallax
    pub hero_content: Option<Element>,
    pub floating_cards: Vec<Element>,
    pub orbs: Vec<Element>,
    /// Cards that tilt toward the cursor
    pub tilt_cards: Vec<Element>,
    pub head: Option<Element>,
    pub body: Option<Element>,
}

pub struct DecorativeEffects {
    elements: EffectsElements,
    config: EffectsConfig,
    scheduler: Scheduler,
    konami: RefCell<KonamiBuffer>,
    timers: Rc<RefCell<Vec<TimerId>>>,
}

impl DecorativeEffects {
    /// Staggers the floating-card animations as a side effect
    pub fn new(elements: EffectsElements, config: EffectsConfig, scheduler: Scheduler) -> Self {
        for (index, card) in elements.floating_cards.iter().enumerate() {
            card.set_style("animation-delay", &format!("{}s", index as f64 * config.floating_stagger_s));
        }
        Self {
            elements,
            config,
            scheduler,
            konami: RefCell::new(KonamiBuffer::new()),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn elements(&self) -> &EffectsElements { &self.elements }

    /// Parallax for the hero while it is still on screen
    pub fn on_scroll(&self, scroll_y: f64) {
        let (Some(hero), Some(content)) = (&self.elements.hero, &self.elements.hero_content) else {
            return;
        };
        if let Some(p) = Parallax::at(scroll_y, hero.offset_height(), self.config.parallax_rate) {
            content.set_style("transform", &p.transform());
            content.set_style("opacity", &p.opacity.to_string());
        }
    }

    /// Document mouse move; orbs drift with the normalized cursor position
    pub fn on_mouse_move(&self, client_x: f64, client_y: f64, viewport_width: f64, viewport_height: f64) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        let (x, y) = (client_x / viewport_width, client_y / viewport_height);
        for (index, orb) in self.elements.orbs.iter().enumerate() {
            let (dx, dy) = orb_offset(index, x, y, self.config.orb_speed);
            orb.set_style("transform", &motion::translate(dx, dy));
        }
    }

    pub fn on_card_move(&self, card: &Element, client_x: f64, client_y: f64) {
        let tilt = Tilt::at(card.bounding_rect(), client_x, client_y, self.config.tilt_divisor);
        card.set_style("transform", &tilt.transform());
    }

    pub fn on_card_leave(&self, card: &Element) {
        card.set_style("transform", "");
    }

    pub fn on_floating_enter(&self, card: &Element) {
        card.set_style("transform", FLOATING_HOVER);
    }

    pub fn on_floating_leave(&self, card: &Element) {
        card.set_style("transform", "");
    }

    /// Window load: hide the body, then fade it in
    pub fn on_load(&self) {
        let Some(body) = self.elements.body.clone() else { return };
        body.set_style("opacity", "0");
        let id = self.scheduler.set_timeout(self.config.load_fade_delay_ms, move || {
            body.set_style("transition", "opacity 0.5s ease");
            body.set_style("opacity", "1");
        });
        self.timers.borrow_mut().push(id);
    }

    /// Feed a key to the Konami detector; returns whether it fired
    pub fn on_key(&self, key: &str) -> bool {
        let matched = self.konami.borrow_mut().push(key);
        if matched {
            self.easter_egg();
        }
        matched
    }

    fn easter_egg(&self) {
        info!("konami code entered");
        if let Some(style) = self.elements.head.as_ref().and_then(|h| h.append_new("style")) {
            style.set_text(RAINBOW_CSS);
        }
        let Some(overlay) = self.elements.body.as_ref().and_then(|b| b.append_new("div")) else {
            return;
        };
        for (property, value) in OVERLAY_STYLE {
            overlay.set_style(property, value);
        }
        overlay.set_text(EASTER_EGG_MESSAGE);

        let scheduler = self.scheduler.clone();
        let timers = self.timers.clone();
        let exit_ms = self.config.easter_egg_exit_ms;
        let id = self.scheduler.set_timeout(self.config.easter_egg_ms, move || {
            overlay.set_style("animation", "scaleIn 0.5s ease reverse");
            let id = scheduler.set_timeout(exit_ms, move || {
                overlay.remove();
                debug!("easter egg dismissed");
            });
            timers.borrow_mut().push(id);
        });
        self.timers.borrow_mut().push(id);
    }

    pub fn dispose(&self) {
        for id in self.timers.borrow_mut().drain(..) {
            self.scheduler.clear(id);
        }
    }
}
