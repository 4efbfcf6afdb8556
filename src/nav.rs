//! Navigation: active-link highlighting, mobile menu, smooth-scroll targets
//!
//! ```text
//! scroll ─┬─► navbar.scrolled  (every event)
//!         └─► Debouncer(50ms) ─► update_active_link(y)
//!                                   │
//!                                   ▼
//!              section containing y + 100 ─► link[href="#id"].active
//! ```

use tracing::debug;

use crate::config::NavConfig;
use crate::core::debounce::Debouncer;
use crate::core::element::Element;
use crate::core::clock::Scheduler;
use crate::core::selectors::{attr, class};

/// Elements the navigation works on. Any of them may be missing.
#[derive(Debug, Clone, Default)]
pub struct NavElements {
    pub navbar: Option<Element>,
    pub toggle: Option<Element>,
    pub panel: Option<Element>,
    pub links: Vec<Element>,
    pub sections: Vec<Element>,
    /// Receives `overflow: hidden` while the mobile menu is open
    pub body: Option<Element>,
}

/// Index of the first section whose vertical extent contains `position`
pub fn active_section(sections: &[Element], position: f64) -> Option<usize> {
    sections.iter().position(|section| {
        let top = section.offset_top();
        position >= top && position < top + section.offset_height()
    })
}

/// Mark the link pointing at the section under `position`, clear the rest
fn highlight(links: &[Element], sections: &[Element], position: f64) -> Option<String> {
    let target = active_section(sections, position)
        .and_then(|i| sections[i].attribute(attr::ID))
        .map(|id| format!("#{}", id));

    for link in links {
        let matches = target.is_some() && link.attribute(attr::HREF) == target;
        link.set_class(class::ACTIVE, matches);
    }
    target
}

pub struct NavigationController {
    elements: NavElements,
    config: NavConfig,
    highlighter: Debouncer<f64>,
}

impl NavigationController {
    pub fn new(elements: NavElements, config: NavConfig, scheduler: Scheduler) -> Self {
        let links = elements.links.clone();
        let sections = elements.sections.clone();
        let offset = config.offset_px;
        let highlighter = Debouncer::new(scheduler, config.debounce_ms, move |scroll_y: f64| {
            let target = highlight(&links, &sections, scroll_y + offset);
            debug!(scroll_y, ?target, "active nav link updated");
        });
        Self { elements, config, highlighter }
    }

    /// Scroll event: navbar flag now, link highlight after the quiet period
    pub fn on_scroll(&self, scroll_y: f64) {
        if let Some(navbar) = &self.elements.navbar {
            navbar.set_class(class::SCROLLED, scroll_y > self.config.scrolled_threshold_px);
        }
        self.highlighter.call(scroll_y);
    }

    /// Recompute the active link immediately
    pub fn update_active_link(&self, scroll_y: f64) -> Option<String> {
        highlight(&self.elements.links, &self.elements.sections, scroll_y + self.config.offset_px)
    }

    pub fn is_menu_open(&self) -> bool {
        self.elements.panel.as_ref().map(|p| p.has_class(class::ACTIVE)).unwrap_or(false)
    }

    /// Flip the mobile menu; returns whether it is now open
    pub fn toggle_menu(&self) -> bool {
        if self.elements.panel.is_none() {
            return false;
        }
        let open = !self.is_menu_open();
        self.set_menu(open);
        open
    }

    pub fn close_menu(&self) {
        if self.is_menu_open() {
            self.set_menu(false);
        }
    }

    /// A nav link was selected
    pub fn on_link_click(&self) {
        self.close_menu();
    }

    fn set_menu(&self, open: bool) {
        if let Some(panel) = &self.elements.panel {
            panel.set_class(class::ACTIVE, open);
        }
        if let Some(toggle) = &self.elements.toggle {
            toggle.set_class(class::ACTIVE, open);
        }
        if let Some(body) = &self.elements.body {
            body.set_style("overflow", if open { "hidden" } else { "" });
        }
        debug!(open, "mobile menu");
    }

    /// Vertical offset to smooth-scroll to for an in-page anchor
    pub fn scroll_target(&self, href: &str) -> Option<f64> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        self.elements
            .sections
            .iter()
            .find(|s| s.attribute(attr::ID).as_deref() == Some(id))
            .map(|s| s.offset_top() - self.config.anchor_offset_px)
    }

    pub fn links(&self) -> &[Element] { &self.elements.links }

    pub fn dispose(&self) {
        self.highlighter.cancel();
    }
}
