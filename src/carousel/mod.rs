//! Projects carousel: a sliding window of 1 or 2 cards over the project list
//!
//! # Structure
//!
//! ```text
//! ProjectsCarousel
//!   │
//!   ├── CarouselWindow     index arithmetic (current, visible, max_index)
//!   │
//!   └── render()
//!         ├── track      transform: translateX(-(current × (cardWidth + gap))px)
//!         ├── cards      .active on [current, current + visible)
//!         ├── dots       .active on dot[current], one dot per card
//!         └── prev/next  disabled at the matching boundary
//! ```
//!
//! # Inputs
//!
//! | Input | Effect |
//! |-------|--------|
//! | prev / next button, ArrowLeft / ArrowRight | `prev()` / `next()`, no wrap |
//! | dot `i` | `go_to_slide(i)`, clamped to `max_index` |
//! | swipe > 50px left / right | `next()` / `prev()` |
//! | resize | visible = 1 below 768px, else 2; clamp; render |
//! | autoplay (opt-in) | every 5000ms `next()`, wrapping to 0 from the end |
//! | hover enter / leave | pause / resume autoplay |
//!
//! With no track or no cards the carousel is never constructed.

mod window;

pub use window::CarouselWindow;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::config::CarouselConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;
use crate::core::selectors::{attr, class};

#[derive(Debug, Clone, Default)]
pub struct CarouselElements {
    pub track: Option<Element>,
    pub cards: Vec<Element>,
    pub prev: Option<Element>,
    pub next: Option<Element>,
    /// Container the dots are built into
    pub dots: Option<Element>,
}

struct Inner {
    track: Element,
    cards: Vec<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    dots: Vec<Element>,
    config: CarouselConfig,
    scheduler: Scheduler,
    window: RefCell<CarouselWindow>,
    touch_start: Cell<Option<f64>>,
    autoplay: Cell<Option<TimerId>>,
    autoplay_enabled: Cell<bool>,
}

#[derive(Clone)]
pub struct ProjectsCarousel {
    inner: Rc<Inner>,
}

impl ProjectsCarousel {
    pub fn new(
        elements: CarouselElements,
        config: CarouselConfig,
        scheduler: Scheduler,
        viewport_width: f64,
    ) -> Option<Self> {
        let track = elements.track?;
        if elements.cards.is_empty() {
            return None;
        }

        let dots = elements
            .dots
            .map(|container| {
                (0..elements.cards.len())
                    .filter_map(|i| {
                        let dot = container.append_new("button")?;
                        dot.add_class(class::DOT);
                        dot.set_attribute(attr::ARIA_LABEL, &format!("Go to project {}", i + 1));
                        Some(dot)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let window = CarouselWindow::new(elements.cards.len(), config.visible_for(viewport_width));
        let carousel = Self {
            inner: Rc::new(Inner {
                track,
                cards: elements.cards,
                prev: elements.prev,
                next: elements.next,
                dots,
                config,
                scheduler,
                window: RefCell::new(window),
                touch_start: Cell::new(None),
                autoplay: Cell::new(None),
                autoplay_enabled: Cell::new(false),
            }),
        };
        carousel.render();
        if carousel.inner.config.autoplay {
            carousel.start_autoplay();
        }
        debug!(cards = window.card_count(), visible = window.visible(), "carousel mounted");
        Some(carousel)
    }

    pub fn current_index(&self) -> usize { self.inner.window.borrow().current() }
    pub fn visible_count(&self) -> usize { self.inner.window.borrow().visible() }
    pub fn max_index(&self) -> usize { self.inner.window.borrow().max_index() }
    pub fn dots(&self) -> &[Element] { &self.inner.dots }

    pub fn next(&self) {
        Self::move_by(&self.inner, |w| w.next());
    }

    pub fn prev(&self) {
        Self::move_by(&self.inner, |w| w.prev());
    }

    pub fn go_to_slide(&self, index: usize) {
        Self::move_by(&self.inner, |w| w.go_to(index));
    }

    /// Viewport width changed: recompute the page size, clamp, render
    pub fn recompute_on_resize(&self, viewport_width: f64) {
        let visible = self.inner.config.visible_for(viewport_width);
        self.inner.window.borrow_mut().set_visible(visible);
        Self::render_inner(&self.inner);
    }

    pub fn on_touch_start(&self, x: f64) {
        self.inner.touch_start.set(Some(x));
    }

    pub fn on_touch_end(&self, x: f64) {
        let Some(start) = self.inner.touch_start.take() else { return };
        let delta = start - x;
        if delta.abs() <= self.inner.config.swipe_threshold_px {
            return;
        }
        if delta > 0.0 { self.next() } else { self.prev() }
    }

    /// Arrow keys; returns whether the key was handled
    pub fn on_key(&self, key: &str) -> bool {
        match key {
            "ArrowLeft" => self.prev(),
            "ArrowRight" => self.next(),
            _ => return false,
        }
        true
    }

    pub fn start_autoplay(&self) {
        self.inner.autoplay_enabled.set(true);
        Self::schedule_autoplay(&self.inner);
    }

    pub fn stop_autoplay(&self) {
        self.inner.autoplay_enabled.set(false);
        Self::cancel_autoplay(&self.inner);
    }

    /// Pointer entered the track
    pub fn pause_autoplay(&self) {
        Self::cancel_autoplay(&self.inner);
    }

    /// Pointer left the track
    pub fn resume_autoplay(&self) {
        if self.inner.autoplay_enabled.get() {
            Self::schedule_autoplay(&self.inner);
        }
    }

    pub fn is_autoplaying(&self) -> bool {
        self.inner.autoplay.get().is_some()
    }

    pub fn dispose(&self) {
        self.stop_autoplay();
    }

    pub fn render(&self) {
        Self::render_inner(&self.inner);
    }

    fn move_by(inner: &Rc<Inner>, op: impl FnOnce(&mut CarouselWindow) -> bool) {
        let moved = {
            let mut window = inner.window.borrow_mut();
            op(&mut *window)
        };
        if moved {
            Self::render_inner(inner);
        }
    }

    fn schedule_autoplay(inner: &Rc<Inner>) {
        if inner.autoplay.get().is_some() {
            return;
        }
        let weak = Rc::downgrade(inner);
        let id = inner.scheduler.set_interval(inner.config.autoplay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                Self::move_by(&inner, |w| w.advance_wrapping());
            }
        });
        inner.autoplay.set(Some(id));
    }

    fn cancel_autoplay(inner: &Rc<Inner>) {
        if let Some(id) = inner.autoplay.take() {
            inner.scheduler.clear(id);
        }
    }

    fn render_inner(inner: &Inner) {
        let window = *inner.window.borrow();
        let card_width = inner.cards.first().map(|c| c.offset_width()).unwrap_or(0.0);
        let offset = window.offset_px(card_width, inner.config.gap_px);
        inner.track.set_style("transform", &format!("translateX({}px)", offset));

        for (i, card) in inner.cards.iter().enumerate() {
            card.set_class(class::ACTIVE, window.shows(i));
        }
        for (i, dot) in inner.dots.iter().enumerate() {
            dot.set_class(class::ACTIVE, i == window.current());
        }
        if let Some(prev) = &inner.prev {
            prev.set_disabled(window.at_start());
        }
        if let Some(next) = &inner.next {
            next.set_disabled(window.at_end());
        }
        debug!(current = window.current(), max = window.max_index(), "carousel rendered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::VirtualClock;
    use crate::core::element::MemoryElement;

    struct Fixture {
        track: MemoryElement,
        cards: Vec<MemoryElement>,
        prev: MemoryElement,
        next: MemoryElement,
        dots: MemoryElement,
    }

    impl Fixture {
        fn new(cards: usize) -> Self {
            Self {
                track: MemoryElement::new("div"),
                cards: (0..cards).map(|_| MemoryElement::new("article").with_width(350.0)).collect(),
                prev: MemoryElement::new("button"),
                next: MemoryElement::new("button"),
                dots: MemoryElement::new("div"),
            }
        }

        fn elements(&self) -> CarouselElements {
            CarouselElements {
                track: Some(self.track.clone().into()),
                cards: self.cards.iter().cloned().map(Element::from).collect(),
                prev: Some(self.prev.clone().into()),
                next: Some(self.next.clone().into()),
                dots: Some(self.dots.clone().into()),
            }
        }
    }

    #[test]
    fn renders_initial_window() {
        let f = Fixture::new(6);
        let carousel = ProjectsCarousel::new(f.elements(), CarouselConfig::default(), VirtualClock::new().into(), 1280.0).unwrap();

        assert_eq!(carousel.max_index(), 4);
        assert_eq!(f.track.style("transform"), "translateX(0px)");
        assert!(f.cards[0].has_class("active") && f.cards[1].has_class("active"));
        assert!(!f.cards[2].has_class("active"));
        assert_eq!(f.dots.children().len(), 6);
        assert!(f.dots.children()[0].has_class("active"));
        assert!(f.prev.is_disabled());
        assert!(!f.next.is_disabled());
    }

    #[test]
    fn navigation_translates_track() {
        let f = Fixture::new(6);
        let carousel = ProjectsCarousel::new(f.elements(), CarouselConfig::default(), VirtualClock::new().into(), 1280.0).unwrap();

        carousel.next();
        carousel.next();
        assert_eq!(f.track.style("transform"), "translateX(-760px)");
        assert!(f.dots.children()[2].has_class("active"));
        assert!(!f.dots.children()[0].has_class("active"));

        carousel.go_to_slide(10);
        assert_eq!(carousel.current_index(), 4);
        assert!(f.next.is_disabled());
        assert!(f.cards[4].has_class("active") && f.cards[5].has_class("active"));
    }

    #[test]
    fn swipe_needs_more_than_threshold() {
        let f = Fixture::new(6);
        let carousel = ProjectsCarousel::new(f.elements(), CarouselConfig::default(), VirtualClock::new().into(), 1280.0).unwrap();

        carousel.on_touch_start(300.0);
        carousel.on_touch_end(250.0);
        assert_eq!(carousel.current_index(), 0);

        carousel.on_touch_start(300.0);
        carousel.on_touch_end(249.0);
        assert_eq!(carousel.current_index(), 1);

        carousel.on_touch_start(100.0);
        carousel.on_touch_end(200.0);
        assert_eq!(carousel.current_index(), 0);

        carousel.on_touch_end(0.0);
        assert_eq!(carousel.current_index(), 0);
    }

    #[test]
    fn arrow_keys_navigate() {
        let f = Fixture::new(6);
        let carousel = ProjectsCarousel::new(f.elements(), CarouselConfig::default(), VirtualClock::new().into(), 1280.0).unwrap();
        assert!(carousel.on_key("ArrowRight"));
        assert_eq!(carousel.current_index(), 1);
        assert!(carousel.on_key("ArrowLeft"));
        assert_eq!(carousel.current_index(), 0);
        assert!(!carousel.on_key("Enter"));
    }

    #[test]
    fn autoplay_wraps_and_pauses_on_hover() {
        let clock = VirtualClock::new();
        let f = Fixture::new(3);
        let config = CarouselConfig { autoplay: true, ..CarouselConfig::default() };
        let carousel = ProjectsCarousel::new(f.elements(), config, clock.clone().into(), 1280.0).unwrap();
        assert!(carousel.is_autoplaying());

        clock.advance(5000);
        assert_eq!(carousel.current_index(), 1);
        clock.advance(5000);
        assert_eq!(carousel.current_index(), 0);

        carousel.pause_autoplay();
        clock.advance(20_000);
        assert_eq!(carousel.current_index(), 0);

        carousel.resume_autoplay();
        clock.advance(5000);
        assert_eq!(carousel.current_index(), 1);

        carousel.dispose();
        assert_eq!(clock.pending(), 0);
        carousel.resume_autoplay();
        assert!(!carousel.is_autoplaying());
    }

    #[test]
    fn missing_track_or_cards_skips_setup() {
        let scheduler: Scheduler = VirtualClock::new().into();
        let f = Fixture::new(6);
        let mut no_track = f.elements();
        no_track.track = None;
        assert!(ProjectsCarousel::new(no_track, CarouselConfig::default(), scheduler.clone(), 1280.0).is_none());

        let empty = Fixture::new(0);
        assert!(ProjectsCarousel::new(empty.elements(), CarouselConfig::default(), scheduler, 1280.0).is_none());
        assert!(empty.dots.children().is_empty());
    }
}
