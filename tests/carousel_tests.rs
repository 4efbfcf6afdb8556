//! Carousel Tests: the projects carousel through the public API
//!
//! These tests verify:
//! 1. The index stays within [0, max_index] under any sequence of inputs
//! 2. Boundary controls and dots track the window
//! 3. Narrow viewports, single cards and dot clicks past the end
//! 4. Autoplay wrap-around on virtual time

use folio::{CarouselConfig, CarouselElements, CarouselWindow, Element, MemoryElement, ProjectsCarousel, VirtualClock};
use once_cell::sync::Lazy;

static LOGGING: Lazy<()> = Lazy::new(folio::init_logging);

fn setup() {
    Lazy::force(&LOGGING);
}

struct Deck {
    track: MemoryElement,
    cards: Vec<MemoryElement>,
    prev: MemoryElement,
    next: MemoryElement,
    dots: MemoryElement,
}

impl Deck {
    fn new(cards: usize) -> Self {
        Self {
            track: MemoryElement::new("div").with_class("projects-track"),
            cards: (0..cards).map(|_| MemoryElement::new("article").with_width(320.0)).collect(),
            prev: MemoryElement::new("button").with_class("carousel-prev"),
            next: MemoryElement::new("button").with_class("carousel-next"),
            dots: MemoryElement::new("div").with_class("carousel-dots"),
        }
    }

    fn mount(&self, clock: &VirtualClock, config: CarouselConfig, width: f64) -> ProjectsCarousel {
        let elements = CarouselElements {
            track: Some(self.track.clone().into()),
            cards: self.cards.iter().cloned().map(Element::from).collect(),
            prev: Some(self.prev.clone().into()),
            next: Some(self.next.clone().into()),
            dots: Some(self.dots.clone().into()),
        };
        ProjectsCarousel::new(elements, config, clock.clone().into(), width).expect("carousel")
    }

    fn active_cards(&self) -> Vec<usize> {
        self.cards.iter().enumerate().filter(|(_, c)| c.has_class("active")).map(|(i, _)| i).collect()
    }

    fn active_dots(&self) -> Vec<usize> {
        self.dots.children().iter().enumerate().filter(|(_, d)| d.has_class("active")).map(|(i, _)| i).collect()
    }
}

/// Deterministic operation stream
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

/// Test: Index stays in range under mixed inputs, and the DOM matches it
#[test]
fn index_invariant_under_mixed_inputs() {
    setup();
    let deck = Deck::new(7);
    let clock = VirtualClock::new();
    let carousel = deck.mount(&clock, CarouselConfig::default(), 1280.0);
    let mut rng = Lcg(42);

    for _ in 0..500 {
        match rng.next() % 7 {
            0 => carousel.next(),
            1 => carousel.prev(),
            2 => carousel.go_to_slide((rng.next() % 12) as usize),
            3 => carousel.recompute_on_resize(if rng.next() % 2 == 0 { 500.0 } else { 1400.0 }),
            4 => {
                carousel.on_touch_start(400.0);
                carousel.on_touch_end(400.0 - (rng.next() % 200) as f64 + 100.0);
            }
            5 => {
                carousel.on_key("ArrowRight");
            }
            _ => {
                carousel.on_key("ArrowLeft");
            }
        }

        let current = carousel.current_index();
        let visible = carousel.visible_count();
        assert!(current <= carousel.max_index());
        assert_eq!(carousel.max_index(), 7 - visible);
        assert_eq!(deck.active_cards(), (current..current + visible).collect::<Vec<_>>());
        assert_eq!(deck.active_dots(), vec![current]);
        assert_eq!(deck.prev.is_disabled(), current == 0);
        assert_eq!(deck.next.is_disabled(), current == carousel.max_index());
    }
}

/// Test: Narrow viewport shows one card and reaches the last one
#[test]
fn narrow_viewport_reaches_last_card() {
    setup();
    let deck = Deck::new(6);
    let clock = VirtualClock::new();
    let carousel = deck.mount(&clock, CarouselConfig::default(), 767.0);

    assert_eq!(carousel.visible_count(), 1);
    for _ in 0..10 {
        carousel.next();
    }
    assert_eq!(carousel.current_index(), 5);
    assert_eq!(deck.active_cards(), vec![5]);
    assert_eq!(deck.track.style("transform"), "translateX(-1750px)");
}

/// Test: Clicking the last dot on a wide viewport clamps to the last full page
#[test]
fn dot_past_end_clamps() {
    setup();
    let deck = Deck::new(6);
    let clock = VirtualClock::new();
    let carousel = deck.mount(&clock, CarouselConfig::default(), 768.0);

    assert_eq!(carousel.visible_count(), 2);
    carousel.go_to_slide(5);
    assert_eq!(carousel.current_index(), 4);
    assert_eq!(deck.active_dots(), vec![4]);
}

/// Test: A single card never moves and both controls stay disabled
#[test]
fn single_card_is_static() {
    setup();
    let deck = Deck::new(1);
    let clock = VirtualClock::new();
    let carousel = deck.mount(&clock, CarouselConfig::default(), 1280.0);

    carousel.next();
    carousel.prev();
    carousel.go_to_slide(3);
    assert_eq!(carousel.current_index(), 0);
    assert!(deck.prev.is_disabled() && deck.next.is_disabled());
    assert_eq!(deck.dots.children().len(), 1);
}

/// Test: Autoplay walks to the end, wraps, and stops on dispose
#[test]
fn autoplay_wraps_on_virtual_time() {
    setup();
    let deck = Deck::new(4);
    let clock = VirtualClock::new();
    let config = CarouselConfig { autoplay: true, autoplay_ms: 1000, ..CarouselConfig::default() };
    let carousel = deck.mount(&clock, config, 1280.0);

    let mut seen = Vec::new();
    for _ in 0..4 {
        clock.advance(1000);
        seen.push(carousel.current_index());
    }
    assert_eq!(seen, vec![1, 2, 0, 1]);

    carousel.stop_autoplay();
    clock.advance(10_000);
    assert_eq!(carousel.current_index(), 1);
    assert_eq!(clock.pending(), 0);
}

/// Test: The window arithmetic is usable on its own
#[test]
fn window_standalone() {
    let mut window = CarouselWindow::new(5, 2);
    assert_eq!(window.max_index(), 3);
    assert!(window.go_to(3));
    assert!(window.at_end());
    assert_eq!(window.offset_px(300.0, 30.0), -990.0);
    window.set_visible(5);
    assert_eq!(window.current(), 0);
}
