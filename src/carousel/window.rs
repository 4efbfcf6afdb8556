//! CarouselWindow: the index arithmetic behind the carousel
//!
//! Invariant: `0 <= current <= max_index()` after every operation, where
//! `max_index = card_count - visible` (saturating at 0).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselWindow {
    card_count: usize,
    visible: usize,
    current: usize,
}

impl CarouselWindow {
    pub fn new(card_count: usize, visible: usize) -> Self {
        Self { card_count, visible: visible.max(1), current: 0 }
    }

    pub fn card_count(&self) -> usize { self.card_count }
    pub fn visible(&self) -> usize { self.visible }
    pub fn current(&self) -> usize { self.current }

    pub fn max_index(&self) -> usize {
        self.card_count.saturating_sub(self.visible)
    }

    pub fn at_start(&self) -> bool { self.current == 0 }
    pub fn at_end(&self) -> bool { self.current >= self.max_index() }

    /// Returns whether the window moved
    pub fn next(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        let target = index.min(self.max_index());
        let moved = target != self.current;
        self.current = target;
        moved
    }

    /// Autoplay step: advance, wrapping to the first card from the end
    pub fn advance_wrapping(&mut self) -> bool {
        if self.at_end() { self.go_to(0) } else { self.next() }
    }

    /// New page size after a resize; clamps `current` into range
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible.max(1);
        if self.current > self.max_index() {
            self.current = self.max_index();
        }
    }

    /// Whether card `index` lies in `[current, current + visible)`
    pub fn shows(&self, index: usize) -> bool {
        index >= self.current && index < self.current + self.visible
    }

    /// Track translation in pixels for a card width and gap
    pub fn offset_px(&self, card_width: f64, gap: f64) -> f64 {
        if self.current == 0 {
            return 0.0;
        }
        -(self.current as f64 * (card_width + gap))
    }
}
