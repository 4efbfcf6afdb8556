//! Typing animation: phrases typed and erased one character at a time
//!
//! `TypingState::step` is the whole transition table. `TypingAnimator`
//! only feeds it from a self-rescheduling timeout and writes the text out.
//!
//! | Mode | Action | Next delay |
//! |------|--------|------------|
//! | typing | show one more character | 100ms |
//! | typing, phrase complete | switch to deleting | 2000ms hold |
//! | deleting | show one less character | 50ms |
//! | deleting, phrase erased | switch to typing, next phrase | 500ms pause |

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::config::TypingConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;

/// Cursor into the phrase list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingState {
    pub phrase_index: usize,
    /// Characters currently shown, always within `0..=phrase length`
    pub char_index: usize,
    pub deleting: bool,
}

/// Result of one tick: text to show and how long to wait before the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub text: String,
    pub delay_ms: u32,
}

impl TypingState {
    /// Advance one tick. `phrases` must not be empty.
    pub fn step(&mut self, phrases: &[String], config: &TypingConfig) -> Step {
        let phrase = &phrases[self.phrase_index % phrases.len()];
        let len = phrase.chars().count();

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            config.delete_ms
        } else {
            self.char_index = (self.char_index + 1).min(len);
            config.type_ms
        };
        let text: String = phrase.chars().take(self.char_index).collect();

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            delay_ms = config.hold_ms;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % phrases.len();
            delay_ms = config.pause_ms;
        }

        Step { text, delay_ms }
    }
}

struct Inner {
    output: Element,
    phrases: Vec<String>,
    config: TypingConfig,
    scheduler: Scheduler,
    state: RefCell<TypingState>,
    timer: Cell<Option<TimerId>>,
    running: Cell<bool>,
}

/// Drives `TypingState` on a timer and renders into the output element
#[derive(Clone)]
pub struct TypingAnimator {
    inner: Rc<Inner>,
}

impl TypingAnimator {
    /// `None` when there is no output element or nothing to type
    pub fn new(output: Option<Element>, config: TypingConfig, scheduler: Scheduler) -> Option<Self> {
        let output = output?;
        if config.phrases.iter().all(|p| p.is_empty()) {
            return None;
        }
        let phrases = config.phrases.clone();
        Some(Self {
            inner: Rc::new(Inner {
                output,
                phrases,
                config,
                scheduler,
                state: RefCell::new(TypingState::default()),
                timer: Cell::new(None),
                running: Cell::new(false),
            }),
        })
    }

    /// Begin typing after the configured start delay
    pub fn start(&self) {
        if self.inner.running.replace(true) {
            return;
        }
        debug!(phrases = self.inner.phrases.len(), "typing animation started");
        Self::schedule(&self.inner, self.inner.config.start_delay_ms);
    }

    pub fn stop(&self) {
        self.inner.running.set(false);
        if let Some(id) = self.inner.timer.take() {
            self.inner.scheduler.clear(id);
        }
    }

    pub fn is_running(&self) -> bool { self.inner.running.get() }

    pub fn state(&self) -> TypingState { *self.inner.state.borrow() }

    fn schedule(inner: &Rc<Inner>, delay_ms: u32) {
        let weak = Rc::downgrade(inner);
        let id = inner.scheduler.set_timeout(delay_ms, move || {
            if let Some(inner) = weak.upgrade() {
                Self::tick(&inner);
            }
        });
        inner.timer.set(Some(id));
    }

    fn tick(inner: &Rc<Inner>) {
        if !inner.running.get() {
            return;
        }
        let step = inner.state.borrow_mut().step(&inner.phrases, &inner.config);
        inner.output.set_text(&step.text);
        Self::schedule(inner, step.delay_ms);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::core::clock::VirtualClock;
    use crate::core::element::MemoryElement;

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn char_count_rises_then_falls_before_next_phrase() {
        let config = TypingConfig::default();
        let list = phrases(&["System Analyst", "Critical Thinker"]);
        let mut state = TypingState::default();

        let mut trace = vec![0];
        let mut shown = vec![String::new()];
        while state.phrase_index == 0 {
            let step = state.step(&list, &config);
            trace.push(step.text.chars().count());
            shown.push(step.text);
        }

        let rising: Vec<usize> = (0..=14).collect();
        let falling: Vec<usize> = (0..14).rev().collect();
        assert_eq!(trace, [rising, falling].concat());

        // Displayed strings: 15 while typing ("" .. full), 15 while deleting (full .. "")
        let typing: BTreeSet<&str> = shown[..15].iter().map(String::as_str).collect();
        let deleting: BTreeSet<&str> = shown[14..].iter().map(String::as_str).collect();
        assert_eq!(typing.len(), 15);
        assert_eq!(deleting.len(), 15);
        assert!(shown.iter().all(|s| "System Analyst".starts_with(s.as_str())));
    }

    #[test]
    fn delays_follow_transition_table() {
        let config = TypingConfig::default();
        let list = phrases(&["ab"]);
        let mut state = TypingState::default();

        let delays: Vec<u32> = (0..5).map(|_| state.step(&list, &config).delay_ms).collect();
        // a, ab (hold), a, "" (pause), a
        assert_eq!(delays, vec![100, 2000, 50, 500, 100]);
        assert_eq!(state.phrase_index, 0);
    }

    #[test]
    fn phrases_cycle_circularly() {
        let config = TypingConfig::default();
        let list = phrases(&["a", "b"]);
        let mut state = TypingState::default();
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(state.step(&list, &config).text);
        }
        assert_eq!(seen, vec!["a", "", "b", "", "a", "", "b", ""]);
    }

    #[test]
    fn unicode_phrases_step_by_character() {
        let config = TypingConfig::default();
        let list = phrases(&["héllo ✓"]);
        let mut state = TypingState::default();
        let texts: Vec<String> = (0..7).map(|_| state.step(&list, &config).text).collect();
        assert_eq!(texts[1], "hé");
        assert_eq!(texts[6], "héllo ✓");
        assert!(state.deleting);
    }

    #[test]
    fn animator_renders_on_virtual_time_and_stops() {
        let clock = VirtualClock::new();
        let output = MemoryElement::new("span");
        let config = TypingConfig { phrases: phrases(&["Hi"]), ..TypingConfig::default() };
        let animator = TypingAnimator::new(Some(output.clone().into()), config, clock.clone().into()).unwrap();

        animator.start();
        animator.start();
        clock.advance(999);
        assert_eq!(output.inner_html(), "");
        clock.advance(1);
        assert_eq!(output.inner_html(), "H");
        clock.advance(100);
        assert_eq!(output.inner_html(), "Hi");
        clock.advance(2000);
        assert_eq!(output.inner_html(), "H");

        animator.stop();
        assert_eq!(clock.pending(), 0);
        clock.advance(10_000);
        assert_eq!(output.inner_html(), "H");
        assert!(!animator.is_running());
    }

    #[test]
    fn missing_output_or_phrases_is_inert() {
        let clock: Scheduler = VirtualClock::new().into();
        assert!(TypingAnimator::new(None, TypingConfig::default(), clock.clone()).is_none());
        let empty = TypingConfig { phrases: Vec::new(), ..TypingConfig::default() };
        assert!(TypingAnimator::new(Some(MemoryElement::new("span").into()), empty, clock).is_none());
    }
}
