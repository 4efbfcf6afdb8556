//! Reveal: one-shot animations when elements scroll into view
//!
//! The browser's IntersectionObserver (10% threshold, -50px bottom margin)
//! reports visibility; this module decides what happens. The first
//! intersecting report marks the element `fade-in` and the element is never
//! touched again, whatever later reports say.
//!
//! Two kinds of target carry extra work:
//! - skill groups: each `.skill-progress` bar grows to its `data-progress`
//!   width, bar `i` starting `200ms × i` after the reveal
//! - stat cards: the `.stat-number` counts from 0 to `data-target` over
//!   2000ms in 16ms ticks, rendered as `floor(value)+`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::config::RevealConfig;
use crate::core::clock::{Scheduler, TimerId};
use crate::core::element::Element;
use crate::core::selectors::{attr, class};

#[derive(Debug, Clone)]
pub enum RevealKind {
    Plain,
    SkillGroup { bars: Vec<Element> },
    StatCard { number: Option<Element> },
}

#[derive(Debug, Clone)]
pub struct RevealTarget {
    pub element: Element,
    pub kind: RevealKind,
}

impl RevealTarget {
    pub fn plain(element: Element) -> Self {
        Self { element, kind: RevealKind::Plain }
    }

    pub fn skills(element: Element, bars: Vec<Element>) -> Self {
        Self { element, kind: RevealKind::SkillGroup { bars } }
    }

    pub fn stat(element: Element, number: Option<Element>) -> Self {
        Self { element, kind: RevealKind::StatCard { number } }
    }
}

/// Parse a leading integer the way `parseInt` does: `"150+"` → 150
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Linear count-up from 0 to `target`
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    suffix: String,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32, tick_ms: u32, suffix: &str) -> Self {
        let steps = f64::from(duration_ms) / f64::from(tick_ms.max(1));
        let target = target as f64;
        Self {
            target,
            increment: if steps > 0.0 { target / steps } else { target },
            current: 0.0,
            suffix: suffix.to_string(),
        }
    }

    /// Advance one tick; returns the text to render and whether it finished
    pub fn tick(&mut self) -> (String, bool) {
        self.current += self.increment;
        let done = self.current >= self.target;
        if done {
            self.current = self.target;
        }
        (self.render(), done)
    }

    pub fn render(&self) -> String {
        format!("{}{}", self.current.floor() as i64, self.suffix)
    }

    pub fn value(&self) -> f64 { self.current }
}

struct Observed {
    target: RevealTarget,
    revealed: bool,
}

pub struct RevealObserver {
    config: RevealConfig,
    scheduler: Scheduler,
    observed: RefCell<Vec<Observed>>,
    timers: Rc<RefCell<Vec<TimerId>>>,
}

impl RevealObserver {
    pub fn new(config: RevealConfig, scheduler: Scheduler) -> Self {
        Self {
            config,
            scheduler,
            observed: RefCell::new(Vec::new()),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn observe(&self, target: RevealTarget) {
        self.observed.borrow_mut().push(Observed { target, revealed: false });
    }

    /// Elements still waiting for their first reveal
    pub fn watching(&self) -> Vec<Element> {
        self.observed
            .borrow()
            .iter()
            .filter(|o| !o.revealed)
            .map(|o| o.target.element.clone())
            .collect()
    }

    pub fn is_revealed(&self, element: &Element) -> bool {
        self.observed
            .borrow()
            .iter()
            .any(|o| o.revealed && o.target.element.is_same(element))
    }

    /// Visibility report for an element. Returns true when this report
    /// revealed it; the caller then stops observing the element.
    pub fn on_intersection(&self, element: &Element, intersecting: bool) -> bool {
        if !intersecting {
            return false;
        }
        let kind = {
            let mut observed = self.observed.borrow_mut();
            let Some(entry) = observed
                .iter_mut()
                .find(|o| !o.revealed && o.target.element.is_same(element))
            else {
                return false;
            };
            entry.revealed = true;
            entry.target.element.add_class(class::FADE_IN);
            entry.target.kind.clone()
        };

        match kind {
            RevealKind::Plain => {}
            RevealKind::SkillGroup { bars } => self.animate_skill_bars(&bars),
            RevealKind::StatCard { number } => {
                if let Some(number) = number {
                    self.animate_counter(number);
                }
            }
        }
        true
    }

    fn animate_skill_bars(&self, bars: &[Element]) {
        for (index, bar) in bars.iter().enumerate() {
            let Some(progress) = bar.attribute(attr::PROGRESS) else { continue };
            let bar = bar.clone();
            let delay = self.config.stagger_ms.saturating_mul(index as u32);
            let id = self.scheduler.set_timeout(delay, move || {
                bar.set_style("width", &format!("{}%", progress));
            });
            self.timers.borrow_mut().push(id);
        }
        debug!(bars = bars.len(), "skill bars animating");
    }

    fn animate_counter(&self, number: Element) {
        let Some(target) = number.attribute(attr::TARGET).as_deref().and_then(parse_leading_int) else {
            debug!("stat counter without numeric target left as is");
            return;
        };
        let mut counter = CounterAnimation::new(
            target,
            self.config.counter_duration_ms,
            self.config.counter_tick_ms,
            &self.config.counter_suffix,
        );

        let slot = Rc::new(Cell::new(None));
        let scheduler = self.scheduler.clone();
        let own = slot.clone();
        let id = self.scheduler.set_interval(self.config.counter_tick_ms, move || {
            let (text, done) = counter.tick();
            number.set_text(&text);
            if done {
                if let Some(id) = own.get() {
                    scheduler.clear(id);
                }
            }
        });
        slot.set(Some(id));
        self.timers.borrow_mut().push(id);
        debug!(target, "stat counter animating");
    }

    /// Cancel outstanding bar delays and counters
    pub fn dispose(&self) {
        for id in self.timers.borrow_mut().drain(..) {
            self.scheduler.clear(id);
        }
    }
}
