//! Clock: timer scheduling for every animation and delay on the page
//!
//! Components never call `setTimeout` directly. They hold a `Scheduler` and
//! the surrounding runtime decides what time is:
//!
//! | Mode | Struct | Driver | Use Case |
//! |------|--------|--------|----------|
//! | Virtual | `VirtualClock` | `advance(ms)` calls | Tests, headless runs |
//! | Browser | `BrowserTimers` | `gloo` timeouts/intervals | wasm page |
//!
//! # Virtual time
//!
//! ```text
//! set_timeout(100, a)   set_timeout(50, b)   advance(120)
//!        │                     │                  │
//!        ▼                     ▼                  ▼
//!   queue: [(50,b) (100,a)] ──────────────► b fires at 50, a at 100
//!                                            now = 120
//! ```
//!
//! Timers due at the same instant fire in registration order. A timer
//! scheduled by a firing timer fires within the same `advance` call if it
//! becomes due before the target time.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[cfg(feature = "wasm")]
use crate::wasm::BrowserTimers;

/// Handle returned by every scheduling call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat { period_ms: u64, task: Box<dyn FnMut()> },
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_seq: u64,
    next_id: u64,
    /// (due, seq) -> (id, task)
    queue: BTreeMap<(u64, u64), (TimerId, Task)>,
    /// id -> queue key, for cancellation
    index: HashMap<TimerId, (u64, u64)>,
    /// Interval currently executing; cleared from inside its own callback
    running: Option<TimerId>,
    running_cancelled: bool,
}

impl ClockState {
    fn push(&mut self, id: TimerId, due: u64, task: Task) {
        let key = (due, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(key, (id, task));
        self.index.insert(id, key);
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

// =============================================================================
// VIRTUAL CLOCK
// =============================================================================

/// Deterministic logical clock driven by `advance`
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl std::fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualClock")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.queue.len())
            .finish()
    }
}

impl VirtualClock {
    pub fn new() -> Self { Self::default() }

    pub fn now_ms(&self) -> u64 { self.state.borrow().now_ms }

    /// Number of timers waiting to fire
    pub fn pending(&self) -> usize { self.state.borrow().queue.len() }

    pub fn set_timeout(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        let due = state.now_ms + u64::from(delay_ms);
        state.push(id, due, Task::Once(Box::new(task)));
        id
    }

    pub fn set_interval(&self, period_ms: u32, task: impl FnMut() + 'static) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        // A zero period would spin forever inside advance
        let period_ms = u64::from(period_ms.max(1));
        let due = state.now_ms + period_ms;
        state.push(id, due, Task::Repeat { period_ms, task: Box::new(task) });
        id
    }

    pub fn clear(&self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        if let Some(key) = state.index.remove(&id) {
            state.queue.remove(&key);
        } else if state.running == Some(id) {
            state.running_cancelled = true;
        }
    }

    /// Move time forward, firing every timer that falls due
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now_ms + ms;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state.queue.keys().next().map(|&(due, _)| due);
                match due {
                    Some(due) if due <= target => state.queue.pop_first().map(|(_, (id, task))| {
                        state.index.remove(&id);
                        state.now_ms = due;
                        (id, task)
                    }),
                    _ => None,
                }
            };

            let Some((id, task)) = next else { break };

            // Borrow released: tasks may schedule or clear timers
            match task {
                Task::Once(task) => task(),
                Task::Repeat { period_ms, mut task } => {
                    {
                        let mut state = self.state.borrow_mut();
                        state.running = Some(id);
                        state.running_cancelled = false;
                    }
                    task();
                    let mut state = self.state.borrow_mut();
                    state.running = None;
                    if !state.running_cancelled {
                        let due = state.now_ms + period_ms;
                        state.push(id, due, Task::Repeat { period_ms, task });
                    }
                }
            }
        }

        self.state.borrow_mut().now_ms = target;
    }
}

// =============================================================================
// SCHEDULER ENUM
// =============================================================================

/// Timer backend handed to every component
#[derive(Clone, Debug)]
pub enum Scheduler {
    Virtual(VirtualClock),
    #[cfg(feature = "wasm")]
    Browser(BrowserTimers),
}

impl From<VirtualClock> for Scheduler {
    fn from(clock: VirtualClock) -> Self { Scheduler::Virtual(clock) }
}

impl Scheduler {
    pub fn set_timeout(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> TimerId {
        match self {
            Scheduler::Virtual(clock) => clock.set_timeout(delay_ms, task),
            #[cfg(feature = "wasm")]
            Scheduler::Browser(timers) => timers.set_timeout(delay_ms, task),
        }
    }

    pub fn set_interval(&self, period_ms: u32, task: impl FnMut() + 'static) -> TimerId {
        match self {
            Scheduler::Virtual(clock) => clock.set_interval(period_ms, task),
            #[cfg(feature = "wasm")]
            Scheduler::Browser(timers) => timers.set_interval(period_ms, task),
        }
    }

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    pub fn clear(&self, id: TimerId) {
        match self {
            Scheduler::Virtual(clock) => clock.clear(id),
            #[cfg(feature = "wasm")]
            Scheduler::Browser(timers) => timers.clear(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn timeouts_fire_in_due_order() {
        let clock = VirtualClock::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        clock.set_timeout(100, move || l.borrow_mut().push("a"));
        let l = log.clone();
        clock.set_timeout(50, move || l.borrow_mut().push("b"));
        let l = log.clone();
        clock.set_timeout(50, move || l.borrow_mut().push("c"));

        clock.advance(99);
        assert_eq!(*log.borrow(), vec!["b", "c"]);
        clock.advance(1);
        assert_eq!(*log.borrow(), vec!["b", "c", "a"]);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn nested_timeouts_fire_within_one_advance() {
        let clock = VirtualClock::new();
        let fired_at = Rc::new(Cell::new(0));

        let inner_clock = clock.clone();
        let f = fired_at.clone();
        clock.set_timeout(10, move || {
            let c = inner_clock.clone();
            inner_clock.set_timeout(20, move || f.set(c.now_ms()));
        });

        clock.advance(100);
        assert_eq!(fired_at.get(), 30);
    }

    #[test]
    fn cleared_timeout_never_fires() {
        let clock = VirtualClock::new();
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let id = clock.set_timeout(10, move || f.set(true));
        clock.clear(id);
        clock.clear(id);
        clock.advance(50);
        assert!(!fired.get());
    }

    #[test]
    fn interval_repeats_until_cleared_from_inside() {
        let clock = VirtualClock::new();
        let count = Rc::new(Cell::new(0));
        let id_slot = Rc::new(Cell::new(None));

        let c = count.clone();
        let inner = clock.clone();
        let slot = id_slot.clone();
        let id = clock.set_interval(16, move || {
            c.set(c.get() + 1);
            if c.get() == 3 {
                if let Some(id) = slot.get() {
                    inner.clear(id);
                }
            }
        });
        id_slot.set(Some(id));

        clock.advance(1000);
        assert_eq!(count.get(), 3);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn scheduler_dispatches_to_virtual() {
        let clock = VirtualClock::new();
        let scheduler = Scheduler::from(clock.clone());
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        scheduler.set_timeout(5, move || f.set(true));
        clock.advance(5);
        assert!(fired.get());
    }
}
