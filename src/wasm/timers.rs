//! BrowserTimers: `gloo` timeouts and intervals keyed by `TimerId`
//!
//! A gloo handle cancels its timer when dropped, so every live handle sits
//! in a `TimerLedger` until it fires or is cleared. Clearing cancels the JS
//! timer at once and keeps only the closure. Closures are dropped at the end
//! of the next callback, or on the next scheduling call made outside one,
//! never while their own callback is on the stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;

use crate::core::clock::TimerId;
use crate::core::ledger::TimerLedger;

enum Handle {
    Timeout(Timeout),
    Interval(Interval),
    /// Cancelled timer; the closure outlives a callback that may still be running
    Stopped(StoppedClosure),
}

#[allow(dead_code)]
enum StoppedClosure {
    Once(Closure<dyn FnOnce()>),
    Repeat(Closure<dyn FnMut()>),
}

impl Handle {
    fn stop(self) -> Self {
        match self {
            Handle::Timeout(t) => Handle::Stopped(StoppedClosure::Once(t.cancel())),
            Handle::Interval(i) => Handle::Stopped(StoppedClosure::Repeat(i.cancel())),
            stopped => stopped,
        }
    }
}

#[derive(Clone, Default)]
pub struct BrowserTimers {
    ledger: Rc<RefCell<TimerLedger<Handle>>>,
}

impl fmt::Debug for BrowserTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ledger = self.ledger.borrow();
        f.debug_struct("BrowserTimers")
            .field("live", &ledger.live())
            .field("retired", &ledger.retired())
            .finish()
    }
}

impl BrowserTimers {
    pub fn new() -> Self { Self::default() }

    pub fn set_timeout(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> TimerId {
        self.purge();
        let id = self.ledger.borrow_mut().allocate();
        let ledger = self.ledger.clone();
        let handle = Timeout::new(delay_ms, move || {
            if !ledger.borrow_mut().enter(id) {
                return;
            }
            task();
            let stale = {
                let mut l = ledger.borrow_mut();
                l.retire(id, Handle::stop);
                l.leave(id)
            };
            drop(stale);
        });
        self.ledger.borrow_mut().insert(id, Handle::Timeout(handle));
        id
    }

    pub fn set_interval(&self, period_ms: u32, mut task: impl FnMut() + 'static) -> TimerId {
        self.purge();
        let id = self.ledger.borrow_mut().allocate();
        let ledger = self.ledger.clone();
        let handle = Interval::new(period_ms.max(1), move || {
            if !ledger.borrow_mut().enter(id) {
                return;
            }
            task();
            let stale = ledger.borrow_mut().leave(id);
            drop(stale);
        });
        self.ledger.borrow_mut().insert(id, Handle::Interval(handle));
        id
    }

    pub fn clear(&self, id: TimerId) {
        self.ledger.borrow_mut().retire(id, Handle::stop);
        self.purge();
    }

    /// Live timers
    pub fn pending(&self) -> usize { self.ledger.borrow().live() }

    fn purge(&self) {
        let retired = self.ledger.borrow_mut().purge();
        drop(retired);
    }
}
