//! Debouncer: trailing-edge rate limiting
//!
//! Every `call` cancels the pending invocation and schedules a new one, so a
//! burst of events collapses to a single invocation `wait_ms` after the last
//! event, carrying the latest argument.

use std::cell::Cell;
use std::rc::Rc;

use super::clock::{Scheduler, TimerId};

pub struct Debouncer<A: 'static> {
    scheduler: Scheduler,
    wait_ms: u32,
    pending: Rc<Cell<Option<TimerId>>>,
    handler: Rc<dyn Fn(A)>,
}

impl<A: 'static> Debouncer<A> {
    pub fn new(scheduler: Scheduler, wait_ms: u32, handler: impl Fn(A) + 'static) -> Self {
        Self {
            scheduler,
            wait_ms,
            pending: Rc::new(Cell::new(None)),
            handler: Rc::new(handler),
        }
    }

    pub fn call(&self, arg: A) {
        self.cancel();
        let pending = self.pending.clone();
        let handler = self.handler.clone();
        let id = self.scheduler.set_timeout(self.wait_ms, move || {
            pending.set(None);
            handler(arg);
        });
        self.pending.set(Some(id));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn wait_ms(&self) -> u32 { self.wait_ms }
}

impl<A: 'static> Drop for Debouncer<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}
