//! Core: element handles, timers, rate limiting, preferences
//!
//! Everything in here compiles on every target. Browser-backed variants of
//! each enum live in `crate::wasm` and plug in behind the wasm feature.

pub mod clock;
pub mod debounce;
pub mod element;
pub mod ledger;
pub mod prefs;
pub mod selectors;

pub use clock::{Scheduler, TimerId, VirtualClock};
pub use debounce::Debouncer;
pub use element::{Element, MemoryElement, Rect};
pub use prefs::{MemoryPreferences, Preferences};
