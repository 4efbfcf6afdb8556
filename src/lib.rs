//! Folio: behavior layer for a single-page portfolio site
//!
//! # Architecture
//!
//! ```text
//! FolioPage (wasm, JS API)          tests / headless hosts
//!   │  DOM queries, listeners,         │  MemoryElement, VirtualClock,
//!   │  IntersectionObserver            │  MemoryPreferences
//!   └───────────────┬──────────────────┘
//!                   ▼
//!                 Page (composition root)
//!                   │
//!   ├── nav        active link, mobile menu, smooth-scroll targets
//!   ├── theme      light/dark with persisted preference
//!   ├── typing     typed/erased hero phrases
//!   ├── reveal     one-shot fade-in, skill bars, stat counters
//!   ├── carousel   1 or 2 visible project cards, dots, swipe, autoplay
//!   ├── contact    simulated form submission
//!   └── effects    parallax, orbs, tilt, floating cards, easter egg
//!                   │
//!                 core: Element · Scheduler · Debouncer · Preferences
//! ```
//!
//! # Features
//!
//! - `native` - logging subscriber on stderr (default)
//! - `wasm` - browser bindings: web-sys elements, gloo timers, events and
//!   localStorage, `FolioPage` exported through wasm-bindgen
//!
//! # Usage
//!
//! ```
//! use folio::{Environment, MemoryElement, MemoryPreferences, Page, PageConfig, PageElements, VirtualClock};
//!
//! let clock = VirtualClock::new();
//! let output = MemoryElement::new("span");
//! let elements = PageElements { typed_output: Some(output.clone().into()), ..Default::default() };
//! let page = Page::mount(
//!     elements,
//!     PageConfig::default().with_phrases(["Hello"]),
//!     clock.clone().into(),
//!     MemoryPreferences::new().into(),
//!     Environment::default(),
//! );
//!
//! clock.advance(1000);
//! assert_eq!(output.inner_html(), "H");
//! page.dispose();
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod carousel;
pub mod config;
pub mod contact;
pub mod core;
pub mod effects;
pub mod error;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod theme;
pub mod typing;

#[cfg(any(feature = "native", feature = "wasm"))]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use carousel::{CarouselElements, CarouselWindow, ProjectsCarousel};
pub use config::{
    CarouselConfig, ContactConfig, EffectsConfig, NavConfig, PageConfig, RevealConfig, ThemeConfig, TypingConfig,
};
pub use contact::{ContactElements, ContactFormHandler};
pub use crate::core::{Debouncer, Element, MemoryElement, MemoryPreferences, Preferences, Rect, Scheduler, TimerId, VirtualClock};
pub use effects::{DecorativeEffects, EffectsElements, KonamiBuffer};
pub use error::{StorageError, StorageResult};
pub use nav::{NavElements, NavigationController};
pub use page::{Environment, Page, PageElements};
pub use reveal::{CounterAnimation, RevealKind, RevealObserver, RevealTarget};
pub use theme::{Theme, ThemeController, ThemeElements};
pub use typing::{TypingAnimator, TypingState};

#[cfg(feature = "native")]
pub use logging::init_logging;

#[cfg(feature = "wasm")]
pub use wasm::{BrowserTimers, FolioPage, LocalPreferences, WebElement};
