//! WASM module: the portfolio page in the browser
//!
//! Provides the browser backends for the core enums and the `FolioPage`
//! JS entry point:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          FolioPage (JS API)             │
//! │  toggleTheme, theme, next, prev,        │
//! │  goToSlide, dispose                     │
//! └─────────────────┬───────────────────────┘
//!                   │ listeners, IntersectionObserver
//! ┌─────────────────▼───────────────────────┐
//! │              Page (shared)              │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │  WebElement · BrowserTimers ·           │
//! │  LocalPreferences                       │
//! └─────────────────────────────────────────┘
//! ```

mod element;
mod page;
mod storage;
mod timers;

pub use element::WebElement;
pub use page::FolioPage;
pub use storage::LocalPreferences;
pub use timers::BrowserTimers;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    crate::logging::init_browser_logging("info");
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Styled console line (`%c` formatting)
fn console_styled(text: &str, style: &str) {
    web_sys::console::log_2(&JsValue::from_str(&format!("%c{}", text)), &JsValue::from_str(style));
}

/// Developer greeting, printed once per mount
pub(crate) fn greet() {
    console_styled("👋 Hello Developer!", "font-size: 20px; color: #667eea; font-weight: bold;");
    console_styled("Looking at the code? I like your style! 😎", "font-size: 14px; color: #764ba2;");
    console_styled("Try the Konami Code for a surprise! ⬆️⬆️⬇️⬇️⬅️➡️⬅️➡️BA", "font-size: 12px; color: #f093fb;");
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
