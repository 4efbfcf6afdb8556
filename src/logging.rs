//! Logging setup
//!
//! | Target | Entry point | Output |
//! |--------|-------------|--------|
//! | native | `init_logging()` | stderr, pretty or JSON (`FOLIO_LOG_JSON=1`), filter from `RUST_LOG` |
//! | wasm | `init_browser_logging(level)` | browser console, no timestamps |
//!
//! Both are safe to call more than once; only the first call installs.
//!
//! The native half is the stock `EnvFilter` + `fmt` builder shared with our
//! native services, kept as is; only the JSON switch variable is
//! project-specific.

#[cfg(feature = "native")]
pub use native::init_logging;

#[cfg(feature = "wasm")]
pub use browser::init_browser_logging;

#[cfg(feature = "native")]
mod native {
    use tracing_subscriber::{fmt, EnvFilter};

    pub fn init_logging() {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let use_json = std::env::var("FOLIO_LOG_JSON")
            .map(|value| value == "1")
            .unwrap_or(false);

        if use_json {
            let _ = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .with_writer(std::io::stderr)
                .try_init();
        } else {
            let _ = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .pretty()
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

#[cfg(feature = "wasm")]
mod browser {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::{fmt, EnvFilter};
    use wasm_bindgen::JsValue;

    /// One formatted event, flushed to `console.log` when dropped
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&JsValue::from_str(line));
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Console;

    impl<'a> MakeWriter<'a> for Console {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buf: Vec::new() }
        }
    }

    /// `level` is an `EnvFilter` directive such as `"info"` or `"folio=debug"`
    pub fn init_browser_logging(level: &str) {
        let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .without_time()
            .with_ansi(false)
            .with_writer(Console)
            .try_init();
    }
}
