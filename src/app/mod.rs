//! Shopfront application module: terminal setup, background workers and the
//! event loop, plus the headless dump mode.

/// One-shot fetch and JSON print for `--dump`.
mod dump;
/// Runtime event loop and background workers.
mod runtime;
/// Terminal setup and restoration utilities.
mod terminal;

// Re-export the public entrypoint so callers keep using `app::run(...)`.
pub use runtime::run;
