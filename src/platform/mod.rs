//! Platform glue
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - The page-facing game handle (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Route `log` output to stderr, filtered by `RUST_LOG` (default `info`)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // A second init (tests, embedding hosts) is harmless
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Route `log` output and panics to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Console logger already installed");
    }
}
