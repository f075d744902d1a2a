//! Cross-platform logging.
//!
//! The `log_*!` macros dispatch to the browser console on wasm and to
//! `tracing` on native builds, so views and hooks log the same way on both
//! targets.

#[cfg(target_arch = "wasm32")]
pub fn log_info_impl(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_info_impl(msg: &str) {
    tracing::info!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_warn_impl(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_warn_impl(msg: &str) {
    tracing::warn!("{}", msg);
}

#[cfg(target_arch = "wasm32")]
pub fn log_error_impl(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_error_impl(msg: &str) {
    tracing::error!("{}", msg);
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_info_impl(&format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::log_warn_impl(&format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error_impl(&format!($($arg)*))
    };
}
