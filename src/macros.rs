//! Small crate-wide convenience macros.

/// `console.log` with `format!` arguments; a no-op in release builds.
///
/// ```rust,ignore
/// debug_log!("lookup {} returned {} results", generation, items.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
    };
}

/// `console.warn` with `format!` arguments.  Kept in release builds: these
/// mark server responses the UI could not use.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        web_sys::console::warn_1(&format!($($arg)*).into())
    };
}
