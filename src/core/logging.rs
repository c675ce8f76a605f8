//! Logging abstraction
//!
//! Unified logging macros that work across targets:
//! - Embedded (`pico_w`): defmt over RTT
//! - Host tests: `println!`
//! - Host non-test: no-op
//!
//! Logging is diagnostic only; no correctness property of the control loop
//! depends on a log line being emitted.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico_w")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico_w"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico_w")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico_w"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico_w")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "pico_w"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico_w")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico_w"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}
