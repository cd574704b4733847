//! Logging macros.
//!
//! Each severity macro takes a logger, an optional context, and a format
//! string with arguments:
//!
//! ```
//! use ctxlog::{ctx, info, Logger, LoggerConfig};
//!
//! let logger = Logger::new(LoggerConfig::new("doc"));
//! info!(logger, "ready");
//! info!(logger, ctx! { "port" => 8080 }, "listening on {}", "0.0.0.0");
//! ```

/// Build a [`Ctx`](crate::Ctx) from `key => value` pairs.
#[macro_export]
macro_rules! ctx {
    () => {
        $crate::Ctx::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Ctx::new()$(.with($key, $value))+
    };
}

/// Log at an explicit [`Level`](crate::Level).
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $($arg:tt)*) => {
        $logger.log($level, &(), ::std::format_args!($fmt $($arg)*))
    };
    ($logger:expr, $level:expr, $ctx:expr, $fmt:literal $($arg:tt)*) => {
        $logger.log($level, &$ctx, ::std::format_args!($fmt $($arg)*))
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Notice, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($rest)+)
    };
}
