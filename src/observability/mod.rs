//! Observability of the logging facility itself.
//!
//! # Data Flow
//! ```text
//! registry / loggers / config reload produce:
//!     → tracing events (diagnostics of ctxlog itself, via tracing-subscriber)
//!     → metrics.rs (lines written, write failures, level changes, registered loggers)
//!
//! Consumers:
//!     → stderr (tracing fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Diagnostics go through `tracing`, never through a ctxlog sink
//! - Metrics are cheap (atomic increments) and no-ops without a recorder
//! - Nothing is recorded for suppressed log calls

pub mod logging;
pub mod metrics;
