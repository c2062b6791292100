//! LearnHub Observability
//!
//! - [`init_logging`]: installs the global `tracing` subscriber (console or JSON)
//! - [`logging_middleware`]: one log line per HTTP request, levelled by status class
//!
//! ```no_run
//! use learnhub_observability::init_logging;
//!
//! init_logging();
//! tracing::info!("ready");
//! ```

pub mod logging;
pub mod middleware;

pub use logging::{LogFormat, init_logging};
pub use middleware::logging_middleware;
