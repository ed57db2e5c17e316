//! Observability for scanql.
//!
//! Deterministic, synchronous, structured JSON logging. The compiler core
//! stays silent; the CLI layer reports compilation events through
//! [`Logger`].

mod logger;

pub use logger::{Logger, Severity};
