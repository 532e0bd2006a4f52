//! Error types produced while constructing providers and reading values.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::FieldFailures;
pub use types::{ConfigError, ProviderPhase};
