//! Core paste storage engine for dpb (config, identifiers, on-disk store).

/// Configuration loading and validation.
pub mod config;
/// Shared constants and defaults.
pub mod constants;
/// Engine error types.
pub mod error;
/// Paste identifier allocation.
pub mod naming;
/// Filesystem-backed paste store.
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{DEFAULT_CONTENT_TYPE, VERSION};
pub use error::{ConfigError, PasteError};
pub use store::{Lookup, PasteBody, PasteStore, StoredPaste};
