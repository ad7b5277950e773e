//! HTTP request handlers.

/// Paste store and retrieve endpoints.
pub mod paste;
