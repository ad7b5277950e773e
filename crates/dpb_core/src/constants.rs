//! Shared constants used across dpb crates.

use std::time::Duration;

/// Version banner returned for the empty identifier.
pub const VERSION: &str = concat!("dpb ver. ", env!("CARGO_PKG_VERSION"));

/// Bytes per mebibyte.
pub const MIB: usize = 1 << 20;

/// Default per-paste upload limit, in MiB.
pub const DEFAULT_MAX_MIB: usize = 10;

/// Default identifier length in hex characters (16^5 possible names).
pub const DEFAULT_ID_LEN: usize = 5;

/// Longest identifier length accepted by configuration.
pub const MAX_CONFIG_ID_LEN: usize = 32;

/// Longest identifier the read path will look up on disk.
pub const MAX_LOOKUP_ID_LEN: usize = 64;

/// Delay applied to every not-found lookup.
pub const DEFAULT_NOT_FOUND_DELAY: Duration = Duration::from_secs(3);

/// Content type used when the client does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Upper bound on the content-type prelude line, newline excluded.
pub const MAX_PRELUDE_LEN: usize = 1024;

/// Suffix of the staging file a paste body is written to before commit.
pub const STAGING_SUFFIX: &str = ".partial";
