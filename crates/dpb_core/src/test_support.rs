//! Shared test-only helpers for dpb_core.

use crate::naming::IdAllocator;
use crate::{Config, Lookup, PasteStore, StoredPaste};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncReadExt;

/// Not-found delay used by tests that do not measure it.
pub(crate) const TEST_NOT_FOUND_DELAY: Duration = Duration::from_millis(20);

/// Configuration for a store rooted at `dir` with a short not-found delay.
pub(crate) fn test_config(dir: &Path) -> Config {
    let mut config = Config::new(dir);
    config.not_found_delay = TEST_NOT_FOUND_DELAY;
    config
}

/// Creates an isolated store in a fresh temporary directory.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
///
/// # Panics
/// Panics if temp-dir creation or store initialization fails.
pub(crate) fn setup_temp_store() -> (PasteStore, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let store = PasteStore::open(&test_config(temp_dir.path())).expect("store");
    (store, temp_dir)
}

/// Like [`setup_temp_store`] but with a deterministic allocator.
pub(crate) fn setup_seeded_store(config: &Config, seed: u64) -> PasteStore {
    PasteStore::with_allocator(config, IdAllocator::seeded(seed, config.id_len))
}

/// Unwraps a paste lookup, panicking on the version banner.
pub(crate) fn expect_paste(lookup: Lookup) -> StoredPaste {
    match lookup {
        Lookup::Paste(paste) => paste,
        Lookup::Version(version) => panic!("expected a paste, got version {}", version),
    }
}

/// Reads a stored paste body to the end.
pub(crate) async fn read_body(paste: StoredPaste) -> Vec<u8> {
    let mut body = paste.body;
    let mut buf = Vec::new();
    body.read_to_end(&mut buf).await.expect("read body");
    buf
}

/// File names currently present in `dir`, sorted.
pub(crate) fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
