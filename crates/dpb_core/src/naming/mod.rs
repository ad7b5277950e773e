//! Random identifier generation for pastes.
//!
//! The allocator only proposes candidates. Whether a candidate is free is
//! decided by the store's exclusive create, so there is exactly one place
//! that can bind an identifier to a paste.

use crate::constants::MAX_LOOKUP_ID_LEN;
use crate::error::PasteError;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Mutex;

/// Source of candidate paste identifiers.
///
/// Safe to share between concurrent store operations; the draw itself is
/// serialized behind a mutex.
#[derive(Debug)]
pub(crate) struct IdAllocator {
    rng: Mutex<StdRng>,
    len: usize,
}

impl IdAllocator {
    /// Allocator seeded from OS entropy, producing `len` hex characters.
    pub(crate) fn new(len: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), len)
    }

    /// Deterministic allocator, for reproducing collisions in tests.
    #[cfg(test)]
    pub(crate) fn seeded(seed: u64, len: usize) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), len)
    }

    fn with_rng(rng: StdRng, len: usize) -> Self {
        Self {
            rng: Mutex::new(rng),
            len,
        }
    }

    /// Draw the next candidate identifier.
    ///
    /// # Errors
    /// Returns [`PasteError::Allocation`] if the random source cannot be read.
    pub(crate) fn next_candidate(&self) -> Result<String, PasteError> {
        let mut buf = vec![0u8; (self.len + 1) / 2];
        {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| PasteError::Allocation("random source lock poisoned".to_string()))?;
            rng.try_fill_bytes(&mut buf)
                .map_err(|err| PasteError::Allocation(err.to_string()))?;
        }
        let mut id = hex::encode(buf);
        id.truncate(self.len);
        Ok(id)
    }
}

/// Whether `id` could name a paste file: non-empty lowercase hex, bounded length.
///
/// Anything else (separators, dot-prefixed staging names, uppercase) is never
/// looked up on disk.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_LOOKUP_ID_LEN
        && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
