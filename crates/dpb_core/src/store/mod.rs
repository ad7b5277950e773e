//! Filesystem-backed paste store.
//!
//! Layout: one flat file per paste directly inside the base directory, named
//! by its identifier. The first line holds the content type and the rest of
//! the file is the body, byte-for-byte.
//!
//! A store first claims the identifier with an exclusive create (the claim
//! stays empty), writes the prelude and body to a dot-prefixed staging file,
//! and commits by renaming the staging file over the claim. A reader can
//! therefore only ever see no file, an empty claim, or a complete paste.

mod claim;
mod read;

use crate::config::{ensure_directory, Config};
use crate::constants::{DEFAULT_CONTENT_TYPE, MAX_PRELUDE_LEN, VERSION};
use crate::error::{ConfigError, PasteError};
use crate::naming::IdAllocator;
use claim::PendingPaste;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};

/// Readable body of a stored paste, positioned just after the prelude.
///
/// Dropping it closes the underlying file.
pub type PasteBody = BufReader<File>;

/// A paste found by [`PasteStore::retrieve`].
#[derive(Debug)]
pub struct StoredPaste {
    pub content_type: String,
    pub body: PasteBody,
}

/// Outcome of a successful lookup.
#[derive(Debug)]
pub enum Lookup {
    /// The empty identifier asks for the engine version instead of a paste.
    Version(&'static str),
    Paste(StoredPaste),
}

/// Paste storage engine bound to one base directory.
#[derive(Debug)]
pub struct PasteStore {
    base_dir: PathBuf,
    ids: IdAllocator,
    not_found_delay: Duration,
    max_claim_attempts: Option<u32>,
}

impl PasteStore {
    /// Open a store over `config.base_dir`.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotADirectory`] if the base directory is missing.
    pub fn open(config: &Config) -> Result<Self, ConfigError> {
        ensure_directory(&config.base_dir)?;
        Ok(Self::with_allocator(config, IdAllocator::new(config.id_len)))
    }

    pub(crate) fn with_allocator(config: &Config, ids: IdAllocator) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            ids,
            not_found_delay: config.not_found_delay,
            max_claim_attempts: config.max_claim_attempts,
        }
    }

    /// Directory the pastes live in.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Persist `body` under a freshly claimed identifier.
    ///
    /// The body is streamed to disk; the caller is responsible for bounding
    /// it. A stream that errors (including on exceeding its limit) fails the
    /// store and leaves nothing behind.
    ///
    /// # Arguments
    /// - `content_type`: Declared content type; blank means
    ///   [`DEFAULT_CONTENT_TYPE`].
    /// - `body`: Paste contents.
    ///
    /// # Returns
    /// The identifier bound to the new paste.
    ///
    /// # Errors
    /// - [`PasteError::InvalidContentType`] for multi-line or oversized types.
    /// - [`PasteError::Allocation`] if the random source fails.
    /// - [`PasteError::Create`] if the claim fails for a reason other than
    ///   the name being taken.
    /// - [`PasteError::Write`] if the body cannot be fully written.
    /// - [`PasteError::NamespaceExhausted`] if a claim ceiling is configured
    ///   and reached.
    pub async fn store<R>(&self, content_type: &str, mut body: R) -> Result<String, PasteError>
    where
        R: AsyncRead + Unpin,
    {
        let content_type = normalize_content_type(content_type)?;
        let pending = self.claim().await?;
        pending.write_and_commit(content_type, &mut body).await
    }

    /// Look up a paste by identifier.
    ///
    /// The empty identifier returns [`Lookup::Version`] without touching the
    /// filesystem. Every not-found outcome, whatever its cause, is delayed by
    /// the configured not-found delay.
    ///
    /// # Errors
    /// Returns [`PasteError::NotFound`] when no well-formed paste exists.
    pub async fn retrieve(&self, id: &str) -> Result<Lookup, PasteError> {
        if id.is_empty() {
            return Ok(Lookup::Version(VERSION));
        }

        match read::open_paste(&self.base_dir, id).await {
            Ok(paste) => Ok(Lookup::Paste(paste)),
            Err(miss) => {
                tracing::debug!(id = %id, cause = %miss, "paste not found");
                tokio::time::sleep(self.not_found_delay).await;
                Err(PasteError::NotFound)
            }
        }
    }

    async fn claim(&self) -> Result<PendingPaste, PasteError> {
        let mut attempts: u32 = 0;
        loop {
            if let Some(max) = self.max_claim_attempts {
                if attempts >= max {
                    tracing::error!(attempts, "gave up looking for a free identifier");
                    return Err(PasteError::NamespaceExhausted { attempts });
                }
            }

            let id = self.ids.next_candidate()?;
            attempts = attempts.saturating_add(1);

            let dir = self.base_dir.clone();
            let candidate = id.clone();
            let claimed =
                tokio::task::spawn_blocking(move || PendingPaste::try_claim(&dir, candidate))
                    .await
                    .map_err(io::Error::other)
                    .and_then(|result| result);

            match claimed {
                Ok(Some(pending)) => return Ok(pending),
                Ok(None) => {
                    tracing::debug!(id = %id, attempts, "identifier taken, drawing again");
                }
                Err(source) => return Err(PasteError::Create { id, source }),
            }
        }
    }
}

fn normalize_content_type(content_type: &str) -> Result<&str, PasteError> {
    if content_type.trim().is_empty() {
        return Ok(DEFAULT_CONTENT_TYPE);
    }
    if content_type.len() > MAX_PRELUDE_LEN || content_type.contains(|c| c == '\r' || c == '\n')
    {
        return Err(PasteError::InvalidContentType);
    }
    Ok(content_type)
}
