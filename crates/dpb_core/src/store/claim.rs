//! Write side of a claimed identifier.

use crate::constants::STAGING_SUFFIX;
use crate::error::PasteError;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncWriteExt, BufWriter};

/// An identifier claimed on disk whose paste has not been committed yet.
///
/// Until [`PendingPaste::write_and_commit`] succeeds, dropping the value
/// (including when the owning future is cancelled) removes both the claim and
/// the staging file.
pub(super) struct PendingPaste {
    id: String,
    claim_path: PathBuf,
    staging_path: PathBuf,
    staging: Option<File>,
    armed: bool,
}

impl PendingPaste {
    /// Exclusively create the claim for `id` and open its staging file.
    ///
    /// Blocking. Run it on a blocking task and await the join handle: if the
    /// awaiting future is dropped, the runtime drops the returned guard once
    /// the task finishes, which removes whatever this call created.
    ///
    /// Returns `Ok(None)` when `id` is already taken.
    pub(super) fn try_claim(dir: &Path, id: String) -> io::Result<Option<Self>> {
        let claim_path = dir.join(&id);
        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&claim_path)
        {
            Ok(_claim) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(None),
            Err(err) => return Err(err),
        }

        let mut pending = Self {
            claim_path,
            staging_path: dir.join(format!(".{}{}", id, STAGING_SUFFIX)),
            staging: None,
            id,
            armed: true,
        };
        let staging = std::fs::File::create(&pending.staging_path)?;
        pending.staging = Some(File::from_std(staging));
        Ok(Some(pending))
    }

    /// Stream the prelude and body to the staging file, then rename it over
    /// the claim.
    pub(super) async fn write_and_commit<R>(
        mut self,
        content_type: &str,
        body: &mut R,
    ) -> Result<String, PasteError>
    where
        R: AsyncRead + Unpin,
    {
        let written = match self.write_staging(content_type, body).await {
            Ok(written) => written,
            Err(source) => return Err(self.fail(source).await),
        };

        if let Err(source) = fs::rename(&self.staging_path, &self.claim_path).await {
            return Err(self.fail(source).await);
        }

        self.armed = false;
        tracing::info!(
            id = %self.id,
            content_type = %content_type,
            bytes = written,
            "paste stored"
        );
        Ok(std::mem::take(&mut self.id))
    }

    async fn write_staging<R>(&mut self, content_type: &str, body: &mut R) -> io::Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let staging = match self.staging.take() {
            Some(file) => file,
            None => File::create(&self.staging_path).await?,
        };
        let mut writer = BufWriter::new(staging);
        writer.write_all(content_type.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        let written = tokio::io::copy(body, &mut writer).await?;
        writer.flush().await?;
        writer.get_ref().sync_all().await?;
        Ok(written)
    }

    async fn fail(&mut self, source: io::Error) -> PasteError {
        tracing::warn!(id = %self.id, error = %source, "discarding partially written paste");
        for path in [&self.staging_path, &self.claim_path] {
            if let Err(err) = fs::remove_file(path).await {
                log_cleanup_failure(path, &err);
            }
        }
        self.armed = false;
        PasteError::Write {
            id: self.id.clone(),
            source,
        }
    }
}

impl Drop for PendingPaste {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(id = %self.id, "paste dropped before commit; removing claim");
        for path in [&self.staging_path, &self.claim_path] {
            if let Err(err) = std::fs::remove_file(path) {
                log_cleanup_failure(path, &err);
            }
        }
    }
}

fn log_cleanup_failure(path: &Path, err: &io::Error) {
    if err.kind() != io::ErrorKind::NotFound {
        tracing::error!("Failed to remove {}: {}", path.display(), err);
    }
}
