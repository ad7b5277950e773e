//! Read side: open a paste and parse its content-type prelude.

use super::StoredPaste;
use crate::constants::MAX_PRELUDE_LEN;
use crate::naming::is_valid_id;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};

/// Why a lookup came back empty. Logged, never returned to the caller.
#[derive(thiserror::Error, Debug)]
pub(super) enum Miss {
    #[error("identifier is not a paste name")]
    InvalidId,
    #[error("open failed: {0}")]
    Open(#[source] io::Error),
    #[error("prelude read failed: {0}")]
    Prelude(#[source] io::Error),
    #[error("prelude is not newline-terminated")]
    Unterminated,
    #[error("prelude is not valid UTF-8")]
    NotUtf8,
}

pub(super) async fn open_paste(dir: &Path, id: &str) -> Result<StoredPaste, Miss> {
    if !is_valid_id(id) {
        return Err(Miss::InvalidId);
    }
    let file = File::open(dir.join(id)).await.map_err(Miss::Open)?;
    let mut body = BufReader::new(file);
    let content_type = read_prelude(&mut body).await?;
    Ok(StoredPaste { content_type, body })
}

async fn read_prelude<R>(reader: &mut R) -> Result<String, Miss>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    (&mut *reader)
        .take(MAX_PRELUDE_LEN as u64 + 1)
        .read_until(b'\n', &mut line)
        .await
        .map_err(Miss::Prelude)?;
    if line.pop() != Some(b'\n') {
        return Err(Miss::Unterminated);
    }
    String::from_utf8(line).map_err(|_| Miss::NotUtf8)
}
