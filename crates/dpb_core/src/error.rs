//! Error types for the paste engine and its configuration.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a store or retrieve operation.
#[derive(Error, Debug)]
pub enum PasteError {
    #[error("not found")]
    NotFound,

    #[error("failed reading from prng: {0}")]
    Allocation(String),

    #[error("failed creating paste {id}: {source}")]
    Create {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("failed writing paste {id} to disk: {source}")]
    Write {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("content type must be a single line of at most 1024 bytes")]
    InvalidContentType,

    #[error("no free identifier found after {attempts} attempts")]
    NamespaceExhausted { attempts: u32 },
}

/// Invalid or missing startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("please set the value of {0}")]
    Missing(&'static str),

    #[error("{name} {reason} (got '{value}')")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{} does not exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
