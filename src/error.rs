//! Error types
//!
//! Extraction, normalization, pricing and rendering absorb bad input and
//! never fail. Errors only come from the template store, prompt set,
//! configuration loading and the FFI boundary.

use std::path::PathBuf;

use crate::prompts::PromptKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("cannot delete the last remaining template")]
    LastTemplate,

    #[error("prompt for \"{0}\" is empty")]
    EmptyPrompt(PromptKind),

    #[error("prompt for \"{kind}\" is {len} characters, limit is {max}")]
    PromptTooLong {
        kind: PromptKind,
        len: usize,
        max: usize,
    },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
