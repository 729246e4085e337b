use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the catalog and form boundaries.
///
/// The browsing state machine itself never fails; everything here comes from
/// reading or validating content.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("item {id} has an empty image list")]
    EmptyImages { id: String },

    #[error("item \"{title}\" has neither `image` nor `images`")]
    MissingImages { title: String },

    #[error("duplicate id {id} in {section}")]
    DuplicateId { section: String, id: String },

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
