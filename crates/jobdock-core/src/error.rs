use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read pipeline config {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse pipeline config {path}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("job '{name}' not found in pipeline config")]
    JobNotFound { name: String },

    #[error("job '{job}' has no '{field}' entry")]
    MissingField { job: String, field: &'static str },

    #[error("config entry '{field}' is not {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    // ── Usage errors, caught before any generation work ──
    #[error("--outdir cannot be combined with --localtree or --tag")]
    IncompatibleFlags,

    #[error("--repo is required when no --localtree is given")]
    MissingRepoUrl,
}
