//! CLI error types.

use bento_config::ConfigError;
use bento_mime::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("invalid bundle file: {0}")]
    Bundle(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
