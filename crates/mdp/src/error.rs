//! CLI error types.

use mdp_config::ConfigError;
use mdp_site::{LoadError, SiteMapError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    SiteMap(#[from] SiteMapError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Site failed to load: {0}")]
    SiteFailed(String),

    #[error("{0}")]
    Validation(String),
}
