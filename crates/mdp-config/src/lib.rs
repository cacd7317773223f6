//! Configuration management for mdp.
//!
//! Parses `mdp.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Every option is optional. Missing keys keep their built-in defaults, so a
//! user file only overrides what it names. CLI settings are applied last via
//! [`CliSettings`].
//!
//! Keys are accepted in `snake_case` and, for compatibility with existing
//! md-party sites, in their original `camelCase` spelling (`fetchPrefix`,
//! `titleAsHome`, ...). Color roles keep their dashed names
//! (`primary-color`).
//!
//! ## Environment Variable Expansion
//!
//! `fetch_prefix` and `sitemap` support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
    /// Override fetch prefix.
    pub fetch_prefix: Option<String>,
    /// Override site map location.
    pub sitemap: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdp.toml";

/// Where the ordered list of page names comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SiteMapSource {
    /// Page names listed directly in the config file (`pages = [...]`).
    Inline(Vec<String>),
    /// A YAML document holding a sequence of page names.
    ///
    /// Either an `http(s)://` URL or a filesystem path. Paths from the config
    /// file resolve against its directory, paths from the command line
    /// against the working directory.
    Location(String),
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the element the site shell is mounted on.
    #[serde(alias = "elementId")]
    pub element_id: String,
    /// Site title, shown in navigation and document titles.
    pub title: String,
    /// Prefix prepended to every fetched document URL.
    #[serde(alias = "fetchPrefix")]
    pub fetch_prefix: Option<String>,
    /// Sub-path holding page documents.
    #[serde(alias = "pagesPrefix")]
    pub pages_prefix: String,
    /// Sub-path holding layout fragments.
    #[serde(alias = "layoutPrefix")]
    pub layout_prefix: String,
    /// Whether the site title links to the first page of the site map.
    #[serde(alias = "titleAsHome")]
    pub title_as_home: bool,
    /// Theme colors.
    #[serde(flatten)]
    pub theme: ThemeConfig,
    /// Layout fragments loaded alongside pages.
    #[serde(alias = "layoutParts")]
    pub layout_parts: Vec<String>,
    /// Site map location (path or URL of a YAML list).
    sitemap: Option<String>,
    /// Inline site map.
    pages: Option<Vec<String>>,
    /// Output directory for `mdp build` (relative to the config file).
    output_dir: Option<String>,

    /// Resolved site map source (set after loading).
    #[serde(skip)]
    pub sitemap_resolved: Option<SiteMapSource>,
    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir_resolved: PathBuf,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Theme color configuration.
///
/// Values are passed through verbatim as CSS color values.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    /// Primary color.
    #[serde(rename = "primary-color")]
    pub primary_color: String,
    /// Secondary color.
    #[serde(rename = "secondary-color")]
    pub secondary_color: String,
    /// Lighter variant of the secondary color.
    #[serde(rename = "secondary-light-color")]
    pub secondary_light_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: "sienna".to_owned(),
            secondary_color: "wheat".to_owned(),
            secondary_light_color: "cornsilk".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field name (e.g., "`fetch_prefix`").
        field: String,
        /// Error message (e.g., "`SITE_ROOT` not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("{} {}", e.var_name, e.cause),
        })
}

/// Resolve a site map location against `base`. URLs are left untouched.
fn resolve_location(location: &str, base: &Path) -> String {
    if is_http_url(location) {
        location.to_owned()
    } else {
        base.join(location).to_string_lossy().into_owned()
    }
}

/// Check whether a location is an HTTP(S) URL rather than a filesystem path.
#[must_use]
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdp.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, env expansion, or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(title) = &settings.title {
            self.title.clone_from(title);
        }
        if let Some(prefix) = &settings.fetch_prefix {
            self.fetch_prefix = Some(prefix.clone());
        }
        if let Some(sitemap) = &settings.sitemap {
            let cwd = std::env::current_dir()?;
            self.sitemap_resolved = Some(SiteMapSource::Location(resolve_location(
                &expand_env(sitemap, "sitemap")?,
                &cwd,
            )));
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir_resolved.clone_from(output_dir);
        }
        Ok(())
    }

    /// Get the site map source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if neither `sitemap` nor `pages` is set.
    pub fn require_sitemap(&self) -> Result<&SiteMapSource, ConfigError> {
        self.sitemap_resolved.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "a site map is required: set `sitemap` or `pages` in config".to_owned(),
            )
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            element_id: "md-party-container".to_owned(),
            title: "md-party".to_owned(),
            fetch_prefix: None,
            pages_prefix: "Content".to_owned(),
            layout_prefix: "Layout".to_owned(),
            title_as_home: true,
            theme: ThemeConfig::default(),
            layout_parts: vec!["footer".to_owned()],
            sitemap: None,
            pages: None,
            output_dir: None,
            sitemap_resolved: None,
            output_dir_resolved: base.join("dist"),
            base_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolve relative paths and the site map source.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.base_dir = config_dir.to_path_buf();
        self.output_dir_resolved = config_dir.join(self.output_dir.as_deref().unwrap_or("dist"));

        self.sitemap_resolved = match (&self.sitemap, &self.pages) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Validation(
                    "`sitemap` and `pages` are mutually exclusive".to_owned(),
                ));
            }
            (Some(location), None) => Some(SiteMapSource::Location(resolve_location(
                location, config_dir,
            ))),
            (None, Some(pages)) => Some(SiteMapSource::Inline(pages.clone())),
            (None, None) => None,
        };

        Ok(())
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.element_id, "element_id")?;
        require_non_empty(&self.title, "title")?;

        for part in &self.layout_parts {
            require_non_empty(part, "layout_parts entry")?;
        }

        if let Some(SiteMapSource::Inline(pages)) = &self.sitemap_resolved {
            for page in pages {
                require_non_empty(page, "pages entry")?;
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.fetch_prefix {
            self.fetch_prefix = Some(expand_env(prefix, "fetch_prefix")?);
        }
        if let Some(sitemap) = &self.sitemap {
            self.sitemap = Some(expand_env(sitemap, "sitemap")?);
        }
        Ok(())
    }
}
