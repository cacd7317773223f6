//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod navigate;
pub(crate) mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdp_config::{CliSettings, Config, SiteMapSource, is_http_url};
use mdp_fetch::{Fetcher, FsFetcher, HttpFetcher, RoutingFetcher};
use mdp_renderer::HtmlConverter;
use mdp_site::{LoadState, Site, SiteConfig, SiteMap, ThemeColors};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use navigate::NavigateArgs;
pub(crate) use show::ShowArgs;

/// Options shared by every command that loads a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover mdp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site map location, a YAML file path or URL (overrides config).
    #[arg(long, env = "MDP_SITEMAP")]
    sitemap: Option<String>,

    /// Base location of all documents (overrides config).
    #[arg(long, env = "MDP_FETCH_PREFIX")]
    fetch_prefix: Option<String>,

    /// Site title (overrides config).
    #[arg(long)]
    title: Option<String>,

    /// Enable verbose output (show fetch and timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            title: self.title.clone(),
            fetch_prefix: self.fetch_prefix.clone(),
            sitemap: self.sitemap.clone(),
            output_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Map file configuration onto the pipeline configuration.
pub(crate) fn site_config_from_config(config: &Config) -> SiteConfig {
    SiteConfig {
        element_id: config.element_id.clone(),
        title: config.title.clone(),
        fetch_prefix: config.fetch_prefix.clone(),
        pages_prefix: config.pages_prefix.clone(),
        layout_prefix: config.layout_prefix.clone(),
        title_as_home: config.title_as_home,
        theme: ThemeColors {
            primary: config.theme.primary_color.clone(),
            secondary: config.theme.secondary_color.clone(),
            secondary_light: config.theme.secondary_light_color.clone(),
        },
        layout_parts: config.layout_parts.clone(),
    }
}

/// Fetch remote URLs over HTTP and everything else from the config directory.
pub(crate) fn create_fetcher(config: &Config) -> Arc<dyn Fetcher> {
    Arc::new(RoutingFetcher::new(
        HttpFetcher::default(),
        FsFetcher::new(config.base_dir.clone()),
    ))
}

/// Create the site pipeline for `config`.
pub(crate) fn create_site(config: &Config) -> Site {
    Site::new(
        create_fetcher(config),
        Arc::new(HtmlConverter::new()),
        site_config_from_config(config),
    )
}

/// Read the configured site map.
pub(crate) fn load_site_map(config: &Config, site: &Site) -> Result<SiteMap, CliError> {
    match config.require_sitemap()? {
        SiteMapSource::Inline(pages) => Ok(SiteMap::new(pages.iter().cloned())?),
        SiteMapSource::Location(url) if is_http_url(url) => Ok(site.load_site_map(url)?),
        SiteMapSource::Location(path) => {
            let document = std::fs::read_to_string(path)?;
            Ok(SiteMap::from_yaml(&document)?)
        }
    }
}

/// A site whose documents have been loaded successfully.
pub(crate) struct LoadedSite {
    pub site: Site,
    pub site_map: Arc<SiteMap>,
    pub state: Arc<LoadState>,
}

/// Load configuration, site map and every document.
pub(crate) fn load_site(config: &Config) -> Result<LoadedSite, CliError> {
    let site = create_site(config);
    let site_map = Arc::new(load_site_map(config, &site)?);
    let state = site.reload(&site_map);

    if let Some(error) = state.error() {
        return Err(CliError::SiteFailed(error.to_string()));
    }

    Ok(LoadedSite {
        site,
        site_map,
        state,
    })
}
