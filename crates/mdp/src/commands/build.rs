//! `mdp build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdp_site::{NavEvent, Navigator, PageCollection, ViewModel, slug};

use super::{SiteArgs, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Directory below the output directory holding layout fragments.
const LAYOUT_DIR: &str = "layout";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Output directory (default: dist/ next to the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to load or output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(self.output_dir)?;
        let output_dir = config.output_dir_resolved.clone();

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Output: {}", output_dir.display()));

        let loaded = load_site(&config)?;
        let Some(collection) = loaded.state.collection() else {
            return Err(CliError::SiteFailed("site is still loading".to_owned()));
        };

        let mut navigator = Navigator::new(Arc::clone(&loaded.site_map), loaded.site.config());
        navigator.dispatch(NavEvent::Loaded);
        let view = ViewModel::new(
            loaded.site.config(),
            &loaded.site_map,
            &loaded.state,
            &navigator,
        );

        let written = write_site(&output_dir, collection, &view)?;

        output.success(&format!(
            "Built {written} pages to {}",
            output_dir.display()
        ));
        Ok(())
    }
}

/// Write pages, layout fragments, theme and view model. Returns the number of
/// pages written.
fn write_site(
    output_dir: &Path,
    collection: &PageCollection,
    view: &ViewModel<'_>,
) -> Result<usize, CliError> {
    fs::create_dir_all(output_dir.join(LAYOUT_DIR))?;

    for page in collection.pages() {
        let path = output_dir.join(format!("{}.html", slug(&page.name)));
        fs::write(&path, &page.content.html)?;
        tracing::debug!(page = %page.name, path = %path.display(), "Wrote page");
    }

    for (part, content) in collection.layouts() {
        fs::write(
            output_dir.join(LAYOUT_DIR).join(format!("{}.html", slug(part))),
            &content.html,
        )?;
    }

    fs::write(output_dir.join("theme.css"), view.config.theme.to_css())?;
    fs::write(output_dir.join("site.json"), view.to_json()?)?;

    Ok(collection.len())
}
