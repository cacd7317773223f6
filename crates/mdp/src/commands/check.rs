//! `mdp check` command implementation.

use std::sync::Arc;

use clap::Args;
use mdp_renderer::HtmlConverter;
use mdp_site::{ContentKind, LoadError, MarkdownLoader, SiteConfig, SiteMap, resolve_url};

use super::{SiteArgs, create_fetcher, create_site, load_site_map, site_config_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

/// A document that failed to load.
struct Problem {
    name: String,
    error: LoadError,
}

/// Load every page and layout part one by one and collect failures.
fn check_documents(
    site_map: &SiteMap,
    config: &SiteConfig,
    loader: &MarkdownLoader,
) -> Vec<Problem> {
    let pages = site_map.iter().map(|name| (ContentKind::Page, name));
    let layouts = config
        .layout_parts
        .iter()
        .map(|part| (ContentKind::Layout, part.as_str()));

    pages
        .chain(layouts)
        .filter_map(|(kind, name)| {
            loader
                .load(&resolve_url(kind, name, config))
                .err()
                .map(|error| Problem {
                    name: name.to_owned(),
                    error,
                })
        })
        .collect()
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site map is invalid or any document fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;

        let site_map = match load_site_map(&config, &create_site(&config)) {
            Ok(site_map) => site_map,
            Err(err) => {
                output.error(&format!("Site map: {err}"));
                return Err(err);
            }
        };
        output.info(&format!("Site map: {} pages", site_map.len()));

        let site_config = site_config_from_config(&config);
        let loader = MarkdownLoader::new(create_fetcher(&config), Arc::new(HtmlConverter::new()));
        let problems = check_documents(&site_map, &site_config, &loader);

        if problems.is_empty() {
            output.success("All documents load");
            return Ok(());
        }

        for problem in &problems {
            output.warning(&format!("{}: {}", problem.name, problem.error));
        }
        Err(CliError::Validation(format!(
            "{} of {} documents failed to load",
            problems.len(),
            site_map.len() + site_config.layout_parts.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mdp_config::Config;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::tests::write_site;

    #[test]
    fn test_check_documents_all_present() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_site(temp_dir.path());
        let site_map = SiteMap::new(["Home", "API Ref"]).unwrap();
        let loader = MarkdownLoader::new(create_fetcher(&config), Arc::new(HtmlConverter::new()));

        let problems = check_documents(&site_map, &site_config_from_config(&config), &loader);

        assert!(problems.is_empty());
    }

    #[test]
    fn test_check_documents_reports_every_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        write_site(temp_dir.path());
        fs::remove_file(temp_dir.path().join("Layout/footer.md")).unwrap();
        let config = Config::from_toml_str("pages = [\"Home\"]\n", temp_dir.path()).unwrap();
        let site_map = SiteMap::new(["Home", "Missing", "Gone"]).unwrap();
        let loader = MarkdownLoader::new(create_fetcher(&config), Arc::new(HtmlConverter::new()));

        let problems = check_documents(&site_map, &site_config_from_config(&config), &loader);

        let names: Vec<_> = problems.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Missing", "Gone", "footer"]);
        assert_eq!(problems[0].error.url(), Some("Content/Missing.md"));
    }
}
