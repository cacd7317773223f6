//! `mdp show` command implementation.

use std::sync::Arc;

use clap::Args;
use mdp_site::{CurrentPage, Effect, NavEvent, Navigator};

use super::{SiteArgs, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// URL fragment selecting the page, e.g. `#API_Ref` (default: home page).
    #[arg(default_value = "")]
    fragment: String,

    /// Also print the footer and header fragments.
    #[arg(long)]
    layout: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to load.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;
        let loaded = load_site(&config)?;

        let mut navigator = Navigator::new(Arc::clone(&loaded.site_map), loaded.site.config());
        navigator.dispatch(NavEvent::FragmentChanged(self.fragment));
        for effect in navigator.dispatch(NavEvent::Loaded) {
            if let Effect::SetFragment(fragment) = effect {
                output.note(&format!("Redirected to #{fragment}"));
            }
        }

        output.highlight(&navigator.title());

        let collection = loaded.state.collection();
        let page = match navigator.current() {
            Some(CurrentPage::Page(name)) => collection.and_then(|c| c.get(name)),
            _ => None,
        };
        let Some(page) = page else {
            output.warning("No page matches this fragment");
            return Ok(());
        };

        if self.layout
            && let Some(header) = collection.and_then(|c| c.header())
        {
            output.print(&header.html);
        }
        output.print(&page.content.html);
        if self.layout
            && let Some(footer) = collection.and_then(|c| c.footer())
        {
            output.print(&footer.html);
        }

        Ok(())
    }
}
