//! `mdp navigate` command implementation.
//!
//! Reads one fragment per line from stdin and prints the resulting page
//! title. The lines `:menu` and `:close` toggle and close the menu instead.

use std::io::BufRead;
use std::sync::Arc;
use std::thread;

use clap::Args;
use mdp_site::{Effect, NavEvent, NavigationEventSender, Navigator, navigation_channel};

use super::{SiteArgs, create_site, load_site_map};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the navigate command.
#[derive(Args)]
pub(crate) struct NavigateArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Also print the navigation menu after each page change.
    #[arg(long)]
    menu: bool,
}

/// Translate an input line into a navigation event.
fn parse_line(line: &str) -> NavEvent {
    match line.trim() {
        ":menu" => NavEvent::ToggleMenu,
        ":close" => NavEvent::CloseMenu,
        fragment => NavEvent::FragmentChanged(fragment.to_owned()),
    }
}

/// Forward stdin lines to the navigation stream until EOF.
fn forward_stdin(tx: &NavigationEventSender) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if !tx.send(parse_line(&line)) {
            break;
        }
    }
}

impl NavigateArgs {
    /// Execute the navigate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the site map cannot be loaded.
    /// Document load failures are reported as a failed state instead.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;
        let site = create_site(&config);
        let site_map = Arc::new(load_site_map(&config, &site)?);

        let (tx, rx) = navigation_channel();
        let state = site.reload(&site_map);
        match state.error() {
            None => tx.send(NavEvent::Loaded),
            Some(error) => {
                output.error(&format!("Load failed: {error}"));
                tx.send(NavEvent::LoadFailed(error.to_string()))
            }
        };

        thread::spawn(move || forward_stdin(&tx));

        let mut navigator = Navigator::new(site_map, site.config());
        let show_menu = self.menu;
        navigator.run(&rx, |navigator, effect| match effect {
            Effect::SetTitle(title) => {
                output.highlight(title);
                if show_menu {
                    for item in navigator.nav_items() {
                        let marker = if item.active { "*" } else { " " };
                        output.note(&format!("  {marker} {} ({})", item.name, item.href));
                    }
                }
            }
            Effect::SetFragment(fragment) => output.note(&format!("Redirected to #{fragment}")),
        });

        output.separator();
        let final_state = navigator.state();
        output.info(&format!(
            "Menu {}",
            if final_state.menu_open { "open" } else { "closed" }
        ));
        Ok(())
    }
}
