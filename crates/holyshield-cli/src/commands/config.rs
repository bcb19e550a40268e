use std::path::Path;

use clap::Subcommand;

use super::load_site;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value (e.g. "grid.slotMinutes", "conference.speakers.0.name")
    Get {
        /// Dot-separated config key
        key: String,
    },
    /// Print the resolved site config as JSON
    Show,
    /// Check that the site config loads
    Check,
}

pub fn run(action: ConfigAction, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let site = load_site(config)?;

    match action {
        ConfigAction::Get { key } => match site.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&site)?);
        }
        ConfigAction::Check => {
            site.countdown()?;
            println!(
                "ok: {} speakers, {} agenda items",
                site.conference.speakers.len(),
                site.conference.agenda.len()
            );
        }
    }
    Ok(())
}
