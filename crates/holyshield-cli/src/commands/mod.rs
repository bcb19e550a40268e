pub mod agenda;
pub mod completions;
pub mod config;
pub mod countdown;
pub mod grid;
pub mod session;
pub mod speakers;

use std::path::Path;

use holyshield_core::SiteConfig;

/// Site config for this invocation: `--config`, else `$HOLYSHIELD_SITE`, else
/// the bundled site.
pub fn load_site(path: Option<&Path>) -> Result<SiteConfig, Box<dyn std::error::Error>> {
    Ok(SiteConfig::resolve(path)?)
}
