mod config;

pub use config::{
    Agenda, ConferenceConfig, CountdownConfig, GridSettings, HeroConfig, LinkButton, SiteConfig,
};

/// Environment variable naming the site config file to load instead of the
/// bundled one.
pub const SITE_ENV_VAR: &str = "HOLYSHIELD_SITE";
