//! Site configuration model.
//!
//! One static structure drives the whole site:
//! - Event metadata (name, hero banner)
//! - Countdown target
//! - Conference speakers and agenda
//! - Grid layout (track columns, slot length, labels)
//!
//! Keys are camelCase in both TOML and JSON files. Unknown keys are ignored so
//! content can grow without touching the model.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::SITE_ENV_VAR;
use crate::agenda::{
    session_detail, AgendaItem, GridConfig, NormalizeOptions, NormalizedSession, Normalizer,
    ScheduleGrid, SessionDetail, SpeakerRecord, COMMON_TRACK, DEFAULT_DURATION_MINUTES,
    UNSET_TITLE,
};
use crate::countdown::Countdown;
use crate::error::{ConfigError, Result};

const BUNDLED_SITE: &str = include_str!("../../data/site.toml");

/// Hero banner content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    pub title: String,
    pub description: String,
    pub event_period: String,
    pub venue: String,
    pub banner_image: String,
}

/// Countdown section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_countdown_label")]
    pub label: String,
    #[serde(rename = "targetISO", alias = "targetIso")]
    pub target_iso: String,
}

/// A call-to-action link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkButton {
    pub label: String,
    pub href: String,
}

/// The timetable, either one flat list or an ordered set of days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Agenda {
    Flat(Vec<AgendaItem>),
    Days(#[serde(deserialize_with = "day_lists")] IndexMap<String, Vec<AgendaItem>>),
}

/// Day lists keyed by name; entries that are not lists (notes, labels) are
/// skipped.
fn day_lists<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, Vec<AgendaItem>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = IndexMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let mut days = IndexMap::with_capacity(raw.len());
    for (day, value) in raw {
        if !value.is_array() {
            debug!(day = %day, "skipping non-list agenda entry");
            continue;
        }
        let items = serde_json::from_value(value)
            .map_err(|e| D::Error::custom(format!("agenda.{day}: {e}")))?;
        days.insert(day, items);
    }
    Ok(days)
}

impl Default for Agenda {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl Agenda {
    /// Every agenda item, days concatenated in their authored order.
    pub fn items(&self) -> Vec<AgendaItem> {
        match self {
            Self::Flat(items) => items.clone(),
            Self::Days(days) => days.values().flatten().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flat(items) => items.len(),
            Self::Days(days) => days.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Conference section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConferenceConfig {
    pub page_title: String,
    pub intro_title: String,
    pub speakers: Vec<SpeakerRecord>,
    pub agenda: Agenda,
    pub registration_buttons: Vec<LinkButton>,
}

/// Grid layout and normalization labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    #[serde(default = "default_track_order")]
    pub track_order: Vec<String>,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    #[serde(default = "default_common_track")]
    pub common_track: String,
    #[serde(default = "default_unset_title")]
    pub unset_title: String,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            track_order: default_track_order(),
            slot_minutes: default_slot_minutes(),
            default_duration_minutes: default_duration_minutes(),
            common_track: default_common_track(),
            unset_title: default_unset_title(),
        }
    }
}

impl GridSettings {
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            track_order: self.track_order.clone(),
            slot_minutes: self.slot_minutes,
            common_track: self.common_track.clone(),
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            common_track: self.common_track.clone(),
            unset_title: self.unset_title.clone(),
            default_duration_minutes: self.default_duration_minutes,
        }
    }
}

/// Site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hero: Option<HeroConfig>,
    #[serde(default)]
    pub countdown: Option<CountdownConfig>,
    #[serde(default)]
    pub conference: ConferenceConfig,
    #[serde(default)]
    pub grid: GridSettings,
}

// Default functions
fn default_site_name() -> String {
    "HolyShield".into()
}
fn default_countdown_label() -> String {
    "D-DAY".into()
}
fn default_track_order() -> Vec<String> {
    vec!["TECH".into(), "CAREER".into()]
}
fn default_slot_minutes() -> u32 {
    30
}
fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}
fn default_common_track() -> String {
    COMMON_TRACK.into()
}
fn default_unset_title() -> String {
    UNSET_TITLE.into()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            description: String::new(),
            hero: None,
            countdown: None,
            conference: ConferenceConfig::default(),
            grid: GridSettings::default(),
        }
    }
}

impl SiteConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match current {
                serde_json::Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                other => other.get(part)?,
            };
        }
        Some(current)
    }

    /// Parse TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML for this model or
    /// fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: SiteConfig = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse JSON content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid JSON for this model or
    /// fails validation.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: SiteConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has another extension,
    /// or does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg = parse(&content)?;
        debug!(
            path = %path.display(),
            speakers = cfg.conference.speakers.len(),
            agenda = cfg.conference.agenda.len(),
            "loaded site config"
        );
        Ok(cfg)
    }

    /// The default HolyShield site compiled into the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled file itself is broken.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_SITE)
    }

    /// Explicit path, else the file named by `HOLYSHIELD_SITE`, else the
    /// bundled site.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let chosen: Option<PathBuf> = path.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(SITE_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        });

        match chosen {
            Some(path) => {
                info!(path = %path.display(), "using site config file");
                Self::load(&path)
            }
            None => {
                info!("using bundled site config");
                Self::bundled()
            }
        }
    }

    /// Reject values the grid cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.slot_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid.slotMinutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.grid.track_order.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "grid.trackOrder".into(),
                message: "at least one track column is required".into(),
            });
        }
        if self.grid.default_duration_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "grid.defaultDurationMinutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key. Array elements are
    /// addressed by index, e.g. `conference.speakers.0.name`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.grid.normalize_options())
    }

    /// Normalized sessions for the whole agenda, recomputed on every call.
    pub fn sessions(&self) -> Vec<NormalizedSession> {
        self.normalizer()
            .normalize(&self.conference.agenda.items(), &self.conference.speakers)
    }

    pub fn schedule_grid(&self) -> ScheduleGrid {
        ScheduleGrid::build(&self.sessions(), &self.grid.grid_config())
    }

    /// Detail view of the session addressed by `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Lookup`] when no session has that slug.
    pub fn session_detail(&self, slug: &str) -> Result<SessionDetail> {
        let detail = session_detail(&self.sessions(), slug)?;
        Ok(detail)
    }

    /// The configured countdown, if the site has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the target timestamp does not parse.
    pub fn countdown(&self) -> Result<Option<Countdown>, ConfigError> {
        self.countdown
            .as_ref()
            .map(|c| Countdown::parse(c.label.clone(), &c.target_iso))
            .transpose()
    }
}
