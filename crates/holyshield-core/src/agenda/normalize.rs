//! Agenda normalization.
//!
//! Reshapes the loosely-typed timetable and speaker roster into one
//! [`NormalizedSession`] per agenda item. Every field has a fallback, so the
//! transform never fails.
//!
//! ## Resolution order
//!
//! ```text
//! speaker match : (time, track) -> time only -> exact name list
//! title         : agenda title  -> speaker topic -> unset marker
//! track         : agenda track  -> speaker track -> common track
//! slug          : speaker id    -> agenda session id -> time-track-name
//! ```

use tracing::{debug, warn};

use super::clock::minutes_between;
use super::types::{AgendaItem, NormalizedSession, OneOrMany, Presenter, SpeakerRecord};

/// Track label for sessions shared by every track.
pub const COMMON_TRACK: &str = "공통";
/// Title shown for slots whose content is not announced yet.
pub const UNSET_TITLE: &str = "미정";
/// Session length when the speaker carries no explicit bounds.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Labels and defaults applied while normalizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub common_track: String,
    pub unset_title: String,
    pub default_duration_minutes: u32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            common_track: COMMON_TRACK.to_string(),
            unset_title: UNSET_TITLE.to_string(),
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

/// Maps agenda items onto display-ready sessions.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize every agenda item, preserving input order (1:1).
    pub fn normalize(
        &self,
        items: &[AgendaItem],
        speakers: &[SpeakerRecord],
    ) -> Vec<NormalizedSession> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.normalize_item(index, item, speakers))
            .collect()
    }

    fn normalize_item(
        &self,
        index: usize,
        item: &AgendaItem,
        speakers: &[SpeakerRecord],
    ) -> NormalizedSession {
        let record = match_speaker(item, speakers);
        debug!(
            time = %item.time,
            track = ?item.track,
            matched = ?record.and_then(|r| r.id.as_deref().or(r.name.first().map(String::as_str))),
            "resolved agenda item"
        );

        let item_names = agenda_names(item);
        let explicit_title = non_blank(item.title.as_deref());

        let track = non_blank(item.track.as_deref())
            .or_else(|| record.and_then(|r| non_blank(r.track.as_deref())))
            .unwrap_or(self.options.common_track.as_str())
            .to_string();

        let title = explicit_title
            .or_else(|| record.and_then(|r| non_blank(r.topic.as_deref())))
            .unwrap_or(self.options.unset_title.as_str())
            .to_string();

        let has_explicit_content = explicit_title.is_some() || !item_names.is_empty();
        let placeholder = item
            .placeholder
            .unwrap_or(!has_explicit_content && record.is_none());

        // Positions stay aligned with the raw lists; blanks are dropped later.
        let names = match item.speaker.as_ref().filter(|_| !item_names.is_empty()) {
            Some(list) => trimmed(list),
            None => record.map(|r| trimmed(&r.name)).unwrap_or_default(),
        };
        let presenters = build_presenters(&names, record);

        let slug_source = record
            .and_then(|r| non_blank(r.id.as_deref()))
            .or_else(|| non_blank(item.session_id.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let tail = presenters
                    .first()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| index.to_string());
                format!("{}-{}-{}", item.time, track, tail)
            });

        let duration_minutes = record
            .map(|r| speaker_duration(r, self.options.default_duration_minutes))
            .unwrap_or(self.options.default_duration_minutes);

        let session_time = record
            .and_then(|r| non_blank(r.time.as_deref()))
            .unwrap_or(item.time.as_str())
            .to_string();

        NormalizedSession {
            time: item.time.clone(),
            title,
            track,
            placeholder,
            speakers: presenters,
            slug: create_slug(&slug_source),
            duration_minutes,
            session_id: item.session_id.clone(),
            span_tracks: item.span_tracks,
            session_time,
            bio: record.and_then(|r| r.bio.clone()),
            body: record.map(|r| r.body.clone()).unwrap_or_default(),
            tags: record.map(|r| r.tags.clone()).unwrap_or_default(),
        }
    }
}

/// Normalize with the default labels and 30-minute default duration.
pub fn normalize(items: &[AgendaItem], speakers: &[SpeakerRecord]) -> Vec<NormalizedSession> {
    Normalizer::default().normalize(items, speakers)
}

/// First speaker matching the agenda item.
///
/// A speaker matches by time plus track when the item names a track, by time
/// alone otherwise. Failing that, a speaker whose name list equals the item's
/// explicit speaker list matches.
pub fn match_speaker<'a>(
    item: &AgendaItem,
    speakers: &'a [SpeakerRecord],
) -> Option<&'a SpeakerRecord> {
    let item_track = non_blank(item.track.as_deref());

    let by_time = speakers.iter().find(|speaker| {
        speaker.time.as_deref() == Some(item.time.as_str())
            && match item_track {
                Some(track) => non_blank(speaker.track.as_deref()) == Some(track),
                None => true,
            }
    });
    if by_time.is_some() {
        return by_time;
    }

    let names = agenda_names(item);
    if names.is_empty() {
        return None;
    }
    speakers.iter().find(|speaker| speaker.names() == names)
}

/// Lower-case, collapse every run outside `[a-z0-9]` into one `-`, and strip
/// dashes at both ends.
pub fn create_slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Sessions with announced content, in agenda order. This is the flat list the
/// narrow layout shows instead of the grid.
pub fn announced_sessions(sessions: &[NormalizedSession]) -> Vec<&NormalizedSession> {
    sessions.iter().filter(|s| !s.placeholder).collect()
}

fn speaker_duration(record: &SpeakerRecord, default: u32) -> u32 {
    let (Some(start), Some(end)) = (record.start_time.as_deref(), record.end_time.as_deref())
    else {
        return default;
    };

    match minutes_between(start, end) {
        Some(minutes) => minutes,
        None => {
            warn!(start, end, "ignoring unusable session bounds");
            default
        }
    }
}

fn build_presenters(names: &[&str], record: Option<&SpeakerRecord>) -> Vec<Presenter> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(position, name)| Presenter {
            name: name.to_string(),
            company: aligned(record.and_then(|r| r.company.as_ref()), position),
            title: aligned(record.and_then(|r| r.title.as_ref()), position),
            image: aligned(record.and_then(|r| r.image.as_ref()), position),
        })
        .collect()
}

/// Value at `position`, or the first value when the list is shorter.
fn aligned(values: Option<&OneOrMany<String>>, position: usize) -> Option<String> {
    let values = values?.as_slice();
    values
        .get(position)
        .or_else(|| values.first())
        .and_then(|value| non_blank(Some(value)))
        .map(str::to_string)
}

fn trimmed(values: &OneOrMany<String>) -> Vec<&str> {
    values.as_slice().iter().map(|value| value.trim()).collect()
}

fn agenda_names(item: &AgendaItem) -> Vec<&str> {
    item.speaker
        .as_ref()
        .map(|names| {
            trimmed(names)
                .into_iter()
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
