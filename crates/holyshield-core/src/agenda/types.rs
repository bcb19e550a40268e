use serde::{Deserialize, Serialize};

/// A field authored either as a single value or as a list.
///
/// Speaker names, affiliations and avatars accept both shapes in the site
/// data; consumers only ever see the slice view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// One scheduled slot of the timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    /// Wall-clock start, "HH:MM".
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit presenter override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<OneOrMany<String>>,
    /// Absent means the slot is common to every track.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<bool>,
    /// Forces a single full-width cell even when a track is set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub span_tracks: bool,
}

impl AgendaItem {
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            ..Self::default()
        }
    }

    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_speaker(mut self, speaker: impl Into<OneOrMany<String>>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: bool) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn spanning_tracks(mut self) -> Self {
        self.span_tracks = true;
        self
    }
}

/// A presenter entry in the site data. May describe co-presenters, in which
/// case `company`, `title` and `image` line up with `name` by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: OneOrMany<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<OneOrMany<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl SpeakerRecord {
    pub fn new(name: impl Into<OneOrMany<String>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_slot(mut self, time: impl Into<String>, track: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self.track = Some(track.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<OneOrMany<String>>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<OneOrMany<String>>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_bounds(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    /// Non-blank presenter names, trimmed.
    pub fn names(&self) -> Vec<&str> {
        self.name
            .as_slice()
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// One presenter of a normalized session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presenter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Display-ready session, one per [`AgendaItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSession {
    pub time: String,
    pub title: String,
    pub track: String,
    pub placeholder: bool,
    pub speakers: Vec<Presenter>,
    pub slug: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub span_tracks: bool,
    /// The matched speaker's own time, else the agenda slot time.
    pub session_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NormalizedSession {
    pub fn primary_speaker(&self) -> Option<&Presenter> {
        self.speakers.first()
    }

    /// Whether this session takes the whole row instead of one track column.
    pub fn spans_all_tracks(&self, common_track: &str) -> bool {
        self.span_tracks || self.track == common_track
    }

    /// Comma-joined presenter names, the way cards print them.
    pub fn speaker_line(&self) -> String {
        self.speakers
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
