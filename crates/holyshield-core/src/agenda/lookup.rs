//! Slug addressing for session detail views and the speaker roster.

use indexmap::IndexMap;
use serde::Serialize;

use super::normalize::create_slug;
use super::types::{NormalizedSession, Presenter, SpeakerRecord};
use crate::error::LookupError;

/// Find the session addressed by `slug`.
///
/// The requested slug is sanitized the same way slugs are derived, so
/// `Kim-Hacker` and `kim-hacker` address the same session. When several
/// sessions share a slug the first one in agenda order wins.
pub fn find_session<'a>(
    sessions: &'a [NormalizedSession],
    slug: &str,
) -> Result<&'a NormalizedSession, LookupError> {
    let wanted = create_slug(slug);
    sessions
        .iter()
        .find(|session| !wanted.is_empty() && session.slug == wanted)
        .ok_or_else(|| LookupError::SessionNotFound {
            slug: slug.to_string(),
        })
}

/// Slug addressing a speaker: the explicit id, else the primary name.
pub fn speaker_slug(speaker: &SpeakerRecord) -> String {
    let source = speaker
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| speaker.names().first().copied())
        .unwrap_or_default();
    create_slug(source)
}

pub fn find_speaker<'a>(
    speakers: &'a [SpeakerRecord],
    slug: &str,
) -> Result<&'a SpeakerRecord, LookupError> {
    let wanted = create_slug(slug);
    speakers
        .iter()
        .find(|speaker| !wanted.is_empty() && speaker_slug(speaker) == wanted)
        .ok_or_else(|| LookupError::SpeakerNotFound {
            slug: slug.to_string(),
        })
}

/// Speaker roster split per configured track, in roster order. Speakers on
/// other tracks, or without one, are not listed.
pub fn speakers_by_track<'a>(
    speakers: &'a [SpeakerRecord],
    track_order: &[String],
) -> IndexMap<String, Vec<&'a SpeakerRecord>> {
    track_order
        .iter()
        .map(|track| {
            let members = speakers
                .iter()
                .filter(|speaker| speaker.track.as_deref().map(str::trim) == Some(track.as_str()))
                .collect();
            (track.clone(), members)
        })
        .collect()
}

/// Everything the session detail view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    pub slug: String,
    pub time: String,
    pub track: String,
    pub title: String,
    pub presenters: Vec<Presenter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub paragraphs: Vec<String>,
    pub duration_minutes: u32,
}

impl From<&NormalizedSession> for SessionDetail {
    fn from(session: &NormalizedSession) -> Self {
        Self {
            slug: session.slug.clone(),
            time: session.session_time.clone(),
            track: session.track.clone(),
            title: session.title.clone(),
            presenters: session.speakers.clone(),
            bio: session.bio.clone(),
            paragraphs: session.body.clone(),
            duration_minutes: session.duration_minutes,
        }
    }
}

/// Resolve `slug` straight to its detail view.
pub fn session_detail(
    sessions: &[NormalizedSession],
    slug: &str,
) -> Result<SessionDetail, LookupError> {
    find_session(sessions, slug).map(SessionDetail::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{normalize, AgendaItem};

    fn program() -> (Vec<AgendaItem>, Vec<SpeakerRecord>) {
        let items = vec![
            AgendaItem::new("10:00").with_track("TECH"),
            AgendaItem::new("10:00").with_track("CAREER"),
            AgendaItem::new("13:00").with_title("점심시간"),
        ];
        let mut kim = SpeakerRecord::new("Kim")
            .with_id("kim-hacker")
            .with_slot("10:00", "TECH")
            .with_topic("Fuzzing the kernel");
        kim.bio = Some("Researcher".into());
        kim.body = vec!["First".into(), "Second".into()];
        let lee = SpeakerRecord::new("Lee Park")
            .with_slot("10:00", "CAREER")
            .with_topic("Careers in security");
        (items, vec![kim, lee])
    }

    #[test]
    fn test_find_session_by_slug() {
        let (items, speakers) = program();
        let sessions = normalize(&items, &speakers);
        let found = find_session(&sessions, "kim-hacker").unwrap();
        assert_eq!(found.title, "Fuzzing the kernel");

        let synthesized = find_session(&sessions, "10-00-career-lee-park").unwrap();
        assert_eq!(synthesized.title, "Careers in security");
    }

    #[test]
    fn test_find_session_sanitizes_request() {
        let (items, speakers) = program();
        let sessions = normalize(&items, &speakers);
        assert!(find_session(&sessions, "Kim-Hacker").is_ok());
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let (items, speakers) = program();
        let sessions = normalize(&items, &speakers);
        assert_eq!(
            find_session(&sessions, "nobody").unwrap_err(),
            LookupError::SessionNotFound {
                slug: "nobody".into()
            }
        );
        assert!(find_session(&sessions, "").is_err());
        assert!(find_session(&sessions, "---").is_err());
    }

    #[test]
    fn test_session_detail_carries_speaker_text() {
        let (items, speakers) = program();
        let sessions = normalize(&items, &speakers);
        let detail = session_detail(&sessions, "kim-hacker").unwrap();
        assert_eq!(detail.time, "10:00");
        assert_eq!(detail.presenters[0].name, "Kim");
        assert_eq!(detail.bio.as_deref(), Some("Researcher"));
        assert_eq!(detail.paragraphs, vec!["First", "Second"]);
    }

    #[test]
    fn test_speaker_slug_and_lookup() {
        let (_, speakers) = program();
        assert_eq!(speaker_slug(&speakers[0]), "kim-hacker");
        assert_eq!(speaker_slug(&speakers[1]), "lee-park");
        assert_eq!(find_speaker(&speakers, "lee-park").unwrap().names(), vec!["Lee Park"]);
        assert!(matches!(
            find_speaker(&speakers, "kim"),
            Err(LookupError::SpeakerNotFound { .. })
        ));
    }

    #[test]
    fn test_speakers_by_track() {
        let (_, mut speakers) = program();
        speakers.push(SpeakerRecord::new("Solo"));
        let tracks = vec!["TECH".to_string(), "CAREER".to_string()];
        let roster = speakers_by_track(&speakers, &tracks);
        assert_eq!(roster.keys().collect::<Vec<_>>(), vec!["TECH", "CAREER"]);
        assert_eq!(roster["TECH"].len(), 1);
        assert_eq!(roster["CAREER"][0].names(), vec!["Lee Park"]);
    }
}
