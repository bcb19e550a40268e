//! Property tests for agenda normalization and grid spanning.

use holyshield_core::agenda::{
    create_slug, find_session, normalize, AgendaItem, GridConfig, ScheduleGrid, SpeakerRecord,
};
use proptest::prelude::*;

fn clock() -> impl Strategy<Value = String> {
    (9u32..17, prop_oneof![Just(0u32), Just(30u32)]).prop_map(|(h, m)| format!("{h:02}:{m:02}"))
}

fn track() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("TECH".to_string())),
        Just(Some("CAREER".to_string())),
    ]
}

fn agenda_item() -> impl Strategy<Value = AgendaItem> {
    (
        clock(),
        track(),
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of("[A-Za-z]{1,8}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(time, track, title, speaker, placeholder)| AgendaItem {
            time,
            track,
            title,
            speaker: speaker.map(Into::into),
            placeholder,
            ..AgendaItem::default()
        })
}

fn speaker_record() -> impl Strategy<Value = SpeakerRecord> {
    (
        "[A-Za-z]{1,8}",
        proptest::option::of(clock()),
        track(),
        proptest::option::of("[A-Za-z ]{1,16}"),
        any::<bool>(),
    )
        .prop_map(|(name, time, track, topic, hour_long)| {
            let mut record = SpeakerRecord::new(name);
            record.time = time.clone();
            record.track = track;
            record.topic = topic;
            if hour_long {
                if let Some(start) = time {
                    let hour: u32 = start[..2].parse().unwrap();
                    record.start_time = Some(start.clone());
                    record.end_time = Some(format!("{:02}{}", hour + 1, &start[2..]));
                }
            }
            record
        })
}

proptest! {
    #[test]
    fn one_session_per_item_in_order(
        items in proptest::collection::vec(agenda_item(), 0..40),
        speakers in proptest::collection::vec(speaker_record(), 0..10),
    ) {
        let sessions = normalize(&items, &speakers);
        prop_assert_eq!(sessions.len(), items.len());
        for (session, item) in sessions.iter().zip(&items) {
            prop_assert_eq!(&session.time, &item.time);
        }
    }

    #[test]
    fn explicit_track_always_wins(
        items in proptest::collection::vec(agenda_item(), 1..20),
        speakers in proptest::collection::vec(speaker_record(), 0..10),
    ) {
        let sessions = normalize(&items, &speakers);
        for (session, item) in sessions.iter().zip(&items) {
            if let Some(track) = &item.track {
                prop_assert_eq!(&session.track, track);
            }
        }
    }

    #[test]
    fn placeholder_only_without_content(
        items in proptest::collection::vec(agenda_item(), 1..20),
    ) {
        // No speakers: a session is a placeholder exactly when the item has
        // no title or speaker text, unless the flag says otherwise.
        let sessions = normalize(&items, &[]);
        for (session, item) in sessions.iter().zip(&items) {
            let has_title = item.title.as_deref().is_some_and(|t| !t.trim().is_empty());
            let has_speaker = item
                .speaker
                .as_ref()
                .is_some_and(|s| s.as_slice().iter().any(|n| !n.trim().is_empty()));
            let expected = item.placeholder.unwrap_or(!has_title && !has_speaker);
            prop_assert_eq!(session.placeholder, expected);
        }
    }

    #[test]
    fn slugs_are_sanitized_and_resolvable(
        items in proptest::collection::vec(agenda_item(), 1..20),
        speakers in proptest::collection::vec(speaker_record(), 0..10),
    ) {
        let first = normalize(&items, &speakers);
        let second = normalize(&items, &speakers);
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(&a.slug, &b.slug);
            prop_assert!(a.slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!a.slug.starts_with('-') && !a.slug.ends_with('-'));
            prop_assert!(!a.slug.contains("--"));
            if !a.slug.is_empty() {
                let found = find_session(&first, &a.slug).unwrap();
                prop_assert_eq!(&found.slug, &a.slug);
            }
        }
    }

    #[test]
    fn create_slug_is_idempotent(value in ".{0,40}") {
        let once = create_slug(&value);
        prop_assert_eq!(create_slug(&once), once.clone());
    }

    #[test]
    fn each_hour_session_hides_at_most_the_next_slot(
        speakers in proptest::collection::vec(speaker_record(), 0..10),
    ) {
        let items: Vec<AgendaItem> = (9..17)
            .flat_map(|h| [0, 30].map(move |m| format!("{h:02}:{m:02}")))
            .flat_map(|t| [
                AgendaItem::new(t.clone()).with_track("TECH"),
                AgendaItem::new(t).with_track("CAREER"),
            ])
            .collect();
        let sessions = normalize(&items, &speakers);
        let grid = ScheduleGrid::build(&sessions, &GridConfig::default());

        let hour_long = sessions
            .iter()
            .filter(|s| s.duration_minutes == 60 && s.time != "16:30")
            .count();
        prop_assert_eq!(grid.span_set.len(), hour_long);

        for cell in grid.span_set.iter() {
            let minutes = holyshield_core::agenda::parse_clock(&cell.time).unwrap();
            let earlier = format!("{:02}:{:02}", (minutes - 30) / 60, (minutes - 30) % 60);
            let above = sessions
                .iter()
                .find(|s| s.time == earlier && s.track == cell.track)
                .unwrap();
            prop_assert_eq!(above.duration_minutes, 60);
        }
    }
}
