//! Schedule grid layout.
//!
//! Groups normalized sessions into time rows and track columns. A row holding
//! a common (or track-spanning) session collapses into one full-width cell,
//! and a session lasting two slots hides the cell below it in the same track.
//!
//! Only tracks listed in [`GridConfig::track_order`] get a column; sessions on
//! any other track are left out of the grid.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::clock::parse_clock;
use super::normalize::COMMON_TRACK;
use super::types::NormalizedSession;

/// Column layout and row granularity of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub track_order: Vec<String>,
    /// Row height in minutes.
    pub slot_minutes: u32,
    pub common_track: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            track_order: vec!["TECH".to_string(), "CAREER".to_string()],
            slot_minutes: 30,
            common_track: COMMON_TRACK.to_string(),
        }
    }
}

impl GridConfig {
    pub fn with_tracks<I, S>(mut self, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.track_order = tracks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slot_minutes(mut self, minutes: u32) -> Self {
        self.slot_minutes = minutes;
        self
    }

    /// Duration of a session that covers its own row and the next one.
    pub fn double_slot_minutes(&self) -> u32 {
        self.slot_minutes.saturating_mul(2)
    }
}

/// All sessions sharing one start time, keyed by track in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub time: String,
    pub sessions: IndexMap<String, NormalizedSession>,
}

impl ScheduleRow {
    pub fn session(&self, track: &str) -> Option<&NormalizedSession> {
        self.sessions.get(track)
    }

    /// First session in the row that takes the full width, if any.
    pub fn merged_session(&self, common_track: &str) -> Option<&NormalizedSession> {
        self.sessions
            .values()
            .find(|session| session.spans_all_tracks(common_track))
    }
}

/// (time, track) cell covered by a session from the previous row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SpanCell {
    pub time: String,
    pub track: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpanSet(BTreeSet<SpanCell>);

impl SpanSet {
    pub fn contains(&self, time: &str, track: &str) -> bool {
        self.0.contains(&SpanCell {
            time: time.to_string(),
            track: track.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpanCell> {
        self.0.iter()
    }

    fn insert(&mut self, time: &str, track: &str) {
        self.0.insert(SpanCell {
            time: time.to_string(),
            track: track.to_string(),
        });
    }
}

/// Cell of one track column.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", content = "session", rename_all = "lowercase")]
pub enum TrackCell<'a> {
    Session(&'a NormalizedSession),
    /// Nothing announced: absent session or placeholder.
    Empty,
    /// Covered by the previous row's session; render nothing.
    Spanned,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "cells", rename_all = "lowercase")]
pub enum RowCells<'a> {
    /// One cell across every track.
    Merged(&'a NormalizedSession),
    Tracks(Vec<TrackCell<'a>>),
}

/// A grid row ready for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow<'a> {
    pub time: &'a str,
    /// Common lunch row, drawn shorter than session rows.
    pub break_row: bool,
    pub cells: RowCells<'a>,
}

impl RenderedRow<'_> {
    /// True when no track cell carries an announced session.
    pub fn is_empty(&self) -> bool {
        match &self.cells {
            RowCells::Merged(_) => false,
            RowCells::Tracks(cells) => cells
                .iter()
                .all(|cell| !matches!(cell, TrackCell::Session(_))),
        }
    }
}

/// Time x track matrix built from normalized sessions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGrid {
    pub rows: Vec<ScheduleRow>,
    pub track_order: Vec<String>,
    pub span_set: SpanSet,
    #[serde(skip)]
    common_track: String,
}

impl ScheduleGrid {
    /// Build the grid. Rows keep the first-seen order of each time; a repeated
    /// (time, track) pair overwrites the earlier session.
    pub fn build(sessions: &[NormalizedSession], config: &GridConfig) -> Self {
        let mut rows: Vec<ScheduleRow> = Vec::new();
        let mut row_index: HashMap<&str, usize> = HashMap::new();

        for session in sessions {
            match row_index.get(session.time.as_str()) {
                Some(&index) => {
                    rows[index]
                        .sessions
                        .insert(session.track.clone(), session.clone());
                }
                None => {
                    row_index.insert(session.time.as_str(), rows.len());
                    let mut row_sessions = IndexMap::new();
                    row_sessions.insert(session.track.clone(), session.clone());
                    rows.push(ScheduleRow {
                        time: session.time.clone(),
                        sessions: row_sessions,
                    });
                }
            }
        }

        let span_set = compute_spans(&rows, config);
        debug!(
            rows = rows.len(),
            spanned = span_set.len(),
            "built schedule grid"
        );

        Self {
            rows,
            track_order: config.track_order.clone(),
            span_set,
            common_track: config.common_track.clone(),
        }
    }

    pub fn is_spanned(&self, time: &str, track: &str) -> bool {
        self.span_set.contains(time, track)
    }

    /// Whether any session in the grid is announced. The page dims the whole
    /// grid otherwise.
    pub fn has_announced_sessions(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|row| row.sessions.values())
            .any(|session| !session.placeholder)
    }

    /// Whether every track cell of `row` is absent, a placeholder or spanned.
    pub fn is_row_empty(&self, row: &ScheduleRow) -> bool {
        if row.merged_session(&self.common_track).is_some() {
            return false;
        }
        self.track_order.iter().all(|track| {
            self.is_spanned(&row.time, track)
                || row.session(track).map_or(true, |s| s.placeholder)
        })
    }

    /// Cells for every row, in row order.
    pub fn render(&self) -> Vec<RenderedRow<'_>> {
        self.rows.iter().map(|row| self.render_row(row)).collect()
    }

    fn render_row<'a>(&'a self, row: &'a ScheduleRow) -> RenderedRow<'a> {
        if let Some(merged) = row.merged_session(&self.common_track) {
            return RenderedRow {
                time: &row.time,
                break_row: is_break_title(&merged.title),
                cells: RowCells::Merged(merged),
            };
        }

        let cells = self
            .track_order
            .iter()
            .map(|track| {
                if self.is_spanned(&row.time, track) {
                    return TrackCell::Spanned;
                }
                match row.session(track) {
                    Some(session) if !session.placeholder => TrackCell::Session(session),
                    _ => TrackCell::Empty,
                }
            })
            .collect();

        RenderedRow {
            time: &row.time,
            break_row: false,
            cells: RowCells::Tracks(cells),
        }
    }
}

/// Cells covered by double-slot sessions of the row exactly one slot earlier.
/// Merged rows are never covered; the longer session is cut at their start.
fn compute_spans(rows: &[ScheduleRow], config: &GridConfig) -> SpanSet {
    let mut spans = SpanSet::default();
    if config.slot_minutes == 0 {
        return spans;
    }

    let mut by_start: HashMap<u32, &ScheduleRow> = HashMap::new();
    for row in rows {
        if let Some(start) = parse_clock(&row.time) {
            by_start.entry(start).or_insert(row);
        }
    }

    let double = config.double_slot_minutes();
    for row in rows {
        // A full-width row is never covered by the slot above it.
        if row.merged_session(&config.common_track).is_some() {
            continue;
        }
        let Some(start) = parse_clock(&row.time) else {
            continue;
        };
        let Some(previous) = start
            .checked_sub(config.slot_minutes)
            .and_then(|earlier| by_start.get(&earlier))
        else {
            continue;
        };

        if let Some(merged) = previous.merged_session(&config.common_track) {
            if merged.duration_minutes == double {
                for track in &config.track_order {
                    spans.insert(&row.time, track);
                }
            }
            continue;
        }

        for track in &config.track_order {
            let covers = previous
                .session(track)
                .is_some_and(|session| session.duration_minutes == double);
            if covers {
                spans.insert(&row.time, track);
            }
        }
    }

    spans
}

fn is_break_title(title: &str) -> bool {
    title.contains("점심") || title.to_lowercase().contains("lunch")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::{normalize, AgendaItem, SpeakerRecord};

    fn tech_and_career(times: &[&str]) -> Vec<AgendaItem> {
        times
            .iter()
            .flat_map(|time| {
                [
                    AgendaItem::new(*time).with_track("TECH"),
                    AgendaItem::new(*time).with_track("CAREER"),
                ]
            })
            .collect()
    }

    #[test]
    fn test_rows_follow_first_seen_time_order() {
        let items = vec![
            AgendaItem::new("10:00").with_track("TECH"),
            AgendaItem::new("09:30").with_track("TECH"),
            AgendaItem::new("10:00").with_track("CAREER"),
        ];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        let times: Vec<&str> = grid.rows.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, vec!["10:00", "09:30"]);
        assert_eq!(grid.rows[0].sessions.len(), 2);
    }

    #[test]
    fn test_duplicate_time_and_track_last_write_wins() {
        let items = vec![
            AgendaItem::new("10:00").with_track("TECH").with_title("first"),
            AgendaItem::new("10:00").with_track("TECH").with_title("second"),
        ];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].session("TECH").unwrap().title, "second");
    }

    #[test]
    fn test_common_row_renders_merged() {
        let items = vec![AgendaItem::new("13:00").with_title("점심시간")];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        let rendered = grid.render();
        assert!(rendered[0].break_row);
        match &rendered[0].cells {
            RowCells::Merged(session) => assert_eq!(session.title, "점심시간"),
            other => panic!("expected merged row, got {other:?}"),
        }
    }

    #[test]
    fn test_span_tracks_flag_merges_tracked_session() {
        let items = vec![AgendaItem::new("09:00")
            .with_track("TECH")
            .with_title("Keynote")
            .spanning_tracks()];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        let rendered = grid.render();
        assert!(!rendered[0].break_row);
        assert!(matches!(rendered[0].cells, RowCells::Merged(_)));
    }

    #[test]
    fn test_hour_session_spans_next_slot_in_same_track() {
        let items = tech_and_career(&["10:00", "10:30", "11:00"]);
        let speakers = vec![SpeakerRecord::new("A")
            .with_slot("10:00", "TECH")
            .with_topic("Long talk")
            .with_bounds("10:00", "11:00")];
        let grid = ScheduleGrid::build(&normalize(&items, &speakers), &GridConfig::default());

        assert_eq!(grid.span_set.len(), 1);
        assert!(grid.is_spanned("10:30", "TECH"));
        assert!(!grid.is_spanned("10:30", "CAREER"));
        assert!(!grid.is_spanned("11:00", "TECH"));

        let rendered = grid.render();
        match &rendered[1].cells {
            RowCells::Tracks(cells) => {
                assert!(matches!(cells[0], TrackCell::Spanned));
                assert!(matches!(cells[1], TrackCell::Empty));
            }
            other => panic!("expected track cells, got {other:?}"),
        }
    }

    #[test]
    fn test_half_hour_session_spans_nothing() {
        let items = tech_and_career(&["10:00", "10:30"]);
        let speakers = vec![SpeakerRecord::new("A")
            .with_slot("10:00", "TECH")
            .with_bounds("10:00", "10:30")];
        let grid = ScheduleGrid::build(&normalize(&items, &speakers), &GridConfig::default());
        assert!(grid.span_set.is_empty());
    }

    #[test]
    fn test_span_requires_adjacent_slot() {
        // 10:30 is missing, so the 11:00 row is two slots away.
        let items = tech_and_career(&["10:00", "11:00"]);
        let speakers = vec![SpeakerRecord::new("A")
            .with_slot("10:00", "TECH")
            .with_bounds("10:00", "11:00")];
        let grid = ScheduleGrid::build(&normalize(&items, &speakers), &GridConfig::default());
        assert!(grid.span_set.is_empty());
    }

    #[test]
    fn test_merged_hour_session_spans_every_track() {
        let mut items = vec![AgendaItem::new("12:00").with_title("Panel")];
        items.extend(tech_and_career(&["12:30"]));
        let speakers = vec![SpeakerRecord::new("Panelists")
            .with_slot("12:00", "")
            .with_bounds("12:00", "13:00")];
        let sessions = normalize(&items, &speakers);
        assert_eq!(sessions[0].track, "공통");
        assert_eq!(sessions[0].duration_minutes, 60);

        let grid = ScheduleGrid::build(&sessions, &GridConfig::default());
        assert!(grid.is_spanned("12:30", "TECH"));
        assert!(grid.is_spanned("12:30", "CAREER"));
    }

    #[test]
    fn test_hour_session_does_not_cover_merged_row() {
        let items = vec![
            AgendaItem::new("12:30").with_track("TECH"),
            AgendaItem::new("12:30").with_track("CAREER"),
            AgendaItem::new("13:00").with_title("점심시간"),
        ];
        let speakers = vec![SpeakerRecord::new("A")
            .with_slot("12:30", "TECH")
            .with_topic("Runs into lunch")
            .with_bounds("12:30", "13:30")];
        let grid = ScheduleGrid::build(&normalize(&items, &speakers), &GridConfig::default());

        assert!(grid.span_set.is_empty());
        assert!(!grid.is_spanned("13:00", "TECH"));
        let rendered = grid.render();
        assert!(rendered[1].break_row);
        assert!(matches!(rendered[1].cells, RowCells::Merged(s) if s.title == "점심시간"));
    }

    #[test]
    fn test_empty_row_detection() {
        let mut items = tech_and_career(&["09:00", "09:30"]);
        items[2] = AgendaItem::new("09:30").with_track("TECH").with_title("Talk");
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        let rendered = grid.render();
        assert!(grid.is_row_empty(&grid.rows[0]));
        assert!(rendered[0].is_empty());
        assert!(!grid.is_row_empty(&grid.rows[1]));
        assert!(!rendered[1].is_empty());
        assert!(grid.has_announced_sessions());
    }

    #[test]
    fn test_spanned_cells_count_as_empty() {
        let items = vec![
            AgendaItem::new("10:00").with_track("TECH"),
            AgendaItem::new("10:30").with_track("TECH").with_title("Hidden"),
        ];
        let speakers = vec![SpeakerRecord::new("A")
            .with_slot("10:00", "TECH")
            .with_bounds("10:00", "11:00")];
        let config = GridConfig::default().with_tracks(["TECH"]);
        let grid = ScheduleGrid::build(&normalize(&items, &speakers), &config);
        assert!(grid.is_row_empty(&grid.rows[1]));
        assert!(grid.render()[1].is_empty());
    }

    #[test]
    fn test_unknown_track_is_not_rendered() {
        let items = vec![AgendaItem::new("10:00").with_track("WORKSHOP").with_title("Lab")];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        assert_eq!(grid.rows.len(), 1);
        assert!(grid.render()[0].is_empty());
    }

    #[test]
    fn test_all_placeholder_grid_has_no_announced_sessions() {
        let items = tech_and_career(&["09:00"]);
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        assert!(!grid.has_announced_sessions());
    }

    #[test]
    fn test_grid_serializes_cells() {
        let items = vec![AgendaItem::new("13:00").with_title("Lunch")];
        let grid = ScheduleGrid::build(&normalize(&items, &[]), &GridConfig::default());
        let json = serde_json::to_value(grid.render()).unwrap();
        assert_eq!(json[0]["cells"]["kind"], "merged");
        assert_eq!(json[0]["breakRow"], true);
    }
}
