//! Conference agenda.
//!
//! This module provides:
//! - Input records for the timetable and speaker roster
//! - Normalization of both into one display-ready session per slot
//! - The time x track schedule grid, including merged and spanned cells
//! - Slug lookup for session detail views

mod clock;
mod grid;
mod lookup;
mod normalize;
mod types;

pub use clock::{minutes_between, parse_clock};
pub use grid::{
    GridConfig, RenderedRow, RowCells, ScheduleGrid, ScheduleRow, SpanCell, SpanSet, TrackCell,
};
pub use lookup::{
    find_session, find_speaker, session_detail, speaker_slug, speakers_by_track, SessionDetail,
};
pub use normalize::{
    announced_sessions, create_slug, match_speaker, normalize, NormalizeOptions, Normalizer,
    COMMON_TRACK, DEFAULT_DURATION_MINUTES, UNSET_TITLE,
};
pub use types::{AgendaItem, NormalizedSession, OneOrMany, Presenter, SpeakerRecord};
