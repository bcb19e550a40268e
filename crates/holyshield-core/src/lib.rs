//! # HolyShield Core Library
//!
//! This library provides the data core of the HolyShield conference and CTF
//! site. Everything the pages show is derived from one static site
//! configuration; the presentation layer only renders what this crate
//! computes.
//!
//! ## Architecture
//!
//! - **Site config**: TOML/JSON site data, with a bundled default
//! - **Agenda**: normalization of the timetable and speaker roster into
//!   display-ready sessions, plus the time x track schedule grid
//! - **Countdown**: wall-clock remaining time to the event, recomputed by the
//!   caller once per second
//!
//! All derived data is recomputed from the inputs on every call. Nothing is
//! cached, persisted or shared between threads.
//!
//! ## Key Components
//!
//! - [`SiteConfig`]: Site configuration loading
//! - [`Normalizer`]: Agenda item to session normalization
//! - [`ScheduleGrid`]: Grid rows, merged cells and spanned cells
//! - [`find_session`]: Slug lookup for detail views
//! - [`Countdown`]: Remaining time to the event

pub mod agenda;
pub mod countdown;
pub mod error;
pub mod site;

pub use agenda::{
    find_session, normalize, AgendaItem, GridConfig, NormalizedSession, Normalizer,
    ScheduleGrid, SessionDetail, SpeakerRecord,
};
pub use countdown::{Countdown, TimeParts};
pub use error::{ConfigError, CoreError, LookupError};
pub use site::SiteConfig;
