//! # cadence-engine
//!
//! Deterministic expansion of recurring-event series into concrete dated
//! occurrences.
//!
//! A series is described by a single immutable [`SeriesRule`] — weekly
//! ("every Nth week on a weekday") or monthly ("the Kth weekday of every
//! Nth month") — and [`expand`] materializes it over a bounded horizon,
//! handling month and year rollover, leap years, interval skipping, and
//! months that lack the requested Kth weekday. Edits are modeled as
//! replacement: discard future occurrences, re-expand, persist (see
//! [`store::reexpand`]).
//!
//! ## Modules
//!
//! - [`rule`] — `SeriesRule` model and construction-time validation
//! - [`expander`] — rule → ordered list of dated occurrences
//! - [`occurrence`] — the materialized event instance
//! - [`store`] — persistence boundary and the replace-future contract
//! - [`notify`] — announcement boundary for new occurrences
//! - [`error`] — error types

pub mod error;
pub mod expander;
pub mod notify;
pub mod occurrence;
pub mod rule;
pub mod store;

pub use error::CadenceError;
pub use expander::{default_horizon, expand, nth_weekday_in_month};
pub use notify::{Notifier, NullNotifier};
pub use occurrence::Occurrence;
pub use rule::{EventPayload, Pattern, RuleParams, SeriesId, SeriesRule};
pub use store::{reexpand, InMemoryStore, OccurrenceStore};
