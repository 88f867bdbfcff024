//! A single materialized event instance generated from a series rule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rule::{EventPayload, SeriesId};

/// One concrete, dated instance of a recurring series.
///
/// The payload is a snapshot taken at expansion time, not a live reference
/// to the rule: editing a rule later never rewrites occurrences that have
/// already passed (see the replacement contract in [`crate::store`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Back-reference to the originating series, used for lookup and
    /// deletion only.
    pub series_id: SeriesId,
    /// The concrete calendar date; always satisfies the rule's weekday
    /// (and, for monthly rules, index) constraints.
    pub date: NaiveDate,
    /// Event fields copied from the rule at generation time.
    pub payload: EventPayload,
}
