//! Series rule model — the immutable recurrence definition a caller builds
//! from user input and hands to the expander.
//!
//! A rule is validated once, at construction. Everything downstream
//! (expansion, the store contract) assumes a structurally sound rule and
//! never re-checks these invariants.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};

/// Recurrence pattern of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// Every Nth week on a fixed weekday.
    Weekly,
    /// The Kth occurrence of a fixed weekday, every Nth month.
    Monthly,
}

/// Identifier of a series. Occurrences carry it as a non-owning
/// back-reference used for lookup and deletion, never for ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(pub u64);

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event fields copied verbatim onto every generated occurrence.
///
/// The expander treats this as opaque: it is snapshotted per occurrence,
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub highlight: bool,
}

/// Raw rule fields as collected from a caller or parsed from JSON.
///
/// This is the wire shape; [`SeriesRule::new`] is the only path from here
/// to a rule the engine will accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleParams {
    pub series_id: SeriesId,
    pub pattern: Pattern,
    /// Every Nth week (Weekly) or every Nth month (Monthly).
    #[serde(default = "default_one")]
    pub interval: u32,
    /// ISO weekday, 1 = Monday through 7 = Sunday.
    pub weekday: u8,
    /// Kth occurrence of `weekday` within an active month. Monthly only;
    /// ignored for Weekly rules.
    #[serde(default = "default_one")]
    pub index_within_interval: u32,
    pub start_date: NaiveDate,
    /// Absent means unbounded; expansion is then cut off by the caller's
    /// horizon (see [`crate::expander::default_horizon`]).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub payload: EventPayload,
}

fn default_one() -> u32 {
    1
}

/// A validated, immutable recurrence definition.
///
/// Constructed only through [`SeriesRule::new`], which enforces every
/// structural invariant; a value of this type is always safe to expand.
/// Edits are modeled as replacement: build a new rule, re-expand, and let
/// the store swap future occurrences (see [`crate::store::reexpand`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleParams", into = "RuleParams")]
pub struct SeriesRule {
    series_id: SeriesId,
    pattern: Pattern,
    interval: u32,
    weekday: Weekday,
    index_within_interval: u32,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    payload: EventPayload,
}

impl SeriesRule {
    /// Validate raw params into a rule.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidRule` when:
    /// - `weekday` is outside 1–7 (ISO numbering)
    /// - `interval` is 0
    /// - the pattern is Monthly and `index_within_interval` is 0
    /// - `end_date` is present and earlier than `start_date`
    pub fn new(params: RuleParams) -> Result<Self> {
        let weekday = weekday_from_iso(params.weekday).ok_or_else(|| {
            CadenceError::InvalidRule(format!(
                "weekday must be 1-7 (ISO, Monday=1), got {}",
                params.weekday
            ))
        })?;

        if params.interval < 1 {
            return Err(CadenceError::InvalidRule(
                "interval must be at least 1".to_string(),
            ));
        }

        if params.pattern == Pattern::Monthly && params.index_within_interval < 1 {
            return Err(CadenceError::InvalidRule(
                "index_within_interval must be at least 1 for monthly rules".to_string(),
            ));
        }

        if let Some(end) = params.end_date {
            if end < params.start_date {
                return Err(CadenceError::InvalidRule(format!(
                    "end_date {} is earlier than start_date {}",
                    end, params.start_date
                )));
            }
        }

        Ok(Self {
            series_id: params.series_id,
            pattern: params.pattern,
            interval: params.interval,
            weekday,
            index_within_interval: params.index_within_interval,
            start_date: params.start_date,
            end_date: params.end_date,
            payload: params.payload,
        })
    }

    pub fn series_id(&self) -> SeriesId {
        self.series_id
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// ISO weekday number, 1 = Monday through 7 = Sunday.
    pub fn iso_weekday(&self) -> u8 {
        self.weekday.number_from_monday() as u8
    }

    pub fn index_within_interval(&self) -> u32 {
        self.index_within_interval
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }
}

impl TryFrom<RuleParams> for SeriesRule {
    type Error = CadenceError;

    fn try_from(params: RuleParams) -> Result<Self> {
        Self::new(params)
    }
}

impl From<SeriesRule> for RuleParams {
    fn from(rule: SeriesRule) -> Self {
        RuleParams {
            series_id: rule.series_id,
            pattern: rule.pattern,
            interval: rule.interval,
            weekday: rule.weekday.number_from_monday() as u8,
            index_within_interval: rule.index_within_interval,
            start_date: rule.start_date,
            end_date: rule.end_date,
            payload: rule.payload,
        }
    }
}

fn weekday_from_iso(n: u8) -> Option<Weekday> {
    match n {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}
