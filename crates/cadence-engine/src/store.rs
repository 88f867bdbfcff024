//! Occurrence persistence boundary and the re-expansion workflow.
//!
//! The engine itself performs no I/O; this module defines the contract a
//! store must honor for series edits to stay consistent, plus an in-memory
//! implementation used by tests and tooling. The single consistency rule:
//! when a series is edited or deleted, occurrences dated today or later are
//! replaced wholesale, and occurrences whose date has elapsed are history
//! and are never touched.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::expander::expand;
use crate::occurrence::Occurrence;
use crate::rule::{SeriesId, SeriesRule};

/// Storage contract for generated occurrences.
///
/// Implementations must apply [`replace_future_occurrences`] as a single
/// atomic unit per series: concurrent re-expansions of the same series must
/// be serialized (lock or transaction keyed on `series_id`) so deletes and
/// inserts cannot interleave.
///
/// [`replace_future_occurrences`]: OccurrenceStore::replace_future_occurrences
pub trait OccurrenceStore {
    /// Delete occurrences of `series_id` with `date >= today`, then insert
    /// `new_occurrences`, as one atomic unit.
    fn replace_future_occurrences(
        &mut self,
        series_id: SeriesId,
        today: NaiveDate,
        new_occurrences: Vec<Occurrence>,
    ) -> Result<()>;

    /// All stored occurrences of a series, ordered by date.
    fn occurrences_for(&self, series_id: SeriesId) -> Result<Vec<Occurrence>>;

    /// Delete the future occurrences of a series, keeping elapsed ones as
    /// history. Used when a series is deleted outright.
    fn remove_series(&mut self, series_id: SeriesId, today: NaiveDate) -> Result<()>;
}

/// Re-expand an edited (or newly created) rule and swap its future
/// occurrences in the store.
///
/// Only occurrences dated `today` or later are inserted, so a rule whose
/// `start_date` lies in the past never duplicates surviving history rows.
/// Returns the number of occurrences written.
///
/// # Errors
/// Propagates any failure from the store; the expansion itself cannot fail.
pub fn reexpand<S: OccurrenceStore + ?Sized>(
    store: &mut S,
    rule: &SeriesRule,
    today: NaiveDate,
    horizon: NaiveDate,
) -> Result<usize> {
    let fresh: Vec<Occurrence> = expand(rule, horizon)
        .into_iter()
        .filter(|occ| occ.date >= today)
        .collect();
    let written = fresh.len();
    store.replace_future_occurrences(rule.series_id(), today, fresh)?;
    Ok(written)
}

/// In-memory occurrence store.
///
/// Atomicity is trivial here: every mutation happens behind `&mut self`,
/// so per-series serialization is enforced by exclusive borrow.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: BTreeMap<SeriesId, Vec<Occurrence>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stored occurrences across all series.
    pub fn len(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.values().all(Vec::is_empty)
    }
}

impl OccurrenceStore for InMemoryStore {
    fn replace_future_occurrences(
        &mut self,
        series_id: SeriesId,
        today: NaiveDate,
        new_occurrences: Vec<Occurrence>,
    ) -> Result<()> {
        let rows = self.rows.entry(series_id).or_default();
        rows.retain(|occ| occ.date < today);
        rows.extend(new_occurrences);
        rows.sort_by_key(|occ| occ.date);
        Ok(())
    }

    fn occurrences_for(&self, series_id: SeriesId) -> Result<Vec<Occurrence>> {
        Ok(self.rows.get(&series_id).cloned().unwrap_or_default())
    }

    fn remove_series(&mut self, series_id: SeriesId, today: NaiveDate) -> Result<()> {
        if let Some(rows) = self.rows.get_mut(&series_id) {
            rows.retain(|occ| occ.date < today);
        }
        Ok(())
    }
}
