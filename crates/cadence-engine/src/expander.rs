//! Series expansion — converts a recurrence rule into concrete dated
//! occurrences over a bounded horizon.
//!
//! The expansion is a pure function of `(rule, horizon)`: no I/O, no shared
//! state, and every loop strictly advances the candidate date, so it always
//! terminates. Weekly rules walk forward in fixed `interval * 7`-day steps;
//! monthly rules walk an active-month cycle anchored at the month of
//! `start_date` and resolve the Kth weekday within each active month.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};

use crate::occurrence::Occurrence;
use crate::rule::{Pattern, SeriesRule};

/// Default expansion cutoff for a rule.
///
/// `end_date` when the rule is bounded; otherwise one year past
/// `start_date`. Callers that re-run expansion on a schedule should pass
/// their own rolling cutoff to [`expand`] instead.
pub fn default_horizon(rule: &SeriesRule) -> NaiveDate {
    rule.end_date().unwrap_or_else(|| {
        rule.start_date()
            .checked_add_months(Months::new(12))
            .unwrap_or(NaiveDate::MAX)
    })
}

/// Expand a rule into dated occurrences up to and including `horizon`.
///
/// When the rule has an `end_date`, expansion never runs past it even if
/// `horizon` is later. The result is strictly increasing by date, contains
/// no duplicates, and never includes a date before `start_date`. A rule
/// whose `start_date` lies beyond the effective horizon yields an empty
/// sequence — that is not an error.
///
/// # Arguments
/// - `rule` — the validated series definition
/// - `horizon` — latest date (inclusive) to materialize; for unbounded
///   rules see [`default_horizon`]
pub fn expand(rule: &SeriesRule, horizon: NaiveDate) -> Vec<Occurrence> {
    let horizon = match rule.end_date() {
        Some(end) => end.min(horizon),
        None => horizon,
    };

    let dates = match rule.pattern() {
        Pattern::Weekly => weekly_dates(rule.start_date(), rule.weekday(), rule.interval(), horizon),
        Pattern::Monthly => monthly_dates(
            rule.start_date(),
            rule.weekday(),
            rule.index_within_interval(),
            rule.interval(),
            horizon,
        ),
    };

    dates
        .into_iter()
        .map(|date| Occurrence {
            series_id: rule.series_id(),
            date,
            payload: rule.payload().clone(),
        })
        .collect()
}

/// Weekly walk: first matching weekday on or after `start`, then fixed
/// `interval * 7`-day steps until the candidate passes `horizon`.
fn weekly_dates(
    start: NaiveDate,
    weekday: Weekday,
    interval: u32,
    horizon: NaiveDate,
) -> Vec<NaiveDate> {
    let offset = days_until_weekday(start.weekday(), weekday);
    let Some(mut candidate) = start.checked_add_signed(Duration::days(i64::from(offset))) else {
        return Vec::new();
    };

    let step = Duration::days(i64::from(interval) * 7);
    let mut dates = Vec::new();
    while candidate <= horizon {
        dates.push(candidate);
        match candidate.checked_add_signed(step) {
            Some(next) => candidate = next,
            None => break,
        }
    }
    dates
}

/// Monthly walk: visit every `interval`-th month starting from the month
/// containing `start`, and emit that month's Kth matching weekday when it
/// exists and falls within `[start, horizon]`.
fn monthly_dates(
    start: NaiveDate,
    weekday: Weekday,
    index_within_interval: u32,
    interval: u32,
    horizon: NaiveDate,
) -> Vec<NaiveDate> {
    // First active month is the month of `start` itself; stepping by
    // `interval` months keeps (months since anchor) % interval == 0.
    let Some(mut month_start) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return Vec::new();
    };

    let mut dates = Vec::new();
    while month_start <= horizon {
        // A month without a Kth matching weekday (e.g. a 5th Friday in a
        // four-Friday month) contributes nothing and the walk continues.
        if let Some(candidate) = nth_weekday_in_month(month_start, weekday, index_within_interval) {
            if candidate >= start && candidate <= horizon {
                dates.push(candidate);
            }
        }
        match month_start.checked_add_months(Months::new(interval)) {
            Some(next) => month_start = next,
            None => break,
        }
    }
    dates
}

/// Resolve the Nth occurrence of `weekday` within the month that starts at
/// `month_start` (which must be the first day of a month).
///
/// Returns `None` when the month has fewer than `n` such weekdays.
pub fn nth_weekday_in_month(
    month_start: NaiveDate,
    weekday: Weekday,
    n: u32,
) -> Option<NaiveDate> {
    let offset = days_until_weekday(month_start.weekday(), weekday);
    let days = i64::from(offset) + 7 * (i64::from(n) - 1);
    let candidate = month_start.checked_add_signed(Duration::days(days))?;
    (candidate.month() == month_start.month() && candidate.year() == month_start.year())
        .then_some(candidate)
}

/// Days forward (0–6) from `from` to the next `to` weekday.
fn days_until_weekday(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_monday() + 7 - from.num_days_from_monday()) % 7
}
