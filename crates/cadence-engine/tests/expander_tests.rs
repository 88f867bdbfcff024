//! Tests for series expansion — concrete calendar scenarios.
//!
//! Covers the weekly and monthly walks at every boundary that matters:
//! interval skipping, month and year rollover, leap-year February, months
//! without the requested Kth weekday, and horizon clamping.

use cadence_engine::{
    default_horizon, expand, nth_weekday_in_month, EventPayload, Pattern, RuleParams, SeriesId,
    SeriesRule,
};
use chrono::{NaiveDate, Weekday};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(s: &str) -> NaiveDate {
    s.parse().expect("test date must be valid ISO")
}

fn payload() -> EventPayload {
    EventPayload {
        name: "Morning Beatdown".to_string(),
        description: String::new(),
        location: "The Quarry".to_string(),
        event_type: "bootcamp".to_string(),
        tag: None,
        highlight: false,
    }
}

fn weekly(weekday: u8, interval: u32, start: &str, end: Option<&str>) -> SeriesRule {
    SeriesRule::new(RuleParams {
        series_id: SeriesId(1),
        pattern: Pattern::Weekly,
        interval,
        weekday,
        index_within_interval: 1,
        start_date: date(start),
        end_date: end.map(date),
        payload: payload(),
    })
    .expect("test rule must be valid")
}

fn monthly(weekday: u8, index: u32, interval: u32, start: &str, end: Option<&str>) -> SeriesRule {
    SeriesRule::new(RuleParams {
        series_id: SeriesId(1),
        pattern: Pattern::Monthly,
        interval,
        weekday,
        index_within_interval: index,
        start_date: date(start),
        end_date: end.map(date),
        payload: payload(),
    })
    .expect("test rule must be valid")
}

fn dates(rule: &SeriesRule, horizon: NaiveDate) -> Vec<NaiveDate> {
    expand(rule, horizon).into_iter().map(|o| o.date).collect()
}

// ---------------------------------------------------------------------------
// Weekly pattern
// ---------------------------------------------------------------------------

#[test]
fn weekly_wednesdays_in_january() {
    // Every Wednesday from Mon 2024-01-01 through 2024-01-22.
    let rule = weekly(3, 1, "2024-01-01", Some("2024-01-22"));
    assert_eq!(
        dates(&rule, date("2024-01-22")),
        vec![date("2024-01-03"), date("2024-01-10"), date("2024-01-17")]
    );
}

#[test]
fn biweekly_wednesdays_skip_alternate_weeks() {
    let rule = weekly(3, 2, "2024-01-01", Some("2024-02-01"));
    assert_eq!(
        dates(&rule, date("2024-02-01")),
        vec![date("2024-01-03"), date("2024-01-17"), date("2024-01-31")]
    );
}

#[test]
fn weekly_start_on_matching_weekday_includes_start() {
    // 2024-01-03 is itself a Wednesday.
    let rule = weekly(3, 1, "2024-01-03", Some("2024-01-10"));
    assert_eq!(
        dates(&rule, date("2024-01-10")),
        vec![date("2024-01-03"), date("2024-01-10")]
    );
}

#[test]
fn weekly_crosses_leap_day() {
    // Thursdays around Feb 2024; 2024-02-29 exists and is a Thursday.
    let rule = weekly(4, 1, "2024-02-22", Some("2024-03-07"));
    assert_eq!(
        dates(&rule, date("2024-03-07")),
        vec![date("2024-02-22"), date("2024-02-29"), date("2024-03-07")]
    );
}

#[test]
fn weekly_crosses_year_boundary() {
    let rule = weekly(1, 1, "2024-12-30", Some("2025-01-13"));
    assert_eq!(
        dates(&rule, date("2025-01-13")),
        vec![date("2024-12-30"), date("2025-01-06"), date("2025-01-13")]
    );
}

#[test]
fn weekly_spacing_is_exactly_interval_weeks() {
    let rule = weekly(2, 3, "2024-01-01", Some("2024-06-30"));
    let ds = dates(&rule, date("2024-06-30"));
    assert!(ds.len() > 3);
    for pair in ds.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 21);
    }
}

// ---------------------------------------------------------------------------
// Monthly pattern
// ---------------------------------------------------------------------------

#[test]
fn second_tuesday_of_each_month() {
    let rule = monthly(2, 2, 1, "2024-01-01", Some("2024-03-31"));
    assert_eq!(
        dates(&rule, date("2024-03-31")),
        vec![date("2024-01-09"), date("2024-02-13"), date("2024-03-12")]
    );
}

#[test]
fn fifth_friday_skips_four_friday_months() {
    // March and May 2024 have five Fridays; April has four and yields nothing.
    let rule = monthly(5, 5, 1, "2024-03-01", Some("2024-05-31"));
    assert_eq!(
        dates(&rule, date("2024-05-31")),
        vec![date("2024-03-29"), date("2024-05-31")]
    );
}

#[test]
fn skipped_month_does_not_break_interval_cycle() {
    // Every 2nd month from April 2024: April and June both lack a 5th
    // Friday, August has one. The cycle stays anchored on April.
    let rule = monthly(5, 5, 2, "2024-04-01", Some("2024-08-31"));
    assert_eq!(dates(&rule, date("2024-08-31")), vec![date("2024-08-30")]);
}

#[test]
fn start_after_kth_weekday_skips_opening_month() {
    // 2nd Tuesday of January 2024 is the 9th; starting on the 15th means
    // the first emitted occurrence is February's.
    let rule = monthly(2, 2, 1, "2024-01-15", Some("2024-03-31"));
    assert_eq!(
        dates(&rule, date("2024-03-31")),
        vec![date("2024-02-13"), date("2024-03-12")]
    );
}

#[test]
fn monthly_interval_two_crosses_year_boundary() {
    // 1st Monday of every 2nd month, starting November 2024.
    let rule = monthly(1, 1, 2, "2024-11-01", Some("2025-03-31"));
    assert_eq!(
        dates(&rule, date("2025-03-31")),
        vec![date("2024-11-04"), date("2025-01-06"), date("2025-03-03")]
    );
}

#[test]
fn candidate_beyond_horizon_in_active_month_is_dropped() {
    // March's 4th Friday (2024-03-22) falls after the horizon even though
    // the month itself starts before it.
    let rule = monthly(5, 4, 1, "2024-01-01", None);
    assert_eq!(
        dates(&rule, date("2024-03-15")),
        vec![date("2024-01-26"), date("2024-02-23")]
    );
}

// ---------------------------------------------------------------------------
// Horizon handling
// ---------------------------------------------------------------------------

#[test]
fn horizon_never_runs_past_end_date() {
    let rule = weekly(3, 1, "2024-01-01", Some("2024-01-22"));
    // A generous caller horizon must still stop at the rule's end date.
    assert_eq!(dates(&rule, date("2024-12-31")).len(), 3);
}

#[test]
fn start_beyond_horizon_yields_empty() {
    let rule = weekly(3, 1, "2024-06-01", None);
    assert!(dates(&rule, date("2024-05-01")).is_empty());
}

#[test]
fn default_horizon_is_end_date_when_bounded() {
    let rule = weekly(3, 1, "2024-01-01", Some("2024-01-22"));
    assert_eq!(default_horizon(&rule), date("2024-01-22"));
}

#[test]
fn default_horizon_is_one_year_out_when_unbounded() {
    let rule = weekly(3, 1, "2024-01-01", None);
    assert_eq!(default_horizon(&rule), date("2025-01-01"));
}

#[test]
fn unbounded_weekly_expands_one_year_by_default() {
    let rule = weekly(3, 1, "2024-01-01", None);
    let ds = dates(&rule, default_horizon(&rule));
    assert_eq!(ds.len(), 53);
    assert_eq!(ds.first(), Some(&date("2024-01-03")));
    // The cutoff is inclusive; 2025-01-01 is a Wednesday and lands on it.
    assert_eq!(ds.last(), Some(&date("2025-01-01")));
}

// ---------------------------------------------------------------------------
// Payload propagation
// ---------------------------------------------------------------------------

#[test]
fn occurrences_snapshot_the_rule_payload() {
    let rule = weekly(3, 1, "2024-01-01", Some("2024-01-22"));
    let occurrences = expand(&rule, date("2024-01-22"));
    assert_eq!(occurrences.len(), 3);
    for occ in &occurrences {
        assert_eq!(occ.series_id, SeriesId(1));
        assert_eq!(occ.payload, *rule.payload());
    }
}

// ---------------------------------------------------------------------------
// Kth-weekday helper
// ---------------------------------------------------------------------------

#[test]
fn nth_weekday_resolves_third_tuesday() {
    let feb = date("2026-02-01");
    assert_eq!(
        nth_weekday_in_month(feb, Weekday::Tue, 3),
        Some(date("2026-02-17"))
    );
}

#[test]
fn nth_weekday_first_match_can_be_day_one() {
    let mar = date("2024-03-01");
    assert_eq!(
        nth_weekday_in_month(mar, Weekday::Fri, 1),
        Some(date("2024-03-01"))
    );
}

#[test]
fn nth_weekday_fifth_thursday_lands_on_leap_day() {
    let feb = date("2024-02-01");
    assert_eq!(
        nth_weekday_in_month(feb, Weekday::Thu, 5),
        Some(date("2024-02-29"))
    );
}

#[test]
fn nth_weekday_missing_index_is_none() {
    // April 2024 has four Fridays.
    assert_eq!(nth_weekday_in_month(date("2024-04-01"), Weekday::Fri, 5), None);
    // February 2023 has four Wednesdays.
    assert_eq!(nth_weekday_in_month(date("2023-02-01"), Weekday::Wed, 5), None);
}
