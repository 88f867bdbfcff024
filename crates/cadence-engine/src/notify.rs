//! Announcement boundary for newly materialized occurrences.
//!
//! Consumed by callers after persisting an expansion; has no bearing on the
//! algorithm's correctness.

use crate::occurrence::Occurrence;

/// Sink for occurrence announcements (e.g. a chat channel poster).
pub trait Notifier {
    fn announce(&mut self, occurrence: &Occurrence);
}

/// Notifier that drops every announcement.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn announce(&mut self, _occurrence: &Occurrence) {}
}
