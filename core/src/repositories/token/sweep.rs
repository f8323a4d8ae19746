//! Deletion criteria for the refresh-token sweep.
//!
//! The sweep deletes under exactly two conditions, kept as named predicates
//! so the SQL implementation and the in-memory mock agree on the semantics
//! and each clause can be tested on its own.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::token::RefreshToken;

/// Snapshot of the instants a single sweep deletes against
///
/// `now` is read once when the criteria are built and never re-evaluated per
/// row, so one sweep sees a consistent picture of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepCriteria {
    /// The sweep's single time snapshot
    pub now: DateTime<Utc>,

    /// Revoked rows older than this are past their forensic window
    pub revoked_cutoff: DateTime<Utc>,
}

impl SweepCriteria {
    /// Build criteria for a sweep running at `now` with the given retention
    /// window for revoked rows
    pub fn at(now: DateTime<Utc>, retention: Duration) -> Self {
        Self {
            now,
            revoked_cutoff: now - retention,
        }
    }

    /// First delete clause: the row's expiry instant has passed
    pub fn is_past_expiry(&self, token: &RefreshToken) -> bool {
        token.expired_at < self.now
    }

    /// Second delete clause: the row was revoked and has aged past the
    /// retention window
    ///
    /// A row revoked more recently than the cutoff is retained even though it
    /// is no longer live, preserving a short forensic window.
    pub fn is_stale_revocation(&self, token: &RefreshToken) -> bool {
        matches!(token.revoked_at, Some(revoked_at) if revoked_at < self.revoked_cutoff)
    }

    /// Whether one sweep deletes this row
    pub fn matches(&self, token: &RefreshToken) -> bool {
        self.is_past_expiry(token) || self.is_stale_revocation(token)
    }
}
