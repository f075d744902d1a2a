//! Per-session capacity lookups for a schedule.
//!
//! Built from the capacity endpoint's report; consulted by the schedule
//! card to decide whether the selected session is fully booked. A session's
//! own positive `capacity` field overrides the reported total. Fetch
//! failures leave the board empty, which reads as "not full"; the server's
//! conflict check is the backstop for an actually-full session.

use std::collections::HashMap;

use crate::models::{CapacityReport, Session, SessionCapacityEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCapacity {
    pub paid: u32,
    pub total: u32,
}

/// `paid`/`total` counts keyed by session id, for one schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapacityBoard {
    sessions: HashMap<String, SessionCapacity>,
}

/// A session is full only when a positive capacity is known and met.
pub fn is_full(paid: u32, total: u32) -> bool {
    total > 0 && paid >= total
}

impl CapacityBoard {
    pub fn from_report(report: &CapacityReport) -> Self {
        let sessions = report
            .sessions
            .iter()
            .map(|e: &SessionCapacityEntry| {
                (
                    e.session_id.clone(),
                    SessionCapacity {
                        paid: e.paid,
                        total: e.total_capacity,
                    },
                )
            })
            .collect();
        Self { sessions }
    }

    pub fn get(&self, session_id: &str) -> Option<SessionCapacity> {
        self.sessions.get(session_id).copied()
    }

    /// Fullness for a session, honoring its capacity override.
    ///
    /// A `capacity` of zero on the session means "no override" and falls
    /// back to the reported total, like an absent override.
    pub fn session_is_full(&self, session: &Session) -> bool {
        let reported = self.get(&session.id);
        let total = session
            .capacity
            .filter(|c| *c > 0)
            .or(reported.map(|c| c.total))
            .unwrap_or(0);
        let paid = reported.map(|c| c.paid).unwrap_or(0);
        is_full(paid, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session(id: &str, capacity: Option<u32>) -> Session {
        Session {
            id: id.to_string(),
            start_date: Utc::now(),
            capacity,
            time: None,
        }
    }

    fn board(entries: &[(&str, u32, u32)]) -> CapacityBoard {
        CapacityBoard::from_report(&CapacityReport {
            sessions: entries
                .iter()
                .map(|(id, paid, total)| SessionCapacityEntry {
                    session_id: id.to_string(),
                    paid: *paid,
                    total_capacity: *total,
                })
                .collect(),
        })
    }

    #[test]
    fn full_exactly_at_capacity() {
        assert!(!is_full(9, 10));
        assert!(is_full(10, 10));
        assert!(is_full(11, 10));
    }

    #[test]
    fn zero_total_never_reads_full() {
        assert!(!is_full(0, 0));
        assert!(!is_full(25, 0));
    }

    #[test]
    fn positive_override_beats_reported_total() {
        let b = board(&[("s1", 5, 20)]);
        // Override shrinks the session to 5 seats, all paid.
        assert!(b.session_is_full(&session("s1", Some(5))));
        // Without the override there is plenty of room.
        assert!(!b.session_is_full(&session("s1", None)));
    }

    #[test]
    fn zero_override_falls_back_to_reported_total() {
        let b = board(&[("s1", 10, 10)]);
        assert!(b.session_is_full(&session("s1", Some(0))));
    }

    #[test]
    fn unknown_session_fails_open() {
        let b = CapacityBoard::default();
        assert!(!b.session_is_full(&session("mystery", None)));
        // An override alone cannot make an unknown session full: nobody paid.
        assert!(!b.session_is_full(&session("mystery", Some(3))));
    }
}
