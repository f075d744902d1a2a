//! Decision table for the schedule card's call-to-action.
//!
//! The button renders exactly one state, resolved here as a pure function
//! so the precedence (full-session branches first, then auth prompts, then
//! selection and start-time checks) is pinned down in one place.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::models::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterButtonState {
    /// Full session, anonymous visitor: link to login.
    LoginToRequest,
    /// Full session, unverified account: link to verification.
    VerifyToRequest,
    /// Full session, verified account: offer the spot request.
    RequestSpot,
    /// Open session, anonymous visitor: link to login.
    LoginToRegister,
    /// Open session, unverified account: link to verification.
    VerifyToRegister,
    /// Nothing picked yet: open the calendar.
    SelectSession,
    /// Already registered for the picked session: render nothing.
    Hidden,
    /// The picked session has started: disabled label.
    SessionStarted,
    /// Ready to register, showing the session's start date.
    Register { starts_at: DateTime<Utc> },
}

pub fn resolve_button_state(
    is_full: bool,
    logged_in: bool,
    verified: bool,
    selected: Option<&Session>,
    registered_sessions: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> RegisterButtonState {
    if is_full {
        if !logged_in {
            return RegisterButtonState::LoginToRequest;
        }
        if !verified {
            return RegisterButtonState::VerifyToRequest;
        }
        return RegisterButtonState::RequestSpot;
    }

    if !logged_in {
        return RegisterButtonState::LoginToRegister;
    }
    if !verified {
        return RegisterButtonState::VerifyToRegister;
    }

    let Some(session) = selected else {
        return RegisterButtonState::SelectSession;
    };

    if registered_sessions.contains(&session.id) {
        return RegisterButtonState::Hidden;
    }

    if now >= session.start_date {
        return RegisterButtonState::SessionStarted;
    }

    RegisterButtonState::Register {
        starts_at: session.start_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(id: &str, starts_at: DateTime<Utc>) -> Session {
        Session {
            id: id.to_string(),
            start_date: starts_at,
            capacity: None,
            time: None,
        }
    }

    fn future() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2031, 6, 15, 10, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2031, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn full_branch_wins_over_auth_prompts() {
        let none = BTreeSet::new();
        // Full AND not logged in resolves to the request-spot login link,
        // never the plain register login link.
        assert_eq!(
            resolve_button_state(true, false, false, None, &none, now()),
            RegisterButtonState::LoginToRequest
        );
        assert_eq!(
            resolve_button_state(true, true, false, None, &none, now()),
            RegisterButtonState::VerifyToRequest
        );
        // Full sessions offer the request even with nothing selected or a
        // started session; fullness short-circuits everything below it.
        let started = session("s1", now() - chrono::Duration::hours(1));
        let mut registered = BTreeSet::new();
        registered.insert("s1".to_string());
        assert_eq!(
            resolve_button_state(true, true, true, Some(&started), &registered, now()),
            RegisterButtonState::RequestSpot
        );
    }

    #[test]
    fn auth_prompts_precede_selection() {
        let none = BTreeSet::new();
        assert_eq!(
            resolve_button_state(false, false, true, None, &none, now()),
            RegisterButtonState::LoginToRegister
        );
        assert_eq!(
            resolve_button_state(false, true, false, None, &none, now()),
            RegisterButtonState::VerifyToRegister
        );
    }

    #[test]
    fn no_selection_opens_the_calendar() {
        let none = BTreeSet::new();
        assert_eq!(
            resolve_button_state(false, true, true, None, &none, now()),
            RegisterButtonState::SelectSession
        );
    }

    #[test]
    fn registered_session_hides_the_button_even_when_started() {
        let started = session("s1", now() - chrono::Duration::hours(1));
        let mut registered = BTreeSet::new();
        registered.insert("s1".to_string());
        assert_eq!(
            resolve_button_state(false, true, true, Some(&started), &registered, now()),
            RegisterButtonState::Hidden
        );
    }

    #[test]
    fn started_session_is_disabled() {
        let none = BTreeSet::new();
        let started = session("s1", now() - chrono::Duration::seconds(1));
        assert_eq!(
            resolve_button_state(false, true, true, Some(&started), &none, now()),
            RegisterButtonState::SessionStarted
        );
        // Start time is inclusive: exactly-now counts as started.
        let exactly = session("s1", now());
        assert_eq!(
            resolve_button_state(false, true, true, Some(&exactly), &none, now()),
            RegisterButtonState::SessionStarted
        );
    }

    #[test]
    fn open_future_session_registers() {
        let none = BTreeSet::new();
        let upcoming = session("s1", future());
        assert_eq!(
            resolve_button_state(false, true, true, Some(&upcoming), &none, now()),
            RegisterButtonState::Register { starts_at: future() }
        );
    }

    #[test]
    fn full_capacity_snapshot_routes_to_spot_request() {
        use crate::capacity::CapacityBoard;
        use crate::models::{CapacityReport, SessionCapacityEntry};

        let board = CapacityBoard::from_report(&CapacityReport {
            sessions: vec![SessionCapacityEntry {
                session_id: "s1".to_string(),
                paid: 10,
                total_capacity: 10,
            }],
        });
        let upcoming = session("s1", future());
        let is_full = board.session_is_full(&upcoming);
        let none = BTreeSet::new();

        assert_eq!(
            resolve_button_state(is_full, true, true, Some(&upcoming), &none, now()),
            RegisterButtonState::RequestSpot
        );
    }
}
