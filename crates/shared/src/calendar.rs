//! Grid math for the session-picker calendar.
//!
//! The picker shows one month at a time, Sunday-first, with a cell per day
//! and leading blanks to align the 1st with its weekday. Days that carry a
//! session resolve to that session's id; session start timestamps are
//! normalized to their UTC calendar date so a late-evening session does not
//! drift a day depending on the viewer's zone.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::Session;

/// One selectable day cell; `None` entries are the leading blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: u32,
    pub session_id: Option<String>,
}

/// Map each session to its UTC calendar date. Later sessions on the same
/// date win, mirroring one-session-per-day scheduling.
pub fn session_dates(sessions: &[Session]) -> HashMap<NaiveDate, String> {
    sessions
        .iter()
        .map(|s| (s.start_date.date_naive(), s.id.clone()))
        .collect()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_y, next_m) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Cells for one month: leading blanks, then every day with its session id
/// (when one falls on that date).
pub fn month_cells(
    year: i32,
    month: u32,
    sessions: &HashMap<NaiveDate, String>,
) -> Vec<Option<CalendarDay>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let mut cells: Vec<Option<CalendarDay>> = Vec::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(None);
    }
    for day in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, day);
        let session_id = date.and_then(|d| sessions.get(&d).cloned());
        cells.push(Some(CalendarDay { day, session_id }));
    }
    cells
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn month_title(year: i32, month: u32) -> String {
    const NAMES: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July",
        "August", "September", "October", "November", "December",
    ];
    let name = NAMES.get((month as usize).saturating_sub(1)).unwrap_or(&"?");
    format!("{name} {year}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn session(id: &str, y: i32, m: u32, d: u32) -> Session {
        Session {
            id: id.to_string(),
            start_date: Utc.with_ymd_and_hms(y, m, d, 18, 30, 0).unwrap(),
            capacity: None,
            time: None,
        }
    }

    #[test]
    fn leading_blanks_match_the_weekday_of_the_first() {
        // June 2031 starts on a Sunday; July 2031 on a Tuesday.
        let june = month_cells(2031, 6, &HashMap::new());
        assert!(june[0].is_some());
        let july = month_cells(2031, 7, &HashMap::new());
        assert_eq!(july.iter().take_while(|c| c.is_none()).count(), 2);
        assert_eq!(july[2].as_ref().unwrap().day, 1);
    }

    #[test]
    fn month_lengths_honor_leap_years() {
        assert_eq!(days_in_month(2032, 2), 29);
        assert_eq!(days_in_month(2031, 2), 28);
        assert_eq!(days_in_month(2031, 12), 31);
        assert_eq!(days_in_month(2031, 4), 30);
    }

    #[test]
    fn only_session_dates_resolve_to_ids() {
        let sessions = vec![session("s1", 2031, 6, 5), session("s2", 2031, 6, 20)];
        let dates = session_dates(&sessions);
        let cells = month_cells(2031, 6, &dates);

        let with_ids: Vec<_> = cells
            .iter()
            .flatten()
            .filter(|c| c.session_id.is_some())
            .collect();
        assert_eq!(with_ids.len(), 2);
        assert_eq!(with_ids[0].day, 5);
        assert_eq!(with_ids[0].session_id.as_deref(), Some("s1"));
        assert_eq!(with_ids[1].day, 20);
    }

    #[test]
    fn session_date_uses_the_utc_day() {
        let s = Session {
            id: "late".to_string(),
            start_date: Utc.with_ymd_and_hms(2031, 6, 5, 23, 45, 0).unwrap(),
            capacity: None,
            time: None,
        };
        let dates = session_dates(&[s]);
        assert!(dates.contains_key(&NaiveDate::from_ymd_opt(2031, 6, 5).unwrap()));
    }

    #[test]
    fn month_navigation_wraps_at_year_edges() {
        assert_eq!(previous_month(2031, 1), (2030, 12));
        assert_eq!(next_month(2031, 12), (2032, 1));
        assert_eq!(previous_month(2031, 7), (2031, 6));
        assert_eq!(next_month(2031, 7), (2031, 8));
    }

    #[test]
    fn month_titles() {
        assert_eq!(month_title(2031, 6), "June 2031");
        assert_eq!(month_title(2031, 12), "December 2031");
    }
}
