use crate::models::Session;

/// Saves `session`, replacing any record that shares its date.
/// Returns `true` when an existing record was replaced.
pub fn upsert_session(sessions: &mut Vec<Session>, session: Session) -> bool {
    match sessions.iter_mut().find(|entry| entry.date == session.date) {
        Some(existing) => {
            *existing = session;
            true
        }
        None => {
            sessions.push(session);
            false
        }
    }
}

pub fn remove_session(sessions: &mut Vec<Session>, date: &str) -> bool {
    let before = sessions.len();
    sessions.retain(|entry| entry.date != date);
    sessions.len() != before
}

pub fn find_session<'a>(sessions: &'a [Session], date: &str) -> Option<&'a Session> {
    sessions.iter().find(|entry| entry.date == date)
}

/// Newest first, by stored date.
pub fn recent_sessions(sessions: &[Session], limit: usize) -> Vec<Session> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

pub fn latest_session(sessions: &[Session]) -> Option<&Session> {
    sessions.iter().max_by(|a, b| a.date.cmp(&b.date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(date: &str, notes: &str) -> Session {
        Session {
            date: date.to_string(),
            notes: notes.to_string(),
            ..Session::default()
        }
    }

    #[test]
    fn upsert_replaces_same_date() {
        let mut sessions = vec![session("2024-01-01", "first")];
        assert!(!upsert_session(&mut sessions, session("2024-01-02", "second")));
        assert!(upsert_session(&mut sessions, session("2024-01-01", "redo")));
        assert_eq!(sessions.len(), 2);
        assert_eq!(find_session(&sessions, "2024-01-01").unwrap().notes, "redo");
    }

    #[test]
    fn remove_reports_whether_anything_went() {
        let mut sessions = vec![session("2024-01-01", "")];
        assert!(!remove_session(&mut sessions, "2024-01-02"));
        assert!(remove_session(&mut sessions, "2024-01-01"));
        assert!(sessions.is_empty());
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let sessions: Vec<Session> = ["2024-01-03", "2024-01-09", "2024-01-01", "2024-01-05"]
            .iter()
            .map(|date| session(date, ""))
            .collect();
        let recent = recent_sessions(&sessions, 3);
        let dates: Vec<&str> = recent.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-09", "2024-01-05", "2024-01-03"]);
        assert_eq!(latest_session(&sessions).unwrap().date, "2024-01-09");
        assert!(latest_session(&[]).is_none());
    }
}
