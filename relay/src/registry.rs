use crate::{ConnectionId, UserId};
use std::collections::{HashMap, HashSet};

/// One live session: the presenter's connection plus everyone watching it.
pub struct Session {
    pub presenter_conn: ConnectionId,
    pub viewers: HashSet<ConnectionId>,
}

impl Session {
    fn new(presenter_conn: ConnectionId) -> Self {
        Self {
            presenter_conn,
            viewers: HashSet::new(),
        }
    }
}

/// Tracks which presenters are live and which connections watch them.
///
/// The registry is a plain state container with no locking of its own; the
/// server task owns it exclusively and serializes every mutation. A
/// connection views at most one session at a time and presents at most one
/// session at a time, and a session's presenter connection never appears in
/// its own viewer set.
pub struct SessionRegistry {
    sessions: HashMap<UserId, Session>,
    watching: HashMap<ConnectionId, UserId>,
    presenting: HashMap<ConnectionId, UserId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            watching: HashMap::new(),
            presenting: HashMap::new(),
        }
    }

    pub fn has_session(&self, presenter: &str) -> bool {
        self.sessions.contains_key(presenter)
    }

    /// Opens a session for `presenter`, or resets it if one is already live.
    /// A reset drops the old viewer set; viewers have to join again.
    pub fn open_session(&mut self, presenter: &str, conn: ConnectionId) {
        if let Some(previous) = self.presenting.get(&conn) {
            if previous != presenter {
                let previous = previous.clone();
                self.close_session(&previous);
            }
        }
        if let Some(old) = self.sessions.remove(presenter) {
            self.presenting.remove(&old.presenter_conn);
            for viewer in &old.viewers {
                self.watching.remove(viewer);
            }
        }
        self.sessions
            .insert(presenter.to_string(), Session::new(conn));
        self.presenting.insert(conn, presenter.to_string());
        log::info!("Presenter {} opened a session", presenter);
    }

    /// No-op if `presenter` has no live session.
    pub fn close_session(&mut self, presenter: &str) {
        if let Some(session) = self.sessions.remove(presenter) {
            self.presenting.remove(&session.presenter_conn);
            for viewer in &session.viewers {
                self.watching.remove(viewer);
            }
            log::info!("Presenter {} closed the session", presenter);
        }
    }

    /// Adds `conn` as a viewer of `presenter`'s session. Joining before the
    /// presenter has opened is silently ignored; joining a second session
    /// leaves the first one; re-joining is idempotent.
    pub fn join(&mut self, presenter: &str, conn: ConnectionId) {
        match self.sessions.get(presenter) {
            None => {
                log::debug!(
                    "Connection {} joined {} before any session was opened",
                    conn,
                    presenter
                );
                return;
            }
            Some(session) if session.presenter_conn == conn => return,
            Some(_) => {}
        }
        if let Some(previous) = self.watching.get(&conn) {
            if previous == presenter {
                return;
            }
            let previous = previous.clone();
            self.leave(&previous, conn);
        }
        if let Some(session) = self.sessions.get_mut(presenter) {
            session.viewers.insert(conn);
            self.watching.insert(conn, presenter.to_string());
            log::debug!("Connection {} joined the session of {}", conn, presenter);
        }
    }

    /// No-op if `conn` is not a viewer of `presenter`'s session.
    pub fn leave(&mut self, presenter: &str, conn: ConnectionId) {
        if let Some(session) = self.sessions.get_mut(presenter) {
            session.viewers.remove(&conn);
        }
        if self.watching.get(&conn).map_or(false, |p| p == presenter) {
            self.watching.remove(&conn);
        }
    }

    /// Snapshot of the current viewer set. `None` means no live session, so
    /// the caller drops the event instead of delivering to nobody by
    /// accident.
    pub fn viewers_of(&self, presenter: &str) -> Option<Vec<ConnectionId>> {
        self.sessions
            .get(presenter)
            .map(|session| session.viewers.iter().copied().collect())
    }

    /// Runs on every disconnect path: removes `conn` from the viewer set it
    /// occupies and closes the session it presents.
    pub fn remove_connection(&mut self, conn: ConnectionId) {
        if let Some(presenter) = self.watching.remove(&conn) {
            if let Some(session) = self.sessions.get_mut(&presenter) {
                session.viewers.remove(&conn);
            }
        }
        if let Some(presenter) = self.presenting.remove(&conn) {
            self.close_session(&presenter);
        }
    }
}
