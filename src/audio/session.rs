//! Scoped decode and render sessions.
//!
//! A [`Session`] tracks one open decode or render stage. The decoder keeps
//! its guard next to the format reader and codec it opened, and the effect
//! renderer holds one for the duration of a render. Dropping the guard
//! releases it, so every exit path (including `?` on an error) gives the
//! session back.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::trace;

/// Number of sessions currently open in this process.
static ACTIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// What a session is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Container probing and packet decoding.
    Decode,
    /// Offline effect rendering.
    Render,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Render => write!(f, "render"),
        }
    }
}

/// RAII guard for an open decode or render session.
#[derive(Debug)]
pub struct Session {
    kind: SessionKind,
    opened: Instant,
}

impl Session {
    /// Open a new session.
    #[must_use]
    pub fn open(kind: SessionKind) -> Self {
        let active = ACTIVE_SESSIONS.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Opened {kind} session ({active} active)");
        Self {
            kind,
            opened: Instant::now(),
        }
    }

    /// Kind of this session.
    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Release the session explicitly.
    pub fn close(self) {
        // Drop will handle cleanup
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let active = ACTIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst) - 1;
        trace!(
            "Closed {} session after {:?} ({active} active)",
            self.kind,
            self.opened.elapsed()
        );
    }
}

/// Number of sessions that have been opened and not yet released.
#[must_use]
pub fn active_sessions() -> usize {
    ACTIVE_SESSIONS.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_display() {
        assert_eq!(SessionKind::Decode.to_string(), "decode");
        assert_eq!(SessionKind::Render.to_string(), "render");
    }

    #[test]
    fn test_session_reports_kind() {
        let session = Session::open(SessionKind::Render);
        assert_eq!(session.kind(), SessionKind::Render);
        session.close();
    }
}
