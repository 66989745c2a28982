use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::util::Clock;

/// Default window for completing an interactive login: long enough to fill a
/// login form in a separate browser window, short enough that an abandoned
/// flow does not linger as a pending handshake.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(5 * 60);

/// A pending authorization handshake, correlating a "start" call with a
/// later "confirm" call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// In-process register of pending authorization sessions.
///
/// Sessions live only in memory for the life of the server process. Expiry
/// is checked at read time; physical cleanup is lazy.
pub struct AuthSessionRegistry {
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl AuthSessionRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, DEFAULT_SESSION_TTL)
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::minutes(5)),
            clock,
        }
    }

    /// Register a new session and return its unguessable identifier.
    /// Non-blocking: does not wait for any login to occur.
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        sessions.retain(|_, created_at| now - *created_at < self.ttl);
        sessions.insert(id.clone(), now);
        id
    }

    /// Look up a session, treating anything at or past its TTL as absent.
    pub fn get(&self, id: &str) -> Option<AuthSession> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        match sessions.get(id) {
            Some(created_at) if now - *created_at < self.ttl => Some(AuthSession {
                id: id.to_string(),
                created_at: *created_at,
            }),
            Some(_) => {
                sessions.remove(id);
                None
            }
            None => None,
        }
    }

    /// Remove a session. Clearing twice, or clearing an unknown id, is fine.
    pub fn clear(&self, id: &str) {
        self.sessions
            .lock()
            .expect("session registry poisoned")
            .remove(id);
    }
}
