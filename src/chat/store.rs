//! In-memory session store. Each session owns one conversation
//! history behind its own async mutex so that a submit can hold the
//! session for the whole upstream round trip. Readers get the last
//! committed copy from a watch channel and never wait on that mutex.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedMutexGuard, watch};

use crate::openai::{Message, Role};

/// Ordered turns of a single conversation, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversationHistory {
    turns: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a completed exchange. The user turn and the reply are
    /// always stored together.
    pub fn push_exchange(&mut self, user_msg: &str, reply: &str) {
        self.turns.push(Message::new(Role::User, user_msg));
        self.turns.push(Message::new(Role::Assistant, reply));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl From<ConversationHistory> for Vec<Message> {
    fn from(history: ConversationHistory) -> Self {
        history.turns
    }
}

#[derive(Debug)]
struct SessionEntry {
    history: ConversationHistory,
    last_seen: Instant,
    committed: watch::Sender<ConversationHistory>,
}

#[derive(Debug)]
struct Session {
    entry: Arc<Mutex<SessionEntry>>,
    committed: watch::Receiver<ConversationHistory>,
}

impl Session {
    fn new() -> Self {
        let (tx, rx) = watch::channel(ConversationHistory::new());
        Self {
            entry: Arc::new(Mutex::new(SessionEntry {
                history: ConversationHistory::new(),
                last_seen: Instant::now(),
                committed: tx,
            })),
            committed: rx,
        }
    }
}

/// Exclusive access to one session's history. Dropping the guard
/// publishes the history to readers, releases the session and marks
/// it as recently used.
pub struct SessionGuard(OwnedMutexGuard<SessionEntry>);

impl Deref for SessionGuard {
    type Target = ConversationHistory;

    fn deref(&self) -> &Self::Target {
        &self.0.history
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0.history
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let history = self.0.history.clone();
        self.0.committed.send_replace(history);
        self.0.last_seen = Instant::now();
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the session's history, creating an empty one on first use.
    /// Waits while another request holds the same session.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        let entry = self.entry(session_id);
        SessionGuard(entry.lock_owned().await)
    }

    /// Lock the session's history only if the session exists.
    pub async fn lock_existing(&self, session_id: &str) -> Option<SessionGuard> {
        let entry = self.existing(session_id)?;
        Some(SessionGuard(entry.lock_owned().await))
    }

    /// Copy of the session's last committed turns without creating
    /// the session. Does not wait for a request holding the session,
    /// changes made under a live guard show up once it is dropped.
    pub fn snapshot(&self, session_id: &str) -> Option<ConversationHistory> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .map(|session| session.committed.borrow().clone())
    }

    /// Remove sessions that have not been used for at least `ttl`.
    /// Sessions that are locked or about to be locked are kept.
    /// Returns the number of sessions removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| {
            // Any other reference means a request is using the session
            if Arc::strong_count(&session.entry) > 1 {
                return true;
            }
            match session.entry.try_lock() {
                Ok(entry) => entry.last_seen.elapsed() < ttl,
                Err(_) => true,
            }
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn existing(&self, session_id: &str) -> Option<Arc<Mutex<SessionEntry>>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .map(|session| Arc::clone(&session.entry))
    }

    fn entry(&self, session_id: &str) -> Arc<Mutex<SessionEntry>> {
        if let Some(entry) = self.existing(session_id) {
            return entry;
        }

        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let session = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!("Creating chat session {}", session_id);
            Session::new()
        });
        Arc::clone(&session.entry)
    }
}
