//! In-memory conversation sessions
//!
//! Multi-turn agents (the chat REPL, the prompt refiner) need per-user
//! history. Sessions are process-local and expire after an idle period;
//! nothing is persisted.

use chrono::{DateTime, Utc};
use finchat_llm::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTurn {
    /// "user" or "assistant"
    pub role: String,
    /// Turn content
    pub content: String,
}

/// A conversation session for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Session id (UUID v4)
    pub id: String,
    /// Owner of the session
    pub user_id: String,
    /// Conversation turns in order
    pub history: Vec<SessionTurn>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_active: DateTime<Utc>,
}

impl ChatSession {
    /// Create a new session for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            history: Vec::new(),
            created_at: now,
            last_active: now,
        }
    }

    /// Append a turn and refresh the activity timestamp
    pub fn add_turn(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.history.push(SessionTurn {
            role: role.into(),
            content: content.into(),
        });
        self.last_active = Utc::now();
    }

    /// Conversation history as LLM messages
    ///
    /// Unknown roles are treated as user turns, which keeps the
    /// conversation shape valid for the completion API.
    pub fn history_messages(&self) -> Vec<Message> {
        self.history
            .iter()
            .map(|turn| match turn.role.as_str() {
                "assistant" => Message::assistant(turn.content.clone()),
                _ => Message::user(turn.content.clone()),
            })
            .collect()
    }

    /// History formatted as plain text, one turn per line
    pub fn formatted_history(&self) -> String {
        self.history
            .iter()
            .map(|turn| format!("{}: {}\n", turn.role, turn.content))
            .collect()
    }

    /// Whether the session has been idle longer than `max_age_seconds`
    pub fn is_expired(&self, max_age_seconds: i64) -> bool {
        Utc::now() - self.last_active > chrono::Duration::seconds(max_age_seconds)
    }
}

/// Thread-safe in-memory session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, ChatSession>>,
}

impl InMemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user and return it
    pub fn create(&self, user_id: impl Into<String>) -> ChatSession {
        let session = ChatSession::new(user_id);
        self.sessions
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Get a session by id
    pub fn get(&self, session_id: &str) -> Option<ChatSession> {
        self.sessions.read().unwrap().get(session_id).cloned()
    }

    /// Record a turn on an existing session
    pub fn add_turn(
        &self,
        session_id: &str,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> crate::error::Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| crate::error::ChatError::SessionNotFound(session_id.to_string()))?;
        session.add_turn(role, content);
        Ok(())
    }

    /// Remove sessions idle longer than `max_age_seconds`
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self, max_age_seconds: i64) -> usize {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(max_age_seconds));
        before - sessions.len()
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.read().unwrap().is_empty()
    }
}
