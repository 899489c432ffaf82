//! Session Registry - maps session identifiers to their stacks

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use stack_calculator_sdk::SessionId;
use uuid::Uuid;

use super::error::DomainError;
use super::stack::SessionStack;

/// Source of fresh session identifiers.
pub type SessionIdGenerator = Box<dyn Fn() -> SessionId + Send + Sync>;

/// Random 128-bit identifier rendered as a hyphenated UUID.
#[must_use]
pub fn random_session_id() -> SessionId {
    SessionId::from(Uuid::new_v4().to_string())
}

/// Concurrent map from session identifier to stack.
///
/// Backed by a sharded `DashMap`: creation and lookup of unrelated sessions
/// do not serialize behind a single lock, and no shard lock is held once a
/// stack has been resolved.
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<SessionStack>>,
    stack_capacity: usize,
    generate: SessionIdGenerator,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions_count", &self.sessions.len())
            .field("stack_capacity", &self.stack_capacity)
            .finish_non_exhaustive()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl SessionRegistry {
    #[must_use]
    pub fn new(initial_sessions_capacity: usize, stack_capacity: usize) -> Self {
        Self::with_generator(
            initial_sessions_capacity,
            stack_capacity,
            Box::new(random_session_id),
        )
    }

    #[must_use]
    pub fn with_generator(
        initial_sessions_capacity: usize,
        stack_capacity: usize,
        generate: SessionIdGenerator,
    ) -> Self {
        Self {
            sessions: DashMap::with_capacity(initial_sessions_capacity),
            stack_capacity,
            generate,
        }
    }

    /// Insert a new empty stack under a fresh identifier.
    ///
    /// An identifier that is already taken is never reused; a new one is
    /// drawn until insertion succeeds.
    pub fn create_session(&self) -> SessionId {
        loop {
            let id = (self.generate)();
            match self.sessions.entry(id) {
                Entry::Vacant(slot) => {
                    let id = slot.key().clone();
                    slot.insert(Arc::new(SessionStack::with_capacity(self.stack_capacity)));
                    return id;
                }
                Entry::Occupied(taken) => {
                    tracing::warn!(session_id = %taken.key(), "Session id collision; regenerating");
                }
            }
        }
    }

    /// Look up the stack of a known session.
    ///
    /// # Errors
    /// [`DomainError::UnknownSession`] if `session_id` was never created.
    pub fn resolve(&self, session_id: &SessionId) -> Result<Arc<SessionStack>, DomainError> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DomainError::UnknownSession(session_id.clone()))
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
