//! Per-session state for hosts serving many sessions at once.
//!
//! Each session's context sits behind its own mutex, so turns for one
//! session are serialized while different sessions proceed in parallel.
//! The outer map lock is held only long enough to find or insert a slot.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use super::context::SessionContext;
use super::engine::{Dialog, Turn, TurnReply};
use crate::error::Result;
use crate::journal::JournalStore;

type Slot = Arc<Mutex<SessionContext>>;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, Slot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: Uuid) -> Slot {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(SessionContext::with_id(id))))
            .clone()
    }

    /// Run `f` with exclusive access to the session's context, creating a
    /// fresh context on first use.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionContext) -> R) -> R {
        let slot = self.slot(id);
        let mut ctx = slot.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ctx)
    }

    /// Process one turn for `id`. The stored context is replaced only when
    /// the turn succeeds.
    pub fn turn(
        &self,
        dialog: &Dialog,
        id: Uuid,
        turn: &Turn,
        journal: &mut dyn JournalStore,
    ) -> Result<TurnReply> {
        self.with_session(id, |ctx| {
            let (next, reply) = dialog.handle_turn(ctx.clone(), turn, journal)?;
            *ctx = next;
            Ok(reply)
        })
    }

    pub fn snapshot(&self, id: Uuid) -> Option<SessionContext> {
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = sessions.get(&id)?.clone();
        drop(sessions);
        let ctx = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Some(ctx.clone())
    }

    pub fn remove(&self, id: Uuid) -> Option<SessionContext> {
        let slot = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)?;
        let ctx = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Some(ctx.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
