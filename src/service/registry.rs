use crate::engines::generation::{EvolutionSession, RatingOutcome, SessionConfig};
use crate::error::TunebreedError;
use crate::types::Candidate;
use log::info;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub type SessionHandle = String;

/// In-memory store of independent interactive sessions.
///
/// Each session sits behind its own mutex, so calls against one session are
/// serialized while different sessions proceed independently.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionHandle, Arc<Mutex<EvolutionSession>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_session(
        &self,
        config: SessionConfig,
        seed: Option<u64>,
    ) -> Result<SessionHandle, TunebreedError> {
        let session = EvolutionSession::new(config, seed)?;
        let handle = new_handle();

        self.lock_sessions()?
            .insert(handle.clone(), Arc::new(Mutex::new(session)));
        info!("Created session {}", handle);
        Ok(handle)
    }

    pub fn produce_candidate(
        &self,
        handle: &str,
        num_steps: usize,
    ) -> Result<Candidate, TunebreedError> {
        let session = self.session(handle)?;
        let mut session = lock_session(&session, handle)?;
        session.produce_candidate(num_steps)
    }

    /// Stale candidate ids and out-of-range ratings do not fail
    pub fn record_rating(
        &self,
        handle: &str,
        candidate_id: &str,
        rating: i64,
    ) -> Result<RatingOutcome, TunebreedError> {
        let session = self.session(handle)?;
        let mut session = lock_session(&session, handle)?;
        Ok(session.record_rating(candidate_id, rating))
    }

    pub fn remove_session(&self, handle: &str) -> Result<bool, TunebreedError> {
        Ok(self.lock_sessions()?.remove(handle).is_some())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared handle to a session for callers that need direct access
    pub fn session(&self, handle: &str) -> Result<Arc<Mutex<EvolutionSession>>, TunebreedError> {
        self.lock_sessions()?
            .get(handle)
            .cloned()
            .ok_or_else(|| TunebreedError::UnknownSession(handle.to_string()))
    }

    fn lock_sessions(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<SessionHandle, Arc<Mutex<EvolutionSession>>>>, TunebreedError>
    {
        self.sessions
            .lock()
            .map_err(|_| TunebreedError::SessionPoisoned("session table".to_string()))
    }
}

fn lock_session<'a>(
    session: &'a Arc<Mutex<EvolutionSession>>,
    handle: &str,
) -> Result<MutexGuard<'a, EvolutionSession>, TunebreedError> {
    session
        .lock()
        .map_err(|_| TunebreedError::SessionPoisoned(handle.to_string()))
}

fn new_handle() -> SessionHandle {
    format!("{:032x}", rand::thread_rng().gen::<u128>())
}
