use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    session: Arc<Session>,
    started_at: Instant,
    started_at_system: SystemTime,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
