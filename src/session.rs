use crate::{Error, Result, config::SessionConfig};
use std::{fmt, sync::Arc};
use uuid::Uuid;

/// Correlates every request of one client run with the backend's per-session
/// files. Cloning shares the same id; it is never regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Arc<str>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::session("session id must not be blank"));
        }
        Ok(Self { id: id.into() })
    }

    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string().into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        match &config.id {
            Some(id) => Self::new(id.clone()),
            None => Ok(Self::generate()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
