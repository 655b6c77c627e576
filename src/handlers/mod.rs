mod analysis;
mod evaluation;
mod upload;

use crate::{
    Error,
    api::Backend,
    session::Session,
    view::{Notification, Notifier, View},
};
use std::sync::Arc;
use tracing::error;

/// Which branch a handler call ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Required input was blank; nothing was sent.
    Rejected,
    /// The server answered successfully and the result was shown.
    Rendered,
    /// The server answered with an error message, which was shown.
    ServerError,
    /// The request failed before a readable answer arrived.
    TransportFailed,
}

/// The three user actions of the practice form. Cheap to clone; clones share
/// the session, backend, view and notifier, so each action can be spawned as
/// its own task.
#[derive(Clone)]
pub struct Handlers {
    session: Session,
    backend: Arc<dyn Backend>,
    view: Arc<dyn View>,
    notifier: Arc<dyn Notifier>,
}

impl Handlers {
    pub fn new(
        session: Session,
        backend: Arc<dyn Backend>,
        view: Arc<dyn View>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            backend,
            view,
            notifier,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn reject(&self, prompt: &str) -> HandlerOutcome {
        self.notifier.notify(Notification::validation(prompt));
        HandlerOutcome::Rejected
    }

    fn server_error(&self, message: &str) -> HandlerOutcome {
        self.notifier.notify(Notification::server_error(message));
        HandlerOutcome::ServerError
    }

    fn transport_failure(&self, action: &str, err: Error) -> HandlerOutcome {
        error!(
            "{} failed for session {}: {}",
            action, self.session, err
        );
        self.notifier.notify(Notification::failure());
        HandlerOutcome::TransportFailed
    }
}
