use chrono::{DateTime, Utc};
use std::fmt;

pub const SELECT_FILE_PROMPT: &str = "Selecciona un archivo PDF primero.";
pub const CASE_TEXT_PROMPT: &str = "Escribe un caso práctico.";
pub const USER_RESPONSE_PROMPT: &str = "Escribe tu análisis propio.";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "No se recibió respuesta al subir el archivo.";
pub const ANALYSIS_FALLBACK_MESSAGE: &str = "Ocurrió un error al analizar el caso.";
pub const EVALUATION_FALLBACK_MESSAGE: &str = "Ocurrió un error al evaluar la respuesta.";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "No se pudo completar la solicitud con el servidor.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Required input missing; no request was sent.
    Validation,
    /// The server answered with a message for the user.
    Info,
    /// The server answered with an error of its own.
    ServerError,
    /// The request failed on the wire or returned an unreadable body.
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Validation, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::ServerError, message)
    }

    pub fn failure() -> Self {
        Self::new(NotificationKind::Failure, TRANSPORT_FAILURE_MESSAGE)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
