mod form;
mod notification;

pub use form::*;
pub use notification::*;

use crate::api::{EvaluationDetails, SelectedFile};

/// Typed access to the form the handlers read from and render into.
///
/// Implementations are shared between concurrently running handlers, so
/// every method takes `&self`.
pub trait View: Send + Sync {
    fn selected_file(&self) -> Option<SelectedFile>;

    fn case_text(&self) -> String;

    fn set_analysis(&self, analysis: &str);

    fn user_response(&self) -> String;

    fn set_ai_score(&self, value: &str);

    fn set_user_score(&self, value: &str);

    fn set_ai_confidence(&self, value: &str);

    fn set_user_confidence(&self, value: &str);

    fn set_general_comment(&self, value: &str);

    /// Optional extra feedback; views without a place for it ignore it.
    fn set_evaluation_details(&self, _details: &EvaluationDetails) {}

    fn show_evaluation_modal(&self);
}

/// Receives every user-facing message the handlers produce.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
