use super::{HandlerOutcome, Handlers};
use crate::{
    api::EvaluateResponseRequest,
    view::{EVALUATION_FALLBACK_MESSAGE, USER_RESPONSE_PROMPT},
};
use tracing::{debug, info};

impl Handlers {
    /// Has the backend grade the user's own analysis against the generated
    /// one, then fills the score fields and opens the evaluation modal.
    pub async fn evaluate(&self) -> HandlerOutcome {
        let user_response = self.view.user_response();
        if user_response.trim().is_empty() {
            debug!("Evaluation requested with blank response text");
            return self.reject(USER_RESPONSE_PROMPT);
        }

        info!("Requesting evaluation for session {}", self.session);
        let request = EvaluateResponseRequest::new(&self.session, user_response);

        let response = match self.backend.evaluate_response(request).await {
            Ok(response) => response,
            Err(e) => return self.transport_failure("Evaluation", e),
        };

        // Keyed on the AI score, not on `error`; a body carrying both still renders.
        let Some(bundle) = response.bundle() else {
            let message = response
                .error
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(EVALUATION_FALLBACK_MESSAGE);
            info!("Evaluation rejected by backend: {}", message);
            return self.server_error(message);
        };

        info!(
            "Evaluation for session {}: AI {} / user {}",
            self.session, bundle.ai_score, bundle.user_score
        );

        self.view.set_ai_score(&bundle.ai_score);
        self.view.set_user_score(&bundle.user_score);
        self.view.set_ai_confidence(&bundle.ai_confidence);
        self.view.set_user_confidence(&bundle.user_confidence);
        self.view.set_general_comment(&bundle.general_comment);
        self.view.set_evaluation_details(&bundle.details);
        self.view.show_evaluation_modal();

        HandlerOutcome::Rendered
    }
}
