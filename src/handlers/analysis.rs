use super::{HandlerOutcome, Handlers};
use crate::{
    api::AnalyzeCaseRequest,
    view::{ANALYSIS_FALLBACK_MESSAGE, CASE_TEXT_PROMPT},
};
use tracing::{debug, info};

impl Handlers {
    /// Asks the backend to analyse the case text against the uploaded
    /// standard and writes the answer into the analysis field.
    pub async fn request_analysis(&self) -> HandlerOutcome {
        let caso = self.view.case_text();
        if caso.trim().is_empty() {
            debug!("Analysis requested with blank case text");
            return self.reject(CASE_TEXT_PROMPT);
        }

        info!("Requesting case analysis for session {}", self.session);
        let request = AnalyzeCaseRequest::new(&self.session, caso);

        let response = match self.backend.analyze_case(request).await {
            Ok(response) => response,
            Err(e) => return self.transport_failure("Case analysis", e),
        };

        match response.analysis() {
            Some(analysis) => {
                info!(
                    "Received analysis ({} chars) for session {}",
                    analysis.chars().count(),
                    self.session
                );
                self.view.set_analysis(analysis);
                HandlerOutcome::Rendered
            }
            None => {
                let message = response
                    .error
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or(ANALYSIS_FALLBACK_MESSAGE);
                info!("Case analysis rejected by backend: {}", message);
                self.server_error(message)
            }
        }
    }
}
