use super::{HandlerOutcome, Handlers};
use crate::view::{Notification, SELECT_FILE_PROMPT, UPLOAD_FALLBACK_MESSAGE};
use tracing::{debug, info};

impl Handlers {
    /// Sends the selected standard document to the backend and reports what
    /// the server said about it.
    pub async fn upload(&self) -> HandlerOutcome {
        let Some(file) = self.view.selected_file() else {
            debug!("Upload requested with no file selected");
            return self.reject(SELECT_FILE_PROMPT);
        };

        info!(
            "Uploading {} ({} bytes) for session {}",
            file.file_name,
            file.len(),
            self.session
        );

        let response = match self.backend.upload_iso(&self.session, file).await {
            Ok(response) => response,
            Err(e) => return self.transport_failure("Upload", e),
        };

        if let Some(pages) = response.pages {
            debug!("Backend processed {} pages", pages);
        }

        match response.message() {
            Some(message) => {
                info!("Upload accepted for session {}", self.session);
                self.notifier.notify(Notification::info(message));
                HandlerOutcome::Rendered
            }
            None => {
                let message = response.error_text().unwrap_or(UPLOAD_FALLBACK_MESSAGE);
                info!("Upload rejected by backend: {}", message);
                self.server_error(message)
            }
        }
    }
}
