use super::mocks::RecordingNotifier;
use casos_iso::{
    Result,
    api::{HttpBackend, SelectedFile},
    config::BackendConfig,
    handlers::Handlers,
    session::Session,
    view::FormView,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use wiremock::MockServer;

pub const TEST_SESSION_ID: &str = "sesion1";

pub fn test_session() -> Session {
    Session::new(TEST_SESSION_ID).expect("valid session id")
}

pub fn backend_config(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        user_agent: Some("casos-iso-tests".to_string()),
    }
}

pub fn http_backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&backend_config(&server.uri())).expect("backend builds")
}

/// Handlers wired to a mock server, an in-memory form and a recording notifier
pub fn create_test_handlers(server: &MockServer) -> (Handlers, Arc<FormView>, RecordingNotifier) {
    let view = Arc::new(FormView::new());
    let notifier = RecordingNotifier::new();
    let handlers = Handlers::new(
        test_session(),
        Arc::new(http_backend(server)),
        view.clone(),
        Arc::new(notifier.clone()),
    );
    (handlers, view, notifier)
}

pub fn sample_pdf() -> SelectedFile {
    SelectedFile::new("ISO-37001.pdf", b"%PDF-1.4\n%fake norma antisoborno\n".to_vec())
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  base_url: "http://127.0.0.1:5000/"
session:
  id: "sesion1"
logs:
  level: "debug"
"#;
