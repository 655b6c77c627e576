use crate::session::Session;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A file picked by the user, read fully into memory before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name).map(str::to_string);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_mime_type(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeCaseRequest {
    pub caso: String,
    pub session_id: String,
}

impl AnalyzeCaseRequest {
    pub fn new(session: &Session, caso: impl Into<String>) -> Self {
        Self {
            caso: caso.into(),
            session_id: session.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluateResponseRequest {
    #[serde(rename = "userResponse")]
    pub user_response: String,
    pub session_id: String,
}

impl EvaluateResponseRequest {
    pub fn new(session: &Session, user_response: impl Into<String>) -> Self {
        Self {
            user_response: user_response.into(),
            session_id: session.id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl UploadResponse {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }

    pub fn error_text(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeCaseResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalyzeCaseResponse {
    pub fn analysis(&self) -> Option<&str> {
        non_empty(&self.analysis)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationResponse {
    /// `Some(Value::Null)` when the backend sent an explicit `null`.
    #[serde(default, rename = "calificacionIA", deserialize_with = "present")]
    pub ai_score: Option<Value>,
    #[serde(default, rename = "calificacionUsuario")]
    pub user_score: Option<Value>,
    #[serde(default, rename = "confianzaIA")]
    pub ai_confidence: Option<Value>,
    #[serde(default, rename = "confianzaUsuario")]
    pub user_confidence: Option<Value>,
    #[serde(default, rename = "comentarioGeneral")]
    pub general_comment: Option<Value>,
    #[serde(default, rename = "fortalezasIA")]
    pub ai_strengths: Option<Value>,
    #[serde(default, rename = "debilidadesIA")]
    pub ai_weaknesses: Option<Value>,
    #[serde(default, rename = "fortalezasUsuario")]
    pub user_strengths: Option<Value>,
    #[serde(default, rename = "debilidadesUsuario")]
    pub user_weaknesses: Option<Value>,
    #[serde(default, rename = "recomendacionMejora")]
    pub recommendation: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The five display values shown after a successful evaluation, already
/// rendered to text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationBundle {
    pub ai_score: String,
    pub user_score: String,
    pub ai_confidence: String,
    pub user_confidence: String,
    pub general_comment: String,
    pub details: EvaluationDetails,
}

/// Extra feedback the backend may attach to an evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationDetails {
    pub ai_strengths: Vec<String>,
    pub ai_weaknesses: Vec<String>,
    pub user_strengths: Vec<String>,
    pub user_weaknesses: Vec<String>,
    pub recommendation: Option<String>,
}

impl EvaluationResponse {
    /// Success is keyed on the AI score field being sent at all, not on the
    /// absence of `error`. An explicit `null` still counts and renders empty.
    pub fn bundle(&self) -> Option<EvaluationBundle> {
        let ai_score = self.ai_score.as_ref()?;

        let recommendation = self
            .recommendation
            .as_ref()
            .map(render_value)
            .filter(|s| !s.is_empty());

        Some(EvaluationBundle {
            ai_score: render_value(ai_score),
            user_score: render_optional(&self.user_score),
            ai_confidence: render_optional(&self.ai_confidence),
            user_confidence: render_optional(&self.user_confidence),
            general_comment: render_optional(&self.general_comment),
            details: EvaluationDetails {
                ai_strengths: string_list(&self.ai_strengths),
                ai_weaknesses: string_list(&self.ai_weaknesses),
                user_strengths: string_list(&self.user_strengths),
                user_weaknesses: string_list(&self.user_weaknesses),
                recommendation,
            },
        })
    }
}

/// Renders a JSON scalar the way it reads on screen: strings without quotes,
/// whole floats without a trailing `.0`.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        other => other.to_string(),
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn render_optional(value: &Option<Value>) -> String {
    value.as_ref().map(render_value).unwrap_or_default()
}

fn string_list(value: &Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(render_value)
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
