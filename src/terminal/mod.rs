mod command;

pub use command::*;

use crate::{
    Result,
    api::{EvaluationDetails, SelectedFile},
    handlers::{HandlerOutcome, Handlers},
    view::{FormState, FormView, Notification, NotificationKind, Notifier, View},
};
use std::{
    future::Future,
    io::{self, Stdout, Write},
    path::Path,
    sync::{Arc, Mutex},
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};
use tracing::{debug, info, warn};

/// Line-oriented front-end: an in-memory form plus a writer that shows the
/// analysis, the evaluation modal and every notification as they happen.
pub struct Console<W: Write + Send = Stdout> {
    form: FormView,
    out: Mutex<W>,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            form: FormView::new(),
            out: Mutex::new(out),
        }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn print(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> View for Console<W> {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.form.selected_file()
    }

    fn case_text(&self) -> String {
        self.form.case_text()
    }

    fn set_analysis(&self, analysis: &str) {
        self.form.set_analysis(analysis);
        self.print(&format!("── Análisis IA ──\n{}", analysis));
    }

    fn user_response(&self) -> String {
        self.form.user_response()
    }

    fn set_ai_score(&self, value: &str) {
        self.form.set_ai_score(value);
    }

    fn set_user_score(&self, value: &str) {
        self.form.set_user_score(value);
    }

    fn set_ai_confidence(&self, value: &str) {
        self.form.set_ai_confidence(value);
    }

    fn set_user_confidence(&self, value: &str) {
        self.form.set_user_confidence(value);
    }

    fn set_general_comment(&self, value: &str) {
        self.form.set_general_comment(value);
    }

    fn set_evaluation_details(&self, details: &EvaluationDetails) {
        self.form.set_evaluation_details(details);
    }

    fn show_evaluation_modal(&self) {
        self.form.show_evaluation_modal();
        self.print(&render_evaluation(&self.form.snapshot()));
    }
}

impl<W: Write + Send> Notifier for Console<W> {
    fn notify(&self, notification: Notification) {
        let label = match notification.kind {
            NotificationKind::Validation => "aviso",
            NotificationKind::Info => "servidor",
            NotificationKind::ServerError => "error",
            NotificationKind::Failure => "fallo",
        };
        self.print(&format!("[{}] {}", label, notification.message));
    }
}

pub fn render_evaluation(state: &FormState) -> String {
    let mut text = format!(
        "── Evaluación ──\n\
         Calificación IA:      {}\n\
         Calificación usuario: {}\n\
         Confianza IA:         {}\n\
         Confianza usuario:    {}\n\
         Comentario general:   {}",
        state.ai_score,
        state.user_score,
        state.ai_confidence,
        state.user_confidence,
        state.general_comment
    );

    let details = &state.evaluation_details;
    for (title, items) in [
        ("Fortalezas IA", &details.ai_strengths),
        ("Debilidades IA", &details.ai_weaknesses),
        ("Fortalezas usuario", &details.user_strengths),
        ("Debilidades usuario", &details.user_weaknesses),
    ] {
        if !items.is_empty() {
            text.push_str(&format!("\n{}:", title));
            for item in items {
                text.push_str(&format!("\n  - {}", item));
            }
        }
    }
    if let Some(recommendation) = &details.recommendation {
        text.push_str(&format!("\nRecomendación: {}", recommendation));
    }

    text
}

pub fn render_form(state: &FormState) -> String {
    let file = state
        .selected_file
        .as_ref()
        .map(|f| format!("{} ({} bytes)", f.file_name, f.len()))
        .unwrap_or_else(|| "(ninguno)".to_string());

    format!(
        "Archivo:   {}\nCaso:      {}\nRespuesta: {}\nAnálisis:  {}",
        file,
        or_dash(&state.case_text),
        or_dash(&state.user_response),
        or_dash(&state.analysis)
    )
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}

async fn select_file<W: Write + Send>(console: &Console<W>, path: &Path) {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let file = SelectedFile::new(file_name, bytes);
            console.print(&format!(
                "Archivo seleccionado: {} ({} bytes)",
                file.file_name,
                file.len()
            ));
            console.form().select_file(file);
        }
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            console.print(&format!("No se pudo leer {}: {}", path.display(), e));
        }
    }
}

/// Fires one handler as its own task; repeated presses overlap freely.
fn press<F, Fut>(tasks: &mut JoinSet<HandlerOutcome>, handlers: &Handlers, action: &'static str, f: F)
where
    F: FnOnce(Handlers) -> Fut,
    Fut: Future<Output = HandlerOutcome> + Send + 'static,
{
    debug!("Button pressed: {}", action);
    tasks.spawn(f(handlers.clone()));
}

/// Reads commands until `quit` or end of input, then waits for every request
/// still in flight so its result is shown before returning.
pub async fn run<R, W>(handlers: Handlers, console: Arc<Console<W>>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    info!("Session {} ready", handlers.session());
    console.print(&format!("Sesión: {}", handlers.session()));
    console.print(HELP);

    let mut tasks = JoinSet::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                console.print(&e.to_string());
                continue;
            }
        };

        match command {
            Command::SelectFile(path) => select_file(console.as_ref(), &path).await,
            Command::CaseText(text) => console.form().set_case_text(text),
            Command::UserResponse(text) => console.form().set_user_response(text),
            Command::Upload => press(&mut tasks, &handlers, "upload", |h| async move {
                h.upload().await
            }),
            Command::Analyze => press(&mut tasks, &handlers, "analyze", |h| async move {
                h.request_analysis().await
            }),
            Command::Evaluate => press(&mut tasks, &handlers, "evaluate", |h| async move {
                h.evaluate().await
            }),
            Command::Show => console.print(&render_form(&console.form().snapshot())),
            Command::Close => console.form().close_evaluation_modal(),
            Command::Help => console.print(HELP),
            Command::Quit => break,
            Command::Empty => {}
        }
    }

    if !tasks.is_empty() {
        info!("Waiting for {} pending request(s)", tasks.len());
    }
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => debug!("Request finished: {:?}", outcome),
            Err(e) => warn!("Request task ended abnormally: {}", e),
        }
    }

    info!("Leaving session {}", handlers.session());
    Ok(())
}
