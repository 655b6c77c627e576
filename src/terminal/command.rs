use std::path::PathBuf;
use thiserror::Error;

pub const HELP: &str = "\
Comandos:
  file <ruta>        selecciona el PDF de la norma
  case <texto>       escribe el caso práctico
  response <texto>   escribe tu análisis propio
  upload             sube el PDF seleccionado
  analyze            pide el análisis del caso
  evaluate           evalúa tu análisis frente al generado
  show               muestra el formulario
  close              cierra la ventana de evaluación
  help               muestra esta ayuda
  quit               sale";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectFile(PathBuf),
    CaseText(String),
    UserResponse(String),
    Upload,
    Analyze,
    Evaluate,
    Show,
    Close,
    Help,
    Quit,
    Empty,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Comando desconocido '{0}', escribe 'help'")]
    Unknown(String),

    #[error("'{0}' necesita un argumento")]
    MissingArgument(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Self::Empty);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "file" if rest.is_empty() => Err(CommandError::MissingArgument("file")),
            "file" => Ok(Self::SelectFile(PathBuf::from(rest))),
            // Blank text is accepted here so the handler's own check reports it.
            "case" => Ok(Self::CaseText(rest.to_string())),
            "response" => Ok(Self::UserResponse(rest.to_string())),
            "upload" => Ok(Self::Upload),
            "analyze" => Ok(Self::Analyze),
            "evaluate" => Ok(Self::Evaluate),
            "show" => Ok(Self::Show),
            "close" => Ok(Self::Close),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
