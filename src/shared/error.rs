use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("Window Error: {0}")]
    Window(String),

    /// The popup window was destroyed between trigger and execution.
    #[error("Window is no longer available")]
    WindowGone,

    #[error("Settings Error: {0}")]
    Settings(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Translation Error: {0}")]
    Translation(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_tagged_message() {
        let json = serde_json::to_value(AppError::Network("timed out".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Network", "message": "timed out" }));
    }

    #[test]
    fn io_errors_convert() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(msg) if msg.contains("gone")));
    }
}
