use serde::Serialize;

/// One dispatched translation, immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    /// Monotonically increasing; higher numbers supersede lower ones.
    pub seq: u64,
    pub source_text: String,
    pub target_languages: Vec<String>,
}

impl TranslationRequest {
    /// Whether this request translates exactly `source_text` into `target_languages`.
    pub fn same_work(&self, source_text: &str, target_languages: &[String]) -> bool {
        self.source_text == source_text && self.target_languages == target_languages
    }
}

/// Outcome of every call of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value")]
pub enum TranslationResult {
    /// Same order and length as the request's target languages.
    Success(Vec<String>),
    Failure(String),
}
