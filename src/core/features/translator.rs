//! Translator feature
//!
//! Turns settled source text into one translation per target language.
//!
//! - `types`: request/result values correlated by sequence number
//! - `service`: the remote translation backend
//! - `dispatcher`: debounce, fan-out and last-request-wins delivery

pub mod dispatcher;
pub mod service;
pub mod types;

pub use dispatcher::{DispatchInput, DispatcherConfig, DispatcherHandle, TranslationDispatcher};
pub use service::GoogleTranslator;
pub use types::{TranslationRequest, TranslationResult};

use async_trait::async_trait;

use crate::shared::error::AppResult;

/// Remote text translation. Calls are treated as idempotent and side-effect free.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> AppResult<String>;
}
