//! Google Translate backend
//!
//! Uses the unofficial `translate_a/single` endpoint (client=gtx), which needs
//! no API key and answers with nested arrays of translated segments.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::Translator;
use crate::shared::error::{AppError, AppResult};

pub struct GoogleTranslator {
    http: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        // One pooled client per translator: calls reuse kept-alive connections.
        let http = Client::builder()
            .user_agent("Mozilla/5.0")
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    fn request_url(&self, text: &str, target_lang: &str) -> String {
        format!(
            "{}?client=gtx&sl=auto&tl={}&dt=t&q={}",
            self.endpoint,
            urlencoding::encode(target_lang),
            urlencoding::encode(text)
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> AppResult<String> {
        let response = self
            .http
            .get(self.request_url(text, target_lang))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Translation API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Translation API error: {}",
                response.status()
            )));
        }

        let json = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::Translation(format!("Failed to parse translation API response: {}", e)))?;

        join_segments(&json)
    }
}

/// Concatenates the translated fragments found at `json[0][*][0]`.
pub(crate) fn join_segments(json: &serde_json::Value) -> AppResult<String> {
    let segments = json
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::Translation("Unexpected translation response shape".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect())
}
