//! Translation service adapter.
//!
//! [`Translator`] is the seam between catalog operations and the remote
//! service. [`GoogleTranslator`] talks to the Google Cloud Translation v2 REST
//! API; tests plug in scripted fakes.

use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::{Fill, TranslationFailurePolicy};

/// Every way a translation request can fail.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

pub trait Translator {
    fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> impl Future<Output = Result<String, TranslationError>>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Client for the Google Cloud Translation v2 API.
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GoogleTranslator {
    /// Build a client; the key is looked up in `api_key_env` now, but a
    /// missing key only fails once a translation is requested.
    pub fn new(
        endpoint: &str,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::with_key(endpoint, api_key, api_key_env, timeout)
    }

    fn with_key(
        endpoint: &str,
        api_key: Option<String>,
        api_key_env: &str,
        timeout: Duration,
    ) -> Result<Self, TranslationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
            api_key_env: api_key_env.to_string(),
        })
    }
}

impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Result<String, TranslationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TranslationError::MissingApiKey(self.api_key_env.clone()))?;

        let request = TranslateRequest {
            q: text,
            source: source_language,
            target: target_language,
            format: "text",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_translation(&body)
    }
}

fn parse_translation(body: &str) -> Result<String, TranslationError> {
    let response: TranslateResponse = serde_json::from_str(body)
        .map_err(|err| TranslationError::MalformedResponse(err.to_string()))?;
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|translation| translation.translated_text)
        .ok_or_else(|| TranslationError::MalformedResponse("no translations returned".into()))
}

/// Produce the value for `key` in `target_language` from its source value.
///
/// Strings are translated; anything else is copied. On failure the policy
/// decides between keeping the source text and returning the error.
pub(crate) async fn fill_value<T: Translator>(
    translator: &T,
    key: &str,
    source: &Value,
    target_language: &str,
    source_language: &str,
    policy: TranslationFailurePolicy,
) -> Result<(Value, Fill), TranslationError> {
    let Value::String(text) = source else {
        return Ok((source.clone(), Fill::Copied));
    };

    match translator
        .translate(text, target_language, source_language)
        .await
    {
        Ok(translated) => {
            debug!(key, target_language, %text, %translated, "translated");
            Ok((Value::String(translated), Fill::Translated))
        }
        Err(err) => match policy {
            TranslationFailurePolicy::Fallback => {
                warn!(key, target_language, error = %err, "translation failed, keeping source text");
                Ok((
                    source.clone(),
                    Fill::Fallback {
                        reason: err.to_string(),
                    },
                ))
            }
            TranslationFailurePolicy::Abort => Err(err),
        },
    }
}
