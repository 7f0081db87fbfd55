//! HTTP POST primitive used by the translation client

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};

/// Form POST returning the response body.
///
/// Non-2xx responses must be reported as
/// [`TranslationError::ResponseError`] carrying the numeric status.
#[async_trait]
pub trait HttpPost: Send + Sync {
    async fn post(&self, url: &str, params: &BTreeMap<String, String>) -> Result<String>;
}

/// [`HttpPost`] over a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the client from timeout and user agent settings
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpPost for ReqwestTransport {
    async fn post(&self, url: &str, params: &BTreeMap<String, String>) -> Result<String> {
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::TimeoutError
                } else {
                    TranslationError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        debug!("POST {} -> {}", url, status);

        if status.is_success() {
            response.text().await.map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TranslationError::ResponseError {
                code: status.as_u16(),
                message,
            })
        }
    }
}
