//! Yandex Translate client with translation cache

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::cache::{MemoryCache, TranslationCache};
use crate::core::config::TranslatorConfig;
use crate::core::credentials::{CredentialStore, PreferenceCredentials};
use crate::core::errors::{Result, TranslationError};
use crate::core::i18n::Catalog;
use crate::core::interpreter::{interpret, Interpretation};
use crate::core::models::{Language, TranslationRequest, TranslationResponse};
use crate::core::registry::{ConfigurationForm, Translator};
use crate::core::transport::{HttpPost, ReqwestTransport};

/// Credential holding the API key
pub const PROPERTY_API_KEY: &str = "yandex.api.key";

/// Preference toggling the engine on or off in the host
pub const PREFERENCE_NAME: &str = "allow_yandex_translate";

/// Yandex Translate machine translator
#[derive(Clone)]
pub struct YandexTranslator {
    config: Arc<TranslatorConfig>,
    transport: Arc<dyn HttpPost>,
    cache: Arc<dyn TranslationCache>,
    credentials: Arc<dyn CredentialStore>,
    catalog: Catalog,
}

impl fmt::Debug for YandexTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YandexTranslator")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl YandexTranslator {
    /// Create a translator with the `reqwest` transport and an in-memory cache
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let transport = Arc::new(ReqwestTransport::new(&config)?);
        let credentials: Arc<dyn CredentialStore> = match &config.credentials_path {
            Some(path) => Arc::new(PreferenceCredentials::open(path)?),
            None => Arc::new(PreferenceCredentials::new()),
        };

        Ok(Self::with_parts(
            config,
            transport,
            Arc::new(MemoryCache::new()),
            credentials,
        ))
    }

    /// Create from injected collaborators
    pub fn with_parts(
        config: TranslatorConfig,
        transport: Arc<dyn HttpPost>,
        cache: Arc<dyn TranslationCache>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let catalog = Catalog::new(config.locale);
        Self {
            config: Arc::new(config),
            transport,
            cache,
            credentials,
            catalog,
        }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Translate `text`.
    ///
    /// Returns an empty string when no API key is configured and a
    /// code-prefixed message when the service rejects the request. Transport
    /// failures and unreadable responses are errors.
    pub async fn translate(
        &self,
        source: &Language,
        target: &Language,
        text: &str,
    ) -> Result<String> {
        let api_key = self.credentials.get_credential(PROPERTY_API_KEY).await;
        if api_key.is_empty() {
            debug!("No API key configured, skipping translation");
            return Ok(String::new());
        }

        let request = TranslationRequest::new(source, target, text, api_key)?;
        let key = request.cache_key();

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        debug!(
            "Requesting {} translation of {} chars",
            request.direction(),
            request.text().chars().count()
        );
        let response = self.request_translate(&request).await?;

        match interpret(&response, &self.catalog)? {
            Interpretation::Translated(translation) => {
                if translation.is_empty() {
                    warn!("Response for {} carried no translation", request.direction());
                } else {
                    self.cache.put(key, translation.clone()).await;
                }
                Ok(translation)
            }
            Interpretation::Rejected(message) => Ok(message),
        }
    }

    /// POST the request; a status error becomes a body-less response
    pub async fn request_translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse> {
        match self
            .transport
            .post(&self.config.api_endpoint, &request.params())
            .await
        {
            Ok(body) => Ok(TranslationResponse::ok(body)),
            Err(TranslationError::ResponseError { code, message }) => {
                debug!("Service answered {}: {}", code, message);
                Ok(TranslationResponse::failed(code))
            }
            Err(e) => Err(e),
        }
    }

    /// Store the API key, as confirmed in the configuration form
    pub async fn set_api_key(&self, key: &str, temporary: bool) -> Result<()> {
        self.credentials
            .set_credential(PROPERTY_API_KEY, key.trim(), temporary)
            .await?;
        info!("Yandex API key updated");
        Ok(())
    }
}

#[async_trait]
impl Translator for YandexTranslator {
    fn name(&self) -> String {
        self.catalog.get("MT_ENGINE_YANDEX")
    }

    fn preference_name(&self) -> &str {
        PREFERENCE_NAME
    }

    async fn translate(&self, source: &Language, target: &Language, text: &str) -> Result<String> {
        YandexTranslator::translate(self, source, target, text).await
    }

    fn is_configurable(&self) -> bool {
        true
    }

    async fn configuration_form(&self) -> Option<ConfigurationForm> {
        Some(ConfigurationForm {
            title: self.name(),
            label: self.catalog.get("MT_ENGINE_YANDEX_API_KEY_LABEL"),
            value: self.credentials.get_credential(PROPERTY_API_KEY).await,
            temporary: self
                .credentials
                .is_credential_stored_temporarily(PROPERTY_API_KEY)
                .await,
        })
    }

    async fn apply_configuration(&self, value: &str, temporary: bool) -> Result<()> {
        self.set_api_key(value, temporary).await
    }
}
