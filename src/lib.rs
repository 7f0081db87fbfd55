//! Yandex Translate - machine-translation plugin library
//!
//! This library forwards text segments to the Yandex Translate XML API,
//! turns service status codes into localized messages, and caches results
//! per language pair and text.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod plugin;

// Re-export key types for convenience
pub use core::{
    cache::{MemoryCache, TranslationCache},
    client::YandexTranslator,
    config::TranslatorConfig,
    credentials::{CredentialStore, PreferenceCredentials},
    errors::TranslationError,
    i18n::{Catalog, Locale},
    interpreter::{interpret, Interpretation},
    models::{CacheKey, Language, ResponseCode, TranslationRequest, TranslationResponse},
    registry::{ApplicationHooks, ConfigurationForm, Translator, TranslatorRegistry},
    transport::{HttpPost, ReqwestTransport},
};

pub use plugin::{load_plugins, unload_plugins};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
