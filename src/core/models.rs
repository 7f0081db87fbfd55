//! Core data models for translation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::errors::{Result, TranslationError};

/// Longest text, in characters, sent to the service unchanged
pub const MAX_TEXT_CHARS: usize = 9999;

/// Appended to text cut at [`MAX_TEXT_CHARS`] (U+2026 HORIZONTAL ELLIPSIS)
pub const TRUNCATION_MARKER: char = '\u{2026}';

/// Language as named by the host, e.g. `en`, `en-US`, `pt_BR`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    tag: String,
}

impl Language {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Full tag as given
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Lowercased two-letter code used on the wire
    pub fn code(&self) -> Result<String> {
        let code: String = self.tag.trim().chars().take(2).collect();
        if code.chars().count() < 2 {
            return Err(TranslationError::InvalidLanguage {
                tag: self.tag.clone(),
            });
        }
        Ok(code.to_lowercase())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

impl From<&str> for Language {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Status codes documented by the translation service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Ok,
    KeyInvalid,
    KeyBlocked,
    DailyReqLimitExceeded,
    DailyCharLimitExceeded,
    TextTooLong,
    UnprocessableText,
    LangNotSupported,
    Other(u16),
}

impl ResponseCode {
    pub fn as_u16(self) -> u16 {
        match self {
            ResponseCode::Ok => 200,
            ResponseCode::KeyInvalid => 401,
            ResponseCode::KeyBlocked => 402,
            ResponseCode::DailyReqLimitExceeded => 403,
            ResponseCode::DailyCharLimitExceeded => 404,
            ResponseCode::TextTooLong => 413,
            ResponseCode::UnprocessableText => 422,
            ResponseCode::LangNotSupported => 501,
            ResponseCode::Other(code) => code,
        }
    }

    /// Catalog key of the message shown for a rejection
    pub fn message_key(self) -> Option<&'static str> {
        match self {
            ResponseCode::KeyInvalid => Some("MT_ENGINE_YANDEX_INVALID_KEY"),
            ResponseCode::KeyBlocked => Some("MT_ENGINE_YANDEX_API_BLOCKED"),
            ResponseCode::DailyReqLimitExceeded => Some("MT_ENGINE_YANDEX_DAILY_LIMIT_DETECT"),
            ResponseCode::DailyCharLimitExceeded => Some("MT_ENGINE_YANDEX_DAILY_LIMIT_VOLUME"),
            ResponseCode::TextTooLong => Some("MT_ENGINE_YANDEX_MAZ_SIZE"),
            ResponseCode::UnprocessableText => Some("MT_ENGINE_YANDEX_TRANSLATION_NOT_POSSIBLE"),
            ResponseCode::LangNotSupported => Some("MT_ENGINE_YANDEX_DIRECTION_NOT_SUPPORTED"),
            ResponseCode::Ok | ResponseCode::Other(_) => None,
        }
    }
}

impl From<u16> for ResponseCode {
    fn from(code: u16) -> Self {
        match code {
            200 => ResponseCode::Ok,
            401 => ResponseCode::KeyInvalid,
            402 => ResponseCode::KeyBlocked,
            403 => ResponseCode::DailyReqLimitExceeded,
            404 => ResponseCode::DailyCharLimitExceeded,
            413 => ResponseCode::TextTooLong,
            422 => ResponseCode::UnprocessableText,
            501 => ResponseCode::LangNotSupported,
            other => ResponseCode::Other(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Cut `text` to [`MAX_TEXT_CHARS`] characters plus the truncation marker
pub fn truncate_text(text: &str) -> String {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => {
            let mut short = String::with_capacity(cut + TRUNCATION_MARKER.len_utf8());
            short.push_str(&text[..cut]);
            short.push(TRUNCATION_MARKER);
            short
        }
        None => text.to_string(),
    }
}

/// Translation request, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_lang: String,
    target_lang: String,
    text: String,
    api_key: String,
}

impl TranslationRequest {
    /// Build a request; `text` is truncated here
    pub fn new(
        source: &Language,
        target: &Language,
        text: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            source_lang: source.code()?,
            target_lang: target.code()?,
            text: truncate_text(text),
            api_key: api_key.into(),
        })
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language direction, `"<src>-<tgt>"`
    pub fn direction(&self) -> String {
        format!("{}-{}", self.source_lang, self.target_lang)
    }

    /// Form parameters posted to the service
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("key".to_string(), self.api_key.clone());
        params.insert("lang".to_string(), self.direction());
        params.insert("text".to_string(), self.text.clone());
        params
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey {
            source_lang: self.source_lang.clone(),
            target_lang: self.target_lang.clone(),
            text: self.text.clone(),
        }
    }
}

/// Outcome of one POST, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub status_code: u16,
    /// Absent when the transport reported an error status
    pub raw_body: Option<String>,
}

impl TranslationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: ResponseCode::Ok.as_u16(),
            raw_body: Some(body.into()),
        }
    }

    pub fn failed(status_code: u16) -> Self {
        Self {
            status_code,
            raw_body: None,
        }
    }

    pub fn code(&self) -> ResponseCode {
        ResponseCode::from(self.status_code)
    }
}

/// Translation cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub source_lang: String,
    pub target_lang: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code() {
        assert_eq!(Language::new("en").code().unwrap(), "en");
        assert_eq!(Language::new("EN-us").code().unwrap(), "en");
        assert_eq!(Language::new("pt_BR").code().unwrap(), "pt");
        assert!(Language::new("e").code().is_err());
        assert!(Language::new("").code().is_err());
    }

    #[test]
    fn test_short_text_unchanged() {
        let text = "a".repeat(MAX_TEXT_CHARS);
        assert_eq!(truncate_text(&text), text);
        assert_eq!(truncate_text(""), "");
    }

    #[test]
    fn test_long_text_truncated() {
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        let short = truncate_text(&text);
        assert_eq!(short.chars().count(), MAX_TEXT_CHARS + 1);
        assert!(short.ends_with(TRUNCATION_MARKER));
        assert_eq!(&short[..MAX_TEXT_CHARS], &text[..MAX_TEXT_CHARS]);
    }

    #[test]
    fn test_truncation_counts_characters() {
        let text = "ж".repeat(20_000);
        let short = truncate_text(&text);
        assert_eq!(short.chars().count(), MAX_TEXT_CHARS + 1);
        assert!(short.chars().take(MAX_TEXT_CHARS).all(|c| c == 'ж'));
    }

    #[test]
    fn test_request_params() {
        let request =
            TranslationRequest::new(&"en-US".into(), &"FR".into(), "hello", "secret").unwrap();
        let params = request.params();

        assert_eq!(params["key"], "secret");
        assert_eq!(params["lang"], "en-fr");
        assert_eq!(params["text"], "hello");
        assert_eq!(request.cache_key(), CacheKey::new("en", "fr", "hello"));
    }

    #[test]
    fn test_response_codes() {
        assert_eq!(ResponseCode::from(401), ResponseCode::KeyInvalid);
        assert_eq!(ResponseCode::from(501), ResponseCode::LangNotSupported);
        assert_eq!(ResponseCode::from(500), ResponseCode::Other(500));
        assert_eq!(ResponseCode::Other(500).message_key(), None);
        assert_eq!(TranslationResponse::failed(413).code(), ResponseCode::TextTooLong);
    }
}
