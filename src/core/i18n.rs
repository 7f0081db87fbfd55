//! Localized user-facing messages
//!
//! Messages are looked up by symbolic key in the catalog of the selected
//! locale. Missing entries fall back to English, then to the key itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported message locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Parse a locale value such as `ru`, `ru-RU` or `ru_RU.UTF-8`
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Locale::En),
            "ru" => Some(Locale::Ru),
            _ => None,
        }
    }

    /// Locale of the process environment, English when unknown
    pub fn from_env() -> Self {
        std::env::var("LANG")
            .ok()
            .and_then(|lang| Self::parse(&lang))
            .unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CATALOG_EN: &[(&str, &str)] = &[
    ("MT_ENGINE_YANDEX", "Yandex Translate (caching)"),
    ("MT_ENGINE_YANDEX_API_KEY_LABEL", "API key:"),
    ("MT_ENGINE_YANDEX_INVALID_KEY", "Invalid API key"),
    ("MT_ENGINE_YANDEX_API_BLOCKED", "This API key has been blocked"),
    (
        "MT_ENGINE_YANDEX_DAILY_LIMIT_DETECT",
        "Daily limit on the number of requests exceeded",
    ),
    (
        "MT_ENGINE_YANDEX_DAILY_LIMIT_VOLUME",
        "Daily limit on the volume of translated text exceeded",
    ),
    ("MT_ENGINE_YANDEX_MAZ_SIZE", "Maximum text size exceeded"),
    (
        "MT_ENGINE_YANDEX_TRANSLATION_NOT_POSSIBLE",
        "The text cannot be translated",
    ),
    (
        "MT_ENGINE_YANDEX_DIRECTION_NOT_SUPPORTED",
        "The specified translation direction is not supported",
    ),
];

const CATALOG_RU: &[(&str, &str)] = &[
    ("MT_ENGINE_YANDEX", "Яндекс.Переводчик (с кэшем)"),
    ("MT_ENGINE_YANDEX_API_KEY_LABEL", "Ключ API:"),
    ("MT_ENGINE_YANDEX_INVALID_KEY", "Неправильный ключ API"),
    ("MT_ENGINE_YANDEX_API_BLOCKED", "Ключ API заблокирован"),
    (
        "MT_ENGINE_YANDEX_DAILY_LIMIT_DETECT",
        "Превышено суточное ограничение на количество запросов",
    ),
    (
        "MT_ENGINE_YANDEX_DAILY_LIMIT_VOLUME",
        "Превышено суточное ограничение на объем переведенного текста",
    ),
    ("MT_ENGINE_YANDEX_MAZ_SIZE", "Превышен максимально допустимый размер текста"),
    (
        "MT_ENGINE_YANDEX_TRANSLATION_NOT_POSSIBLE",
        "Текст не может быть переведен",
    ),
    (
        "MT_ENGINE_YANDEX_DIRECTION_NOT_SUPPORTED",
        "Заданное направление перевода не поддерживается",
    ),
];

/// Message catalog bound to one locale
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    locale: Locale,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up `key`
    pub fn get(&self, key: &str) -> String {
        lookup(table(self.locale), key)
            .or_else(|| lookup(CATALOG_EN, key))
            .unwrap_or(key)
            .to_string()
    }
}

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ru => CATALOG_RU,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("ru_RU.UTF-8"), Some(Locale::Ru));
        assert_eq!(Locale::parse("EN-gb"), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn test_catalog_lookup() {
        let en = Catalog::new(Locale::En);
        let ru = Catalog::new(Locale::Ru);

        assert_eq!(en.get("MT_ENGINE_YANDEX_INVALID_KEY"), "Invalid API key");
        assert_eq!(ru.get("MT_ENGINE_YANDEX_INVALID_KEY"), "Неправильный ключ API");
    }

    #[test]
    fn test_catalog_fallback_to_key() {
        let catalog = Catalog::new(Locale::Ru);
        assert_eq!(catalog.get("NO_SUCH_KEY"), "NO_SUCH_KEY");
    }

    #[test]
    fn test_catalogs_cover_same_keys() {
        for (key, _) in CATALOG_EN {
            assert!(lookup(CATALOG_RU, key).is_some(), "missing ru entry for {}", key);
        }
    }
}
