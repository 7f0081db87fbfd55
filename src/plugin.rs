//! Plugin entry points wiring the translator into host lifecycle hooks

use std::sync::Arc;
use tracing::info;

use crate::core::client::{YandexTranslator, PREFERENCE_NAME};
use crate::core::registry::{ApplicationHooks, Translator, TranslatorRegistry};

/// Register `translator` in `registry` on startup and remove it on shutdown
pub fn load_plugins(
    hooks: &mut ApplicationHooks,
    registry: Arc<TranslatorRegistry>,
    translator: YandexTranslator,
) {
    let enabled = translator.config().enabled;
    let translator: Arc<dyn Translator> = Arc::new(translator);

    let on_startup = {
        let registry = registry.clone();
        let translator = translator.clone();
        move || {
            registry.register(translator.clone());
            registry.set_enabled(PREFERENCE_NAME, enabled);
        }
    };

    let on_shutdown = move || {
        registry.unregister(&translator);
    };

    hooks.on_startup(on_startup);
    hooks.on_shutdown(on_shutdown);
    info!("Yandex translator plugin loaded");
}

/// Counterpart of [`load_plugins`]; hooks already handle removal
pub fn unload_plugins() {
    info!("Yandex translator plugin unloaded");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::MemoryCache;
    use crate::core::client::tests::MockTransport;
    use crate::core::config::TranslatorConfig;
    use crate::core::credentials::PreferenceCredentials;

    fn translator(enabled: bool) -> YandexTranslator {
        let config = TranslatorConfig {
            enabled,
            ..Default::default()
        };
        YandexTranslator::with_parts(
            config,
            MockTransport::replying(""),
            Arc::new(MemoryCache::new()),
            Arc::new(PreferenceCredentials::new().with_env_lookup(|_| None)),
        )
    }

    #[test]
    fn test_lifecycle() {
        let registry = Arc::new(TranslatorRegistry::new());
        let mut hooks = ApplicationHooks::new();

        load_plugins(&mut hooks, registry.clone(), translator(true));
        assert!(registry.is_empty());

        hooks.startup();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.enabled().len(), 1);
        assert!(registry.find(PREFERENCE_NAME).unwrap().is_configurable());

        hooks.shutdown();
        assert!(registry.is_empty());
        unload_plugins();
    }

    #[test]
    fn test_disabled_by_config() {
        let registry = Arc::new(TranslatorRegistry::new());
        let mut hooks = ApplicationHooks::new();

        load_plugins(&mut hooks, registry.clone(), translator(false));
        hooks.startup();

        assert_eq!(registry.len(), 1);
        assert!(registry.enabled().is_empty());
    }
}
