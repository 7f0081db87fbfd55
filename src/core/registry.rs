//! Machine translator capability and the process-wide registry

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Language;

/// Fields shown by the host's configuration dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationForm {
    pub title: String,
    pub label: String,
    pub value: String,
    pub temporary: bool,
}

/// A machine-translation engine the host can query for segments
#[async_trait]
pub trait Translator: Send + Sync {
    /// Display name
    fn name(&self) -> String;

    /// Preference key enabling the engine
    fn preference_name(&self) -> &str;

    async fn translate(&self, source: &Language, target: &Language, text: &str) -> Result<String>;

    fn is_configurable(&self) -> bool {
        false
    }

    /// Current values for the configuration dialog
    async fn configuration_form(&self) -> Option<ConfigurationForm> {
        None
    }

    /// Confirm action of the configuration dialog
    async fn apply_configuration(&self, _value: &str, _temporary: bool) -> Result<()> {
        Err(TranslationError::ConfigError {
            message: format!("{} has no configuration", self.name()),
        })
    }
}

/// Registered translators with their enabled state
#[derive(Default)]
pub struct TranslatorRegistry {
    translators: RwLock<Vec<Arc<dyn Translator>>>,
    disabled: RwLock<HashSet<String>>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry for the whole process
    pub fn global() -> Arc<TranslatorRegistry> {
        static GLOBAL: OnceLock<Arc<TranslatorRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(TranslatorRegistry::new())).clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn Translator>>> {
        self.translators.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<dyn Translator>>> {
        self.translators.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a translator; registering the same instance twice is a no-op
    pub fn register(&self, translator: Arc<dyn Translator>) {
        let mut translators = self.write();
        if translators.iter().any(|t| Arc::ptr_eq(t, &translator)) {
            return;
        }
        info!("Registered machine translator {}", translator.name());
        translators.push(translator);
    }

    /// Remove a translator; returns whether it was registered
    pub fn unregister(&self, translator: &Arc<dyn Translator>) -> bool {
        let mut translators = self.write();
        let before = translators.len();
        translators.retain(|t| !Arc::ptr_eq(t, translator));
        let removed = translators.len() != before;
        if removed {
            info!("Unregistered machine translator {}", translator.name());
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All registered translators in registration order
    pub fn translators(&self) -> Vec<Arc<dyn Translator>> {
        self.read().clone()
    }

    /// Translators whose preference is not switched off
    pub fn enabled(&self) -> Vec<Arc<dyn Translator>> {
        let disabled = self.disabled.read().unwrap_or_else(|e| e.into_inner());
        self.read()
            .iter()
            .filter(|t| !disabled.contains(t.preference_name()))
            .cloned()
            .collect()
    }

    /// Find by preference name
    pub fn find(&self, preference_name: &str) -> Option<Arc<dyn Translator>> {
        self.read()
            .iter()
            .find(|t| t.preference_name() == preference_name)
            .cloned()
    }

    pub fn set_enabled(&self, preference_name: &str, enabled: bool) {
        let mut disabled = self.disabled.write().unwrap_or_else(|e| e.into_inner());
        if enabled {
            disabled.remove(preference_name);
        } else {
            disabled.insert(preference_name.to_string());
        }
    }

    pub fn is_enabled(&self, preference_name: &str) -> bool {
        let disabled = self.disabled.read().unwrap_or_else(|e| e.into_inner());
        !disabled.contains(preference_name)
    }
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// Startup and shutdown callbacks supplied by the host
#[derive(Default)]
pub struct ApplicationHooks {
    startup: Vec<Hook>,
    shutdown: Vec<Hook>,
}

impl ApplicationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_startup<F>(&mut self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.startup.push(Box::new(hook));
    }

    pub fn on_shutdown<F>(&mut self, hook: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.shutdown.push(Box::new(hook));
    }

    /// Run startup callbacks in registration order
    pub fn startup(&self) {
        for hook in &self.startup {
            hook();
        }
    }

    /// Run shutdown callbacks in reverse registration order
    pub fn shutdown(&self) {
        for hook in self.shutdown.iter().rev() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo {
        preference: &'static str,
    }

    #[async_trait]
    impl Translator for Echo {
        fn name(&self) -> String {
            format!("Echo ({})", self.preference)
        }

        fn preference_name(&self) -> &str {
            self.preference
        }

        async fn translate(&self, _: &Language, _: &Language, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    fn echo(preference: &'static str) -> Arc<dyn Translator> {
        Arc::new(Echo { preference })
    }

    #[test]
    fn test_register_unregister() {
        let registry = TranslatorRegistry::new();
        let first = echo("allow_first");
        let second = echo("allow_second");

        registry.register(first.clone());
        registry.register(first.clone());
        registry.register(second.clone());
        assert_eq!(registry.len(), 2);
        assert!(registry.find("allow_second").is_some());

        assert!(registry.unregister(&first));
        assert!(!registry.unregister(&first));
        assert_eq!(registry.len(), 1);
        assert!(registry.find("allow_first").is_none());
    }

    #[test]
    fn test_enabled_filter() {
        let registry = TranslatorRegistry::new();
        registry.register(echo("allow_a"));
        registry.register(echo("allow_b"));

        registry.set_enabled("allow_a", false);
        let enabled = registry.enabled();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].preference_name(), "allow_b");
        assert!(!registry.is_enabled("allow_a"));

        registry.set_enabled("allow_a", true);
        assert_eq!(registry.enabled().len(), 2);
    }

    #[test]
    fn test_default_configuration() {
        let translator = echo("allow_echo");
        assert!(!translator.is_configurable());
        assert!(tokio_test::block_on(translator.configuration_form()).is_none());
        assert!(tokio_test::block_on(translator.apply_configuration("x", false)).is_err());
    }

    #[test]
    fn test_hooks_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut hooks = ApplicationHooks::new();

        let c = counter.clone();
        hooks.on_startup(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = counter.clone();
        hooks.on_shutdown(move || {
            c.fetch_sub(1, Ordering::SeqCst);
        });

        hooks.startup();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        hooks.shutdown();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
