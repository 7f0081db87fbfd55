//! CLI command definitions and handlers

use clap::Subcommand;
use std::io::Read;
use std::sync::Arc;
use tracing::info;

use crate::core::client::PREFERENCE_NAME;
use crate::core::models::Language;
use crate::core::registry::TranslatorRegistry;

/// Commands for the Yandex translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text segments (reads stdin when none are given)
    Translate {
        /// Segments to translate
        texts: Vec<String>,

        /// Source language
        #[arg(short, long, default_value = "en")]
        source_lang: String,

        /// Target language
        #[arg(short, long)]
        target_lang: String,
    },

    /// Store the API key
    SetKey {
        /// API key issued by Yandex
        key: String,

        /// Keep the key for this session only
        #[arg(long)]
        temporary: bool,
    },

    /// Show the configuration form values
    ShowConfig,
}

/// Handle translate command
pub async fn handle_translate(
    registry: Arc<TranslatorRegistry>,
    texts: Vec<String>,
    source_lang: String,
    target_lang: String,
) -> anyhow::Result<()> {
    let texts = if texts.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.lines().map(str::to_string).filter(|l| !l.is_empty()).collect()
    } else {
        texts
    };

    if texts.is_empty() {
        anyhow::bail!("Nothing to translate");
    }

    let translators = registry.enabled();
    if translators.is_empty() {
        anyhow::bail!("No machine translator is enabled");
    }

    let source = Language::new(source_lang);
    let target = Language::new(target_lang);
    info!("Translating {} segments {} -> {}", texts.len(), source, target);

    for translator in translators {
        println!("== {}", translator.name());
        for text in &texts {
            let translation = translator.translate(&source, &target, text).await?;
            if translation.is_empty() {
                println!("{}\t(no translation)", text);
            } else {
                println!("{}\t{}", text, translation);
            }
        }
    }

    Ok(())
}

/// Handle set-key command
pub async fn handle_set_key(
    registry: Arc<TranslatorRegistry>,
    key: String,
    temporary: bool,
) -> anyhow::Result<()> {
    let translator = registry
        .find(PREFERENCE_NAME)
        .ok_or_else(|| anyhow::anyhow!("Yandex translator is not registered"))?;

    translator.apply_configuration(&key, temporary).await?;

    if temporary {
        println!("✅ API key stored for this session");
    } else {
        println!("✅ API key saved");
    }

    Ok(())
}

/// Handle show-config command
pub async fn handle_show_config(registry: Arc<TranslatorRegistry>) -> anyhow::Result<()> {
    for translator in registry.translators() {
        let state = if registry.is_enabled(translator.preference_name()) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{} [{}]", translator.name(), state);

        if let Some(form) = translator.configuration_form().await {
            let shown = if form.value.is_empty() {
                "(not set)".to_string()
            } else {
                mask(&form.value)
            };
            println!("   {} {}", form.label, shown);
            println!("   Temporary: {}", form.temporary);
        }
    }

    Ok(())
}

/// Hide all but the last four characters
fn mask(value: &str) -> String {
    let count = value.chars().count();
    let visible: String = value.chars().skip(count.saturating_sub(4)).collect();
    format!("{}{}", "*".repeat(count.saturating_sub(4)), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefgh"), "****efgh");
        assert_eq!(mask("abc"), "abc");
    }
}
