//! Main entry point for the Yandex translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yandex_translator::cli::commands::{self, Commands};
use yandex_translator::{
    load_plugins, unload_plugins, ApplicationHooks, TranslatorConfig, TranslatorRegistry,
    YandexTranslator,
};

/// Yandex Translate machine translator with a translation cache
#[derive(Parser, Debug)]
#[command(name = "yandex-translator", version, about, long_about = None)]
struct Args {
    /// JSON configuration file (defaults to environment variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File storing the API key
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("yandex_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = TranslatorConfig::load(args.config.as_deref())?;
    if let Some(credentials) = args.credentials {
        config.credentials_path = Some(credentials);
    }

    let translator = YandexTranslator::new(config)?;
    let registry = TranslatorRegistry::global();
    let mut hooks = ApplicationHooks::new();
    load_plugins(&mut hooks, registry.clone(), translator);
    hooks.startup();

    // Execute command
    let result = match args.command {
        Some(Commands::Translate {
            texts,
            source_lang,
            target_lang,
        }) => commands::handle_translate(registry, texts, source_lang, target_lang).await,
        Some(Commands::SetKey { key, temporary }) => {
            commands::handle_set_key(registry, key, temporary).await
        }
        Some(Commands::ShowConfig) => commands::handle_show_config(registry).await,
        None => {
            println!("Please specify a command. Use --help for more information.");
            Ok(())
        }
    };

    hooks.shutdown();
    unload_plugins();

    result
}
