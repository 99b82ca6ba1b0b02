use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use statusboard::application::config::AppConfig;
use statusboard::domain::ports::notifier::Notifier;
use statusboard::infrastructure::i18n::{Language, StaticTranslator};
use statusboard::infrastructure::notifications::composite::CompositeNotifier;
use statusboard::infrastructure::notifications::log_file::LogFileNotifier;
use statusboard::infrastructure::notifications::terminal::TerminalNotifier;
use statusboard::infrastructure::notifications::webhook::WebhookNotifier;
use statusboard::infrastructure::persistence::sqlite_store::SqliteStore;
use statusboard::presentation::cli::app::{Cli, Commands};
use statusboard::presentation::cli::commands::component::run_component;
use statusboard::presentation::cli::commands::group::run_group;
use statusboard::presentation::cli::commands::status::run_status;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_notifier(config: &AppConfig) -> CompositeNotifier {
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if config.notifications.terminal {
        notifiers.push(Box::new(TerminalNotifier::new()));
    }
    if let Some(ref path) = config.notifications.log_file {
        notifiers.push(Box::new(LogFileNotifier::new(path)));
    }
    if let Some(ref url) = config.notifications.webhook_url {
        match WebhookNotifier::new(url.clone()) {
            Ok(webhook) => notifiers.push(Box::new(webhook)),
            Err(e) => tracing::warn!("Webhook disabled: {e}"),
        }
    }
    let composite = CompositeNotifier::new(notifiers);
    if composite.is_empty() {
        tracing::info!("No notification channel configured; group events are not published");
    } else {
        tracing::debug!("{} notification channel(s) active", composite.len());
    }
    composite
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = AppConfig::resolve(cli.config.as_deref())?;

    // Manual DI: main.rs is the only place that knows concrete types
    let store = SqliteStore::new(&config.database.path).with_context(|| {
        format!("Failed to open database at {}", config.database.path)
    })?;
    let translator = StaticTranslator::new(Language::from_code(&config.general.language));
    let notifier = build_notifier(&config);

    match cli.command {
        Some(Commands::Status { json, group }) => run_status(&store, &translator, group, json)?,
        None => run_status(&store, &translator, None, false)?,
        Some(Commands::Group { action }) => run_group(&store, &notifier, action)?,
        Some(Commands::Component { action }) => run_component(&store, &translator, action)?,
    }

    Ok(())
}
