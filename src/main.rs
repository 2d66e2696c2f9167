//! Decision Desk terminal entry point.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use decision_desk::adapters::{
    Console, FileStore, InMemoryStore, MarkerDocument, TerminalScreens,
};
use decision_desk::application::{install_panic_hook, App};
use decision_desk::config::{
    AppConfig, LogFormat, LoggingConfig, StorageBackend, StorageConfig,
};
use decision_desk::ports::{DecisionHistory, PreferenceStore};

/// Logs go to stderr; stdout carries the rendered screens.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn open_storage(
    storage: &StorageConfig,
) -> (Arc<dyn PreferenceStore>, Arc<dyn DecisionHistory>) {
    match storage.backend {
        StorageBackend::File => {
            let store = Arc::new(FileStore::new(&storage.data_dir));
            info!(data_dir = %store.base_path().display(), "using file storage");
            let preferences: Arc<dyn PreferenceStore> = store.clone();
            let history: Arc<dyn DecisionHistory> = store;
            (preferences, history)
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; nothing will be persisted");
            let store = Arc::new(InMemoryStore::new());
            let preferences: Arc<dyn PreferenceStore> = store.clone();
            let history: Arc<dyn DecisionHistory> = store;
            (preferences, history)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);
    install_panic_hook();

    let (preferences, history) = open_storage(&config.storage);
    let document = Arc::new(MarkerDocument::new());
    let mut screens = TerminalScreens::new(history, document.clone(), config.ui.color);

    let mut stdout = tokio::io::stdout();
    let mut app = App::new(preferences, document);
    stdout.write_all(app.render(&screens).to_string().as_bytes()).await?;
    stdout.flush().await?;
    app.hydrate().await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(stdin, stdout, config.ui.prompt.clone());
    console.run(&mut app, &mut screens).await?;

    info!("goodbye");
    Ok(())
}
