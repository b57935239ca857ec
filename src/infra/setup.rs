use std::fs::File;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        http::app_state::AppState,
        persistence::{
            fallback::VolatileFallbackStore, file::JsonFileEntryStore, kv::RedisEntryStore,
            memory::InMemoryEntryStore, postgres::PostgresEntryStore,
        },
    },
    infra::config::{AppConfig, OnStoreFailure, StorageBackend},
    use_cases::waitlist::{EntryStore, WaitlistUseCases},
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();

    let store = build_entry_store(&config).await?;
    let store: Arc<dyn EntryStore> = match config.on_store_failure {
        OnStoreFailure::Fail => store,
        OnStoreFailure::FallbackVolatile => Arc::new(VolatileFallbackStore::new(store)),
    };

    let waitlist_use_cases = Arc::new(WaitlistUseCases::new(store));

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases,
    })
}

async fn build_entry_store(config: &AppConfig) -> anyhow::Result<Arc<dyn EntryStore>> {
    let store: Arc<dyn EntryStore> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryEntryStore::new()),
        StorageBackend::File => Arc::new(JsonFileEntryStore::new(config.waitlist_file.clone())),
        StorageBackend::Redis => Arc::new(RedisEntryStore::new(&config.redis_url).await?),
        StorageBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL must be set for the postgres backend")
            })?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .map_err(|e| {
                    anyhow::anyhow!("Postgres connection failed (check DATABASE_URL/password): {e}")
                })?;
            tracing::info!("Connected to database!");
            Arc::new(PostgresEntryStore::new(pool).await?)
        }
    };

    tracing::info!(backend = store.backend_name(), "Entry store initialized");
    Ok(store)
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waitlist_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
