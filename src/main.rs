use std::{sync::Arc, time::Duration};

use drink_pairing_api::{
    config::Config,
    db::{create_pool, create_redis_client, run_migrations, seed_database, Cache, CacheWriterHandle},
    routes::{create_router, AppState},
    services::{
        catalog::{DrinkCatalog, InMemoryCatalog, PostgresCatalog},
        engine::JitterSource,
        providers::{CachedProvider, OpenAiProvider, PairingProvider},
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("drink_pairing_api=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = build_catalog(&config).await?;
    let (recommender, cache_writer) = build_recommender(&config)?;
    let jitter = JitterSource::from(config.jitter_seed);

    let mut state = AppState::new(catalog).with_jitter(jitter);
    if let Some(recommender) = recommender {
        state = state.with_recommender(recommender);
    }

    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), ?jitter, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(writer) = cache_writer {
        writer.shutdown().await;
    }

    Ok(())
}

/// Postgres when configured, otherwise the seeded in-memory set
async fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn DrinkCatalog>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, serving the in-memory seed catalog");
        return Ok(Arc::new(InMemoryCatalog::seeded()));
    };

    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;

    let inserted = seed_database(&pool).await?;
    tracing::info!(inserted, "Drink catalog ready");

    Ok(Arc::new(PostgresCatalog::new(pool)))
}

/// OpenAI recommender, cached in Redis when a Redis URL is configured
fn build_recommender(
    config: &Config,
) -> anyhow::Result<(Option<Arc<dyn PairingProvider>>, Option<CacheWriterHandle>)> {
    let Some(api_key) = config.openai_api_key.clone() else {
        tracing::info!("OPENAI_API_KEY not set, every pairing uses the fallback engine");
        return Ok((None, None));
    };

    let openai: Arc<dyn PairingProvider> = Arc::new(OpenAiProvider::new(
        api_key,
        config.openai_api_url.clone(),
        config.openai_model.clone(),
        Duration::from_secs(config.generative_timeout_secs),
    )?);

    match config.redis_url.as_deref() {
        Some(redis_url) => {
            let (cache, writer) = Cache::new(create_redis_client(redis_url)?);
            let cached = CachedProvider::new(openai, cache, config.pairing_cache_ttl_secs);
            tracing::info!(model = %config.openai_model, "Generative pairing enabled with Redis cache");
            Ok((Some(Arc::new(cached)), Some(writer)))
        }
        None => {
            tracing::info!(model = %config.openai_model, "Generative pairing enabled without cache");
            Ok((Some(openai), None))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
