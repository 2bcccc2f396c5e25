use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use meal_match::config::{Settings, StorageBackend};
use meal_match::core::Recommender;
use meal_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use meal_match::services::{
    seed_demo_catalog, CacheManager, GeminiClient, MealStore, MemoryStore, PostgresClient,
    RecommendationService,
};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn startup_error(context: &str, e: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, e);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, e))
}

async fn build_store(settings: &Settings) -> io::Result<Arc<dyn MealStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store with demo catalog");
            Ok(Arc::new(MemoryStore::seeded()))
        }
        StorageBackend::Postgres => {
            let db = &settings.database;
            let url = db
                .url
                .as_deref()
                .ok_or_else(|| startup_error("PostgreSQL backend selected", "DATABASE_URL is not set"))?;

            let postgres = PostgresClient::from_settings(
                url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?;

            info!("PostgreSQL client initialized (max: {} connections)", db.max_connections.unwrap_or(10));

            if db.seed_demo_data {
                seed_demo_catalog(&postgres)
                    .await
                    .map_err(|e| startup_error("Failed to seed demo catalog", e))?;
            }

            Ok(Arc::new(postgres))
        }
    }
}

/// Redis is optional; a failed connection logs and disables caching
async fn build_cache(settings: &Settings) -> Option<Arc<CacheManager>> {
    let redis_url = settings.cache.redis_url.as_deref()?;
    let ttl_secs = settings.cache.ttl_secs.unwrap_or(300);
    let l1_size = settings.cache.l1_cache_size.unwrap_or(1000);

    match CacheManager::new(redis_url, l1_size, ttl_secs).await {
        Ok(cache) => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_size, ttl_secs);
            Some(Arc::new(cache))
        }
        Err(e) => {
            warn!("Failed to connect to Redis ({}), running without cache", e);
            None
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // LOG_LEVEL and LOG_FORMAT take precedence over the [logging] section
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting meal-match recommendation service...");

    let store = build_store(&settings).await?;
    let cache = build_cache(&settings).await;

    let rules = settings.scoring_rules();
    info!("Recommender initialized with rules: {:?}", rules);

    let service = Arc::new(RecommendationService::new(store, Recommender::new(rules), cache));

    let llm = &settings.llm;
    let gemini = GeminiClient::new(&llm.endpoint, &llm.model, llm.api_key.clone(), llm.timeout_secs)
        .map_err(|e| startup_error("Failed to build Gemini client", e))?;
    if !gemini.is_configured() {
        warn!("GEMINI_API_KEY not set, AI routes will serve fallback data");
    }

    let app_state = AppState {
        service,
        gemini: Arc::new(gemini),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
