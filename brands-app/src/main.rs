use crate::config::{Backend, Config};
use apps::{AppError, AppProperties, AppResult};
use axum::Router;
use brands_core::{ApiUrls, BrandReader, ConceptStore, Transformer};
use brands_routes::cache::CacheControl;
use brands_routes::state::BrandAppState;
use dotenv::dotenv;
use error_stack::ResultExt;
use error_stack::fmt::ColorMode;
use repositories::concepts_api::ConceptsApiStore;
use repositories::neo4j::Neo4jStore;
use std::fmt::Debug;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

const APP_NAME: &str = "public-brands-api";

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("brand service shutting down"),
        Err(e) => {
            error!("brand service exited with error: {e:?}");
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("BRANDS_LOG"))
        .init();
}

async fn try_main() -> AppResult<()> {
    // loaded before logging so BRANDS_LOG can come from the .env file
    let dotenv_result = dotenv();
    init_logging();
    if let Err(e) = dotenv_result {
        warn!("failed to load .env file: {e}");
    }

    let config = Config::from_env().change_context(AppError)?;
    debug!("loaded config: {config:?}");

    let routes = build_routes(&config)?;

    apps::run(
        routes,
        AppProperties {
            name: APP_NAME,
            port: config.port,
        },
    )
    .await
}

#[instrument(skip_all)]
fn build_routes(config: &Config) -> AppResult<Router> {
    let client = reqwest::Client::builder()
        .user_agent(APP_NAME)
        .build()
        .change_context(AppError)
        .attach("failed to build the http client for the concept store")?;

    match &config.backend {
        Backend::ConceptsApi { url } => {
            info!("reading brands from the concepts api at {url}");
            routes_for(ConceptsApiStore::new(client, url), config)
        }
        Backend::Neo4j { url, credentials } => {
            info!("reading brands from neo4j at {url}");
            routes_for(Neo4jStore::new(client, url, credentials.clone()), config)
        }
    }
}

fn routes_for<S>(store: S, config: &Config) -> AppResult<Router>
where
    S: ConceptStore + Clone + Debug + Send + Sync + 'static,
{
    let engine = BrandEngine {
        reader: BrandReader::new(
            store,
            config.authority_precedence.clone(),
            Transformer::new(ApiUrls::for_env(&config.env)),
        ),
    };
    let cache_control = CacheControl::max_age(config.cache_duration);

    let state = if config.metrics_enabled {
        BrandAppState::new_with_metrics(engine, cache_control)
    } else {
        BrandAppState::new_without_metrics(engine, cache_control)
    };

    debug!("building routes..");
    brands_routes::routes::build(state)
        .change_context(AppError)
        .inspect(|_| debug!("routes built"))
}

#[derive(Debug, Clone)]
struct BrandEngine<S> {
    reader: BrandReader<S>,
}

impl<S> brands_core::BrandEngine for BrandEngine<S>
where
    S: ConceptStore + Clone + Debug + Send + Sync + 'static,
{
    type Store = S;

    fn reader(&self) -> &BrandReader<Self::Store> {
        &self.reader
    }
}
