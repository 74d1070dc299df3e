use std::{error::Error, sync::Arc};

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    Router,
    http::StatusCode,
    response::{self, IntoResponse},
    routing::get,
};
use clap::Parser;
use common::config::{BackendConfig, Config};
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::graphql;
use crate::storage::CrmStorage;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/crm.yaml")]
    pub config: String,
}

pub fn initialize_executable() -> Result<Config, Box<dyn Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    let mut config = Config::load(&args.config)?;

    // The environment wins over the config file for the database URL
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.common.database_url = url;
    }

    Ok(config)
}

pub fn initialize_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

async fn graphiql() -> impl IntoResponse {
    response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub async fn run_backend(
    config: BackendConfig,
    db: DatabaseConnection,
    storage: Arc<dyn CrmStorage>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let schema = graphql::schema(db, storage, None, None)?;

    let prometheus_handle = PrometheusBuilder::new().install_recorder()?;

    let app = Router::new()
        .route(
            "/graphql",
            get(graphiql).post_service(GraphQL::new(schema)),
        )
        .route("/health", get(health_check))
        .route(
            "/metrics",
            get(move || std::future::ready(prometheus_handle.render())),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    tracing::info!("Starting backend service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
