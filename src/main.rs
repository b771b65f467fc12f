mod config;
mod core;
mod error;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use routes::AppState;
use services::{MediaStorageClient, PostgresClient, SessionKeys, ZipcodeIndex};
use std::sync::Arc;
use tracing::{error, info, warn};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl actix_web::error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt().with_target(false).with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Friendly matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize media storage client
    let storage = Arc::new(MediaStorageClient::new(
        settings.storage.base_url.clone(),
        settings.storage.public_base_url.clone(),
        settings.storage.bucket.clone(),
        settings.storage.api_key.clone(),
    ));

    info!("Media storage client initialized");

    // Initialize PostgreSQL client (runs migrations)
    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to PostgreSQL: {}", e);
            panic!("PostgreSQL connection error: {}", e);
        }),
    );

    info!("PostgreSQL client initialized");

    // Load the zipcode distance index
    let centroids = postgres.load_zipcode_centroids().await.unwrap_or_else(|e| {
        error!("Failed to load zipcode centroids: {}", e);
        panic!("Zipcode index error: {}", e);
    });

    let zip_index = Arc::new(ZipcodeIndex::new(centroids));

    if zip_index.is_empty() {
        warn!("Zipcode index is empty; feeds will contain same-zipcode users only");
    } else {
        info!("Zipcode index loaded ({} centroids)", zip_index.len());
    }

    // Session signing keys
    let sessions = Arc::new(SessionKeys::new(
        &settings.auth.session_secret,
        settings.auth.session_ttl_secs,
    ));

    // Build application state
    let app_state = AppState {
        postgres,
        storage,
        zip_index,
        sessions,
        candidate_cap: settings.matching.candidate_cap,
        default_image_url: settings.storage.default_image_url.clone(),
    };

    // Configure HTTP server
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
