// Route exports
pub mod auth;
pub mod matches;
pub mod session;

use crate::services::{MediaStorageClient, PostgresClient, SessionKeys, ZipcodeIndex};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub storage: Arc<MediaStorageClient>,
    pub zip_index: Arc<ZipcodeIndex>,
    pub sessions: Arc<SessionKeys>,
    pub candidate_cap: usize,
    pub default_image_url: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(matches::health_check))
        .route("/", web::get().to(matches::home_feed))
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::post().to(auth::logout))
        .route(
            "/users/{username}/match",
            web::post().to(matches::record_match),
        )
        .route(
            "/users/{username}/no-match",
            web::post().to(matches::record_no_match),
        )
        .route(
            "/users/{username}/potential-matches",
            web::get().to(matches::potential_matches),
        )
        .route(
            "/users/{username}/matches",
            web::get().to(matches::confirmed_matches),
        );
}
