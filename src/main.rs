//! Alumni Portal Backend
//!
//! Role-based dashboards for students, alumni and admins, persisted as whole JSON
//! collections in a local key-value store.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{LocalStorage, Repository, Session};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub session: Arc<Session>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Alumni Portal Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the key-value store
    let pool = db::init_database(&config.db_path).await?;
    let storage = LocalStorage::new(pool);
    let repo = Arc::new(Repository::new(storage.clone()));
    let session = Arc::new(Session::new(storage));

    if config.seed_sample_data {
        db::initialize_sample_data(&repo).await;
    } else {
        tracing::info!("Sample data disabled (ALUMNI_PORTAL_SEED)");
    }

    let state = AppState { repo, session };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session = state.session.clone();

    // Routes that need a signed-in user
    let api_routes = Router::new()
        // Users
        .route("/users", get(api::list_users))
        // Alumni
        .route("/alumni", get(api::search_alumni))
        .route("/alumni/all", get(api::list_all_alumni))
        .route("/alumni/mentors", get(api::list_mentors))
        .route(
            "/alumni/me",
            get(api::get_my_alumni_profile).put(api::update_my_alumni_profile),
        )
        .route("/alumni/{id}/approval", put(api::set_alumni_approval))
        // Students
        .route("/students", get(api::list_students))
        .route(
            "/students/me",
            get(api::get_my_student_profile).put(api::update_my_student_profile),
        )
        // Events
        .route("/events", get(api::list_events).post(api::create_event))
        .route(
            "/events/{id}",
            put(api::update_event).delete(api::delete_event),
        )
        .route("/events/{id}/rsvp", post(api::toggle_rsvp))
        // Mentorship
        .route(
            "/mentorship",
            get(api::list_mentorship_requests).post(api::create_mentorship_request),
        )
        .route("/mentorship/{id}/status", put(api::update_mentorship_status))
        // Donations
        .route(
            "/donations",
            get(api::list_donations).post(api::create_donation),
        )
        .route("/donations/summary", get(api::donation_summary))
        // Analytics
        .route("/analytics", get(api::get_analytics))
        // Require a current user
        .layer(middleware::from_fn(move |req, next| {
            auth::session_layer(session.clone(), req, next)
        }));

    // Sign-in endpoints (no session required)
    let session_routes = Router::new()
        .route("/session", get(api::get_session).post(api::login))
        .route("/session/logout", post(api::logout));

    // Health check (no session required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes.merge(session_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
