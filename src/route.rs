//! Route definitions for the inventory API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.
//! It creates the Axum router with the application state.

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::AppState;
use crate::handler::{
    create_computer, create_maintenance, create_user, delete_computer, delete_maintenance,
    delete_user, get_computer, get_maintenance, get_stats, get_user, list_computers,
    list_maintenance, list_users, update_computer, update_maintenance, update_user,
};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Landing page served from `STATIC_DIR/index.html`
/// - `GET|POST /api/users`, `GET|PUT|DELETE /api/users/{id}`
/// - `GET|POST /api/computers`, `GET|PUT|DELETE /api/computers/{id}`
/// - `GET|POST /api/maintenance`, `GET|PUT|DELETE /api/maintenance/{id}`
/// - `GET /api/stats` - Row counts for all three tables
///
/// Every route accepts cross-origin requests from any origin.
///
/// # Example Usage
///
/// ```no_run
/// # use inventory::config::Config;
/// # use inventory::database::{create_pool, AppState};
/// # use inventory::route::create_app;
/// # async fn run() -> Result<(), sqlx::Error> {
/// let config = Config::default();
/// let state = AppState::new(create_pool(&config).await?);
/// let app = create_app(state, &config);
/// // axum::serve(listener, app).await.unwrap();
/// # Ok(())
/// # }
/// ```
pub fn create_app(state: AppState, config: &Config) -> Router {
    let api_routes = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/computers", get(list_computers).post(create_computer))
        .route(
            "/computers/{id}",
            get(get_computer).put(update_computer).delete(delete_computer),
        )
        .route("/maintenance", get(list_maintenance).post(create_maintenance))
        .route(
            "/maintenance/{id}",
            get(get_maintenance)
                .put(update_maintenance)
                .delete(delete_maintenance),
        )
        .route("/stats", get(get_stats));

    let landing_page = Path::new(&config.static_dir).join("index.html");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route_service("/", ServeFile::new(landing_page))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
