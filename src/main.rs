use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;
mod state;

use crate::middleware::{
    authentication_gate, comment_ownership_gate, photo_ownership_gate, social_media_ownership_gate,
};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, TOKEN_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("starting photogram api in {:?} mode", config.environment);

    let pool = crate::database::connect(&config.database).expect("database pool");
    crate::database::schema::ensure_schema(&pool).await;

    let state = AppState::new(pool);
    let app = app(state);

    // PORT lands in config.server.port through the env overrides, which is
    // how tests spawn the binary on a free port.
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("photogram api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resource routes
        .merge(user_routes())
        .merge(photo_routes(state.clone()))
        .merge(comment_routes(state.clone()))
        .merge(social_media_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<Arc<AppState>> {
    use axum::routing::{post, put};
    use handlers::user;

    // The signed-in identity is the target row, so update and delete
    // take no id in the path.
    let protected = Router::new()
        .route("/api/v1/user", put(user::update).delete(user::destroy))
        .route_layer(from_fn(authentication_gate));

    Router::new()
        .route("/api/v1/user/register", post(user::register))
        .route("/api/v1/user/login", post(user::login))
        .merge(protected)
}

fn photo_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use axum::routing::put;
    use handlers::photo;

    // Writes against an existing photo pass the ownership gate first.
    let guarded = Router::new()
        .route("/api/v1/photo/:photo_id", put(photo::update).delete(photo::destroy))
        .route_layer(from_fn_with_state(state, photo_ownership_gate));

    Router::new()
        .route("/api/v1/photo", get(photo::index).post(photo::store))
        .route("/api/v1/photo/:photo_id", get(photo::show))
        .merge(guarded)
        .route_layer(from_fn(authentication_gate))
}

fn comment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use axum::routing::put;
    use handlers::comment;

    let guarded = Router::new()
        .route(
            "/api/v1/comment/:comment_id",
            put(comment::update).delete(comment::destroy),
        )
        .route_layer(from_fn_with_state(state, comment_ownership_gate));

    Router::new()
        .route("/api/v1/comment", get(comment::index).post(comment::store))
        .route("/api/v1/comment/:comment_id", get(comment::show))
        .route("/api/v1/comment/photo/:photo_id", get(comment::by_photo))
        .merge(guarded)
        .route_layer(from_fn(authentication_gate))
}

fn social_media_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use axum::routing::put;
    use handlers::social_media;

    let guarded = Router::new()
        .route(
            "/api/v1/socialmedia/:social_media_id",
            put(social_media::update).delete(social_media::destroy),
        )
        .route_layer(from_fn_with_state(state, social_media_ownership_gate));

    Router::new()
        .route(
            "/api/v1/socialmedia",
            get(social_media::index).post(social_media::store),
        )
        .route(
            "/api/v1/socialmedia/:social_media_id",
            get(social_media::show),
        )
        .merge(guarded)
        .route_layer(from_fn(authentication_gate))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "status": "success",
        "data": {
            "name": "Photogram API",
            "version": version,
            "description": "Photo sharing backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /api/v1/user/register (public)",
                "login": "POST /api/v1/user/login (public)",
                "user": "PUT|DELETE /api/v1/user (authenticated)",
                "photo": "/api/v1/photo[/:photoId] (authenticated)",
                "comment": "/api/v1/comment[/:commentId], /api/v1/comment/photo/:photoId (authenticated)",
                "socialmedia": "/api/v1/socialmedia[/:socialMediaId] (authenticated)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "success",
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "fail",
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
