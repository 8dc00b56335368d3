//! Teaching service for textbook RSA on small integers: key generation,
//! block encryption and decryption with calculation traces, and a modular
//! exponentiation calculator, all over JSON.

pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod math;
pub mod models;
pub mod rsa_service;
pub mod telemetry;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export important types for easier use
pub use config::Config;
pub use error::{ApiError, CryptoError};
pub use handlers::AppState;
pub use rsa_service::KeyPair;

use handlers::{decrypt, encrypt, generate_keys, index, modular, not_found};

/// Builds the application router. Each path answers one method; anything
/// else falls through to a JSON 404. `get` would also answer `HEAD`, so `/`
/// routes it to the 404 explicitly.
pub fn app(config: &Config) -> Router {
    let state = Arc::new(AppState::new(config.index_path.clone()));

    let mut router = Router::new()
        .route("/", get(index).head(not_found).fallback(not_found))
        .route("/api/generate-keys", post(generate_keys).fallback(not_found))
        .route("/api/encrypt", post(encrypt).fallback(not_found))
        .route("/api/decrypt", post(decrypt).fallback(not_found))
        .route("/api/modular", post(modular).fallback(not_found))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
