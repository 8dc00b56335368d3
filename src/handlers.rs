use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Html,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::models::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, GenerateKeysRequest,
    KeyResponse, ModularRequest, ModularResponse, PrivateKey, PublicKey,
};
use crate::rsa_service::{self, DEFAULT_BLOCK_SIZE, KeyPair};

pub const MISSING_FIELDS: &str = "Semua field harus diisi!";
pub const NON_NUMERIC_FIELDS: &str = "Semua field harus diisi dengan angka!";
pub const PAGE_NOT_FOUND: &str = "File not found";

// Shared handler state
pub struct AppState {
    pub index_path: PathBuf,
}

impl AppState {
    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
        }
    }
}

// Handler for the web page, read from disk on every request
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let html = tokio::fs::read_to_string(&state.index_path)
        .await
        .map_err(|e| {
            tracing::warn!(
                path = %state.index_path.display(),
                error = %e,
                "index page unavailable"
            );
            ApiError::internal(PAGE_NOT_FOUND)
        })?;

    Ok(Html(html))
}

// Handler to derive a key pair from two primes
pub async fn generate_keys(
    payload: Result<Json<GenerateKeysRequest>, JsonRejection>,
) -> Result<Json<KeyResponse>, ApiError> {
    let start = Instant::now();
    let Json(req) = payload?;

    // Trial division can take a while for large primes
    let (p, q) = (req.p, req.q);
    let keys = tokio::task::spawn_blocking(move || KeyPair::generate(p, q))
        .await
        .map_err(|e| ApiError::internal(format!("key generation task failed: {e}")))??;

    tracing::debug!(elapsed = ?start.elapsed(), p = req.p, q = req.q, "generate_keys");

    Ok(Json(keys.into()))
}

// Handler to encrypt a message with a public key
pub async fn encrypt(
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Result<Json<EncryptResponse>, ApiError> {
    let start = Instant::now();
    let Json(req) = payload?;

    let (Some(message), Some(e), Some(n)) = (
        req.message.filter(|m| !m.is_empty()),
        req.e.filter(|&e| e != 0),
        req.n.filter(|&n| n != 0),
    ) else {
        return Err(ApiError::validation(MISSING_FIELDS));
    };
    let block_size = req.block_size.unwrap_or(DEFAULT_BLOCK_SIZE);

    let response = rsa_service::encrypt(&message, PublicKey { e, n }, block_size)?;

    tracing::debug!(
        elapsed = ?start.elapsed(),
        blocks = response.blocks.len(),
        "encrypt"
    );

    Ok(Json(response))
}

// Handler to decrypt a space-separated ciphertext with a private key
pub async fn decrypt(
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ApiError> {
    let start = Instant::now();
    let Json(req) = payload?;

    let (Some(cipher_text), Some(d), Some(n)) = (
        req.cipher_text.filter(|c| !c.trim().is_empty()),
        req.d.filter(|&d| d != 0),
        req.n.filter(|&n| n != 0),
    ) else {
        return Err(ApiError::validation(MISSING_FIELDS));
    };

    let response = rsa_service::decrypt(&cipher_text, PrivateKey { d, n })?;

    tracing::debug!(
        elapsed = ?start.elapsed(),
        blocks = response.decrypted_blocks.len(),
        "decrypt"
    );

    Ok(Json(response))
}

// Handler for the modular exponentiation calculator
pub async fn modular(
    payload: Result<Json<ModularRequest>, JsonRejection>,
) -> Result<Json<ModularResponse>, ApiError> {
    let Json(req) = payload?;

    let (base, exponent, modulus) = req
        .operands()
        .ok_or_else(|| ApiError::validation(NON_NUMERIC_FIELDS))?;

    Ok(Json(rsa_service::modular(base, exponent, modulus)?))
}

// Fallback for unknown routes and wrong methods
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
