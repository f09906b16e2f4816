//! Thin axum wrapper around [`crate::service`]'s `store*`/`get*` entry
//! points. Each handler decodes one JSON body, delegates to the service
//! layer, and translates the result into an HTTP response.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::message::{SignedProofOfAgreement, SignedProofOfAuthority, SignedProofOfSignature};
use crate::service;
use crate::store::Store;
use crate::RegistryError;

/// Application state shared across handlers.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        Ok(Self { config, store: Store::new() })
    }
}

/// Assembles the full route table over a shared [`AppState`]. Kept
/// separate from `main` so integration tests can build the same router
/// without binding a real socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/proof-of-authority", post(store_proof_of_authority))
        .route("/api/v1/proof-of-signature", post(store_proof_of_signature))
        .route("/api/v1/proof-of-agreement", post(store_proof_of_agreement))
        .route("/api/v1/proof-of-authority/:cid", get(get_proof_of_authority))
        .route("/api/v1/proof-of-signature/:cid", get(get_proof_of_signature))
        .route("/api/v1/proof-of-agreement/:cid", get(get_proof_of_agreement))
        .route("/api/v1/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub proof_of_authority_count: usize,
    pub proof_of_signature_count: usize,
    pub proof_of_agreement_count: usize,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (poa, pos, poag) = state.store.counts();
    Json(HealthResponse {
        status: "ok",
        proof_of_authority_count: poa,
        proof_of_signature_count: pos,
        proof_of_agreement_count: poag,
    })
}

pub async fn store_proof_of_authority(
    State(state): State<Arc<AppState>>,
    Json(proof): Json<SignedProofOfAuthority>,
) -> Result<impl IntoResponse, RegistryError> {
    let proof_cid = proof.proof_cid.clone();
    service::store_proof_of_authority(&state.store, proof)?;
    info!(proof_cid = %proof_cid, "stored Proof-of-Authority");
    Ok(StatusCode::CREATED)
}

pub async fn store_proof_of_signature(
    State(state): State<Arc<AppState>>,
    Json(proof): Json<SignedProofOfSignature>,
) -> Result<impl IntoResponse, RegistryError> {
    let proof_cid = proof.proof_cid.clone();
    service::store_proof_of_signature(&state.store, proof)?;
    info!(proof_cid = %proof_cid, "stored Proof-of-Signature");
    Ok(StatusCode::CREATED)
}

pub async fn store_proof_of_agreement(
    State(state): State<Arc<AppState>>,
    Json(proof): Json<SignedProofOfAgreement>,
) -> Result<impl IntoResponse, RegistryError> {
    let proof_cid = proof.proof_cid.clone();
    service::store_proof_of_agreement(&state.store, proof)?;
    info!(proof_cid = %proof_cid, "stored Proof-of-Agreement");
    Ok(StatusCode::CREATED)
}

pub async fn get_proof_of_authority(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<impl IntoResponse, RegistryError> {
    service::get_proof_of_authority(&state.store, &cid)
        .map(Json)
        .ok_or(RegistryError::NotFound)
}

pub async fn get_proof_of_signature(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<impl IntoResponse, RegistryError> {
    service::get_proof_of_signature(&state.store, &cid)
        .map(Json)
        .ok_or(RegistryError::NotFound)
}

pub async fn get_proof_of_agreement(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<impl IntoResponse, RegistryError> {
    service::get_proof_of_agreement(&state.store, &cid)
        .map(Json)
        .ok_or(RegistryError::NotFound)
}
