//! API Handlers
//!
//! HTTP request handlers for each verification server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::extract::Principal;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    AccumulatorResponse, AuditResponse, CacheDetailResponse, CacheSummary, CreateCacheRequest,
    CreateCacheResponse, HealthResponse, QuizResponse, RegisterRequest, StatsResponse,
    SubmitAnswerRequest, UserResponse, VerificationResponse,
};
use crate::seed::seed_demo_data;
use crate::store::{CacheId, GeocacheStore, MemoryStore};
use crate::workflow;

/// Application state shared across all handlers.
///
/// The store sits behind a single RwLock; answer submission holds the write
/// lock for the whole read-modify-write of the accumulator.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe record store
    pub store: Arc<RwLock<MemoryStore>>,
}

impl AppState {
    /// Creates a new AppState with the given store.
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a new AppState from configuration, seeding demo data if enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut store = MemoryStore::new();
        if config.seed_demo_data {
            seed_demo_data(&mut store, &config.admin_username)?;
        }
        Ok(Self::new(store))
    }
}

/// Handler for POST /users
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let mut store = state.store.write().await;
    let user = store.insert_user(&req.username, false)?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Handler for GET /caches
pub async fn list_caches_handler(State(state): State<AppState>) -> Json<Vec<CacheSummary>> {
    let store = state.store.read().await;
    Json(store.list_caches().iter().map(CacheSummary::from).collect())
}

/// Handler for POST /caches
///
/// Creates a cache with its three quiz questions.
pub async fn create_cache_handler(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateCacheRequest>,
) -> Result<(StatusCode, Json<CreateCacheResponse>)> {
    let (draft, questions) = req.into_drafts()?;

    let mut store = state.store.write().await;
    workflow::authenticate(&*store, principal.0)?;
    let (cache, tests) = workflow::create_cache(&mut *store, draft, questions)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCacheResponse::new(&cache, &tests)),
    ))
}

/// Handler for GET /caches/:id
///
/// Anonymous callers always see `already_verified: false`.
pub async fn cache_detail_handler(
    State(state): State<AppState>,
    Path(cache_id): Path<CacheId>,
    principal: Option<Principal>,
) -> Result<Json<CacheDetailResponse>> {
    let store = state.store.read().await;
    let cache = store.get_cache(cache_id)?;
    let question_count = store.tests_for_cache(cache_id).len();
    let already_verified = principal
        .map(|Principal(user_id)| workflow::already_verified(&*store, user_id, cache_id))
        .unwrap_or(false);

    Ok(Json(CacheDetailResponse::new(
        &cache,
        question_count,
        already_verified,
    )))
}

/// Handler for GET /caches/:id/quiz
///
/// Returns one randomly chosen question without its answer.
pub async fn quiz_handler(
    State(state): State<AppState>,
    Path(cache_id): Path<CacheId>,
    principal: Principal,
) -> Result<Json<QuizResponse>> {
    let store = state.store.read().await;
    let test = {
        let mut rng = rand::rng();
        workflow::start_verification(&*store, principal.0, cache_id, &mut rng)?
    };

    Ok(Json(QuizResponse::from(&test)))
}

/// Handler for POST /caches/:id/answers
pub async fn submit_answer_handler(
    State(state): State<AppState>,
    Path(cache_id): Path<CacheId>,
    principal: Principal,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<VerificationResponse>> {
    let mut store = state.store.write().await;
    let outcome =
        workflow::submit_answer(&mut *store, principal.0, cache_id, req.test_id, &req.answer)?;

    Ok(Json(VerificationResponse::from(&outcome)))
}

/// Handler for GET /caches/:id/accumulator
pub async fn accumulator_handler(
    State(state): State<AppState>,
    Path(cache_id): Path<CacheId>,
) -> Result<Json<AccumulatorResponse>> {
    let store = state.store.read().await;
    let cache = store.get_cache(cache_id)?;

    Ok(Json(AccumulatorResponse::from(&cache)))
}

/// Handler for GET /caches/:id/audit
///
/// Replays the successful verification history and compares it with the
/// stored accumulator.
pub async fn audit_handler(
    State(state): State<AppState>,
    Path(cache_id): Path<CacheId>,
) -> Result<Json<AuditResponse>> {
    let store = state.store.read().await;
    let audit = workflow::audit_cache(&*store, cache_id)?;

    Ok(Json(AuditResponse::from(&audit)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.read().await;
    Json(StatsResponse::from(&store.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
