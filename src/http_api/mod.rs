use std::{convert::Infallible, sync::Arc};

use axum::{
    Json, Router, async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::{
    Building, ClassLocation, DirectoryConfig, DirectoryStore, LoadError, LoadSummary, QueryError,
};

#[derive(Clone)]
pub struct AppState {
    store: Arc<DirectoryStore>,
    config: Arc<DirectoryConfig>,
}

impl AppState {
    pub fn new(store: DirectoryStore, config: DirectoryConfig) -> Self {
        Self::with_shared(Arc::new(store), config)
    }

    pub fn with_shared(store: Arc<DirectoryStore>, config: DirectoryConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    fn store(&self) -> Arc<DirectoryStore> {
        self.store.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct ResultsBody<T> {
    results: Vec<T>,
}

impl<T> From<Vec<T>> for ResultsBody<T> {
    fn from(results: Vec<T>) -> Self {
        Self { results }
    }
}

/// Raw query-string pairs. Repeated keys resolve to their first value and a
/// malformed query string reads as empty, so the query code decides what is
/// invalid.
#[derive(Debug, Default)]
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<Vec<(String, String)>>::from_request_parts(parts, state).await {
            Ok(Query(pairs)) => Ok(Self(pairs)),
            Err(rejection) => {
                tracing::debug!(%rejection, "ignoring unreadable query string");
                Ok(Self::default())
            }
        }
    }
}

#[derive(Debug)]
enum ApiError {
    Query(QueryError),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<QueryError> for ApiError {
    fn from(value: QueryError) -> Self {
        ApiError::Query(value)
    }
}

impl From<LoadError> for ApiError {
    fn from(value: LoadError) -> Self {
        match value {
            LoadError::NoSources => ApiError::Conflict("No data sources configured".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Query(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/buildings/name", get(buildings_by_name))
        .route("/buildings/position", get(buildings_by_position))
        .route("/buildings/:short_name", get(building_by_short_name))
        .route("/friends/name", get(classes_by_friend))
        .route("/friends/time", get(classes_by_time))
        .route("/friends/position", get(friends_by_position))
        .route("/reload", post(reload))
        .with_state(state)
}

pub async fn serve(config: DirectoryConfig, store: Arc<DirectoryStore>) -> std::io::Result<()> {
    let addr = config.http_addr;
    let app = router(AppState::with_shared(store, config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "campus directory listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn buildings_by_name(
    State(state): State<AppState>,
    params: QueryParams,
) -> Json<ResultsBody<Building>> {
    let results = state.store().search_buildings_by_name(params.first("text"));
    Json(results.into())
}

async fn buildings_by_position(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ResultsBody<Building>>, ApiError> {
    let results = state
        .store()
        .nearest_buildings(params.first("x"), params.first("y"))?;
    Ok(Json(results.into()))
}

async fn building_by_short_name(
    State(state): State<AppState>,
    Path(short_name): Path<String>,
) -> Result<Json<Building>, ApiError> {
    match state.store().find_building_by_short_name(&short_name) {
        Some(building) => Ok(Json(building)),
        None => Err(ApiError::NotFound("Building not found".to_string())),
    }
}

async fn classes_by_friend(
    State(state): State<AppState>,
    params: QueryParams,
) -> Json<ResultsBody<ClassLocation>> {
    let results = state.store().classes_for_friend(params.first("text"));
    Json(results.into())
}

async fn classes_by_time(
    State(state): State<AppState>,
    params: QueryParams,
) -> Json<ResultsBody<ClassLocation>> {
    let results = state.store().classes_at_time(params.first("text"));
    Json(results.into())
}

async fn friends_by_position(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<ResultsBody<ClassLocation>>, ApiError> {
    let results = state
        .store()
        .nearest_friends(params.first("x"), params.first("y"))?;
    Ok(Json(results.into()))
}

async fn reload(State(state): State<AppState>) -> Result<Json<LoadSummary>, ApiError> {
    let store = state.store();
    let config = state.config.clone();
    let summary = tokio::task::spawn_blocking(move || store.reload(&config))
        .await
        .map_err(|err| ApiError::Internal(format!("reload task failed: {err}")))??;
    Ok(Json(summary))
}
