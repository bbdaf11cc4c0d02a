use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{error, info};

use crate::api::{ApiAnalyzeRequest, ApiAnalyzeResponse, ApiError, ApiScoreRequest, ApiScoreResponse};
use title_lab::{RngSource, TitleEngine, TitleError};

#[derive(Clone)]
struct AppState {
    engine: Arc<TitleEngine>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs, engine: Arc<TitleEngine>) -> Result<(), String> {
    let state = AppState { engine };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/score", post(score_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        format!("failed to bind server: {}", err)
    })?, app)
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(body): Json<ApiAnalyzeRequest>,
) -> ApiResult<ApiAnalyzeResponse> {
    let request_id = body.request_id.clone().unwrap_or_else(generate_request_id);
    let (request, seed) = body.into_request().map_err(reject)?;

    let engine = state.engine.clone();
    let report = tokio::task::spawn_blocking(move || {
        let mut rng = RngSource::from_seed_option(seed);
        engine.analyze(&request, &mut rng)
    })
    .await
    .map_err(|err| internal(format!("analysis task failed: {}", err)))?
    .map_err(reject)?;

    Ok(Json(ApiAnalyzeResponse { request_id, report }))
}

async fn score_handler(
    State(state): State<AppState>,
    Json(body): Json<ApiScoreRequest>,
) -> ApiResult<ApiScoreResponse> {
    let title = body.into_title().map_err(reject)?;

    let engine = state.engine.clone();
    let score = tokio::task::spawn_blocking(move || engine.score_title(&title))
        .await
        .map_err(|err| internal(format!("scoring task failed: {}", err)))?
        .map_err(reject)?;

    Ok(Json(ApiScoreResponse { score }))
}

fn reject(err: TitleError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        TitleError::Input(_) => StatusCode::BAD_REQUEST,
        TitleError::GenerationCapacity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TitleError::ScoringBackend { .. } => StatusCode::BAD_GATEWAY,
        TitleError::Catalog(_) | TitleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(kind = err.kind(), "request failed: {}", err);
    }
    (status, Json(ApiError::from(&err)))
}

fn internal(message: String) -> (StatusCode, Json<ApiError>) {
    error!("{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            kind: "internal",
            error: message,
        }),
    )
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
