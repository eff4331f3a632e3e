use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::document::DocumentSetView;
use crate::generator::{generate_site, SiteContext};
use crate::llm::TextGenerator;
use crate::session::{FormState, SessionError};
use crate::{GenerationStatus, NewsDraft, TARGET_WEB_REQUEST};

pub struct AppState {
    pub form: RwLock<FormState>,
    pub llm: Arc<dyn TextGenerator>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub async fn web_api_loop(state: Arc<AppState>, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/status", get(status_check))
        .route("/api/state", get(session_state))
        .route("/api/config", put(update_config))
        .route("/api/news", post(add_news_draft))
        .route(
            "/api/news/{id}",
            patch(update_news_draft).delete(remove_news_draft),
        )
        .route("/api/generate", post(generate))
        .route("/api/result", get(generation_result))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!(target: TARGET_WEB_REQUEST, "Server running on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!(target: TARGET_WEB_REQUEST, "Failed to listen for ctrl-c");
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct StateResponse {
    status: &'static str,
    province: String,
    base_url: String,
    /// Whether a credential is set; the credential itself is never echoed.
    has_api_key: bool,
    news: Vec<NewsDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ResultResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    documents: Option<DocumentSetView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ConfigUpdate {
    api_key: Option<String>,
    province: Option<String>,
    base_url: Option<String>,
}

#[derive(Deserialize)]
struct DraftUpdate {
    content: String,
}

fn status_tag(status: &GenerationStatus) -> &'static str {
    match status {
        GenerationStatus::Idle => "idle",
        GenerationStatus::Loading => "loading",
        GenerationStatus::Success(_) => "success",
        GenerationStatus::Error(_) => "error",
    }
}

fn state_view(form: &FormState) -> StateResponse {
    let error = match form.status() {
        GenerationStatus::Error(message) => Some(message.clone()),
        _ => None,
    };
    StateResponse {
        status: status_tag(form.status()),
        province: form.province.clone(),
        base_url: form.base_url.clone(),
        has_api_key: !form.api_key.trim().is_empty(),
        news: form.drafts().to_vec(),
        error,
    }
}

fn session_error(err: SessionError) -> ApiError {
    let status = match err {
        SessionError::BatchInFlight => StatusCode::CONFLICT,
        SessionError::MissingConfiguration(_)
        | SessionError::DraftLimit
        | SessionError::UnknownDraft(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

async fn status_check() -> &'static str {
    "OK"
}

async fn session_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let form = state.form.read().await;
    Json(state_view(&form))
}

async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> Result<Json<StateResponse>, ApiError> {
    let mut form = state.form.write().await;
    form.set_config(update.api_key, update.province, update.base_url)
        .map_err(session_error)?;
    Ok(Json(state_view(&form)))
}

async fn add_news_draft(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StateResponse>, ApiError> {
    let mut form = state.form.write().await;
    form.add_draft().map_err(session_error)?;
    Ok(Json(state_view(&form)))
}

async fn update_news_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<StateResponse>, ApiError> {
    let mut form = state.form.write().await;
    form.update_draft(id, update.content).map_err(session_error)?;
    Ok(Json(state_view(&form)))
}

async fn remove_news_draft(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<StateResponse>, ApiError> {
    let mut form = state.form.write().await;
    form.remove_draft(id).map_err(session_error)?;
    Ok(Json(state_view(&form)))
}

/// Triggers one generation attempt. The form lock is released while the
/// batch is outstanding, so state reads (and their loading indicator) stay
/// responsive; the loading status itself rejects concurrent attempts.
async fn generate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StateResponse>, ApiError> {
    let attempt = {
        let mut form = state.form.write().await;
        form.begin_attempt().map_err(session_error)?
    };

    info!(
        target: TARGET_WEB_REQUEST,
        "Starting generation batch for province {} ({} drafts entered)",
        attempt.province,
        attempt.drafts.len()
    );

    let context = SiteContext {
        province: &attempt.province,
        base_url: &attempt.base_url,
    };
    let outcome = generate_site(
        state.llm.as_ref(),
        &attempt.api_key,
        &context,
        &attempt.drafts,
    )
    .await;

    if let Err(err) = &outcome {
        warn!(target: TARGET_WEB_REQUEST, "Generation batch failed: {}", err);
    }

    let mut form = state.form.write().await;
    form.finish_attempt(outcome);
    Ok(Json(state_view(&form)))
}

async fn generation_result(State(state): State<Arc<AppState>>) -> Json<ResultResponse> {
    let form = state.form.read().await;
    let response = match form.status() {
        GenerationStatus::Success(set) => ResultResponse {
            status: "success",
            documents: Some(DocumentSetView::render(set)),
            error: None,
        },
        GenerationStatus::Error(message) => ResultResponse {
            status: "error",
            documents: None,
            error: Some(message.clone()),
        },
        status => ResultResponse {
            status: status_tag(status),
            documents: None,
            error: None,
        },
    };
    Json(response)
}
