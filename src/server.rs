use std::net::SocketAddr;

use anyhow::{Context, Result};
use askama::Template;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::ask::{AskError, AskService, GENERIC_FAILURE_MESSAGE};
use crate::config::AppConfig;
use crate::llm::TextGenerator;
use crate::models::{AnswerRecord, AskInput, ErrorBody, HealthResponse};

#[derive(Clone)]
pub struct AppState<G> {
    ask: AskService<G>,
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(ask: AskService<G>) -> Self {
        Self { ask }
    }
}

pub fn router<G: TextGenerator>(state: AppState<G>) -> Router {
    let upload_limit = state.ask.document_config().max_upload_bytes;

    Router::new()
        .route("/", get(index_page::<G>))
        .route("/healthz", get(healthz))
        .route("/api/ask", post(ask_handler::<G>))
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server<G: TextGenerator>(config: AppConfig, ask: AskService<G>) -> Result<()> {
    let app = router(AppState::new(ask));

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.bind_addr))?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_page<G: TextGenerator>(
    State(state): State<AppState<G>>,
) -> Result<Html<String>, ApiError> {
    let limit = state.ask.document_config().max_upload_bytes;
    let template = IndexTemplate {
        max_upload_mb: limit.div_ceil(1024 * 1024),
    };
    let body = template.render().map_err(ApiError::from)?;
    Ok(Html(body))
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub(crate) async fn ask_handler<G: TextGenerator>(
    State(state): State<AppState<G>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnswerRecord>, ApiError> {
    let multipart = multipart.map_err(|err| {
        ApiError::from(AskError::Internal(anyhow::anyhow!(
            "rejected multipart body: {err}"
        )))
    })?;

    let input = read_ask_form(multipart).await?;
    let record = state.ask.answer(input).await?;
    Ok(Json(record))
}

async fn read_ask_form(mut multipart: Multipart) -> Result<AskInput, AskError> {
    let mut input = AskInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .context("failed to read multipart field")?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                input.file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.context("failed to read uploaded file")?;
                input.file = Some(bytes.to_vec());
            }
            "question" => {
                let text = field.text().await.context("failed to read question field")?;
                input.question = Some(text);
            }
            _ => {}
        }
    }

    Ok(input)
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    max_upload_mb: usize,
}

#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<AskError> for ApiError {
    fn from(value: AskError) -> Self {
        if value.is_client_error() {
            tracing::warn!("rejected ask request: {value}");
            Self {
                status: StatusCode::BAD_REQUEST,
                message: value.user_message().to_string(),
            }
        } else {
            tracing::error!("ask request failed: {value}");
            Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: value.user_message().to_string(),
            }
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        tracing::error!("failed to render index page: {value}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
