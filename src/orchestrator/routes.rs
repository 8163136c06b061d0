//! HTTP 路由
//!
//! - `GET /` 页面
//! - `GET /api/topics` 科目列表
//! - `POST /api/generate` 运行一次生成周期，返回 PDF
//! - `GET /health`

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{self, HeaderName};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::models::{AnswerKey, Topic};
use crate::orchestrator::api_error::ApiError;
use crate::orchestrator::page::render_index;
use crate::prompts::template_for;
use crate::workflow::GenerationCycle;

/// 所有路由共享的状态
#[derive(Clone)]
pub struct AppState {
    pub cycle: Arc<GenerationCycle>,
    /// 同时进行的生成周期上限
    pub limiter: Arc<Semaphore>,
}

impl AppState {
    pub fn new(cycle: GenerationCycle, max_concurrent_cycles: usize) -> Self {
        Self {
            cycle: Arc::new(cycle),
            limiter: Arc::new(Semaphore::new(max_concurrent_cycles.max(1))),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/topics", get(list_topics))
        .route("/api/generate", post(generate))
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_index())
}

async fn health_check() -> &'static str {
    "ok"
}

#[derive(Serialize)]
pub struct TopicSummary {
    name: &'static str,
    summary: &'static str,
    passage_words: (u32, u32),
    question_count: u8,
    question_range: String,
    answer_key: AnswerKey,
}

async fn list_topics() -> Json<Vec<TopicSummary>> {
    let topics = Topic::ALL
        .into_iter()
        .map(|topic| {
            let template = template_for(topic);
            TopicSummary {
                name: topic.name(),
                summary: template.summary,
                passage_words: template.passage_words,
                question_count: template.question_count,
                question_range: template.question_range(),
                answer_key: template.answer_key,
            }
        })
        .collect();
    Json(topics)
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    topic: String,
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    1
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let _permit = state.limiter.clone().try_acquire_owned().map_err(|_| {
        warn!("⏳ 生成请求被拒绝：已达到并发上限");
        ApiError::Busy
    })?;

    let document = state.cycle.run(&req.topic, req.count).await?;
    info!("📤 返回文件 {} ({} 字节)", document.file_name, document.len());

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.file_name),
        ),
        (
            HeaderName::from_static("x-block-count"),
            document.blocks.len().to_string(),
        ),
        (
            HeaderName::from_static("x-page-count"),
            document.page_count.to_string(),
        ),
    ];

    Ok((headers, document.into_bytes()).into_response())
}
