use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use futures::future::BoxFuture;
use serde_json::Value;
use tokio_test::{assert_err, assert_ok};
use tower::ServiceExt;

use clat_study_material::error::{AppError, CycleStep, GenerationError};
use clat_study_material::services::{DocumentAssembler, TextGenerator};
use clat_study_material::{router, AppState, GenerationCycle, Topic};

const FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf");

/// 按调用顺序返回预设文本，`fail_on` 指定的第几次调用（从 1 开始）返回错误
struct ScriptedGenerator {
    replies: Vec<String>,
    fail_on: Option<usize>,
    delay: Option<Duration>,
    /// 越早的调用等待越久，用于检查结果顺序
    staggered: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn fixed(text: &str) -> Self {
        Self::sequence(&[text])
    }

    fn sequence(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|s| s.to_string()).collect(),
            fail_on: None,
            delay: None,
            staggered: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn later_calls_finish_first(mut self, step: Duration) -> Self {
        self.staggered = Some(step);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(step) = self.staggered {
                let remaining = (self.replies.len() + 1).saturating_sub(call) as u32;
                tokio::time::sleep(step * remaining).await;
            }
            if self.fail_on == Some(call) {
                return Err(GenerationError::Service {
                    model: "stub".to_string(),
                    message: "quota exhausted".to_string(),
                });
            }
            let index = (call - 1).min(self.replies.len() - 1);
            Ok(self.replies[index].clone())
        })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn cycle_with(generator: Arc<ScriptedGenerator>) -> GenerationCycle {
    GenerationCycle::new(generator, DocumentAssembler::new(FONT_PATH), Duration::from_secs(5))
}

#[tokio::test]
async fn test_single_mathematics_set() {
    let generator = Arc::new(ScriptedGenerator::fixed("1.1 What is 2 + 2?\n(A) 3 (B) 4 (C) 5 (D) 6"));
    let cycle = cycle_with(generator.clone());

    let document = assert_ok!(cycle.run("Mathematics", 1).await);

    assert_eq!(
        document.blocks,
        vec!["Topic: Mathematics\n\n1.1 What is 2 + 2?\n(A) 3 (B) 4 (C) 5 (D) 6".to_string()]
    );
    assert_eq!(document.topic, Topic::Mathematics);
    assert_eq!(document.title, "Mathematics Practice Set");
    assert_eq!(document.file_name, "mathematics_clat_practice.pdf");
    assert!(document.bytes().starts_with(b"%PDF"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_three_legal_sets_keep_order() {
    let generator = Arc::new(ScriptedGenerator::sequence(&["S1", "S2", "S3"]));
    let cycle = cycle_with(generator.clone());

    let document = assert_ok!(cycle.run("Legal Reasoning", 3).await);

    assert_eq!(
        document.blocks,
        vec![
            "Topic: Legal Reasoning\n\nS1".to_string(),
            "Topic: Legal Reasoning\n\nS2".to_string(),
            "Topic: Legal Reasoning\n\nS3".to_string(),
        ]
    );
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn test_second_call_failure_aborts_cycle() {
    let generator = Arc::new(ScriptedGenerator::sequence(&["S1", "S2", "S3"]).failing_on(2));
    let cycle = cycle_with(generator.clone());

    let err = assert_err!(cycle.run("Legal Reasoning", 3).await);

    assert_eq!(err.step(), CycleStep::Generation);
    assert_eq!(err.failed_repetition(), Some(2));
    assert!(err.to_string().contains("set 2 of 3"));
    // 第二组失败后不再调用第三组
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_count_boundaries() {
    let generator = Arc::new(ScriptedGenerator::fixed("text"));
    let cycle = cycle_with(generator.clone());

    for bad in [0, 6] {
        let err = assert_err!(cycle.run("Mathematics", bad).await);
        assert_eq!(err.step(), CycleStep::Composition);
    }
    assert_eq!(generator.calls(), 0);

    let document = assert_ok!(cycle.run("Mathematics", 5).await);
    assert_eq!(document.blocks.len(), 5);
    assert_eq!(generator.calls(), 5);
}

#[tokio::test]
async fn test_invalid_topic_makes_no_calls() {
    let generator = Arc::new(ScriptedGenerator::fixed("text"));
    let cycle = cycle_with(generator.clone());

    let err = assert_err!(cycle.run("Astrology", 2).await);
    assert!(matches!(err, AppError::Compose(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_slow_generation_times_out() {
    let generator = Arc::new(ScriptedGenerator::fixed("late").slow(Duration::from_millis(500)));
    let cycle = GenerationCycle::new(
        generator,
        DocumentAssembler::new(FONT_PATH),
        Duration::from_millis(50),
    );

    let err = assert_err!(cycle.run("Critical Reasoning", 1).await);
    assert!(matches!(
        err,
        AppError::Generation {
            repetition: 1,
            source: GenerationError::Timeout(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_parallel_generation_returns_every_set() {
    let generator = Arc::new(ScriptedGenerator::fixed("passage").slow(Duration::from_millis(20)));
    let cycle = cycle_with(generator.clone()).with_max_parallel(3);

    let document = assert_ok!(cycle.run("Reading Comprehension", 4).await);
    assert_eq!(document.blocks.len(), 4);
    assert!(document
        .blocks
        .iter()
        .all(|b| b == "Topic: Reading Comprehension\n\npassage"));
}

#[tokio::test]
async fn test_parallel_generation_keeps_request_order() {
    let generator = Arc::new(
        ScriptedGenerator::sequence(&["S1", "S2", "S3", "S4"])
            .later_calls_finish_first(Duration::from_millis(30)),
    );
    let cycle = cycle_with(generator.clone()).with_max_parallel(4);

    let document = assert_ok!(cycle.run("Legal Reasoning", 4).await);
    assert_eq!(
        document.blocks,
        vec![
            "Topic: Legal Reasoning\n\nS1".to_string(),
            "Topic: Legal Reasoning\n\nS2".to_string(),
            "Topic: Legal Reasoning\n\nS3".to_string(),
            "Topic: Legal Reasoning\n\nS4".to_string(),
        ]
    );
    assert_eq!(generator.calls(), 4);
}

#[tokio::test]
async fn test_blank_output_is_a_generation_failure() {
    let generator = Arc::new(ScriptedGenerator::fixed("   \n\t "));
    let cycle = cycle_with(generator);

    let err = assert_err!(cycle.run("Mathematics", 1).await);
    assert_eq!(err.step(), CycleStep::Generation);
    assert_eq!(err.failed_repetition(), Some(1));
    assert!(matches!(
        err,
        AppError::Generation {
            source: GenerationError::EmptyResponse { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_unencodable_output_is_a_render_failure() {
    let generator = Arc::new(ScriptedGenerator::fixed("Great job 🎉"));
    let cycle = cycle_with(generator);

    let err = assert_err!(cycle.run("General Knowledge", 1).await);
    assert_eq!(err.step(), CycleStep::Rendering);
}

// ---- HTTP ----

fn app(cycle: GenerationCycle) -> (axum::Router, AppState) {
    let state = AppState::new(cycle, 1);
    (router(state.clone()), state)
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_and_index() {
    let (router, _) = app(cycle_with(Arc::new(ScriptedGenerator::fixed("x"))));

    let response = router
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("CLAT/AILET Study Material Generator"));
    assert!(html.contains("Number of Paragraphs"));
}

#[tokio::test]
async fn test_topics_endpoint() {
    let (router, _) = app(cycle_with(Arc::new(ScriptedGenerator::fixed("x"))));

    let response = router
        .oneshot(Request::get("/api/topics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let topics = json_body(response).await;
    let names: Vec<&str> = topics
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Critical Reasoning",
            "General Knowledge",
            "Legal Reasoning",
            "Mathematics",
            "Reading Comprehension",
        ]
    );
    assert!(topics[0]["summary"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn test_generate_returns_pdf() {
    let generator = Arc::new(ScriptedGenerator::sequence(&["S1", "S2"]));
    let (router, _) = app(cycle_with(generator));

    let response = router
        .oneshot(generate_request(r#"{"topic":"Legal Reasoning","count":2}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"legal reasoning_clat_practice.pdf\""
    );
    assert_eq!(headers["x-block-count"], "2");
    assert_eq!(headers["x-page-count"], "1");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_generate_invalid_topic() {
    let generator = Arc::new(ScriptedGenerator::fixed("x"));
    let (router, _) = app(cycle_with(generator.clone()));

    let response = router
        .oneshot(generate_request(r#"{"topic":"Astrology","count":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["step"], "composition");
    assert!(body["error"].as_str().unwrap().contains("Astrology"));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_generate_malformed_body() {
    let (router, _) = app(cycle_with(Arc::new(ScriptedGenerator::fixed("x"))));

    let response = router
        .oneshot(generate_request(r#"{"count":"three"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["step"], "composition");
}

#[tokio::test]
async fn test_generate_service_failure() {
    let generator = Arc::new(ScriptedGenerator::fixed("x").failing_on(1));
    let (router, _) = app(cycle_with(generator));

    let response = router
        .oneshot(generate_request(r#"{"topic":"Mathematics","count":2}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["step"], "generation");
    assert!(body["error"].as_str().unwrap().contains("set 1 of 2"));
}

#[tokio::test]
async fn test_generate_missing_font() {
    let cycle = GenerationCycle::new(
        Arc::new(ScriptedGenerator::fixed("x")),
        DocumentAssembler::new("/nonexistent/font.ttf"),
        Duration::from_secs(5),
    );
    let (router, _) = app(cycle);

    let response = router
        .oneshot(generate_request(r#"{"topic":"Mathematics","count":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["step"], "rendering");
}

#[tokio::test]
async fn test_generate_refused_while_busy() {
    let generator = Arc::new(ScriptedGenerator::fixed("x"));
    let (router, state) = app(cycle_with(generator.clone()));

    let _held = state.limiter.clone().try_acquire_owned().unwrap();

    let response = router
        .oneshot(generate_request(r#"{"topic":"Mathematics","count":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["step"], "busy");
    assert_eq!(generator.calls(), 0);
}
