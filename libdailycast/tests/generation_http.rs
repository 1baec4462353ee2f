//! Chat completion client against a local stub

mod common;

use chrono::NaiveDate;
use common::{completion_body, spawn_stub};
use libdailycast::error::GenerationError;
use libdailycast::generator::{self, ContentGenerator, OpenAiGenerator};
use libdailycast::prompts::{HINDI_NEWS, TECH_NEWS};
use reqwest::Client;
use secrecy::SecretString;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn generator_for(base_url: &str) -> OpenAiGenerator {
    OpenAiGenerator::new(Client::new(), SecretString::from("sk-test"), base_url)
}

#[tokio::test]
async fn sends_persona_prompt_and_sampling_settings() {
    let stub = spawn_stub(200, &[], &completion_body("  Today in tech: Rust 2.0  \n")).await;
    let generator = generator_for(&format!("{}/v1", stub.base_url));

    let text = generator::generate(&generator, &TECH_NEWS, date())
        .await
        .unwrap();
    let request = stub.captured().await;

    assert_eq!(text, "Today in tech: Rust 2.0");
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v1/chat/completions");
    assert_eq!(request.header("authorization"), Some("Bearer sk-test"));

    let body = request.json();
    assert_eq!(body["model"], TECH_NEWS.model);
    assert_eq!(body["max_tokens"], TECH_NEWS.max_tokens);
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - f64::from(TECH_NEWS.temperature)).abs() < 1e-6);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], TECH_NEWS.persona.trim());
    assert_eq!(messages[1]["role"], "user");
    assert!(messages[1]["content"]
        .as_str()
        .unwrap()
        .contains(&TECH_NEWS.format_date(date())));
}

#[tokio::test]
async fn model_override_replaces_template_model() {
    let stub = spawn_stub(200, &[], &completion_body("namaste")).await;
    let generator = generator_for(&stub.base_url).with_model("gpt-4o-mini");

    generator::generate(&generator, &HINDI_NEWS, date())
        .await
        .unwrap();

    assert_eq!(stub.captured().await.json()["model"], "gpt-4o-mini");
}

#[tokio::test]
async fn error_status_carries_status_and_body() {
    let stub = spawn_stub(
        401,
        &[],
        r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
    )
    .await;
    let generator = generator_for(&stub.base_url);

    let err = generator::generate(&generator, &TECH_NEWS, date())
        .await
        .unwrap_err();
    stub.captured().await;

    match err {
        GenerationError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key provided"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn no_choices_is_empty() {
    let stub = spawn_stub(200, &[], r#"{"choices":[]}"#).await;
    let generator = generator_for(&stub.base_url);

    let err = generator.complete(&TECH_NEWS.to_request(date(), None)).await.unwrap_err();
    stub.captured().await;

    assert!(matches!(err, GenerationError::Empty));
}

#[tokio::test]
async fn whitespace_only_content_is_empty() {
    let stub = spawn_stub(200, &[], &completion_body("   \n  ")).await;
    let generator = generator_for(&stub.base_url);

    let err = generator::generate(&generator, &TECH_NEWS, date())
        .await
        .unwrap_err();
    stub.captured().await;

    assert!(matches!(err, GenerationError::Empty));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let stub = spawn_stub(200, &[], "not json").await;
    let generator = generator_for(&stub.base_url);

    let err = generator::generate(&generator, &TECH_NEWS, date())
        .await
        .unwrap_err();
    stub.captured().await;

    assert!(matches!(err, GenerationError::Parse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let generator = generator_for("http://127.0.0.1:9/v1");

    let err = generator::generate(&generator, &TECH_NEWS, date())
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Network(_)));
}
