//! Chat-completion and Gemini providers against an in-process model server.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use unicompare_core::sample::sample_universities;
use unicompare_predict::{
    AdmissionPredictor, AdmissionProfile, ChatCompletionProvider, GeminiProvider, PredictionError,
    PredictionProvider,
};

#[derive(Clone, Default)]
struct ModelServer {
    requests: Arc<Mutex<Vec<Value>>>,
}

fn chat_reply(content: &str) -> Response {
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
    .into_response()
}

async fn chat_completions(
    State(server): State<ModelServer>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    server.requests.lock().await.push(body.clone());

    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }

    match body["model"].as_str().unwrap_or_default() {
        "overloaded" => (StatusCode::SERVICE_UNAVAILABLE, "model overloaded").into_response(),
        "chatty" => chat_reply("Sure! The student looks strong."),
        "partial" => chat_reply(r#"{"chance": 55}"#),
        "empty" => Json(json!({ "choices": [] })).into_response(),
        _ => chat_reply(r#"{"chance": 150, "explanation": "Scores exceed every requirement"}"#),
    }
}

async fn generate_content(
    Path((version, model_call)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if params.get("key").map(String::as_str) != Some("AIzaTestKey") {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }
    if body["contents"][0]["parts"][0]["text"].as_str().is_none() {
        return (StatusCode::BAD_REQUEST, "missing prompt").into_response();
    }
    if version != "v1beta" || model_call != "gemini-1.5-flash:generateContent" {
        return (StatusCode::NOT_FOUND, "model not found").into_response();
    }

    Json(json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "text": "Here is the analysis:\n```json\n{\"chance\": 72.5, \"explanation\": \"Competitive profile\"}\n```"
                }]
            }
        }]
    }))
    .into_response()
}

async fn spawn_model_server() -> (ModelServer, String) {
    let server = ModelServer::default();
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(chat_completions))
        .route("/{version}/models/{model_call}", post(generate_content))
        .with_state(server.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (server, format!("http://{addr}"))
}

fn chat(base: &str, model: &str) -> Box<dyn PredictionProvider> {
    Box::new(ChatCompletionProvider::with_endpoint(
        "groq",
        format!("{base}/openai/v1/chat/completions"),
        "test-key",
        model,
    ))
}

fn gemini(base: &str, version: &str, model: &str) -> Box<dyn PredictionProvider> {
    Box::new(GeminiProvider::with_base_url(base, "AIzaTestKey", version, model).unwrap())
}

#[tokio::test]
async fn test_chat_completion_request_and_clamp() {
    let (server, base) = spawn_model_server().await;
    let predictor = AdmissionPredictor::with_providers(vec![chat(&base, "llama-3.1-8b-instant")]);

    let universities = sample_universities();
    let profile = AdmissionProfile {
        gpa: "3.9".to_string(),
        unt_score: "125".to_string(),
        ..AdmissionProfile::default()
    };
    let prediction = predictor.predict(&universities[0], &profile).await.unwrap();

    assert_eq!(prediction.chance, 100.0);
    assert_eq!(prediction.explanation, "Scores exceed every requirement");
    assert_eq!(prediction.provider, "groq/llama-3.1-8b-instant");

    let requests = server.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["response_format"]["type"], "json_object");
    let prompt = requests[0]["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.contains(&universities[0].name));
    assert!(prompt.contains("- GPA: 3.9"));
}

#[tokio::test]
async fn test_chain_falls_through_to_gemini() {
    let (server, base) = spawn_model_server().await;
    let predictor = AdmissionPredictor::with_providers(vec![
        chat(&base, "overloaded"),
        chat(&base, "chatty"),
        chat(&base, "partial"),
        chat(&base, "empty"),
        gemini(&base, "v1", "gemini-1.5-flash-latest"),
        gemini(&base, "v1beta", "gemini-1.5-flash"),
    ]);

    let prediction = predictor.predict_prompt("profile").await.unwrap();
    assert_eq!(prediction.chance, 72.5);
    assert_eq!(prediction.explanation, "Competitive profile");
    assert_eq!(prediction.provider, "gemini/v1beta/gemini-1.5-flash");
    assert_eq!(server.requests.lock().await.len(), 4);
}

#[tokio::test]
async fn test_exhausted_chain_reports_last_failure() {
    let (_, base) = spawn_model_server().await;
    let predictor = AdmissionPredictor::with_providers(vec![
        chat(&base, "chatty"),
        gemini(&base, "v1", "gemini-1.5-pro-latest"),
    ]);

    match predictor.predict_prompt("profile").await.unwrap_err() {
        PredictionError::HttpStatus {
            provider,
            status,
            body,
        } => {
            assert_eq!(provider, "gemini/v1/gemini-1.5-pro-latest");
            assert_eq!(status, 404);
            assert_eq!(body, "model not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = ChatCompletionProvider::with_endpoint(
        "openai",
        format!("http://{addr}/v1/chat/completions"),
        "test-key",
        "gpt-3.5-turbo",
    );
    let err = provider.predict("profile").await.unwrap_err();
    assert!(matches!(err, PredictionError::NetworkError { .. }));
}
