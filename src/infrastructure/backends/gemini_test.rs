use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::CompletionRequest;
use super::Gemini;
use crate::domain::models::CompletionBackend;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::CompletionReply;
use crate::domain::models::Language;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout: "200".to_string(),
        };
    }
}

const COMPLETION_PATH: &str = "/v1/models/gemini-2.0-flash:generateContent?key=abc";

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/models/gemini-2.0-flash?key=abc")
        .with_status(200)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/models/gemini-2.0-flash?key=abc")
        .with_status(500)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_token() {
    let mut backend = Gemini::with_url("http://localhost:1".to_string());
    backend.token = "".to_string();

    let res = backend.health_check().await;
    assert_eq!(
        res.map_err(|e| return e.to_string()),
        Err("Gemini token is not defined".to_string())
    );
}

#[test]
fn it_builds_the_request_body() -> Result<()> {
    let req = CompletionRequest::from(CompletionPrompt::for_language(Language::En, "Hi"));
    let body = serde_json::to_value(&req)?;

    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][1]["role"], "model");
    assert_eq!(body["contents"][2], json!({ "role": "user", "parts": [{ "text": "Hi" }] }));
    assert_eq!(body["generationConfig"]["topK"], 40);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    assert_eq!(body["safetySettings"].as_array().map(|e| return e.len()), Some(4));
    insta::assert_snapshot!(body["safetySettings"][0].to_string(), @r###"{"category":"HARM_CATEGORY_HARASSMENT","threshold":"BLOCK_MEDIUM_AND_ABOVE"}"###);

    return Ok(());
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Hi" }] } }]
    });

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETION_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "generationConfig": { "topK": 40 } })),
            Matcher::Regex(r#""text":"Hello""#.to_string()),
        ]))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(CompletionPrompt::for_language(Language::Ru, "Hello"))
        .await?;
    mock.assert_async().await;

    assert_eq!(res, CompletionReply::Text("Hi".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_reports_api_errors() -> Result<()> {
    let body = json!({
        "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
    });

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETION_PATH)
        .with_status(400)
        .with_body(body.to_string())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(CompletionPrompt::for_language(Language::En, "Hello"))
        .await?;
    mock.assert_async().await;

    assert_eq!(
        res,
        CompletionReply::ApiError {
            code: 400,
            message: "API key not valid".to_string()
        }
    );

    return Ok(());
}

#[tokio::test]
async fn it_defaults_missing_error_fields() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETION_PATH)
        .with_status(500)
        .with_body(r#"{ "error": {} }"#)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(CompletionPrompt::for_language(Language::En, "Hello"))
        .await?;
    mock.assert_async().await;

    assert_eq!(
        res,
        CompletionReply::ApiError {
            code: 0,
            message: "Unknown error".to_string()
        }
    );

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_malformed_bodies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETION_PATH)
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(CompletionPrompt::for_language(Language::En, "Hello"))
        .await;
    mock.assert_async().await;

    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_without_candidates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", COMPLETION_PATH)
        .with_status(200)
        .with_body(r#"{ "candidates": [] }"#)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(CompletionPrompt::for_language(Language::En, "Hello"))
        .await;
    mock.assert_async().await;

    assert!(res.is_err());
}
