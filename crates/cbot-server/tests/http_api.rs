use std::net::SocketAddr;

use axum::{http::StatusCode, routing::post, Router};
use cbot_core::chat::{CONNECTION_FAILED, NO_REPLY, UNREACHABLE};
use cbot_server::{build_router, AppState, Config};
use serde_json::{json, Value};
use test_case::test_case;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

async fn spawn_service(config: Config) -> SocketAddr {
    let state = AppState::new(config).expect("state");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("serve");
    });
    addr
}

async fn spawn_default() -> SocketAddr {
    spawn_service(Config::default()).await
}

/// A stand-in chat webhook answering every POST with the given status and
/// body. Returns its URL.
async fn spawn_webhook(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/hook",
        post(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve webhook");
    });
    format!("http://{addr}/hook")
}

async fn send(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&Value>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let payload = body.map(Value::to_string).unwrap_or_default();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{payload}",
        payload.len()
    );
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_lowercase(), body.to_string())
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).expect("json body")
}

fn answers() -> Value {
    json!({
        "environment": "both",
        "environmentType": "on-prem",
        "coreModules": ["core", "panel", "aiflow"],
        "auxiliaryServices": ["ocr"],
        "database": "postgresql",
        "ldapEnabled": false
    })
}

fn classifier_answers() -> Value {
    json!({
        "environment": "test",
        "environmentType": "cloud",
        "coreModules": ["classifier"],
        "database": "mssql"
    })
}

async fn generate(addr: SocketAddr, answers: &Value) -> String {
    let (status, _, body) = send(addr, "POST", "/api/requirements/generate", Some(answers)).await;
    assert_eq!(status, 201, "{body}");
    parse(&body)["requirementId"]
        .as_str()
        .expect("requirement id")
        .to_string()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let addr = spawn_default().await;
    let (status, _, body) = send(addr, "GET", "/healthz", None).await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn generate_returns_report_and_identifier() {
    let addr = spawn_default().await;
    let (status, _, body) =
        send(addr, "POST", "/api/requirements/generate", Some(&answers())).await;
    assert_eq!(status, 201);

    let body = parse(&body);
    assert!(body["requirementId"].is_string());
    let report = &body["requirements"];
    assert_eq!(report["title"], "CBOT Installation Requirements");
    let sections = report["sections"].as_array().expect("sections");
    assert_eq!(sections[0]["ordinal"], 1);
    assert_eq!(sections.last().expect("last")["ordinal"], sections.len());
}

#[test_case(json!({"environmentType": "cloud", "database": "mssql"}); "missing environment")]
#[test_case(json!({"environment": "staging", "environmentType": "cloud", "database": "mssql"}); "unknown environment")]
#[test_case(json!({"environment": "test", "environmentType": "cloud", "database": "mssql", "coreModules": ["billing"]}); "unknown module")]
#[test_case(json!({"environment": "test", "environmentType": "cloud", "database": "mssql", "ldapEnabled": true}); "ldap without details")]
#[test_case(json!({"environment": "test", "environmentType": "cloud", "database": "mssql", "coreModules": "core"}); "modules not a list")]
#[test_case(json!({"environment": "test", "environmentType": "cloud", "database": "mssql", "ldapEnabled": "yes"}); "ldap flag not a boolean")]
#[test_case(json!({"environment": "test", "environmentType": "cloud", "database": "mssql", "ldapEnabled": true, "ldapDetails": {"url": "ldap://dc01", "bindDn": "cn=a\n## injected,dc=x"}}); "control character in ldap field")]
#[tokio::test]
async fn invalid_answers_are_rejected(answers: Value) {
    let addr = spawn_default().await;
    let (status, head, body) =
        send(addr, "POST", "/api/requirements/generate", Some(&answers)).await;
    assert_eq!(status, 400);
    assert!(head.contains("content-type: application/json"), "{head}");
    assert!(parse(&body)["message"].is_string());
}

#[test_case("html", "text/html", "html"; "html")]
#[test_case("markdown", "text/markdown", "md"; "markdown")]
#[test_case("md", "text/markdown", "md"; "markdown alias")]
#[test_case("json", "application/json", "json"; "json")]
#[tokio::test]
async fn download_renders_requested_format(format: &str, content_type: &str, extension: &str) {
    let addr = spawn_default().await;
    let id = generate(addr, &answers()).await;

    let path = format!("/api/requirements/{id}?format={format}");
    let (status, head, body) = send(addr, "GET", &path, None).await;
    assert_eq!(status, 200);
    assert!(head.contains(&format!("content-type: {content_type}")), "{head}");
    assert!(
        head.contains(&format!(
            "content-disposition: attachment; filename=cbot_installation_requirements_{id}.{extension}"
        )),
        "{head}"
    );
    assert!(body.contains("CBOT Installation Requirements"));
}

#[tokio::test]
async fn download_defaults_to_html() {
    let addr = spawn_default().await;
    let id = generate(addr, &answers()).await;

    let (status, head, body) = send(addr, "GET", &format!("/api/requirements/{id}"), None).await;
    assert_eq!(status, 200);
    assert!(head.contains("content-type: text/html"));
    assert!(body.starts_with("<!DOCTYPE html>") || body.contains("<html"));
}

#[tokio::test]
async fn download_rejects_unknown_format() {
    let addr = spawn_default().await;
    let id = generate(addr, &answers()).await;

    let (status, _, body) = send(
        addr,
        "GET",
        &format!("/api/requirements/{id}?format=pdf"),
        None,
    )
    .await;
    assert_eq!(status, 400);
    assert!(parse(&body)["message"]
        .as_str()
        .expect("message")
        .contains("pdf"));
}

#[test_case("not-a-uuid"; "malformed identifier")]
#[test_case("6f1c1d9e-3a0b-4c55-9d7e-2f8a1b3c4d5e"; "unknown identifier")]
#[tokio::test]
async fn download_of_missing_document_is_not_found(id: &str) {
    let addr = spawn_default().await;
    let (status, _, _) = send(addr, "GET", &format!("/api/requirements/{id}"), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn oldest_document_is_evicted_at_capacity() {
    let addr = spawn_service(Config::default().with_max_documents(2)).await;
    let first = generate(addr, &answers()).await;
    let second = generate(addr, &answers()).await;
    let third = generate(addr, &answers()).await;

    let (status, _, _) = send(addr, "GET", &format!("/api/requirements/{first}"), None).await;
    assert_eq!(status, 404);
    for id in [second, third] {
        let (status, _, _) = send(addr, "GET", &format!("/api/requirements/{id}"), None).await;
        assert_eq!(status, 200);
    }
}

#[tokio::test]
async fn chat_relays_webhook_reply() {
    let webhook = spawn_webhook(StatusCode::OK, r#"{"response": "AI Flow needs 10 cores."}"#).await;
    let addr = spawn_service(Config::default().with_webhook_url(webhook)).await;

    let request = json!({"message": "How many cores for AI Flow?"});
    let (status, _, body) = send(addr, "POST", "/api/chatbot/message", Some(&request)).await;
    assert_eq!(status, 200);
    assert_eq!(parse(&body)["response"], "AI Flow needs 10 cores.");
}

#[test_case(StatusCode::INTERNAL_SERVER_ERROR, "{}", UNREACHABLE; "webhook error status")]
#[test_case(StatusCode::OK, "{}", NO_REPLY; "webhook without reply")]
#[test_case(StatusCode::OK, "not json", CONNECTION_FAILED; "unreadable webhook body")]
#[tokio::test]
async fn chat_falls_back_when_webhook_misbehaves(
    status: StatusCode,
    reply: &'static str,
    expected: &str,
) {
    let webhook = spawn_webhook(status, reply).await;
    let addr = spawn_service(Config::default().with_webhook_url(webhook)).await;

    let request = json!({"message": "hello"});
    let (status, _, body) = send(addr, "POST", "/api/chatbot/message", Some(&request)).await;
    assert_eq!(status, 200);
    assert_eq!(parse(&body)["response"], expected);
}

#[tokio::test]
async fn chat_falls_back_when_webhook_is_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let unused = listener.local_addr().expect("local addr");
    drop(listener);

    let config = Config::default().with_webhook_url(format!("http://{unused}/hook"));
    let addr = spawn_service(config).await;

    let request = json!({"message": "hello"});
    let (status, _, body) = send(addr, "POST", "/api/chatbot/message", Some(&request)).await;
    assert_eq!(status, 200);
    assert_eq!(parse(&body)["response"], CONNECTION_FAILED);
}

#[test_case(json!({"message": "   "}); "blank message")]
#[test_case(json!({"message": 42}); "message not a string")]
#[tokio::test]
async fn invalid_chat_messages_are_rejected(request: Value) {
    let addr = spawn_default().await;
    let (status, _, body) = send(addr, "POST", "/api/chatbot/message", Some(&request)).await;
    assert_eq!(status, 400);
    assert!(parse(&body)["message"].is_string());
}

#[tokio::test]
async fn module_cards_are_listed_and_updated() {
    let addr = spawn_default().await;

    let (status, _, body) = send(addr, "GET", "/api/admin/modules", None).await;
    assert_eq!(status, 200);
    let cards = parse(&body);
    assert_eq!(cards.as_array().expect("cards").len(), 7);

    let update = json!({"cpu_test": 12, "description": "Workflow engine"});
    let (status, _, body) = send(addr, "PUT", "/api/admin/modules/aiflow", Some(&update)).await;
    assert_eq!(status, 200);
    let body = parse(&body);
    assert_eq!(body["message"], "Module updated.");
    assert_eq!(body["module"]["cpu_test"], 12);
    assert_eq!(body["module"]["description"], "Workflow engine");

    let (_, _, body) = send(addr, "GET", "/api/admin/modules", None).await;
    let aiflow = parse(&body)
        .as_array()
        .expect("cards")
        .iter()
        .find(|card| card["id"] == "aiflow")
        .cloned()
        .expect("aiflow card");
    assert_eq!(aiflow["cpu_test"], 12);
}

#[tokio::test]
async fn service_cards_are_listed() {
    let addr = spawn_default().await;
    let (status, _, body) = send(addr, "GET", "/api/admin/services", None).await;
    assert_eq!(status, 200);

    let cards = parse(&body);
    let cards = cards.as_array().expect("cards");
    assert_eq!(cards.len(), 5);
    let hosting = cards
        .iter()
        .find(|card| card["id"] == "hf_model_hosting")
        .expect("model hosting card");
    assert_eq!(hosting["requires_gpu"], true);
    assert_eq!(hosting["gpu_ram"], 16);
    assert_eq!(hosting["ram_live"], 32);
}

#[tokio::test]
async fn database_cards_are_listed() {
    let addr = spawn_default().await;
    let (status, _, body) = send(addr, "GET", "/api/admin/databases", None).await;
    assert_eq!(status, 200);

    let cards = parse(&body);
    let cards = cards.as_array().expect("cards");
    assert_eq!(cards.len(), 3);
    let mssql = cards
        .iter()
        .find(|card| card["id"] == "mssql")
        .expect("mssql card");
    assert_eq!(mssql["port"], 1433);
    assert_eq!(mssql["collation"], "SQL_Latin1_General_CP1_CI_AS");
    let mongodb = cards
        .iter()
        .find(|card| card["id"] == "mongodb")
        .expect("mongodb card");
    assert!(mongodb["collation"].is_null());
}

#[test_case("billing", json!({"cpu_test": 4}), 404; "unknown module")]
#[test_case("core", json!({"cpu_test": 0}), 400; "zero cpu")]
#[test_case("core", json!({"description": "  "}), 400; "blank description")]
#[test_case("core", json!({"cpu_test": -1}), 400; "negative cpu")]
#[test_case("core", json!({"ram_live": "lots"}), 400; "figure not a number")]
#[tokio::test]
async fn invalid_module_updates_are_rejected(id: &str, update: Value, expected: u16) {
    let addr = spawn_default().await;
    let path = format!("/api/admin/modules/{id}");
    let (status, head, body) = send(addr, "PUT", &path, Some(&update)).await;
    assert_eq!(status, expected);
    assert!(head.contains("content-type: application/json"), "{head}");
    assert!(parse(&body)["message"].is_string());
}

#[tokio::test]
async fn generated_documents_are_listed_newest_first() {
    let addr = spawn_default().await;
    let first = generate(addr, &answers()).await;
    let second = generate(addr, &classifier_answers()).await;

    let (status, _, body) = send(addr, "GET", "/api/admin/requirements", None).await;
    assert_eq!(status, 200);
    let ids: Vec<_> = parse(&body)
        .as_array()
        .expect("documents")
        .iter()
        .map(|doc| doc["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(ids, [second, first]);
}

#[test_case("?module=aiflow", 1; "by module")]
#[test_case("?search=postgres", 1; "by database name")]
#[test_case("?search=test", 2; "by environment label")]
#[test_case("?date=today", 2; "today")]
#[test_case("?module=all&date=all", 2; "everything")]
#[tokio::test]
async fn document_listing_is_filtered(query: &str, expected: usize) {
    let addr = spawn_default().await;
    generate(addr, &answers()).await;
    generate(addr, &classifier_answers()).await;

    let (status, _, body) = send(addr, "GET", &format!("/api/admin/requirements{query}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(parse(&body).as_array().expect("documents").len(), expected);
}

#[test_case("?date=yesterday"; "unknown date range")]
#[test_case("?module=billing"; "unknown module")]
#[tokio::test]
async fn invalid_listing_filters_are_rejected(query: &str) {
    let addr = spawn_default().await;
    let (status, _, _) = send(addr, "GET", &format!("/api/admin/requirements{query}"), None).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn documents_can_be_deleted_once() {
    let addr = spawn_default().await;
    let id = generate(addr, &answers()).await;
    let path = format!("/api/admin/requirements/{id}");

    let (status, _, _) = send(addr, "DELETE", &path, None).await;
    assert_eq!(status, 204);
    let (status, _, _) = send(addr, "DELETE", &path, None).await;
    assert_eq!(status, 404);
    let (status, _, _) = send(addr, "GET", &format!("/api/requirements/{id}"), None).await;
    assert_eq!(status, 404);
}
