#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::header,
    test, web,
};
use serde_json::{json, Value};
use std::sync::Arc;
use todo_api::{
    auth::{password::MIN_BCRYPT_COST, AuthResponse, TokenKeys},
    store::MemoryStore,
    AppState,
};

pub const SECRET: &str = "integration_test_secret";
pub const ORIGIN: &str = "http://localhost:5173";

/// Fresh in-memory state; the cheapest bcrypt cost keeps the suite fast.
pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        TokenKeys::from_secret(SECRET),
        MIN_BCRYPT_COST,
    ))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Signs up a user and returns the issued token.
pub async fn signup(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> Result<String, String> {
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "signup failed. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let parsed: AuthResponse = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse signup response: {}", e))?;
    Ok(parsed.token)
}

/// Creates a task and returns its JSON.
pub async fn create_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    token: &str,
    payload: Value,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(bearer(token))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
    test::read_body_json(resp).await
}
