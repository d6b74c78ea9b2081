mod common;

use chrono::Utc;
use common::TestApp;
use common::EMAIL;
use common::LOGIN;
use common::PASSWORD;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let body = app.register().await;

    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["login"], LOGIN);
    assert_eq!(body["data"]["email"], EMAIL);
    assert_eq!(body["data"]["name"], "Mark Wolfe");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "id": "123",
            "email": EMAIL,
            "name": "Mark Wolf"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let errors = body["data"]["errors"].as_array().unwrap();
    let summary: Vec<(&str, &str)> = errors
        .iter()
        .map(|e| (e["type"].as_str().unwrap(), e["field"].as_str().unwrap()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("FieldValueForbidden", "User.ID"),
            ("FieldValueRequired", "User.Login"),
            ("FieldValueRequired", "User.Password"),
            ("FieldValueInvalid", "User.Login"),
            ("FieldValueInvalid", "User.Password"),
        ]
    );
}

#[tokio::test]
async fn test_create_user_short_login() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "login": "abc", "email": EMAIL, "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["errors"][0]["detail"],
        "User: Login must be between 5 and 255 characters"
    );
    assert_eq!(body["data"]["errors"][0]["bad_value"], "abc");
}

#[tokio::test]
async fn test_create_user_duplicate_login() {
    let app = TestApp::spawn().await;
    app.register().await;

    let response = app
        .post("/api/users")
        .json(&json!({ "login": LOGIN, "email": "other@wolfe.id.au", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let registered = app.register().await;

    let response = app.login(LOGIN, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let header = response
        .headers()
        .get(AUTHORIZATION)
        .expect("Missing Authorization header")
        .to_str()
        .unwrap()
        .to_string();

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(header, format!("Bearer {}", token));

    let identity = app.jwt_handler.verify(token).unwrap();
    assert_eq!(
        identity.subject_id.as_deref(),
        registered["data"]["id"].as_str()
    );
    assert_eq!(identity.login.as_deref(), Some(LOGIN));
    assert_eq!(identity.email.as_deref(), Some(EMAIL));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register().await;

    let wrong_password = app.login(LOGIN, "not the password").await;
    let unknown_login = app.login("nobody-here", PASSWORD).await;

    assert_eq!(wrong_password.status(), StatusCode::FORBIDDEN);
    assert_eq!(unknown_login.status(), StatusCode::FORBIDDEN);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_login: serde_json::Value = unknown_login.json().await.unwrap();
    assert_eq!(wrong_password, unknown_login);
    assert_eq!(wrong_password["data"]["message"], "Auth failed.");
}

#[tokio::test]
async fn test_get_user_success() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login().await;

    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["login"], LOGIN);
}

#[tokio::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login().await;

    for scheme in ["bearer", "BEARER"] {
        let response = app
            .get("/api/users")
            .header(AUTHORIZATION, format!("{} {}", scheme, token))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["id"], user_id.as_str());
    }
}

#[tokio::test]
async fn test_protected_routes_reject_uniformly() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login().await;

    // Flip the first character of the signature
    let (head, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

    let now = Utc::now().timestamp();
    let expired = app
        .jwt_handler
        .issue_at(&user_id, LOGIN, EMAIL, now - 25 * 3600)
        .unwrap();

    let mut responses = vec![app.get("/api/users").send().await.unwrap()];
    for authorization in [
        format!("Bearer {}", tampered),
        format!("Bearer {}", expired),
        "Bearer not-a-token".to_string(),
        format!("Token {}", token),
    ] {
        responses.push(
            app.get("/api/users")
                .header(AUTHORIZATION, authorization)
                .send()
                .await
                .unwrap(),
        );
    }

    let mut bodies = Vec::new();
    for response in responses {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.json::<serde_json::Value>().await.unwrap());
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_update_user_name() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login().await;

    let response = app
        .put_authenticated("/api/users", &token)
        .json(&json!({ "login": LOGIN, "name": "Mark Wolf" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id.as_str());
    assert_eq!(body["data"]["name"], "Mark Wolf");
    assert_eq!(body["data"]["email"], EMAIL);
}

#[tokio::test]
async fn test_update_user_rejects_password_and_email() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login().await;

    let response = app
        .put_authenticated("/api/users", &token)
        .json(&json!({ "email": "other@wolfe.id.au", "password": "sneaky password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "User.Email");
    assert_eq!(errors[0]["detail"], "User updates must not change Email");
    assert_eq!(errors[1]["field"], "User.Password");
    assert_eq!(errors[1]["detail"], "User updates must not supply Password");
}

#[tokio::test]
async fn test_update_password() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login().await;

    let response = app
        .put_authenticated("/api/users/password", &token)
        .json(&json!({ "password": "n3w and improved" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(app.login(LOGIN, PASSWORD).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        app.login(LOGIN, "n3w and improved").await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_update_password_invalid() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login().await;

    let missing = app
        .put_authenticated("/api/users/password", &token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let short = app
        .put_authenticated("/api/users/password", &token)
        .json(&json!({ "password": "abc" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = short.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["errors"][0]["field"], "User.Password");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login().await;

    let response = app
        .delete_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The token outlives the account
    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
