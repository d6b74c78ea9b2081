use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::KeyPair;
use auth::PasswordHasher;
use auth::ScryptCost;
use serde_json::json;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;

const PRIVATE_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/tests/keys/test_private.pem"
));
const PUBLIC_PEM: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../auth/tests/keys/test_public.pem"
));

pub const LOGIN: &str = "wolfeidau";
pub const EMAIL: &str = "mark@wolfe.id.au";
pub const PASSWORD: &str = "Somewh3r3 there is a cow!";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Shares the server's key pair, for minting tokens directly
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let keys = KeyPair::from_pem(PRIVATE_PEM, PUBLIC_PEM).expect("Failed to load test keys");
        let jwt_handler = JwtHandler::new(keys, 24).expect("Invalid token lifetime");

        // Cheap cost keeps the tests fast
        let password_hasher =
            PasswordHasher::with_cost(ScryptCost::new(10, 8, 1)).expect("Invalid scrypt cost");
        let authenticator = Arc::new(Authenticator::new(password_hasher, jwt_handler.clone()));

        let user_repo = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register the default user and return the response body
    pub async fn register(&self) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "login": LOGIN,
                "email": EMAIL,
                "name": "Mark Wolfe",
                "password": PASSWORD
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in with a form post
    pub async fn login(&self, login: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .form(&[("login", login), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register the default user and return its id and a fresh token
    pub async fn register_and_login(&self) -> (String, String) {
        let body = self.register().await;
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let response = self.login(LOGIN, PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["token"].as_str().unwrap().to_string();

        (user_id, token)
    }
}
