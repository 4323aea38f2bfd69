use std::net::SocketAddr;

use hmac::{Hmac, Mac};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sha2::Sha256;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use salond::config::Config;
use salond::models::Invitation;

pub const WEBHOOK_SECRET: &str = "test-webhook-secret";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create an invitation directly against the database, as the `invite`
    /// admin binary would.
    pub async fn create_invitation(&self, email: &str) -> Invitation {
        salond::db::invitations::get_or_create(&self.pool, email)
            .await
            .expect("failed to create invitation")
    }

    /// Register against an invitation token, return (body, status).
    pub async fn register(
        &self,
        token: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/register/{token}")))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Login and return the response body + status.
    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Invite + register a default user, return the access token.
    pub async fn bootstrap(&self) -> String {
        let invite = self.create_invitation("admin@test.com").await;
        let (body, status) = self
            .register(&invite.token.to_string(), "admin", "admin@test.com", "password123")
            .await;
        assert_eq!(status, StatusCode::OK, "bootstrap register failed: {body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Deliver a webhook body with the given signature header value.
    pub async fn webhook(&self, body: &[u8], signature: Option<&str>) -> StatusCode {
        let mut req = self
            .client
            .post(self.url("/hooks/git-push"))
            .body(body.to_vec());
        if let Some(sig) = signature {
            req = req.header("X-Hub-Signature-256", sig);
        }
        req.send().await.expect("webhook request failed").status()
    }
}

/// Compute a valid `sha256=<hex>` signature for a webhook body.
pub fn sign_webhook(body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("salond_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        webhook_secret: WEBHOOK_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
        deploy: None,
    };

    let app = salond::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
