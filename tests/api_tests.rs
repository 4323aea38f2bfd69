mod common;

use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    common::cleanup(app).await;
}

// ── Invitations ─────────────────────────────────────────────────

#[tokio::test]
async fn invitation_creation_is_idempotent_while_unused() {
    let app = common::spawn_app().await;

    let first = app.create_invitation("alice@example.com").await;
    let second = app.create_invitation("alice@example.com").await;
    assert_eq!(first.token, second.token);
    assert_eq!(first.id, second.id);
    assert!(!second.used);

    common::cleanup(app).await;
}

#[tokio::test]
async fn reinviting_used_email_resets_without_rotating_token() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("alice@example.com").await;
    let (_, status) = app
        .register(&invite.token.to_string(), "alice", "alice@example.com", "Secr3tPW!")
        .await;
    assert_eq!(status, StatusCode::OK);

    let again = app.create_invitation("alice@example.com").await;
    assert_eq!(again.token, invite.token);
    assert!(!again.used);

    common::cleanup(app).await;
}

// ── Registration ────────────────────────────────────────────────

#[tokio::test]
async fn register_with_valid_invitation() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("alice@example.com").await;
    let (body, status) = app
        .register(&invite.token.to_string(), "alice", "alice@example.com", "Secr3tPW!")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());

    // Invitation is consumed
    let used: bool =
        sqlx::query_scalar("SELECT used FROM invitations WHERE token = $1")
            .bind(invite.token)
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert!(used);

    // Account exists with a hashed (non-plaintext) password, linked to
    // the invitation
    let (hash, invitation_id): (String, Option<Uuid>) = sqlx::query_as(
        "SELECT password_hash, invitation_id FROM users WHERE username = 'alice'",
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_ne!(hash, "Secr3tPW!");
    assert!(hash.starts_with("$argon2"));
    assert_eq!(invitation_id, Some(invite.id));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_twice_fails_with_already_used() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("alice@example.com").await;
    let token = invite.token.to_string();
    let (_, status) = app
        .register(&token, "alice", "alice@example.com", "Secr3tPW!")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app
        .register(&token, "alice2", "alice2@example.com", "Secr3tPW!")
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invitation already used");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_malformed_tokens() {
    let app = common::spawn_app().await;

    for bad in ["not-a-uuid", "1234", "550e8400-e29b-41d4-a716-44665544zzzz"] {
        let (body, status) = app.register(bad, "bob", "bob@example.com", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "token {bad:?}");
        assert_eq!(body["error"], "Invalid token format");
    }

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_unknown_token_is_not_found() {
    let app = common::spawn_app().await;

    let (body, status) = app
        .register(&Uuid::new_v4().to_string(), "bob", "bob@example.com", "password123")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Invitation not found");

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_validates_fields() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("carol@example.com").await;
    let token = invite.token.to_string();

    // Short password
    let (body, status) = app.register(&token, "carol", "carol@example.com", "short").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["password"][0].as_str().unwrap().contains("8"));

    // Missing fields
    let (body, status) = app.register(&token, "", "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());

    // Bad email shape
    let (body, status) = app.register(&token, "carol", "not-an-email", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"][0].as_str().unwrap().contains("valid"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_rejects_duplicate_username_and_email() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    let invite = app.create_invitation("dave@example.com").await;
    let token = invite.token.to_string();

    let (body, status) = app.register(&token, "admin", "dave@example.com", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["username"][0].as_str().unwrap().contains("exists"));

    let (body, status) = app.register(&token, "dave", "admin@test.com", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"][0].as_str().unwrap().contains("exists"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn register_probe_reports_invited_email() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("eve@example.com").await;
    let resp = app
        .client
        .get(app.url(&format!("/api/register/{}", invite.token)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["email"], "eve@example.com");

    common::cleanup(app).await;
}

// ── Login / Logout / Who-am-i ───────────────────────────────────

#[tokio::test]
async fn register_login_whoami_round_trip() {
    let app = common::spawn_app().await;

    let invite = app.create_invitation("alice@example.com").await;
    let (_, status) = app
        .register(&invite.token.to_string(), "alice", "alice@example.com", "Secr3tPW!")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (body, status) = app.login("alice@example.com", "Secr3tPW!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["access_token"].as_str().unwrap();

    let (body, status) = app.get_auth("/api/user", token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAuthenticated"], true);
    assert_eq!(body["username"], "alice");

    common::cleanup(app).await;
}

#[tokio::test]
async fn login_failure_is_generic_400() {
    let app = common::spawn_app().await;
    app.bootstrap().await;

    // Wrong password and unknown email give the same error
    let (body, status) = app.login("admin@test.com", "wrongpassword").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    let (body, status) = app.login("nobody@test.com", "password123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid credentials");

    common::cleanup(app).await;
}

#[tokio::test]
async fn logout_always_succeeds() {
    let app = common::spawn_app().await;

    let resp = app.client.post(app.url("/api/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    common::cleanup(app).await;
}

#[tokio::test]
async fn whoami_requires_authentication() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/api/user")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Token refresh ───────────────────────────────────────────────

#[tokio::test]
async fn refresh_token_rotation() {
    let app = common::spawn_app().await;
    app.bootstrap().await;
    let (login_body, _) = app.login("admin@test.com", "password123").await;
    let refresh = login_body["refresh_token"].as_str().unwrap();

    let resp = app
        .client
        .post(app.url("/api/token/refresh"))
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    let new_refresh = body["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, refresh);

    // Replaying the rotated token revokes all sessions
    let resp2 = app
        .client
        .post(app.url("/api/token/refresh"))
        .json(&json!({ "refresh_token": refresh }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp2.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = resp2.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("reuse"));

    common::cleanup(app).await;
}

#[tokio::test]
async fn refresh_rejects_unknown_token() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/api/token/refresh"))
        .json(&json!({ "refresh_token": "deadbeef" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Deployment webhook ──────────────────────────────────────────

#[tokio::test]
async fn webhook_rejects_wrong_signature() {
    let app = common::spawn_app().await;

    let status = app
        .webhook(b"{}", Some("sha256=0000000000000000000000000000000000000000000000000000000000000000"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn webhook_rejects_missing_signature() {
    let app = common::spawn_app().await;

    let status = app.webhook(b"{}", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn webhook_accepts_correct_signature() {
    let app = common::spawn_app().await;

    // Same body that fails with a bad signature passes verification with
    // the right one. Deployment itself is unconfigured in tests, so the
    // request proceeds past the signature gate into a 500, never a 400.
    let sig = common::sign_webhook(b"{}");
    let status = app.webhook(b"{}", Some(&sig)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    common::cleanup(app).await;
}

#[tokio::test]
async fn webhook_signature_is_body_sensitive() {
    let app = common::spawn_app().await;

    let sig = common::sign_webhook(b"{}");
    let status = app.webhook(b"{\"tampered\":true}", Some(&sig)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

#[tokio::test]
async fn webhook_rejects_non_post() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/hooks/git-push"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    common::cleanup(app).await;
}

// ── Clients CRUD ────────────────────────────────────────────────

#[tokio::test]
async fn clients_crud() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (client, status) = app
        .post_auth(
            "/api/clients",
            &token,
            &json!({
                "first_name": "Maria",
                "last_name": "Lopez",
                "email": "maria@example.com",
                "phone_number": "555-0101"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create client: {client}");
    let client_id = client["id"].as_str().unwrap().to_string();

    // List
    let (list, status) = app.get_auth("/api/clients", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Free-text filter
    let (list, _) = app.get_auth("/api/clients?q=mar", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (list, _) = app.get_auth("/api/clients?q=nomatch", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    // Partial update
    let (updated, status) = app
        .put_auth(
            &format!("/api/clients/{client_id}"),
            &token,
            &json!({ "notes": "Prefers morning appointments" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Maria");
    assert_eq!(updated["notes"], "Prefers morning appointments");

    // Duplicate email conflicts
    let (_, status) = app
        .post_auth(
            "/api/clients",
            &token,
            &json!({
                "first_name": "Other",
                "last_name": "Person",
                "email": "maria@example.com"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Delete
    let (_, status) = app.delete_auth(&format!("/api/clients/{client_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, status) = app.get_auth(&format!("/api/clients/{client_id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    common::cleanup(app).await;
}

#[tokio::test]
async fn clients_require_authentication() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/api/clients")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    common::cleanup(app).await;
}

// ── Stylists CRUD ───────────────────────────────────────────────

#[tokio::test]
async fn stylists_crud_and_filter() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (stylist, status) = app
        .post_auth(
            "/api/stylists",
            &token,
            &json!({ "name": "Emma Johnson", "specialties": ["Haircut", "Color"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let stylist_id = stylist["id"].as_str().unwrap().to_string();
    assert_eq!(stylist["specialties"], json!(["Haircut", "Color"]));

    app.post_auth(
        "/api/stylists",
        &token,
        &json!({ "name": "David Wilson", "specialties": ["Beard"] }),
    )
    .await;

    let (list, _) = app.get_auth("/api/stylists?q=emma", &token).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Default ordering is by name
    let (list, _) = app.get_auth("/api/stylists", &token).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["David Wilson", "Emma Johnson"]);

    let (updated, status) = app
        .put_auth(
            &format!("/api/stylists/{stylist_id}"),
            &token,
            &json!({ "specialties": ["Haircut", "Color", "Treatment"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Emma Johnson");
    assert_eq!(updated["specialties"].as_array().unwrap().len(), 3);

    common::cleanup(app).await;
}

// ── Services CRUD ───────────────────────────────────────────────

#[tokio::test]
async fn services_crud() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (service, status) = app
        .post_auth(
            "/api/services",
            &token,
            &json!({
                "name": "Hair Color",
                "description": "Full hair coloring service.",
                "duration_minutes": 120,
                "price": 85.0
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let service_id = service["id"].as_str().unwrap().to_string();

    // Rejects non-positive duration
    let (_, status) = app
        .post_auth(
            "/api/services",
            &token,
            &json!({ "name": "Broken", "duration_minutes": 0, "price": 10.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (updated, status) = app
        .put_auth(
            &format!("/api/services/{service_id}"),
            &token,
            &json!({ "price": 90.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 90.0);
    assert_eq!(updated["duration_minutes"], 120);

    let (_, status) = app.delete_auth(&format!("/api/services/{service_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}

// ── Appointments CRUD ───────────────────────────────────────────

#[tokio::test]
async fn appointments_crud() {
    let app = common::spawn_app().await;
    let token = app.bootstrap().await;

    let (appt, status) = app
        .post_auth(
            "/api/appointments",
            &token,
            &json!({
                "title": "Cut with Emma",
                "start_time": "2026-09-01T10:00:00Z"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create appointment: {appt}");
    let appt_id = appt["id"].as_str().unwrap().to_string();
    assert_eq!(appt["status"], "scheduled");
    // end_time defaults to one hour after start
    assert_eq!(appt["end_time"], "2026-09-01T11:00:00Z");

    // Title required
    let (_, status) = app
        .post_auth(
            "/api/appointments",
            &token,
            &json!({ "title": "", "start_time": "2026-09-01T10:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Invalid status rejected
    let (_, status) = app
        .put_auth(
            &format!("/api/appointments/{appt_id}"),
            &token,
            &json!({ "status": "teleported" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (updated, status) = app
        .put_auth(
            &format!("/api/appointments/{appt_id}"),
            &token,
            &json!({ "status": "confirmed" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "confirmed");

    // end_time must stay after start_time
    let (_, status) = app
        .put_auth(
            &format!("/api/appointments/{appt_id}"),
            &token,
            &json!({ "end_time": "2026-09-01T09:00:00Z" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, status) = app
        .delete_auth(&format!("/api/appointments/{appt_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    common::cleanup(app).await;
}
