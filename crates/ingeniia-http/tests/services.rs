//! Mock service tests for the auth, content and scoring facades, and for
//! the session controller driven over HTTP.

use ingeniia_core::content::{CreditRiskInput, Prediction, Purpose};
use ingeniia_core::error::{AuthError, Error};
use ingeniia_core::{
    AccessToken, AuthApi, BaseUrl, Credentials, RefreshToken, SessionController, TokenStore, Topic,
};
use ingeniia_http::{ApiClient, AuthService, ContentService, CreditScoringService};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_service(server: &MockServer) -> AuthService {
    let auth = BaseUrl::new(format!("{}/auth", server.uri())).unwrap();
    AuthService::new(ApiClient::new(TokenStore::in_memory(), auth).unwrap()).unwrap()
}

fn base(server: &MockServer, segment: &str) -> BaseUrl {
    BaseUrl::new(format!("{}/{}", server.uri(), segment)).unwrap()
}

async fn mount_me(server: &MockServer, token: &str) {
    let bearer = format!("Bearer {}", token);
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1",
            "email": "ada@example.com",
            "username": "ada",
            "is_verified": true
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Auth Facade Tests
// ============================================================================

#[tokio::test]
async fn test_register_defaults_username_and_captcha() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "secret123",
            "username": "ada",
            "captcha_token": "dev"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Verification sent" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_service(&server);
    let response = auth
        .register("ada@example.com", "secret123", None)
        .await
        .unwrap();

    assert_eq!(response.message, "Verification sent");
    // Registration alone does not authenticate.
    assert!(auth.tokens().access_token().is_none());
}

#[tokio::test]
async fn test_register_uses_explicit_username_and_captcha() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "secret123",
            "username": "countess",
            "captcha_token": "real-captcha"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_service(&server).with_captcha_token("real-captcha");
    auth.register("ada@example.com", "secret123", Some("countess"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_blank_login_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = auth_service(&server);
    let err = auth
        .login(&Credentials::new("", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "secret123",
            "captcha_token": "dev"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer",
            "expires_in": 900
        })))
        .mount(&server)
        .await;

    let auth = auth_service(&server);
    let tokens = auth
        .login(&Credentials::new("ada@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(tokens.access_token, "access-1");
    assert_eq!(tokens.expires_in, Some(900));
    // The facade does not persist anything; the session controller does.
    assert!(auth.tokens().access_token().is_none());
}

#[tokio::test]
async fn test_wrong_password_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    // No refresh token stored, so no refresh is attempted.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = auth_service(&server);
    let err = auth
        .login(&Credentials::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Invalid credentials"));
}

// ============================================================================
// Session Controller Tests
// ============================================================================

#[tokio::test]
async fn test_session_login_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;
    mount_me(&server, "access-1").await;

    let session = SessionController::new(auth_service(&server));
    session.init().await;
    session.open_auth_modal();

    let user = session
        .login(&Credentials::new("ada@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(user.display_name(), "ada");
    let state = session.state();
    assert!(state.is_authenticated);
    assert!(!state.is_modal_open);
    assert_eq!(
        session.api().tokens().refresh_token().unwrap().as_str(),
        "refresh-1"
    );
}

#[tokio::test]
async fn test_session_verify_email_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify-email"))
        .and(body_json(json!({ "token": "mail-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-v",
            "refresh_token": "refresh-v",
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;
    mount_me(&server, "access-v").await;

    let session = SessionController::new(auth_service(&server));
    let user = session.verify_email("mail-token").await.unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_set_session_with_rejected_me_is_not_a_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "boom" })))
        .mount(&server)
        .await;

    let session = SessionController::new(auth_service(&server));
    let err = session
        .set_session(AccessToken::new("a"), RefreshToken::new("r"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Auth(AuthError::SessionHydration { .. })
    ));
    assert!(!session.is_authenticated());
    assert!(session.api().tokens().access_token().is_none());
    assert!(session.api().tokens().refresh_token().is_none());
}

#[tokio::test]
async fn test_init_refreshes_expired_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "renewed",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_me(&server, "renewed").await;

    let auth = auth_service(&server);
    auth.tokens().set(
        Some(&AccessToken::new("expired")),
        Some(&RefreshToken::new("refresh-1")),
    );
    let session = SessionController::new(auth);

    let state = session.init().await;

    assert!(state.is_authenticated);
    assert_eq!(state.user.unwrap().id, "u-1");
}

#[tokio::test]
async fn test_logout_clears_even_when_remote_fails() {
    let server = MockServer::start().await;

    mount_me(&server, "access-1").await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let auth = auth_service(&server);
    auth.tokens().set(
        Some(&AccessToken::new("access-1")),
        Some(&RefreshToken::new("refresh-1")),
    );
    let session = SessionController::new(auth);
    session.init().await;
    assert!(session.is_authenticated());

    session.logout().await;

    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
    assert!(session.api().tokens().access_token().is_none());
    assert!(session.api().tokens().refresh_token().is_none());
}

// ============================================================================
// Content and Scoring Tests
// ============================================================================

#[tokio::test]
async fn test_videos_and_snippets_by_topic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/videos/topic/mlp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "v1",
            "title": "El perceptron",
            "description": "Intro",
            "youtube_id": "abc123",
            "duration_minutes": 14,
            "whiteboard": {
                "id": "w1",
                "preview_url": "https://cdn.example.com/w1.png",
                "file_url": "https://cdn.example.com/w1.pdf"
            }
        }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/snippets/topic/mlp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "title": "Forward pass",
            "language": "python",
            "github_url": "https://github.com/example/mlp",
            "code": "def forward(x): ..."
        }])))
        .mount(&server)
        .await;

    let auth = base(&server, "auth");
    let client = ApiClient::new(TokenStore::in_memory(), auth).unwrap();
    let content = ContentService::new(client, base(&server, "content"));

    let videos = content.videos_by_topic(Topic::Mlp).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].whiteboard.as_ref().unwrap().id, "w1");

    let snippets = content.snippets_by_topic(Topic::Mlp).await.unwrap();
    assert_eq!(snippets[0].language, "python");
}

#[tokio::test]
async fn test_predict_sends_dataset_field_names() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scoring/v1/predict"))
        .and(body_json(json!({
            "Age": 35,
            "Sex": "male",
            "Job": 1,
            "Housing": "own",
            "Saving accounts": "little",
            "Checking account": "moderate",
            "Credit amount": 5000.0,
            "Duration": 24,
            "Purpose": "education"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "prediction": "good", "probability": 0.82 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let auth = base(&server, "auth");
    let client = ApiClient::new(TokenStore::in_memory(), auth).unwrap();
    let scoring = CreditScoringService::new(client, base(&server, "scoring"));

    let input = CreditRiskInput {
        purpose: Purpose::Education,
        ..CreditRiskInput::default()
    };
    let output = scoring.predict(&input).await.unwrap();

    assert_eq!(output.prediction, Prediction::Good);
    assert!((output.percent() - 82.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_rejects_invalid_input_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/scoring/v1/predict"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = base(&server, "auth");
    let client = ApiClient::new(TokenStore::in_memory(), auth).unwrap();
    let scoring = CreditScoringService::new(client, base(&server, "scoring"));

    let input = CreditRiskInput {
        job: 7,
        ..CreditRiskInput::default()
    };
    let err = scoring.predict(&input).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
