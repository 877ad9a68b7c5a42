//! Application Assembly
//!
//! Wires the auth and ledger modules into one router.

use std::sync::Arc;

use anyhow::Context;
use auth::application::RegistrationHook;
use auth::handlers::AuthAppState;
use auth::models::User;
use auth::router::auth_router_generic;
use auth::InMemoryAuthRepository;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use ledger::models::Account;
use ledger::presentation::{LedgerAppState, ledger_router_generic};
use ledger::InMemoryLedger;
use platform::clock::{Clock, SystemClock};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// In-memory stores shared by the routers and background tasks
#[derive(Clone, Default)]
pub struct Services {
    pub auth: InMemoryAuthRepository,
    pub ledger: InMemoryLedger,
}

impl Services {
    pub fn new(demo_mode: bool) -> anyhow::Result<Self> {
        if !demo_mode {
            return Ok(Self::default());
        }
        let auth = InMemoryAuthRepository::with_demo_users().context("seeding demo users")?;
        Ok(Self {
            auth,
            ledger: InMemoryLedger::with_demo_data(),
        })
    }
}

/// Opens an empty ledger account for every newly registered user
struct OpenLedgerAccount {
    ledger: InMemoryLedger,
}

impl RegistrationHook for OpenLedgerAccount {
    fn on_registered(&self, user: &User) {
        let account = Account::open(user.user_id, user.name.clone());
        if let Err(e) = self.ledger.insert_account(account) {
            tracing::error!(user_id = %user.user_id, error = %e, "Failed to open ledger account");
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
}

/// GET /api/health
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        timestamp: SystemClock.now().to_rfc3339(),
    })
}

pub fn build_router(config: &ServerConfig, services: &Services) -> anyhow::Result<Router> {
    let auth_state = AuthAppState::new(services.auth.clone(), config.auth_config())
        .with_registration_hook(Arc::new(OpenLedgerAccount {
            ledger: services.ledger.clone(),
        }));
    let ledger_state = LedgerAppState::new(services.ledger.clone(), config.ledger_config());

    Ok(Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_router_generic(auth_state))
        .nest("/api", ledger_router_generic(ledger_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins)?))
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    if origins.is_empty() {
        return Ok(cors.allow_origin(AllowOrigin::any()));
    }

    let allowed = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid origin in FRONTEND_ORIGINS: {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(cors.allow_origin(allowed).allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn demo_config() -> ServerConfig {
        ServerConfig {
            demo_mode: true,
            ..ServerConfig::default()
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_req(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(&demo_config(), &Services::new(true).unwrap()).unwrap();
        let (status, body) = send(&app, get_req("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_demo_login_and_dashboard_share_ids() {
        let app = build_router(&demo_config(), &Services::new(true).unwrap()).unwrap();

        let (status, body) = send(
            &app,
            post_req(
                "/api/auth/login",
                json!({ "identifier": "joao@inwista.com", "password": "1234" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_req(&format!("/api/users/{user_id}/dashboard"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balances"]["brl"], 5000.0);
    }

    #[tokio::test]
    async fn test_market_and_crypto_purchase_are_served() {
        let app = build_router(&demo_config(), &Services::new(true).unwrap()).unwrap();

        let (status, body) = send(&app, get_req("/api/market")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 5);

        let (_, login) = send(
            &app,
            post_req(
                "/api/auth/login",
                json!({ "identifier": "joao", "password": "1234" }),
            ),
        )
        .await;
        let user_id = login["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            post_req(
                "/api/crypto/purchase",
                json!({ "userId": user_id, "symbol": "LTC", "amount": 100 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["kind"], "crypto_purchase");
        assert_eq!(body["total"], 100.2);
    }

    #[tokio::test]
    async fn test_registration_opens_ledger_account() {
        let app = build_router(&demo_config(), &Services::new(false).unwrap()).unwrap();

        let (status, body) = send(
            &app,
            post_req(
                "/api/auth/register",
                json!({
                    "name": "Ana Costa",
                    "cpf": "529.982.247-25",
                    "email": "ana@example.com",
                    "phone": "(11) 90000-0000",
                    "password": "segredo1",
                    "confirmPassword": "segredo1"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_req(&format!("/api/users/{user_id}/dashboard"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balances"]["brl"], 0.0);
        assert_eq!(body["recentTransactions"], json!([]));
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_ok());
    }
}
