#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use payoutfolio_server::{api::app_router, build_state, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: [u8; 32] = [42u8; 32];

pub struct TestApp {
    pub router: Router,
    pub auth: payoutfolio_server::auth::AuthManager,
    _tmp: TempDir,
}

pub fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: JWT_SECRET.to_vec(),
        auth_cookie: "token".to_string(),
        fx_rates_file: None,
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config).unwrap(),
        auth: payoutfolio_server::auth::AuthManager::new(&JWT_SECRET, "token"),
        _tmp: tmp,
    }
}

impl TestApp {
    pub fn token_for(&self, user_id: &str) -> String {
        self.auth.issue_token(user_id).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header(header::COOKIE, format!("token={}", self.token_for(user_id)));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
