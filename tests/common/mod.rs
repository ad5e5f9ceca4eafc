//! In-process fake of the Ghost v3 admin API for integration tests.
//!
//! Each fake binds an ephemeral port and records which endpoints were hit,
//! so tests can assert both outcomes and the absence of calls after a
//! short-circuited step.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use ghostops::config::{Config, EnvironmentConfig};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use url::Url;

/// Scripted responses for one fake deployment. Defaults to the all-success
/// path: login 201, export 200 with a small snapshot, delete 204, import 200.
pub struct FakeGhostBuilder {
    login_status: u16,
    login_body: String,
    export_status: u16,
    export_payload: Value,
    export_error_body: String,
    delete_status: u16,
    delete_error_body: String,
    import_status: u16,
    import_error_body: String,
}

impl Default for FakeGhostBuilder {
    fn default() -> Self {
        Self {
            login_status: 201,
            login_body: String::new(),
            export_status: 200,
            export_payload: json!({"db": [{"data": {"posts": []}}]}),
            export_error_body: String::new(),
            delete_status: 204,
            delete_error_body: String::new(),
            import_status: 200,
            import_error_body: String::new(),
        }
    }
}

impl FakeGhostBuilder {
    pub fn reject_login(mut self, body: &str) -> Self {
        self.login_status = 401;
        self.login_body = body.to_string();
        self
    }

    pub fn export_payload(mut self, payload: Value) -> Self {
        self.export_payload = payload;
        self
    }

    pub fn fail_export(mut self, status: u16, body: &str) -> Self {
        self.export_status = status;
        self.export_error_body = body.to_string();
        self
    }

    pub fn fail_delete(mut self, status: u16, body: &str) -> Self {
        self.delete_status = status;
        self.delete_error_body = body.to_string();
        self
    }

    pub fn fail_import(mut self, status: u16, body: &str) -> Self {
        self.import_status = status;
        self.import_error_body = body.to_string();
        self
    }

    /// Bind to an ephemeral local port and serve until the test ends.
    pub async fn spawn(self) -> FakeGhost {
        let inner = Arc::new(Inner {
            builder: self,
            calls: Mutex::new(Vec::new()),
            login_bodies: Mutex::new(Vec::new()),
            import_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/ghost/api/v3/admin/session/", post(handle_login))
            .route(
                "/ghost/api/v3/admin/db/",
                get(handle_export).delete(handle_delete).post(handle_import),
            )
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake ghost");
        let addr = listener.local_addr().expect("fake ghost local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake ghost");
        });

        FakeGhost {
            base_url: Url::parse(&format!("http://{addr}")).expect("fake ghost url"),
            inner,
        }
    }
}

/// Handle to a running fake deployment.
pub struct FakeGhost {
    pub base_url: Url,
    inner: Arc<Inner>,
}

struct Inner {
    builder: FakeGhostBuilder,
    calls: Mutex<Vec<&'static str>>,
    login_bodies: Mutex<Vec<String>>,
    import_body: Mutex<Option<Vec<u8>>>,
}

impl FakeGhost {
    pub fn all_success() -> FakeGhostBuilder {
        FakeGhostBuilder::default()
    }

    /// Endpoints hit so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.calls.lock().expect("calls lock").clone()
    }

    /// Raw form bodies received by the session endpoint.
    pub fn login_bodies(&self) -> Vec<String> {
        self.inner.login_bodies.lock().expect("login lock").clone()
    }

    /// Raw multipart body received by the import endpoint, if any.
    pub fn import_body(&self) -> Option<Vec<u8>> {
        self.inner.import_body.lock().expect("import lock").clone()
    }
}

async fn handle_login(State(inner): State<Arc<Inner>>, body: String) -> (StatusCode, String) {
    inner.calls.lock().expect("calls lock").push("session");
    inner.login_bodies.lock().expect("login lock").push(body);
    (
        status(inner.builder.login_status),
        inner.builder.login_body.clone(),
    )
}

async fn handle_export(State(inner): State<Arc<Inner>>) -> (StatusCode, String) {
    inner.calls.lock().expect("calls lock").push("export");
    let body = if inner.builder.export_status == 200 {
        inner.builder.export_payload.to_string()
    } else {
        inner.builder.export_error_body.clone()
    };
    (status(inner.builder.export_status), body)
}

async fn handle_delete(State(inner): State<Arc<Inner>>) -> (StatusCode, String) {
    inner.calls.lock().expect("calls lock").push("delete");
    (
        status(inner.builder.delete_status),
        inner.builder.delete_error_body.clone(),
    )
}

async fn handle_import(State(inner): State<Arc<Inner>>, body: Bytes) -> (StatusCode, String) {
    inner.calls.lock().expect("calls lock").push("import");
    *inner.import_body.lock().expect("import lock") = Some(body.to_vec());
    (
        status(inner.builder.import_status),
        inner.builder.import_error_body.clone(),
    )
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).expect("valid status code")
}

/// A config pointing staging and prod at the given fake deployments.
pub fn config_pair(staging_url: Url, prod_url: Url) -> Config {
    Config {
        staging: EnvironmentConfig {
            base_url: staging_url,
            username: "staging-admin".to_string(),
            password: "staging-secret".to_string(),
        },
        prod: EnvironmentConfig {
            base_url: prod_url,
            username: "prod-admin".to_string(),
            password: "prod-secret".to_string(),
        },
    }
}
