//! Session establishment against the Ghost v3 admin API.
//!
//! Ghost session authentication is cookie-based: one POST to the session
//! endpoint and the cookie jar on the client authorizes every later call.

use crate::config::EnvironmentConfig;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use tracing::error;
use url::Url;

const SESSION_PATH: &str = "ghost/api/v3/admin/session/";
const DB_PATH: &str = "ghost/api/v3/admin/db/";

/// Authenticated handle scoped to one environment. Valid only for the
/// environment it was created against and never shared across runs.
pub struct Session {
    client: Client,
    base_url: Url,
}

impl Session {
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    /// Full URL of the environment's content database endpoint.
    pub(crate) fn db_endpoint(&self) -> String {
        join_endpoint(&self.base_url, DB_PATH)
    }
}

/// Establish an authenticated session. Sends exactly one login request;
/// success is defined as HTTP 201, anything else fails. No retries.
pub async fn authenticate(environment: &EnvironmentConfig) -> Result<Session> {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .map_err(|e| Error::Auth {
            detail: e.to_string(),
        })?;

    let url = join_endpoint(&environment.base_url, SESSION_PATH);
    let response = client
        .post(&url)
        .form(&[
            ("username", environment.username.as_str()),
            ("password", environment.password.as_str()),
        ])
        .send()
        .await
        .map_err(|e| Error::Auth {
            detail: e.to_string(),
        })?;

    if response.status() != StatusCode::CREATED {
        error!("Could not authenticate with Ghost server");
        let detail = response.text().await.unwrap_or_default();
        return Err(Error::Auth { detail });
    }

    Ok(Session {
        client,
        base_url: environment.base_url.clone(),
    })
}

fn join_endpoint(base_url: &Url, path: &str) -> String {
    format!("{}/{path}", base_url.as_str().trim_end_matches('/'))
}
