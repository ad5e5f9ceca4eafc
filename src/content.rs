//! Export, delete, and import operations against an authenticated session.
//!
//! Each operation issues exactly one request to the environment's content
//! database endpoint and checks for one exact success status. Anything else,
//! transport failure included, fails the step with the server body or the
//! error text as detail.

use crate::error::{Error, Result};
use crate::session::Session;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::path::Path;
use tracing::error;

/// Full content database snapshot as returned by the export endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub payload: Value,
}

/// Retrieve the full content database of the session's environment.
pub async fn export(session: &Session) -> Result<ExportArtifact> {
    let response = session
        .client()
        .get(session.db_endpoint())
        .send()
        .await
        .map_err(|e| Error::Export {
            detail: e.to_string(),
        })?;

    if response.status() != StatusCode::OK {
        error!("Could not export posts");
        let detail = response.text().await.unwrap_or_default();
        return Err(Error::Export { detail });
    }

    let payload = response.json().await.map_err(|e| Error::Export {
        detail: e.to_string(),
    })?;
    Ok(ExportArtifact { payload })
}

/// Wipe the entire content database of the session's environment.
/// Irreversible; there is no confirmation step and no dry-run.
pub async fn delete_all(session: &Session) -> Result<()> {
    let response = session
        .client()
        .delete(session.db_endpoint())
        .send()
        .await
        .map_err(|e| Error::Delete {
            detail: e.to_string(),
        })?;

    if response.status() != StatusCode::NO_CONTENT {
        error!("Could not delete posts");
        let detail = response.text().await.unwrap_or_default();
        return Err(Error::Delete { detail });
    }

    Ok(())
}

/// Upload a staged snapshot file to the session's environment as multipart
/// form content under the `importfile` field.
pub async fn import(session: &Session, staged: &Path) -> Result<()> {
    let bytes = tokio::fs::read(staged).await.map_err(|e| Error::Import {
        detail: e.to_string(),
    })?;

    let file_name = staged
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "import.json".to_string());
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str("application/json")
        .map_err(|e| Error::Import {
            detail: e.to_string(),
        })?;

    let response = session
        .client()
        .post(session.db_endpoint())
        .multipart(Form::new().part("importfile", part))
        .send()
        .await
        .map_err(|e| Error::Import {
            detail: e.to_string(),
        })?;

    if response.status() != StatusCode::OK {
        error!("Could not import posts");
        let detail = response.text().await.unwrap_or_default();
        return Err(Error::Import { detail });
    }

    Ok(())
}
