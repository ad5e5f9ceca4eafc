//! Staging of export artifacts as temporary JSON files.

use crate::content::ExportArtifact;
use crate::error::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes export artifacts to a staging directory and removes them after
/// the import step. One staged file per `move` run, owned by that run.
pub struct ArtifactStager {
    dir: PathBuf,
}

impl Default for ArtifactStager {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactStager {
    /// Stager over the process temporary directory.
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    /// Stager over a specific directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Serialize the artifact to `<dir>/<host_tag>_<YYYY-MM-DD-HH-MM-SS>.json`
    /// (UTC, second resolution) and return the path. Two stagings of the
    /// same host within one second produce the same name; accepted.
    pub async fn stage(&self, host_tag: &str, artifact: &ExportArtifact) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y-%m-%d-%H-%M-%S");
        let path = self.dir.join(format!("{host_tag}_{stamp}.json"));
        tokio::fs::write(&path, serde_json::to_vec(&artifact.payload)?).await?;
        Ok(path)
    }

    /// Remove a staged file. Not idempotent: the path must still exist, so
    /// the caller unstages each staged artifact exactly once.
    pub async fn unstage(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }
}

/// Filename identifier for an environment: its host with any leading `www.`
/// stripped, the port appended when present, and dots replaced by
/// underscores.
pub fn host_tag(base_url: &Url) -> String {
    let mut tag = String::new();
    if let Some(host) = base_url.host_str() {
        tag.push_str(host.strip_prefix("www.").unwrap_or(host));
    }
    if let Some(port) = base_url.port() {
        tag.push(':');
        tag.push_str(&port.to_string());
    }
    tag.replace(['.', ':'], "_")
}
