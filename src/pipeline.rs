//! The migration/deletion pipeline.
//!
//! One run executes one operation, strictly in sequence: the first failing
//! step aborts everything after it and becomes the run's result. A staged
//! artifact, once it exists, is removed exactly once on every path out of
//! the run, including a prod authentication failure between staging and
//! import.

use crate::config::{Config, Environment};
use crate::content;
use crate::error::Result;
use crate::request::Operation;
use crate::session;
use crate::stage::{host_tag, ArtifactStager};
use std::path::Path;
use tracing::{info, warn};

/// Successful run: HTTP-equivalent status plus response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: u16,
    pub body: String,
}

/// Execute one operation against the configured environments.
pub async fn run(config: &Config, operation: Operation) -> Result<Outcome> {
    run_with_stager(config, operation, &ArtifactStager::new()).await
}

/// Execute one operation with a caller-supplied stager.
pub async fn run_with_stager(
    config: &Config,
    operation: Operation,
    stager: &ArtifactStager,
) -> Result<Outcome> {
    match operation {
        Operation::Delete(environment) => run_delete(config, environment).await,
        Operation::Move => run_move(config, stager).await,
    }
}

async fn run_delete(config: &Config, environment: Environment) -> Result<Outcome> {
    let target = config.environment(environment);
    info!(
        "Environment is {environment}. Authenticating with {}",
        target.base_url
    );
    let session = session::authenticate(target).await?;
    info!("Successfully authenticated with ghost server");

    content::delete_all(&session).await?;
    info!("Successfully deleted all posts");

    Ok(Outcome {
        status: 201,
        body: "Successfully deleted all posts".to_string(),
    })
}

async fn run_move(config: &Config, stager: &ArtifactStager) -> Result<Outcome> {
    info!("Authenticating with {}", config.staging.base_url);
    let staging = session::authenticate(&config.staging).await?;
    info!("Successfully authenticated with staging ghost server");

    info!("Exporting all posts from staging");
    let artifact = content::export(&staging).await?;
    info!("Successfully exported all posts");

    let staged = stager
        .stage(&host_tag(&config.staging.base_url), &artifact)
        .await?;
    info!("Filename: {}", staged.display());

    // The artifact now exists on disk; from here on it is unstaged exactly
    // once no matter which step fails.
    let imported = import_to_prod(config, &staged).await;
    let cleaned = stager.unstage(&staged).await;
    if let Err(e) = &cleaned {
        warn!("Could not remove staged artifact {}: {e}", staged.display());
    }
    imported?;
    cleaned?;

    Ok(Outcome {
        status: 200,
        body: "Successfully moved all posts from staging to prod".to_string(),
    })
}

async fn import_to_prod(config: &Config, staged: &Path) -> Result<()> {
    info!("Authenticating with {}", config.prod.base_url);
    let prod = session::authenticate(&config.prod).await?;
    info!("Successfully authenticated with prod ghost server");

    info!("Importing all posts from staging into production");
    content::import(&prod, staged).await?;
    info!("Successfully imported all posts");
    Ok(())
}
