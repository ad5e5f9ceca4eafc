//! Configuration for the staging/prod Ghost deployment pair.
//!
//! Credentials and base URLs are read once per process from six environment
//! variables and carried in an explicit [`Config`] struct; pipeline
//! components never look up ambient state themselves.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// Named Ghost deployment. Exactly these two values are legal anywhere an
/// environment is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Staging,
    Prod,
}

impl Environment {
    /// Parse an environment name from a request value.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            _ => Err(Error::Config(
                "Wrong environment value was specified. Allowed values: prod, staging"
                    .to_string(),
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Staging => write!(f, "staging"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Connection settings for one environment's admin API.
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub base_url: Url,
    pub username: String,
    pub password: String,
}

/// Both environments' settings, built once per run and passed into the
/// pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub staging: EnvironmentConfig,
    pub prod: EnvironmentConfig,
}

impl Config {
    /// Build the configuration from `GHOST_{STAGING,PROD}_{URL,USERNAME,PASSWORD}`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Tests use
    /// this to avoid mutating process-global environment state.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            staging: EnvironmentConfig {
                base_url: required_url(&lookup, "GHOST_STAGING_URL")?,
                username: required_var(&lookup, "GHOST_STAGING_USERNAME")?,
                password: required_var(&lookup, "GHOST_STAGING_PASSWORD")?,
            },
            prod: EnvironmentConfig {
                base_url: required_url(&lookup, "GHOST_PROD_URL")?,
                username: required_var(&lookup, "GHOST_PROD_USERNAME")?,
                password: required_var(&lookup, "GHOST_PROD_PASSWORD")?,
            },
        })
    }

    /// Settings for the named environment.
    pub fn environment(&self, environment: Environment) -> &EnvironmentConfig {
        match environment {
            Environment::Staging => &self.staging,
            Environment::Prod => &self.prod,
        }
    }
}

fn required_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| Error::Config(format!("{name} is not set")))
}

fn required_url<F>(lookup: &F, name: &str) -> Result<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required_var(lookup, name)?;
    Url::parse(&raw).map_err(|e| Error::Config(format!("{name} is not a valid URL: {e}")))
}
