//! Invocation-boundary request parsing and validation.
//!
//! Every failure here is a configuration error (HTTP 400) and happens
//! before any network call is made.

use crate::config::Environment;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Raw JSON request body: `{"operation": "delete"|"move", "environment": "prod"|"staging"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationRequest {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
}

/// Validated operation the pipeline can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Wipe the content database of one environment.
    Delete(Environment),
    /// Copy the full content database from staging to prod. Takes no
    /// environment parameter.
    Move,
}

impl OperationRequest {
    /// Parse a raw request body. Any body that is not a JSON object is
    /// treated as absent.
    pub fn parse_body(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|_| Error::Config("The request has no body".to_string()))
    }

    /// Validate the request into a typed [`Operation`].
    pub fn validate(&self) -> Result<Operation> {
        let operation = match self.operation.as_deref() {
            Some(op) if !op.is_empty() => op,
            _ => {
                return Err(Error::Config(
                    "operation value was not specified".to_string(),
                ))
            }
        };

        match operation {
            "delete" => {
                let environment = match self.environment.as_deref() {
                    Some(env) if !env.is_empty() => env,
                    _ => {
                        return Err(Error::Config(
                            "environment value was not specified for delete operation"
                                .to_string(),
                        ))
                    }
                };
                Ok(Operation::Delete(Environment::parse(environment)?))
            }
            "move" => Ok(Operation::Move),
            _ => Err(Error::Config(
                "Wrong operation value was specified. Allowed values: delete, move"
                    .to_string(),
            )),
        }
    }
}
