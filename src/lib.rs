//! # ghostops
//!
//! Migrate or destroy content in a headless Ghost publishing platform over
//! the v3 REST admin API, across a staging/prod deployment pair.
//!
//! One invocation carries an operation: `delete` wipes one environment's
//! content database, `move` copies the full database from staging to prod.
//! The core is the pipeline in [`pipeline`]: authenticate, act, stage, act,
//! with first-failure short-circuiting and unconditional cleanup of the
//! staged artifact.
//!
//! ## Modules
//!
//! - `config` - staging/prod environment pair read from the process environment
//! - `request` - JSON request body parsing and validation
//! - `session` - cookie-based session establishment against the admin API
//! - `content` - export, delete, and import over an authenticated session
//! - `stage` - temporary-file staging of export artifacts
//! - `pipeline` - the delete/move orchestrator
//! - `server` - thin axum shell exposing the pipeline over HTTP
pub mod config;
pub mod content;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod server;
pub mod session;
pub mod stage;
