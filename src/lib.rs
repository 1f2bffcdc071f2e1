//! Reliefdesk - disaster-relief coordination client library
//!
//! This library provides the core of the Reliefdesk terminal client: the
//! operator session and its durable store, the admin route guard, the
//! REST client for the relief backend, and the views the shell renders.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: session model, session store and the shared auth context
//! - `storage`: durable key/value backends (file, OS keyring, memory)
//! - `routes`: client routes and the route guard
//! - `api`: backend records and the HTTP client
//! - `views`: list queries, tables, CSV export, dashboard, login
//! - `shell`: interactive navigation shell
//! - `commands`: handlers behind the CLI subcommands
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use reliefdesk::routes::{GuardDecision, Route, RouteGuard};
//! use reliefdesk::session::AuthContext;
//! use reliefdesk::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let auth = AuthContext::bootstrap(&config.session).await?;
//!     if RouteGuard::check(Route::ReliefSupplies, &auth) == GuardDecision::Allow {
//!         println!("admin session restored");
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod shell;
pub mod storage;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, Resource};
pub use config::Config;
pub use error::{Result, ReliefError};
pub use routes::{GuardDecision, Route, RouteGuard};
pub use session::{AuthContext, Session, SessionStore};

#[cfg(test)]
pub mod test_utils;
