//! User API - A minimal users CRUD REST service
//!
//! Exposes a single `users` collection resource over HTTP, with every
//! operation a direct pass-through to relational storage.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities
//! - **services**: Application use cases
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserInput};
pub use errors::{AppError, AppResult};
