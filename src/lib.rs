//! Nymeria API Client Library
//!
//! Typed async client for the Nymeria people and company enrichment API:
//! person search, enrichment, identification and retrieval, company search
//! and enrichment, and email verification.
//!
//! # Modules
//!
//! - `auth_cache`: On-disk API key cache used by the CLI.
//! - `client`: Request builder and transport (`NymeriaClient`).
//! - `company`: Company search and enrichment.
//! - `config`: Credentials, base URL, user agent and timeout.
//! - `email`: Email verification.
//! - `errors`: Error taxonomy and status-code mapping.
//! - `legacy`: Endpoints of the status-string API generation.
//! - `models`: Response payloads and envelopes.
//! - `person`: Person search, enrichment, identification and retrieval.
//! - `query`: Query-string encoding and pagination defaults.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> nymeria::Result<()> {
//! use nymeria::{Config, NymeriaClient};
//!
//! let client = NymeriaClient::new(Config::new("my-api-key")?)?;
//! let person = client.person().retrieve("p_1").await?;
//! println!("{:?}", person.first_name);
//! # Ok(())
//! # }
//! ```

pub mod auth_cache;
pub mod client;
pub mod company;
pub mod config;
pub mod email;
pub mod errors;
pub mod legacy;
pub mod models;
pub mod person;
pub mod query;

pub use client::NymeriaClient;
pub use config::Config;
pub use errors::{map_status, NymeriaError, Result};
pub use models::{Company, Person, PersonPreview, Verification};
