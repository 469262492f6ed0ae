//! This crate is an implementation of a client that resolves an auth method
//! against the PKP permissions registry.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod lookup;
pub mod node;
pub mod registry;

pub use config::Config;
pub use context::{Connector, LookupContext, NetworkConnector};
pub use error::PkpScopesClientError;
pub use lookup::{fetch_pkps, LookupState, Notifier};

pub type Result<T> = std::result::Result<T, PkpScopesClientError>;
