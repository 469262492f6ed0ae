//! Shared types and pure logic for looking up the programmable key pairs (PKPs)
//! an auth method is permitted to use, along with their permission scopes.
//!
//! Everything in this crate is network-free. The networked collaborators
//! (node network, auth providers, permissions registry) live in
//! `pkp-scopes-client`.
#![warn(unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
#![forbid(rustdoc::broken_intra_doc_links)]

pub mod constants;
pub mod crypto;
pub mod error;
pub mod infrastructure;
pub mod parse;
pub mod types;

pub use error::PkpScopesError;
pub use parse::parse_credential;
