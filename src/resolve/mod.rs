//! Connection resolution for kubeconn.
//!
//! This module handles:
//! - Indexing clusters, users, and contexts by name
//! - Rejecting user entries that cannot be honored
//! - Following context references and assembling TLS and credential material

pub mod auth;
pub mod builder;
pub mod connection;
pub mod index;

pub use auth::validate_auth_info;
pub use builder::{build_connection, build_connection_for_context, load_connection};
pub use connection::{BasicAuth, ResolvedConnection, TlsMaterial};
pub use index::{ContextSummary, NameIndex, index_by_name, list_contexts, lookup};
