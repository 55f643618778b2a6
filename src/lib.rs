//! Kubeconn - resolve a kubeconfig file into a concrete API server connection.
//!
//! This library provides the core functionality for kubeconn, including:
//! - Kubeconfig parsing and location discovery
//! - Cluster / user / context reference resolution
//! - TLS material and credential assembly
//! - A reload cache that keeps the last good connection
//!
//! # Example
//!
//! ```no_run
//! use kubeconn::config::{locate_kubeconfig, parse_config_file};
//! use kubeconn::resolve::build_connection;
//!
//! let path = locate_kubeconfig(None).unwrap();
//! let config = parse_config_file(&path).unwrap();
//! let connection = build_connection(&config).unwrap();
//!
//! println!("API server: {}", connection.server);
//! if let Some(tls) = &connection.tls {
//!     println!("verify server certificate: {}", !tls.insecure_skip_verify);
//! }
//! ```

pub mod config;
pub mod error;
pub mod reload;
pub mod resolve;

pub use error::{KubeconnError, Result};
