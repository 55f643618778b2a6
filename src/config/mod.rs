//! Kubeconfig loading and parsing for kubeconn.
//!
//! This module handles:
//! - The typed model of a decoded kubeconfig
//! - YAML file parsing
//! - Locating the kubeconfig to use

pub mod parser;
pub mod source;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use source::{KUBECONFIG_ENV_VAR, default_kubeconfig_path, locate_kubeconfig};
pub use types::{
	AuthInfo, Cluster, Context, ExecConfig, ExecEnvVar, NamedAuthInfo, NamedCluster, NamedContext,
	NamedEntry, RawConfig, UserExtra,
};
