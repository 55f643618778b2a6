use crate::config::types::RawConfig;
use crate::error::{KubeconnError, Result};
use std::path::Path;

/// Parse a kubeconfig file from the given path.
pub fn parse_config_file(path: &Path) -> Result<RawConfig> {
	let content =
		std::fs::read_to_string(path).map_err(|source| KubeconnError::SourceReadFailure {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a kubeconfig from a string (useful for testing).
///
/// `path` only labels errors.
pub fn parse_config_str(content: &str, path: &Path) -> Result<RawConfig> {
	let config: RawConfig =
		serde_yaml::from_str(content).map_err(|source| KubeconnError::DecodeFailure {
			path: path.to_path_buf(),
			source,
		})?;

	log::debug!(
		"parsed {}: {} clusters, {} users, {} contexts",
		path.display(),
		config.clusters.len(),
		config.users.len(),
		config.contexts.len()
	);

	Ok(config)
}
