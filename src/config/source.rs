use crate::error::{KubeconnError, Result};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Environment variable consulted before the home-directory default.
pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";

/// Locate the kubeconfig to use.
///
/// The lookup order is:
/// 1. `explicit`, if given (the `--kubeconfig` flag)
/// 2. The first non-empty entry of `$KUBECONFIG`
/// 3. `~/.kube/config`
///
/// Only one file is ever used; later `$KUBECONFIG` entries are not merged.
pub fn locate_kubeconfig(explicit: Option<PathBuf>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		return Ok(path);
	}

	if let Some(value) = std::env::var_os(KUBECONFIG_ENV_VAR)
		&& let Some(path) = first_path_entry(&value)
	{
		log::debug!("using kubeconfig from ${KUBECONFIG_ENV_VAR}: {}", path.display());
		return Ok(path);
	}

	default_kubeconfig_path()
}

/// Get the path to the user's default kubeconfig.
pub fn default_kubeconfig_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(KubeconnError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(".kube").join("config"))
}

fn first_path_entry(value: &OsStr) -> Option<PathBuf> {
	let mut entries = std::env::split_paths(value).filter(|p| !p.as_os_str().is_empty());
	let first = entries.next()?;
	if entries.next().is_some() {
		log::warn!(
			"${KUBECONFIG_ENV_VAR} lists several files, only {} is used",
			first.display()
		);
	}
	Some(first)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_explicit_path_wins() {
		let path = locate_kubeconfig(Some(PathBuf::from("/tmp/explicit"))).unwrap();
		assert_eq!(path, PathBuf::from("/tmp/explicit"));
	}

	#[test]
	fn test_default_kubeconfig_path() {
		let path = default_kubeconfig_path();
		assert!(path.is_ok());
		let path = path.unwrap();
		assert!(path.ends_with(".kube/config"));
	}

	#[cfg(unix)]
	#[test]
	fn test_first_path_entry() {
		assert_eq!(
			first_path_entry(OsStr::new("/a/config:/b/config")),
			Some(PathBuf::from("/a/config"))
		);
		assert_eq!(
			first_path_entry(OsStr::new(":/b/config")),
			Some(PathBuf::from("/b/config"))
		);
		assert_eq!(first_path_entry(OsStr::new("")), None);
	}
}
