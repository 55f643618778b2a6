//! Periodic re-resolution for kubeconn.
//!
//! This module handles:
//! - Re-reading a kubeconfig on demand
//! - Keeping the last good connection when a reload fails

use crate::error::Result;
use crate::resolve::{ResolvedConnection, load_connection};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Caches the last successfully resolved connection for one kubeconfig.
///
/// A failed refresh never clears the cache: callers keep using the previous
/// connection until the file becomes usable again.
#[derive(Debug)]
pub struct ConnectionCache {
	path: PathBuf,
	context: Option<String>,
	current: Option<Arc<ResolvedConnection>>,
}

impl ConnectionCache {
	/// Create an empty cache. Nothing is read until [`refresh`](Self::refresh).
	pub fn new(path: impl Into<PathBuf>, context: Option<String>) -> Self {
		Self {
			path: path.into(),
			context,
			current: None,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// The last successfully resolved connection, if any.
	pub fn current(&self) -> Option<Arc<ResolvedConnection>> {
		self.current.clone()
	}

	/// Re-read and re-resolve the kubeconfig.
	///
	/// On success the cached connection is replaced and returned. On failure
	/// the previous connection is kept and the error is returned.
	pub fn refresh(&mut self) -> Result<Arc<ResolvedConnection>> {
		match load_connection(&self.path, self.context.as_deref()) {
			Ok(connection) => {
				let connection = Arc::new(connection);
				log::info!(
					"resolved {} from {}",
					connection.server,
					self.path.display()
				);
				self.current = Some(Arc::clone(&connection));
				Ok(connection)
			}
			Err(e) => {
				if self.current.is_some() {
					log::warn!(
						"kubeconfig {} unusable, keeping previous connection: {e}",
						self.path.display()
					);
				}
				Err(e)
			}
		}
	}
}
