use std::path::PathBuf;

/// Library-level structured errors for kubeconn.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum KubeconnError {
	#[error("Failed to read kubeconfig: {path}")]
	SourceReadFailure {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse kubeconfig: {path}")]
	DecodeFailure {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Context {name:?} does not exist")]
	ContextNotFound { name: String },

	#[error("Cluster {name:?} does not exist (referenced by context {context:?})")]
	ClusterNotFound { name: String, context: String },

	#[error("User {name:?} does not exist (referenced by context {context:?})")]
	AuthInfoNotFound { name: String, context: String },

	#[error("Server address cannot be empty, define it for context {context:?}")]
	EmptyServerAddress { context: String },

	#[error("User {user:?} (context {context:?}): field {field} is not supported")]
	UnsupportedAuthField {
		field: &'static str,
		user: String,
		context: String,
	},

	#[error("User {user:?} (context {context:?}) has invalid credentials: {reason}")]
	InvalidCredentials {
		reason: &'static str,
		user: String,
		context: String,
	},

	#[error("Cannot base64-decode {field} (context {context:?})")]
	Base64DecodeError {
		field: &'static str,
		context: String,
		#[source]
		source: base64::DecodeError,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using KubeconnError.
pub type Result<T> = std::result::Result<T, KubeconnError>;
