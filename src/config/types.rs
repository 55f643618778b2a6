use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level contents of a kubeconfig file, decoded verbatim.
///
/// Entry lists keep file order and may contain duplicate names; run them
/// through [`crate::resolve::index_by_name`] before looking anything up.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
	/// Informational only, never checked.
	#[serde(default)]
	pub kind: Option<String>,

	/// Informational only, never checked.
	#[serde(default, rename = "apiVersion")]
	pub api_version: Option<String>,

	#[serde(default, deserialize_with = "null_as_empty")]
	pub clusters: Vec<NamedCluster>,

	#[serde(default, deserialize_with = "null_as_empty")]
	pub users: Vec<NamedAuthInfo>,

	#[serde(default, deserialize_with = "null_as_empty")]
	pub contexts: Vec<NamedContext>,

	/// Name of the context selected for use.
	#[serde(default)]
	pub current_context: String,
}

/// An entry of a named section: a name plus a body that may be absent.
///
/// `cluster: null` (body absent) and `cluster: {}` (body present, all fields
/// empty) are different things, so the body is always an `Option`.
pub trait NamedEntry {
	type Body;

	fn name(&self) -> &str;

	fn body(&self) -> Option<&Self::Body>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedCluster {
	#[serde(default)]
	pub name: String,

	#[serde(default)]
	pub cluster: Option<Cluster>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedAuthInfo {
	#[serde(default)]
	pub name: String,

	#[serde(default, rename = "user")]
	pub auth_info: Option<AuthInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedContext {
	#[serde(default)]
	pub name: String,

	#[serde(default)]
	pub context: Option<Context>,
}

impl NamedEntry for NamedCluster {
	type Body = Cluster;

	fn name(&self) -> &str {
		&self.name
	}

	fn body(&self) -> Option<&Cluster> {
		self.cluster.as_ref()
	}
}

impl NamedEntry for NamedAuthInfo {
	type Body = AuthInfo;

	fn name(&self) -> &str {
		&self.name
	}

	fn body(&self) -> Option<&AuthInfo> {
		self.auth_info.as_ref()
	}
}

impl NamedEntry for NamedContext {
	type Body = Context;

	fn name(&self) -> &str {
		&self.name
	}

	fn body(&self) -> Option<&Context> {
		self.context.as_ref()
	}
}

/// How to reach an API server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
	/// Server URL, e.g. `https://10.0.0.1:6443`. Never normalized.
	#[serde(default)]
	pub server: String,

	/// Overrides the name used for server certificate verification.
	pub tls_server_name: Option<String>,

	#[serde(default)]
	pub insecure_skip_tls_verify: bool,

	/// Path to a PEM CA bundle.
	pub certificate_authority: Option<String>,

	/// Inline PEM CA bundle, standard base64.
	pub certificate_authority_data: Option<String>,

	/// Proxy URL, carried through unparsed.
	pub proxy_url: Option<String>,
}

/// Identity used to authenticate against a cluster.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfo {
	pub client_certificate: Option<String>,

	pub client_certificate_data: Option<String>,

	pub client_key: Option<String>,

	pub client_key_data: Option<String>,

	pub token: Option<String>,

	#[serde(rename = "tokenFile")]
	pub token_file: Option<String>,

	pub username: Option<String>,

	pub password: Option<String>,

	/// Credential plugin. Recognized so it can be rejected by name.
	pub exec: Option<ExecConfig>,

	#[serde(rename = "act-as")]
	pub impersonate: Option<String>,

	#[serde(rename = "act-as-uid")]
	pub impersonate_uid: Option<String>,

	#[serde(rename = "act-as-groups", default, deserialize_with = "null_as_empty")]
	pub impersonate_groups: Vec<String>,

	#[serde(rename = "act-as-user-extra")]
	pub impersonate_user_extra: Option<UserExtra>,
}

// Hand-written so credentials never end up in debug logs.
impl fmt::Debug for AuthInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthInfo")
			.field("client_certificate", &self.client_certificate)
			.field(
				"client_certificate_data",
				&self.client_certificate_data.as_ref().map(|_| "<inline>"),
			)
			.field("client_key", &self.client_key)
			.field("client_key_data", &redacted(&self.client_key_data))
			.field("token", &redacted(&self.token))
			.field("token_file", &self.token_file)
			.field("username", &self.username)
			.field("password", &redacted(&self.password))
			.field("exec", &self.exec)
			.field("impersonate", &self.impersonate)
			.field("impersonate_uid", &self.impersonate_uid)
			.field("impersonate_groups", &self.impersonate_groups)
			.field("impersonate_user_extra", &self.impersonate_user_extra)
			.finish()
	}
}

fn redacted(value: &Option<String>) -> Option<&'static str> {
	value.as_ref().map(|_| "[REDACTED]")
}

/// Extra impersonation attributes.
///
/// kubectl writes a map of lists; older hand-written files use a flat list.
/// Both shapes are accepted so the field is always recognized.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserExtra {
	Map(BTreeMap<String, Vec<String>>),
	List(Vec<String>),
}

impl UserExtra {
	pub fn is_empty(&self) -> bool {
		match self {
			UserExtra::Map(map) => map.is_empty(),
			UserExtra::List(list) => list.is_empty(),
		}
	}
}

/// Exec credential plugin descriptor. Parsed, never run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecConfig {
	#[serde(default)]
	pub command: String,

	#[serde(default, deserialize_with = "null_as_empty")]
	pub args: Vec<String>,

	#[serde(default, deserialize_with = "null_as_empty")]
	pub env: Vec<ExecEnvVar>,

	pub api_version: Option<String>,

	pub install_hint: Option<String>,

	#[serde(default)]
	pub provide_cluster_info: bool,

	pub interactive_mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecEnvVar {
	#[serde(default)]
	pub name: String,

	#[serde(default)]
	pub value: String,
}

/// A pairing of a cluster reference and a user reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
	#[serde(default)]
	pub cluster: String,

	/// Empty means "no credentials".
	#[serde(default, rename = "user")]
	pub auth_info: String,
}

/// Treat an empty string the same as a missing one.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|s| !s.is_empty())
}

/// kubectl writes `users: null` for empty sections; decode that as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
