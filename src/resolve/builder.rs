use crate::config::parser::parse_config_file;
use crate::config::types::{AuthInfo, Cluster, RawConfig, present};
use crate::error::{KubeconnError, Result};
use crate::resolve::auth::validate_auth_info;
use crate::resolve::connection::{BasicAuth, ResolvedConnection, TlsMaterial};
use crate::resolve::index::{index_by_name, lookup};
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use secrecy::SecretString;
use std::path::Path;

/// Read, parse, and resolve a kubeconfig file in one step.
///
/// `context` overrides the file's `current-context` when given.
pub fn load_connection(path: &Path, context: Option<&str>) -> Result<ResolvedConnection> {
	let config = parse_config_file(path)?;
	match context {
		Some(name) => build_connection_for_context(&config, name),
		None => build_connection(&config),
	}
}

/// Resolve the connection selected by `current-context`.
pub fn build_connection(config: &RawConfig) -> Result<ResolvedConnection> {
	build_connection_for_context(config, &config.current_context)
}

/// Resolve the connection described by the named context.
///
/// The context picks a cluster and optionally a user. TLS material is only
/// assembled for `https://` servers; for anything else the CA and client
/// certificate fields are dropped. Any failure aborts the whole resolution.
pub fn build_connection_for_context(
	config: &RawConfig,
	context_name: &str,
) -> Result<ResolvedConnection> {
	let clusters = index_by_name(&config.clusters);
	let auth_infos = index_by_name(&config.users);
	let contexts = index_by_name(&config.contexts);

	let context =
		lookup(&contexts, context_name).ok_or_else(|| KubeconnError::ContextNotFound {
			name: context_name.to_string(),
		})?;

	let cluster =
		lookup(&clusters, &context.cluster).ok_or_else(|| KubeconnError::ClusterNotFound {
			name: context.cluster.clone(),
			context: context_name.to_string(),
		})?;

	if cluster.server.is_empty() {
		return Err(KubeconnError::EmptyServerAddress {
			context: context_name.to_string(),
		});
	}

	let is_https = cluster.server.starts_with("https://");
	log::debug!(
		"context {context_name:?}: cluster {:?} at {} (secure: {is_https})",
		context.cluster,
		cluster.server
	);

	let mut tls = if is_https {
		Some(cluster_tls(cluster, context_name)?)
	} else {
		warn_dropped_cluster_tls(cluster, context_name);
		None
	};

	let auth_info = if context.auth_info.is_empty() {
		log::debug!("context {context_name:?} has no user, connecting without credentials");
		None
	} else {
		let auth = lookup(&auth_infos, &context.auth_info).ok_or_else(|| {
			KubeconnError::AuthInfoNotFound {
				name: context.auth_info.clone(),
				context: context_name.to_string(),
			}
		})?;
		validate_auth_info(auth, &context.auth_info, context_name)?;
		Some(auth)
	};

	let mut connection = ResolvedConnection {
		server: cluster.server.clone(),
		tls: None,
		basic_auth: None,
		token: None,
		token_file: None,
		proxy_url: present(&cluster.proxy_url).map(str::to_string),
	};

	if let Some(auth) = auth_info {
		match tls.as_mut() {
			Some(tls) => add_client_identity(tls, auth, context_name)?,
			None => warn_dropped_client_tls(auth, context_name),
		}

		let username = present(&auth.username);
		let password = present(&auth.password);
		if username.is_some() || password.is_some() {
			connection.basic_auth = Some(BasicAuth {
				username: username.unwrap_or_default().to_string(),
				password: SecretString::from(password.unwrap_or_default().to_string()),
			});
		}

		connection.token = present(&auth.token).map(|t| SecretString::from(t.to_string()));
		connection.token_file = present(&auth.token_file).map(str::to_string);
	}

	connection.tls = tls;
	Ok(connection)
}

/// Start a TLS bundle from the cluster's CA and verification options.
fn cluster_tls(cluster: &Cluster, context_name: &str) -> Result<TlsMaterial> {
	let ca = present(&cluster.certificate_authority_data)
		.map(|data| decode_base64(data, "certificate-authority-data", context_name))
		.transpose()?;

	Ok(TlsMaterial {
		ca,
		ca_file: present(&cluster.certificate_authority).map(str::to_string),
		server_name: present(&cluster.tls_server_name).map(str::to_string),
		insecure_skip_verify: cluster.insecure_skip_tls_verify,
		..Default::default()
	})
}

/// Copy the user's client certificate and key into the bundle.
fn add_client_identity(tls: &mut TlsMaterial, auth: &AuthInfo, context_name: &str) -> Result<()> {
	tls.cert_file = present(&auth.client_certificate).map(str::to_string);
	tls.key_file = present(&auth.client_key).map(str::to_string);

	if let Some(data) = present(&auth.client_certificate_data) {
		tls.cert = Some(decode_base64(data, "client-certificate-data", context_name)?);
	}
	if let Some(data) = present(&auth.client_key_data) {
		tls.key = Some(decode_base64(data, "client-key-data", context_name)?);
	}

	Ok(())
}

/// Standard alphabet with padding required, but tolerant of non-zero trailing
/// bits in the last symbol.
const INLINE_MATERIAL: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode inline certificate or key data.
///
/// Line breaks are skipped, so YAML block scalars and wrapped PEM-style
/// base64 decode the same as a single line.
fn decode_base64(data: &str, field: &'static str, context_name: &str) -> Result<Vec<u8>> {
	let joined: String = data.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
	INLINE_MATERIAL
		.decode(joined)
		.map_err(|source| KubeconnError::Base64DecodeError {
			field,
			context: context_name.to_string(),
			source,
		})
}

fn warn_dropped_cluster_tls(cluster: &Cluster, context_name: &str) {
	let configured = [
		("certificate-authority", present(&cluster.certificate_authority).is_some()),
		(
			"certificate-authority-data",
			present(&cluster.certificate_authority_data).is_some(),
		),
	];
	for (field, _) in configured.iter().filter(|(_, is_set)| *is_set) {
		log::warn!("context {context_name:?}: ignoring {field}, server {} is not https", cluster.server);
	}
}

fn warn_dropped_client_tls(auth: &AuthInfo, context_name: &str) {
	let configured = [
		("client-certificate", present(&auth.client_certificate).is_some()),
		("client-certificate-data", present(&auth.client_certificate_data).is_some()),
		("client-key", present(&auth.client_key).is_some()),
		("client-key-data", present(&auth.client_key_data).is_some()),
	];
	for (field, _) in configured.iter().filter(|(_, is_set)| *is_set) {
		log::warn!("context {context_name:?}: ignoring {field}, server is not https");
	}
}
