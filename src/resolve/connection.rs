use secrecy::SecretString;
use std::fmt;

/// Everything an HTTP client needs to talk to the selected API server.
#[derive(Debug)]
pub struct ResolvedConnection {
	/// Server address exactly as written in the cluster entry.
	pub server: String,

	/// Present only for `https://` servers.
	pub tls: Option<TlsMaterial>,

	pub basic_auth: Option<BasicAuth>,

	/// Bearer token. May be set together with `token_file`; the consuming
	/// client decides which one applies.
	pub token: Option<SecretString>,

	/// Path to a bearer token file, re-read by the client per use.
	pub token_file: Option<String>,

	/// Proxy URL, unparsed.
	pub proxy_url: Option<String>,
}

impl ResolvedConnection {
	pub fn is_secure(&self) -> bool {
		self.tls.is_some()
	}

	pub fn has_credentials(&self) -> bool {
		self.basic_auth.is_some()
			|| self.token.is_some()
			|| self.token_file.is_some()
			|| self
				.tls
				.as_ref()
				.is_some_and(TlsMaterial::has_client_identity)
	}
}

/// CA, client certificate, and verification options for a secure connection.
///
/// File paths are handed to the TLS layer untouched; inline material is
/// already base64-decoded.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
	pub ca: Option<Vec<u8>>,

	pub ca_file: Option<String>,

	pub server_name: Option<String>,

	pub insecure_skip_verify: bool,

	pub cert: Option<Vec<u8>>,

	pub cert_file: Option<String>,

	pub key: Option<Vec<u8>>,

	pub key_file: Option<String>,
}

impl TlsMaterial {
	pub fn has_client_identity(&self) -> bool {
		self.cert.is_some() || self.cert_file.is_some()
	}
}

// Byte material is summarized and the private key never printed.
impl fmt::Debug for TlsMaterial {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TlsMaterial")
			.field("ca", &self.ca.as_ref().map(|b| ByteLen(b.len())))
			.field("ca_file", &self.ca_file)
			.field("server_name", &self.server_name)
			.field("insecure_skip_verify", &self.insecure_skip_verify)
			.field("cert", &self.cert.as_ref().map(|b| ByteLen(b.len())))
			.field("cert_file", &self.cert_file)
			.field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
			.field("key_file", &self.key_file)
			.finish()
	}
}

struct ByteLen(usize);

impl fmt::Debug for ByteLen {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{} bytes>", self.0)
	}
}

/// HTTP basic-auth credentials.
#[derive(Debug)]
pub struct BasicAuth {
	pub username: String,

	/// Only readable through `secrecy::ExposeSecret`.
	pub password: SecretString,
}
