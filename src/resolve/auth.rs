use crate::config::types::{AuthInfo, present};
use crate::error::{KubeconnError, Result};

/// Check a user entry for fields this crate cannot honor.
///
/// Rules run in a fixed order and the first failure is returned:
/// exec plugin, then each impersonation field, then a password without a
/// username. `user` and `context` only label the error.
pub fn validate_auth_info(auth: &AuthInfo, user: &str, context: &str) -> Result<()> {
	let unsupported = [
		("exec", auth.exec.is_some()),
		("act-as-uid", present(&auth.impersonate_uid).is_some()),
		("act-as", present(&auth.impersonate).is_some()),
		("act-as-groups", !auth.impersonate_groups.is_empty()),
		(
			"act-as-user-extra",
			auth.impersonate_user_extra
				.as_ref()
				.is_some_and(|extra| !extra.is_empty()),
		),
	];

	if let Some(&(field, _)) = unsupported.iter().find(|(_, is_set)| *is_set) {
		return Err(KubeconnError::UnsupportedAuthField {
			field,
			user: user.to_string(),
			context: context.to_string(),
		});
	}

	if present(&auth.password).is_some() && present(&auth.username).is_none() {
		return Err(KubeconnError::InvalidCredentials {
			reason: "username required when password set",
			user: user.to_string(),
			context: context.to_string(),
		});
	}

	Ok(())
}
