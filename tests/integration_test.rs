#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn kubeconn_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("kubeconn").unwrap();
	cmd.env_remove("KUBECONFIG");
	cmd
}

fn write_kubeconfig(dir: &Path, content: &str) -> PathBuf {
	let path = dir.join("config");
	fs::write(&path, content).unwrap();
	path
}

const TOKEN_CONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
- name: c1
  cluster:
    server: https://10.0.0.1:6443
    certificate-authority-data: Zm9v
- name: plain
  cluster:
    server: http://127.0.0.1:8080
users:
- name: u1
  user:
    token: abc123
- name: basic
  user:
    username: admin
    password: hunter2
contexts:
- name: ctx1
  context:
    cluster: c1
    user: u1
- name: local
  context:
    cluster: plain
    user: basic
current-context: ctx1
"#;

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	kubeconn_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Resolve a kubeconfig file"));
}

#[test]
fn test_version_flag() {
	kubeconn_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("kubeconn"));
}

#[test]
fn test_no_args_shows_help() {
	kubeconn_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// show tests
// ============================================================================

#[test]
fn test_show_redacts_token() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("show")
		.assert()
		.success()
		.stdout(predicate::str::contains("context: ctx1"))
		.stdout(predicate::str::contains("server: https://10.0.0.1:6443"))
		.stdout(predicate::str::contains("certificate-authority-data: 3 bytes"))
		.stdout(predicate::str::contains("token: [REDACTED]"))
		.stdout(predicate::str::contains("abc123").not());
}

#[test]
fn test_show_context_override_over_http() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.args(["show", "--context", "local"])
		.assert()
		.success()
		.stdout(predicate::str::contains("server: http://127.0.0.1:8080"))
		.stdout(predicate::str::contains("tls: none"))
		.stdout(predicate::str::contains("basic-auth: admin / [REDACTED]"))
		.stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn test_show_reads_kubeconfig_env_var() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.env("KUBECONFIG", &path)
		.arg("show")
		.assert()
		.success()
		.stdout(predicate::str::contains("server: https://10.0.0.1:6443"));
}

#[test]
fn test_show_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(temp_dir.path().join("missing"))
		.arg("show")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to read kubeconfig"));
}

// ============================================================================
// validate tests
// ============================================================================

#[test]
fn test_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("validate")
		.assert()
		.success()
		.stdout(predicate::str::contains("is valid: context ctx1"));
}

#[test]
fn test_validate_malformed_yaml() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), "clusters: [[[");

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("validate")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to parse kubeconfig"));
}

#[test]
fn test_validate_missing_context() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.args(["validate", "--context", "nope"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Context \"nope\" does not exist"));
}

#[test]
fn test_validate_rejects_exec_plugin() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(
		temp_dir.path(),
		r#"
clusters:
- name: eks
  cluster:
    server: https://eks.example.com
users:
- name: aws
  user:
    exec:
      apiVersion: client.authentication.k8s.io/v1beta1
      command: aws
      args: [eks, get-token, --cluster-name, prod]
contexts:
- name: prod
  context:
    cluster: eks
    user: aws
current-context: prod
"#,
	);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("validate")
		.assert()
		.failure()
		.stderr(predicate::str::contains("field exec is not supported"))
		.stderr(predicate::str::contains("User \"aws\" (context \"prod\")"));
}

#[test]
fn test_validate_bad_ca_data() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(
		temp_dir.path(),
		r#"
clusters:
- name: c
  cluster:
    server: https://host:6443
    certificate-authority-data: not-base64!
contexts:
- name: ctx
  context:
    cluster: c
current-context: ctx
"#,
	);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("validate")
		.assert()
		.failure()
		.stderr(predicate::str::contains("certificate-authority-data"));
}

#[test]
fn test_validate_block_scalar_ca_data() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(
		temp_dir.path(),
		r#"
clusters:
- name: c
  cluster:
    server: https://host:6443
    certificate-authority-data: |
      Zm9v
contexts:
- name: ctx
  context:
    cluster: c
current-context: ctx
"#,
	);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("show")
		.assert()
		.success()
		.stdout(predicate::str::contains("certificate-authority-data: 3 bytes"));
}

// ============================================================================
// contexts tests
// ============================================================================

#[test]
fn test_contexts_marks_current() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), TOKEN_CONFIG);

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("contexts")
		.assert()
		.success()
		.stdout(predicate::str::contains("* ctx1 (cluster: c1, user: u1)"))
		.stdout(predicate::str::contains("  local (cluster: plain, user: basic)"));
}

#[test]
fn test_contexts_empty() {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = write_kubeconfig(temp_dir.path(), "contexts: null\n");

	kubeconn_cmd()
		.arg("--kubeconfig")
		.arg(&path)
		.arg("contexts")
		.assert()
		.success()
		.stdout(predicate::str::contains("No contexts defined"));
}
