use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kubeconn::config::{RawConfig, locate_kubeconfig, parse_config_file};
use kubeconn::resolve::{ResolvedConnection, build_connection_for_context, list_contexts};

#[derive(Parser)]
#[command(name = "kubeconn")]
#[command(
	author,
	version,
	about = "Resolve a kubeconfig file into an API server connection"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Kubeconfig to read (default: $KUBECONFIG, then ~/.kube/config)
	#[arg(long, global = true, value_name = "PATH")]
	kubeconfig: Option<PathBuf>,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,

	/// Disable logging
	#[arg(short, long, global = true)]
	quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the resolved connection with secrets redacted
	Show {
		/// Resolve this context instead of current-context
		#[arg(long)]
		context: Option<String>,
	},
	/// Resolve the connection and report whether it is usable
	Validate {
		/// Resolve this context instead of current-context
		#[arg(long)]
		context: Option<String>,
	},
	/// List contexts, marking the current one
	Contexts,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let path = locate_kubeconfig(cli.kubeconfig).context("Failed to locate kubeconfig")?;

	match cli.command {
		Commands::Show { context } => handle_show(&path, context),
		Commands::Validate { context } => handle_validate(&path, context),
		Commands::Contexts => handle_contexts(&path),
	}
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
	if quiet {
		return;
	}

	let log_level = match verbose {
		0 => log::LevelFilter::Warn,
		1 => log::LevelFilter::Info,
		2 => log::LevelFilter::Debug,
		_ => log::LevelFilter::Trace,
	};

	pretty_env_logger::formatted_builder()
		.filter_level(log_level)
		.target(pretty_env_logger::env_logger::Target::Stderr)
		.init();
}

fn load(path: &Path) -> Result<RawConfig> {
	parse_config_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Resolve `context`, or current-context when none is given.
fn resolve(
	path: &Path,
	config: &RawConfig,
	context: Option<String>,
) -> Result<(String, ResolvedConnection)> {
	let name = context.unwrap_or_else(|| config.current_context.clone());
	let connection = build_connection_for_context(config, &name).with_context(|| {
		format!("Failed to resolve context {name:?} from {}", path.display())
	})?;
	Ok((name, connection))
}

fn handle_show(path: &Path, context: Option<String>) -> Result<ExitCode> {
	let config = load(path)?;
	let (name, conn) = resolve(path, &config, context)?;

	println!("# Source: {}", path.display());
	println!("context: {name}");
	println!("server: {}", conn.server);
	if let Some(ref proxy) = conn.proxy_url {
		println!("proxy-url: {proxy}");
	}

	if !conn.is_secure() {
		println!("tls: none");
	}
	if let Some(ref tls) = conn.tls {
		println!("tls:");
		println!("  insecure-skip-verify: {}", tls.insecure_skip_verify);
		if let Some(ref server_name) = tls.server_name {
			println!("  server-name: {server_name}");
		}
		if let Some(ref ca) = tls.ca {
			println!("  certificate-authority-data: {} bytes", ca.len());
		}
		if let Some(ref file) = tls.ca_file {
			println!("  certificate-authority: {file}");
		}
		if let Some(ref cert) = tls.cert {
			println!("  client-certificate-data: {} bytes", cert.len());
		}
		if let Some(ref file) = tls.cert_file {
			println!("  client-certificate: {file}");
		}
		if tls.key.is_some() {
			println!("  client-key-data: [REDACTED]");
		}
		if let Some(ref file) = tls.key_file {
			println!("  client-key: {file}");
		}
	}

	if !conn.has_credentials() {
		println!("credentials: none");
	}
	if let Some(ref basic) = conn.basic_auth {
		let password = if basic.password.expose_secret().is_empty() {
			"<empty>"
		} else {
			"[REDACTED]"
		};
		println!("basic-auth: {} / {password}", basic.username);
	}
	if conn.token.is_some() {
		println!("token: [REDACTED]");
	}
	if let Some(ref file) = conn.token_file {
		println!("token-file: {file}");
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_validate(path: &Path, context: Option<String>) -> Result<ExitCode> {
	let outcome = load(path).and_then(|config| resolve(path, &config, context));

	match outcome {
		Ok((name, conn)) => {
			println!(
				"{} is valid: context {name} -> {}",
				path.display(),
				conn.server
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_contexts(path: &Path) -> Result<ExitCode> {
	let config = load(path)?;
	let contexts = list_contexts(&config);

	if contexts.is_empty() {
		println!("No contexts defined in {}.", path.display());
		return Ok(ExitCode::SUCCESS);
	}

	for summary in &contexts {
		let marker = if summary.current { "*" } else { " " };
		let cluster = summary.cluster.as_deref().unwrap_or("<missing>");
		let user = summary.user.as_deref().unwrap_or("<none>");
		println!("{marker} {} (cluster: {cluster}, user: {user})", summary.name);
	}

	Ok(ExitCode::SUCCESS)
}
