//! request-filter command line.
//!
//! Runs the filter outside a live proxy: one-off checks, batch evaluation of
//! JSON descriptors from stdin, and policy file validation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use request_filter::config::LogFormat;
use request_filter::lifecycle::shutdown::DEFAULT_GRACE;
use request_filter::lifecycle::{bootstrap, signals, Runtime, Shutdown};
use request_filter::observability::logging::init_logging;
use request_filter::{BlockReason, Policy, RequestDescriptor};

#[derive(Parser)]
#[command(name = "request-filter")]
#[command(about = "Evaluate proxy requests against a host denylist policy", long_about = None)]
struct Cli {
    /// Policy file (TOML). Without it the built-in policy is used.
    #[arg(short, long, env = "REQUEST_FILTER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log filter directive.
    #[arg(long)]
    log_level: Option<String>,

    /// Override the configured log format.
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide a single request; exits 0 on allow, 1 on block
    Check {
        /// Destination host, optionally with port
        #[arg(long, default_value = "")]
        host: String,

        /// Request header as 'Name: value' (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },
    /// Read JSON descriptors from stdin, one per line, and print decisions
    Eval {
        /// Reload the policy file when it changes
        #[arg(long)]
        watch: bool,
    },
    /// Load and validate the policy file
    Validate,
    /// Print the effective configuration
    Show,
}

/// One line of `eval` output.
#[derive(Serialize)]
struct EvalRecord<'a> {
    host: &'a str,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a BlockReason>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let runtime = bootstrap(cli.config.as_deref(), |config| {
        let mut observability = config.observability.clone();
        if let Some(level) = &cli.log_level {
            observability.log_level = level.clone();
        }
        if let Some(format) = cli.log_format {
            observability.log_format = format;
        }
        if !init_logging(&observability) {
            eprintln!("warning: logging could not be initialized");
        }
    })?;

    match cli.command {
        Commands::Check { host, headers } => check(&runtime, host, &headers),
        Commands::Eval { watch } => {
            eval(&runtime, watch || runtime.config.reload.enabled).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate => {
            let policy = &runtime.config.policy;
            println!(
                "{}: ok ({} denylist patterns, {} blocked destinations)",
                runtime
                    .config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "builtin policy".to_string()),
                policy.denylist.len(),
                policy.blocked_destinations.len(),
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show => {
            print!("{}", toml::to_string_pretty(&runtime.config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(
    runtime: &Runtime,
    host: String,
    headers: &[String],
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut descriptor = RequestDescriptor::new(host);
    for header in headers {
        let Some((name, value)) = header.split_once(':') else {
            return Err(format!("invalid header '{}', expected 'Name: value'", header).into());
        };
        descriptor = descriptor.with_header(name.trim(), value.trim());
    }

    let decision = runtime.filter.evaluate(&descriptor);
    println!("{}", decision);

    Ok(if decision.is_allowed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

async fn eval(runtime: &Runtime, watch: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut shutdown = Shutdown::new();

    // Keep the watcher alive for the whole run.
    let mut _watcher = None;
    if watch {
        if let Some((watcher, updates)) = runtime.watch()? {
            _watcher = Some(watcher);
            let filter = runtime.filter.clone();
            shutdown.spawn("policy-follower", move |rx| filter.follow(updates, rx));
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signals::shutdown_on_ctrl_c(&shutdown) => None,
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let descriptor = match serde_json::from_str::<RequestDescriptor>(&line) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable descriptor, allowing");
                RequestDescriptor::default()
            }
        };

        let decision = runtime.filter.evaluate(&descriptor);
        let record = EvalRecord {
            host: &descriptor.host,
            allowed: decision.is_allowed(),
            reason: decision.reason(),
        };
        let mut out = serde_json::to_string(&record)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    shutdown.drain(DEFAULT_GRACE).await;
    Ok(())
}
