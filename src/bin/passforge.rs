//! src/bin/passforge.rs
//! Command-line harness: derive a password and print it on stdout.
//!
//! Exit codes: 0 on success, 1 on invalid input or unsupported PRF,
//! 2 on usage errors (from clap), 124 when `--timeout-ms` cancels the run.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use passforge_rs::consts::{DEFAULT_ITERATIONS, DEFAULT_PASSWORD_LENGTH};
use passforge_rs::{
    spawn_derivation, ExposeSecret, IterationSpeed, OutputEncoding, Outcome, Prf, SessionBuilder,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_CANCELLED: u8 = 124;

#[derive(Parser, Debug)]
#[command(name = "passforge", version)]
#[command(about = "Forge a site password from a master password and a salt using PBKDF2")]
struct Cli {
    /// Master password
    password: String,

    /// Salt, usually the site or account name
    salt: String,

    /// PBKDF2 iteration count (values ≤ 0 are treated as 1)
    #[arg(
        short,
        long,
        env = "PASSFORGE_ITERATIONS",
        default_value_t = i64::from(DEFAULT_ITERATIONS),
        allow_negative_numbers = true
    )]
    iterations: i64,

    /// Generated password length in characters (values ≤ 0 are treated as 1)
    #[arg(
        short,
        long,
        env = "PASSFORGE_LENGTH",
        default_value_t = DEFAULT_PASSWORD_LENGTH as i64,
        allow_negative_numbers = true
    )]
    length: i64,

    /// Pseudorandom function: HmacSHA1, HmacSHA256 or HmacSHA512
    #[arg(long, env = "PASSFORGE_PRF", default_value = "HmacSHA1")]
    prf: String,

    /// Output encoding: base64, base64url, hex or raw
    #[arg(long, env = "PASSFORGE_ENCODING", default_value = "base64")]
    encoding: String,

    /// Cancel the derivation if it runs longer than this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Also print the raw derived key as hex on stderr
    #[arg(long)]
    show_key: bool,

    /// Log timing information on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(Outcome::Complete(())) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => {
            eprintln!("passforge: cancelled");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(e) => {
            eprintln!("passforge: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<Outcome<()>> {
    let prf: Prf = cli.prf.parse()?;
    let encoding: OutputEncoding = cli.encoding.parse()?;

    let session = SessionBuilder::new()
        .with_iterations(cli.iterations)
        .with_length(cli.length)
        .with_prf(prf)
        .with_encoding(encoding)
        .build(cli.password.as_str(), cli.salt.as_bytes())?;
    let session = Arc::new(session);

    let mut speed = IterationSpeed::default();
    info!(
        iterations = session.iterations(),
        estimated_seconds = speed.estimated_seconds(session.iterations()),
        "generating password"
    );

    let handle = spawn_derivation(Arc::clone(&session))?;
    if let Some(ms) = cli.timeout_ms {
        handle
            .cancel_after(Duration::from_millis(ms))
            .context("could not arm the timeout")?;
    }

    let password = match handle.wait()? {
        Outcome::Complete(password) => password,
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };

    println!("{}", password.expose_secret());

    if cli.show_key {
        if let Some(key) = session.derived_key() {
            eprintln!("derived key: {}", hex::encode(key.expose_secret()));
        }
    }

    let per_second = speed.record_session(&*session);
    info!(
        elapsed_seconds = session.elapsed_seconds(),
        iterations_per_second = per_second,
        "password generated"
    );

    Ok(Outcome::Complete(()))
}
