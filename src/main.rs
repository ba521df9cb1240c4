#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use tock_gen::Config;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::cli::{Command, HashAlgorithm, Opt};

mod cli;

fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logging(opt.verbose);

    match opt.cmd {
        Command::Code {
            secret,
            period,
            digits,
            algorithm,
            time,
        } => code(&secret, period, digits, algorithm, time),
        Command::Secret { length } => secret(length),
        Command::Completions { shell } => cli::completions(shell),
        Command::Manpages { dir } => cli::manpages(&dir),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn code(
    secret: &str,
    period: u64,
    digits: u8,
    algorithm: HashAlgorithm,
    time: Option<u64>,
) -> Result<()> {
    let now = match time {
        Some(time) => time,
        None => tock_gen::unix_time()?,
    };
    let config = Config {
        period,
        digits,
        algorithm: algorithm.into(),
    };

    debug!(now, ?config, "creating code");

    let secret = tock_core::secret::normalize(secret);
    let code = tock_gen::totp(&secret, now, &config).context("failed creating the code")?;
    let left = tock_gen::remaining(now, period)?;

    println!("{code}");
    println!("valid for {left}s");

    Ok(())
}

fn secret(length: usize) -> Result<()> {
    let secret = tock_core::secret::generate(length).context("failed generating a secret")?;

    println!("{secret}");

    Ok(())
}
