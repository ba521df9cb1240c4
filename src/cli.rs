use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use tock_gen::{Algorithm, DEFAULT_DIGITS, DEFAULT_PERIOD};

#[derive(Parser)]
#[command(about, author, version, propagate_version = true)]
pub struct Opt {
    /// Print more log output to stderr. Can be given multiple times.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Command,
}

impl Opt {
    pub fn parse() -> Self {
        <Opt as Parser>::parse()
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current OTP for a Base32 encoded secret.
    Code {
        /// The shared secret. Whitespace and lowercase letters are accepted.
        secret: String,
        /// Seconds that a single code stays valid.
        #[arg(short, long, default_value_t = DEFAULT_PERIOD)]
        period: u64,
        /// Amount of digits in the code, between 1 and 9.
        #[arg(short, long, default_value_t = DEFAULT_DIGITS)]
        digits: u8,
        /// HMAC algorithm to use.
        #[arg(short, long, value_enum, default_value_t = HashAlgorithm::Sha1)]
        algorithm: HashAlgorithm,
        /// Unix timestamp to create the code for, instead of the current time.
        #[arg(short, long)]
        time: Option<u64>,
    },
    /// Generate a new random secret, printed as Base32 string.
    Secret {
        /// Length of the secret in bytes.
        #[arg(short, long, default_value_t = tock_core::secret::DEFAULT_SECRET_LEN)]
        length: usize,
    },
    /// Generate auto-completion scripts for various shells.
    Completions {
        /// Shell to generate an auto-completion script for.
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Generate man pages into the given directory.
    Manpages {
        /// Target directory, that must already exist and be empty. If the any file with the same
        /// name as any of the man pages already exist, it'll not be overwritten, but instead an
        /// error be returned.
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
}

/// HMAC algorithms selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum HashAlgorithm {
    /// SHA-1, used by almost all services.
    Sha1,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl From<HashAlgorithm> for Algorithm {
    fn from(value: HashAlgorithm) -> Self {
        match value {
            HashAlgorithm::Sha1 => Self::Sha1,
            HashAlgorithm::Sha256 => Self::Sha256,
            HashAlgorithm::Sha512 => Self::Sha512,
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn completions(shell: Shell) -> Result<()> {
    clap_complete::generate(
        shell,
        &mut Opt::command(),
        env!("CARGO_PKG_NAME"),
        &mut io::stdout().lock(),
    );
    Ok(())
}

pub fn manpages(dir: &Path) -> Result<()> {
    fn print(dir: &Path, app: &clap::Command) -> Result<()> {
        let name = app.get_display_name().unwrap_or_else(|| app.get_name());
        let out = dir.join(format!("{name}.1"));
        let mut out = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&out)
            .with_context(|| format!("the file `{}` already exists", out.display()))?;

        clap_mangen::Man::new(app.clone()).render(&mut out)?;
        out.flush()?;

        for sub in app.get_subcommands() {
            print(dir, sub)?;
        }

        Ok(())
    }

    ensure!(dir.try_exists()?, "target directory doesn't exist");

    let mut app = Opt::command();
    app.build();

    print(dir, &app)
}
