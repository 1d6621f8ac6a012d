//! These structs provide the CLI interface for the mywallet CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// mywallet: A command-line client for your MyWallet transaction history.
///
/// Shows the income and outcome records stored by the MyWallet API together with the resulting
/// balance, and lets you delete individual records.
///
/// Run `mywallet init` once with the API address and your session token, then `mywallet history`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and save the API address and your session.
    ///
    /// The token is the one the MyWallet API gave you when you signed in. It is stored in
    /// $MYWALLET_HOME/config.json, readable only by you.
    Init(InitArgs),
    /// Show your transactions and balance.
    History,
    /// Delete one transaction by its ID.
    Delete(DeleteArgs),
    /// Forget the stored session.
    Logout(LogoutArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where mywallet configuration is held. Defaults to ~/.mywallet
    #[arg(long, env = "MYWALLET_HOME", default_value_t = default_mywallet_home())]
    mywallet_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, mywallet_home: PathBuf) -> Self {
        Self {
            log_level,
            mywallet_home: mywallet_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn mywallet_home(&self) -> &DisplayPath {
        &self.mywallet_home
    }
}

/// Args for the `mywallet init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the MyWallet API, e.g. https://mywallet-api.example.com
    #[arg(long)]
    api_url: String,

    /// Your name, used to greet you.
    #[arg(long)]
    name: String,

    /// Your email address.
    #[arg(long)]
    email: String,

    /// The bearer token issued by the MyWallet API when you signed in.
    #[arg(long, env = "MYWALLET_TOKEN", hide_env_values = true)]
    token: String,
}

impl InitArgs {
    pub fn new(
        api_url: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            name: name.into(),
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Args for the `mywallet delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete, as shown in brackets by `mywallet history`.
    id: String,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>, yes: bool) -> Self {
        Self { id: id.into(), yes }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `mywallet logout` command.
#[derive(Debug, Parser, Clone)]
pub struct LogoutArgs {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

impl LogoutArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

fn default_mywallet_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".mywallet"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --mywallet-home or MYWALLET_HOME instead of relying on the \
                default directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from(".mywallet")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
