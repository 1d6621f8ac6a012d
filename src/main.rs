use clap::Parser;
use mywallet::args::{Args, Command};
use mywallet::model::Session;
use mywallet::prompt::{AutoPrompt, Prompt, TerminalPrompt};
use mywallet::{commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().mywallet_home().path();

    // This allows for running the program without a wallet server. When MYWALLET_IN_TEST_MODE is
    // set and non-zero in length, then the mode will be Mode::Test, otherwise it will be
    // Mode::Http.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            let session = Session::new(init_args.name(), init_args.email(), init_args.token());
            commands::init(home, init_args.api_url(), session)
                .await?
                .print()
        }

        Command::History => {
            let config = Config::load(home).await?;
            commands::history(config, mode).await?.print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            let mut prompt = prompt(delete_args.yes());
            commands::delete(config, mode, delete_args.id().into(), prompt.as_mut())
                .await?
                .print()
        }

        Command::Logout(logout_args) => {
            let config = Config::load(home).await?;
            let mut prompt = prompt(logout_args.yes());
            commands::logout(config, mode, prompt.as_mut())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Asks on the terminal unless the user already said yes on the command line.
fn prompt(yes: bool) -> Box<dyn Prompt + Send> {
    if yes {
        Box::new(AutoPrompt::new(true))
    } else {
        Box::new(TerminalPrompt)
    }
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
