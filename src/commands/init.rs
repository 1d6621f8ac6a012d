use crate::commands::Out;
use crate::model::Session;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and an initial `config.json` holding the API URL and the session.
///
/// # Arguments
/// - `mywallet_home` - The directory that will hold the configuration, e.g. `$HOME/.mywallet`
/// - `api_url` - The base URL of the wallet API
/// - `session` - The signed-in user's name, email and bearer token
///
/// # Errors
/// - Returns an error if the URL is invalid or any file operations fail.
pub async fn init(mywallet_home: &Path, api_url: &str, session: Session) -> Result<Out<()>> {
    let _config = Config::create(mywallet_home, api_url, session)
        .await
        .context("Unable to create the mywallet directory and config")?;
    Ok("Successfully created the mywallet directory and config".into())
}
