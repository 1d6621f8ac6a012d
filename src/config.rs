//! Configuration file handling for MyWallet.
//!
//! The configuration file is stored at `$MYWALLET_HOME/config.json` and contains the address of
//! the wallet API along with the signed-in user's session.

use crate::model::Session;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

const APP_NAME: &str = "mywallet";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$MYWALLET_HOME` and from there it loads `$MYWALLET_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    api_url: Url,
}

impl Config {
    /// Creates the home directory and an initial `config.json` holding `api_url` and `session`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the home directory, e.g. `$HOME/.mywallet`
    /// - `api_url` - The base URL of the wallet API, e.g. `https://mywallet-api.example.com`
    /// - `session` - The signed-in user and their bearer token
    ///
    /// # Errors
    /// - Returns an error if the URL is invalid or any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, api_url: &str, session: Session) -> Result<Self> {
        let api_url = parse_api_url(api_url)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the mywallet home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
            session,
        };
        config_file.save(&config_path).await?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    /// This will
    /// - validate that `mywallet_home` exists and that the config file exists
    /// - load the config file and validate the API URL
    /// - return the loaded configuration object
    pub async fn load(mywallet_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = mywallet_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("MyWallet home is missing, run 'mywallet init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let api_url = parse_api_url(&config_file.api_url)
            .with_context(|| format!("Invalid api_url in '{}'", config_path.display()))?;

        Ok(Self {
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn session(&self) -> &Session {
        &self.config_file.session
    }

    /// Replaces the stored session and writes `config.json`.
    pub async fn save_session(&mut self, session: Session) -> Result<()> {
        self.config_file.session = session;
        self.config_file.save(&self.config_path).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "mywallet",
///   "config_version": 1,
///   "api_url": "https://mywallet-api.example.com/",
///   "session": {
///     "name": "Ana",
///     "email": "ana@example.com",
///     "token": "0b6f2c1e-..."
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "mywallet"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the wallet API
    api_url: String,

    /// The signed-in user. Empty after a logout.
    #[serde(default)]
    session: Session,
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;
        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path. The file holds a bearer token so on Unix it
    /// is made readable by the owner only.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(p, permissions)
                .await
                .with_context(|| format!("Failed to set permissions on {}", p.display()))?;
        }
        Ok(())
    }
}

/// Parses the API base URL. Only `http` and `https` are accepted.
fn parse_api_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid API URL '{url}'"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => bail!("Unsupported scheme '{other}' in API URL '{url}', expected http or https"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new("Ana", "ana@example.com", "abc123")
    }

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("mywallet_home");

        let config = Config::create(&home, "https://wallet.example.com/api", session())
            .await
            .unwrap();
        assert!(config.config_path().is_file());
        assert_eq!(config.api_url().as_str(), "https://wallet.example.com/api");

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.root(), config.root());
        assert_eq!(loaded.session(), &session());
        assert_eq!(loaded.api_url(), config.api_url());
    }

    #[tokio::test]
    async fn test_config_create_bad_url() {
        let dir = TempDir::new().unwrap();
        let result = Config::create(dir.path(), "not a url", session()).await;
        assert!(result.is_err());
        let result = Config::create(dir.path(), "ftp://example.com", session()).await;
        assert!(result.unwrap_err().to_string().contains("Unsupported scheme"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.unwrap_err().to_string().contains("mywallet init"));
    }

    #[tokio::test]
    async fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path()).await;
        assert!(result.unwrap_err().to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_save_session() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::create(dir.path(), "http://localhost:5000", session())
            .await
            .unwrap();
        config.save_session(Session::default()).await.unwrap();

        let loaded = Config::load(dir.path()).await.unwrap();
        assert!(loaded.session().is_signed_out());
        assert_eq!(loaded.session().name(), "");
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "api_url": "https://wallet.example.com"
        }"#;
        utils::write(&path, json).await.unwrap();

        let result = ConfigFile::load(&path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_without_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "mywallet",
            "config_version": 1,
            "api_url": "https://wallet.example.com"
        }"#;
        utils::write(&path, json).await.unwrap();

        let config = ConfigFile::load(&path).await.unwrap();
        assert_eq!(config.session, Session::default());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_config_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), "https://wallet.example.com", session())
            .await
            .unwrap();
        let mode = std::fs::metadata(config.config_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_parse_api_url() {
        assert!(parse_api_url("https://wallet.example.com").is_ok());
        assert!(parse_api_url("http://127.0.0.1:5000/").is_ok());
        assert!(parse_api_url("mailto:ana@example.com").is_err());
        assert!(parse_api_url("").is_err());
    }
}
