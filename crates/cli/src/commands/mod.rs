//! Command implementations and shared CLI context.

pub mod auth;
pub mod catalog;
pub mod import;
pub mod orders;

use std::path::PathBuf;

use thiserror::Error;

use partsgrid_client::api::ApiClient;
use partsgrid_client::config::{ClientConfig, ConfigError};
use partsgrid_client::cookies::{CookieJar, JarError, SharedJar};

/// Errors shared across CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Jar(#[from] JarError),

    #[error(transparent)]
    Api(#[from] partsgrid_client::api::ApiError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Everything a command needs: the persistent jar and the client.
pub struct CliContext {
    pub jar: SharedJar,
    pub client: ApiClient,
    cookie_path: PathBuf,
}

impl CliContext {
    /// Load config and the persisted cookie jar, then build the client.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when config parsing, jar loading, or client
    /// construction fails.
    pub fn init() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        let cookie_path = config
            .cookie_file
            .clone()
            .unwrap_or_else(default_cookie_path);

        let jar = CookieJar::shared();
        jar.load(&cookie_path)?;

        let client = ApiClient::new(&config, jar.clone())?;

        Ok(Self {
            jar,
            client,
            cookie_path,
        })
    }

    /// Write the jar back to disk so the session survives this process.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] on write failure.
    pub fn persist(&self) -> Result<(), CliError> {
        self.jar.save(&self.cookie_path)?;
        Ok(())
    }
}

fn default_cookie_path() -> PathBuf {
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(".partsgrid-cookies.json"),
        |home| PathBuf::from(home).join(".partsgrid").join("cookies.json"),
    )
}
