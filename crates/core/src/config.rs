use crate::error::{Error, Result};
use std::path::PathBuf;

/// At most this many search results are ever presented to the user.
pub const RESULT_LIMIT: usize = 5;

const STORAGE_DIR: &str = ".local/share/musiclog";
const STORAGE_FILE: &str = "musiclog.xml";

const CATALOG_BASE_URL: &str = "https://api.discogs.com";
const CATALOG_USER_AGENT: &str = "musiclog/0.1";
const CATALOG_TOKEN: &str = "kXbWRUrzMDquhGdtNAoLpeYBsJcFgnHvEiTmOwSy";

/// Process-wide configuration, built once at startup and passed to
/// whichever component needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the XML log file.
    pub storage_path: PathBuf,
    pub result_limit: usize,
    pub catalog: CatalogConfig,
}

/// Settings for the remote catalog service.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub user_agent: String,
    pub token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| Error::Config("could not determine home directory".to_string()))?;

        Ok(Self {
            storage_path: PathBuf::from(home).join(STORAGE_DIR).join(STORAGE_FILE),
            result_limit: RESULT_LIMIT,
            catalog: CatalogConfig {
                base_url: CATALOG_BASE_URL.to_string(),
                user_agent: CATALOG_USER_AGENT.to_string(),
                token: CATALOG_TOKEN.to_string(),
            },
        })
    }
}
