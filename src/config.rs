use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "FINGRID_API_KEY";
const ENV_PREFIX: &str = "FINGRID_";

pub const PRODUCTION_BASE_URL: &str = "https://api.fingrid.fi/v1";

fn default_base_url() -> String {
    PRODUCTION_BASE_URL.to_string()
}

/// Settings read from `FINGRID_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub fn load_config() -> Result<Config> {
    envy::prefixed(ENV_PREFIX)
        .from_env::<Config>()
        .map_err(|err| Error::Config(err.to_string()))
}

/// Picks the key to send: a non-empty explicit key wins over the default.
pub fn resolve_api_key(user_key: Option<&str>, default_key: Option<&str>) -> Result<String> {
    user_key
        .filter(|key| !key.is_empty())
        .or(default_key.filter(|key| !key.is_empty()))
        .map(str::to_string)
        .ok_or(Error::MissingCredential)
}
