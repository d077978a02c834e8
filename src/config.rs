//! Environment-driven configuration.
//!
//! | Variable              | Required | Default                                    |
//! |-----------------------|----------|--------------------------------------------|
//! | `YESDEV_ACCESS_TOKEN` | yes      |                                            |
//! | `YESDEV_API_URL`      | no       | `https://www.yesdev.cn/api/platform.php`   |
//! | `YESDEV_WEB_URL`      | no       | `https://www.yesdev.cn/platform`           |
//! | `PORT`                | no       | `3000` (read by the `http` subcommand)     |

use std::env;

use crate::error::{Result, YesDevError};

/// Default YesDev API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.yesdev.cn/api/platform.php";

/// Default base for deep links into the YesDev web UI.
pub const DEFAULT_WEB_URL: &str = "https://www.yesdev.cn/platform";

/// Default listening port for the HTTP transport.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable holding the access token.
pub const TOKEN_VAR: &str = "YESDEV_ACCESS_TOKEN";

/// Resolved process configuration.
#[derive(Clone)]
pub struct Settings {
    /// Access token sent with every request.
    pub access_token: String,
    /// Single POST endpoint for all services.
    pub api_url: String,
    /// Base URL for deep links.
    pub web_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("web_url", &self.web_url)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`YesDevError::ConfigMissing`] if `YESDEV_ACCESS_TOKEN` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`YesDevError::ConfigMissing`] if the token is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                YesDevError::ConfigMissing(format!("{TOKEN_VAR} environment variable not set"))
            })?;

        let api_url = lookup("YESDEV_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let web_url = lookup("YESDEV_WEB_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEB_URL.to_string());

        Ok(Self {
            access_token,
            api_url,
            web_url,
        })
    }
}
