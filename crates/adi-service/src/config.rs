use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_SERVER_NAME: &str = "adi-service";

pub const ENV_INPUT_POLICY: &str = "ADI_INPUT_POLICY";
pub const ENV_SERVER_NAME: &str = "ADI_SERVER_NAME";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown input policy `{0}`, expected `clamp` or `reject`")]
    UnknownPolicy(String),
}

/// What to do with metric values outside their documented range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputPolicy {
    /// Pull values into range and score anyway.
    #[default]
    Clamp,
    /// Refuse the request with an invalid-params error.
    Reject,
}

impl InputPolicy {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for InputPolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "clamp" | "lenient" => Ok(Self::Clamp),
            "reject" | "strict" => Ok(Self::Reject),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub server_name: String,
    pub input_policy: InputPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            input_policy: InputPolicy::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Bad values fall back to
    /// the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_policy = match lookup(ENV_INPUT_POLICY) {
            Some(raw) => raw.parse::<InputPolicy>().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "{ENV_INPUT_POLICY} ignored, clamping inputs");
                InputPolicy::default()
            }),
            None => InputPolicy::default(),
        };
        let server_name = lookup(ENV_SERVER_NAME)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        Self {
            server_name,
            input_policy,
        }
    }

    #[must_use]
    pub fn with_input_policy(mut self, input_policy: InputPolicy) -> Self {
        self.input_policy = input_policy;
        self
    }
}
