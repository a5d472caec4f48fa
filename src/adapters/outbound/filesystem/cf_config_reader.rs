use crate::ports::outbound::SessionProvider;
use crate::shared::error::UsageReportError;
use crate::shared::Result;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the directory that holds `.cf/`
const CF_HOME_ENV: &str = "CF_HOME";

/// Subset of the CF CLI `config.json` this tool needs
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CfConfigFile {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default, rename = "SkipSSLValidation")]
    skip_ssl_validation: bool,
}

/// CfSession - explicit handle to the logged-in CF CLI session
///
/// Passed into the API client at construction; nothing reads the session
/// from ambient state afterwards.
#[derive(Clone, Default)]
pub struct CfSession {
    api_endpoint: Option<String>,
    access_token: Option<String>,
    skip_ssl_validation: bool,
}

impl CfSession {
    pub fn new(api_endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_endpoint: non_blank(Some(api_endpoint.into())),
            access_token: non_blank(Some(access_token.into())),
            skip_ssl_validation: false,
        }
    }

    /// A session with no endpoint and no token
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn with_skip_ssl_validation(mut self, skip: bool) -> Self {
        self.skip_ssl_validation = skip;
        self
    }

    /// API endpoint without a trailing slash
    pub fn api_endpoint(&self) -> Option<&str> {
        self.api_endpoint.as_deref().map(|e| e.trim_end_matches('/'))
    }

    pub fn skip_ssl_validation(&self) -> bool {
        self.skip_ssl_validation
    }

    /// Value for the `Authorization` header
    ///
    /// The CF CLI stores the token with its `bearer` scheme; a bare token
    /// gets the scheme added.
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token.as_deref().map(|token| {
            if token.to_ascii_lowercase().starts_with("bearer ") {
                token.to_string()
            } else {
                format!("bearer {}", token)
            }
        })
    }
}

impl SessionProvider for CfSession {
    fn is_authenticated(&self) -> bool {
        self.api_endpoint.is_some() && self.access_token.is_some()
    }
}

impl fmt::Debug for CfSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CfSession")
            .field("api_endpoint", &self.api_endpoint)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("skip_ssl_validation", &self.skip_ssl_validation)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// CfConfigReader adapter loading the session from the CF CLI config file
///
/// Reads `$CF_HOME/.cf/config.json`, falling back to `$HOME/.cf/config.json`.
pub struct CfConfigReader {
    config_path: PathBuf,
}

impl CfConfigReader {
    /// Resolves the config location from the environment
    pub fn from_env() -> Self {
        let home = std::env::var_os(CF_HOME_ENV)
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_home(&home)
    }

    /// Uses `<home>/.cf/config.json`
    pub fn with_home(home: &Path) -> Self {
        Self {
            config_path: home.join(".cf").join("config.json"),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the session
    ///
    /// A missing config file means nobody has logged in yet and yields an
    /// unauthenticated session. A file that exists but cannot be parsed is an
    /// error.
    pub fn load(&self) -> Result<CfSession> {
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.config_path.display(), "no CF CLI config found");
                return Ok(CfSession::unauthenticated());
            }
            Err(e) => return Err(self.invalid(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(CfSession::unauthenticated());
        }

        let config: CfConfigFile =
            serde_json::from_str(&content).map_err(|e| self.invalid(e.to_string()))?;

        Ok(CfSession {
            api_endpoint: non_blank(config.target),
            access_token: non_blank(config.access_token),
            skip_ssl_validation: config.skip_ssl_validation,
        })
    }

    fn invalid(&self, details: String) -> anyhow::Error {
        UsageReportError::InvalidSession {
            path: self.config_path.clone(),
            details,
        }
        .into()
    }
}
