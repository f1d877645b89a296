//! Access tokens and auth headers
//!
//! The token itself is issued by Base44 (login flow, service token, ...).
//! This module only finds it and attaches it to requests.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Env var holding a bearer token
pub const ACCESS_TOKEN_ENV: &str = "BASE44_ACCESS_TOKEN";

/// Env var pointing at a file that holds a bearer token
pub const TOKEN_FILE_ENV: &str = "BASE44_TOKEN_FILE";

/// Bearer token for authenticated calls
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Returns `None` for a blank token
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Where to look for an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Literal token value
    Explicit(String),
    /// Environment variable name
    Env(String),
    /// File whose (trimmed) contents are the token
    File(PathBuf),
}

impl TokenSource {
    fn resolve(&self) -> Option<AccessToken> {
        match self {
            TokenSource::Explicit(token) => AccessToken::new(token.as_str()),
            TokenSource::Env(name) => std::env::var(name).ok().and_then(AccessToken::new),
            TokenSource::File(path) => match std::fs::read_to_string(path) {
                Ok(contents) => AccessToken::new(contents),
                Err(e) => {
                    debug!("Skipping token file {}: {}", path.display(), e);
                    None
                }
            },
        }
    }
}

/// First non-blank token among `sources`, in order
pub fn get_access_token(sources: &[TokenSource]) -> Option<AccessToken> {
    sources.iter().find_map(TokenSource::resolve)
}

/// `BASE44_ACCESS_TOKEN`, then the file named by `BASE44_TOKEN_FILE` if set
pub fn default_token_sources() -> Vec<TokenSource> {
    let mut sources = vec![TokenSource::Env(ACCESS_TOKEN_ENV.to_string())];
    if let Ok(path) = std::env::var(TOKEN_FILE_ENV) {
        sources.push(TokenSource::File(PathBuf::from(path)));
    }
    sources
}

/// Where an unauthenticated user has to go to sign in
pub fn login_url(server_url: &str, application_id: &str) -> String {
    format!("{}/login?app_id={}", server_url, application_id)
}

/// Headers sent with every request. The bearer header is only present with a token.
pub fn request_headers(
    application_id: &str,
    token: Option<&AccessToken>,
) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("X-App-Id".to_string(), application_id.to_string());
    if let Some(token) = token {
        headers.insert("Authorization".to_string(), token.bearer());
    }
    headers
}
