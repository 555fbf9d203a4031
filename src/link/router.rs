//! Router collaborator interface.
//!
//! URL construction itself belongs to the router; this crate only hands it a
//! `LinkRequest` and the reference URL the link is relative to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::binding::args::ArgumentBag;

/// What the router is asked to build a URL for.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRequest {
    pub presenter: String,
    /// Final parameters, including the action key when an action is set.
    pub params: ArgumentBag,
}

impl LinkRequest {
    pub fn new(presenter: impl Into<String>, params: ArgumentBag) -> Self {
        Self {
            presenter: presenter.into(),
            params,
        }
    }
}

/// Reference URL context links are generated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefUrl {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    /// Path prefix of the application, always starting and ending with `/`.
    pub base_path: String,
}

impl Default for RefUrl {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: None,
            base_path: "/".to_string(),
        }
    }
}

impl RefUrl {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_base_path(base_path);
        self
    }

    /// `scheme://host[:port]`, omitting the scheme's default port.
    pub fn host_url(&self) -> String {
        match self.port {
            Some(port) if Some(port) != default_port(&self.scheme) => {
                format!("{}://{}:{}", self.scheme, self.host, port)
            }
            _ => format!("{}://{}", self.scheme, self.host),
        }
    }

    /// `host_url` followed by the base path.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.host_url(), self.base_path)
    }
}

impl fmt::Display for RefUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

pub(crate) fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Builds URLs from link requests.
pub trait Router: Send + Sync {
    /// URL for `request`, or `None` when no route matches.
    fn construct_url(&self, request: &LinkRequest, ref_url: &RefUrl) -> Option<String>;
}

impl<F> Router for F
where
    F: Fn(&LinkRequest, &RefUrl) -> Option<String> + Send + Sync,
{
    fn construct_url(&self, request: &LinkRequest, ref_url: &RefUrl) -> Option<String> {
        self(request, ref_url)
    }
}
