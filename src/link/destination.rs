//! Destination strings: `[module:]presenter:action[#fragment]`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseError;

// Word characters are ASCII only; `.` stops at a newline and `\z` anchors the
// absolute end, so a trailing newline never matches.
static DESTINATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_:]+):([A-Za-z0-9_]*)(#.*)?\z").unwrap());

/// A parsed destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    presenter: String,
    action: String,
    fragment: String,
}

impl Destination {
    pub fn parse(dest: &str) -> Result<Self, ParseError> {
        let caps = DESTINATION
            .captures(dest)
            .ok_or_else(|| ParseError::new(dest))?;
        let part = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();

        Ok(Self {
            presenter: part(1),
            action: part(2),
            fragment: part(3),
        })
    }

    /// Presenter id, possibly qualified with module segments (`Admin:Product`).
    pub fn presenter(&self) -> &str {
        &self.presenter
    }

    /// Action name; empty means the presenter's default action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Fragment including its leading `#`, or empty.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Module segments of the presenter id (everything before the last colon).
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        let mut segments: Vec<&str> = self.presenter.split(':').collect();
        segments.pop();
        segments.into_iter()
    }
}

impl FromStr for Destination {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.presenter, self.action, self.fragment)
    }
}
