//! Handler directory: which presenters exist and what their members accept.
//!
//! The resolver only needs two answers from a directory: whether a presenter
//! is bindable, and if so, the declared parameters of a named member.
//! `StaticDirectory` answers both from a registry assembled at startup.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::binding::signature::HandlerSignature;
use crate::common::{action_member, presenter_class, render_member};
use crate::errors::DirectoryError;

static PRESENTER_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z\x{80}-\x{10FFFF}][a-zA-Z0-9:\x{80}-\x{10FFFF}]*\z").unwrap()
});

/// Source of declared member signatures for one presenter.
pub trait SignatureSource: Send + Sync {
    /// Handler name used in diagnostics (e.g. `ProductPresenter`).
    fn handler_name(&self) -> &str;

    /// Signature of `member`, or `None` if the presenter has no such member.
    fn signature(&self, member: &str) -> Option<&HandlerSignature>;
}

/// Result of a directory lookup.
#[derive(Clone)]
pub enum HandlerKind {
    /// A presenter whose members can be bound against.
    Bindable(Arc<dyn SignatureSource>),
    /// A known target that is not a bindable presenter; binding is skipped.
    Opaque,
}

impl HandlerKind {
    pub fn is_bindable(&self) -> bool {
        matches!(self, HandlerKind::Bindable(_))
    }
}

impl fmt::Debug for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerKind::Bindable(source) => f
                .debug_tuple("Bindable")
                .field(&source.handler_name())
                .finish(),
            HandlerKind::Opaque => f.write_str("Opaque"),
        }
    }
}

/// Looks up presenters by id.
pub trait HandlerDirectory: Send + Sync {
    fn lookup(&self, presenter: &str) -> Result<HandlerKind, DirectoryError>;
}

/// Check a presenter id against the allowed character set.
pub fn validate_presenter_name(presenter: &str) -> Result<(), DirectoryError> {
    if PRESENTER_NAME.is_match(presenter) {
        Ok(())
    } else {
        Err(DirectoryError::InvalidName(presenter.to_string()))
    }
}

/// Statically declared members of one presenter.
#[derive(Debug, Clone)]
pub struct PresenterSignatures {
    class: String,
    // keyed by lowercased member name; member names match case-insensitively
    members: HashMap<String, HandlerSignature>,
}

impl PresenterSignatures {
    /// Empty declaration for `presenter`, named after its conventional class.
    pub fn new(presenter: &str) -> Self {
        Self::with_class(presenter_class(presenter))
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            members: HashMap::new(),
        }
    }

    /// Declare a member by its full name (`actionShow`, `renderDefault`).
    pub fn member(mut self, name: &str, signature: HandlerSignature) -> Self {
        self.members.insert(name.to_lowercase(), signature);
        self
    }

    /// Declare the action-style member for `action`.
    pub fn action(self, action: &str, signature: HandlerSignature) -> Self {
        self.member(&action_member(action), signature)
    }

    /// Declare the render-style member for `action`.
    pub fn render(self, action: &str, signature: HandlerSignature) -> Self {
        self.member(&render_member(action), signature)
    }
}

impl SignatureSource for PresenterSignatures {
    fn handler_name(&self) -> &str {
        &self.class
    }

    fn signature(&self, member: &str) -> Option<&HandlerSignature> {
        self.members.get(&member.to_lowercase())
    }
}

/// Directory backed by an in-memory registry.
#[derive(Clone, Default)]
pub struct StaticDirectory {
    entries: HashMap<String, HandlerKind>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presenter(self, presenter: &str, signatures: PresenterSignatures) -> Self {
        self.with_source(presenter, Arc::new(signatures))
    }

    pub fn with_source(mut self, presenter: &str, source: Arc<dyn SignatureSource>) -> Self {
        self.entries
            .insert(presenter.to_string(), HandlerKind::Bindable(source));
        self
    }

    /// Register a presenter that exists but is not bindable.
    pub fn with_opaque(mut self, presenter: &str) -> Self {
        self.entries.insert(presenter.to_string(), HandlerKind::Opaque);
        self
    }
}

impl fmt::Debug for StaticDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl HandlerDirectory for StaticDirectory {
    fn lookup(&self, presenter: &str) -> Result<HandlerKind, DirectoryError> {
        validate_presenter_name(presenter)?;
        self.entries
            .get(presenter)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                presenter: presenter.to_string(),
                class: presenter_class(presenter),
            })
    }
}
