use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::binding::signature::{HandlerSignature, ParameterSpec};
use crate::errors::{Error, ResultExt};
use crate::link::directory::{validate_presenter_name, PresenterSignatures, StaticDirectory};
use crate::link::router::{normalize_base_path, RefUrl};

/// Root configuration structure for linkgen
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LinkConfig {
    /// Default action and reserved action key
    #[serde(default)]
    pub conventions: Option<Conventions>,

    /// Reference URL links are generated against
    #[serde(default)]
    pub ref_url: Option<RefUrl>,

    /// Statically declared presenters
    #[serde(default)]
    pub presenters: Vec<PresenterConfig>,
}

/// Naming conventions shared by every link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conventions {
    /// Action used when a destination names none
    #[serde(default = "default_action")]
    pub default_action: String,

    /// Parameter key the action is transmitted under
    #[serde(default = "default_action_key")]
    pub action_key: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            default_action: default_action(),
            action_key: default_action_key(),
        }
    }
}

pub fn default_action() -> String {
    "default".to_string()
}

pub fn default_action_key() -> String {
    "action".to_string()
}

/// One presenter entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresenterConfig {
    pub name: String,

    /// Handler name for diagnostics; derived from `name` when absent
    #[serde(default)]
    pub class: Option<String>,

    /// Known target that is not bound against
    #[serde(default)]
    pub opaque: bool,

    #[serde(default)]
    pub members: Vec<MemberConfig>,
}

/// One presenter member and its parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberConfig {
    /// Full member name, e.g. `actionShow` or `renderDefault`
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl LinkConfig {
    pub fn conventions(&self) -> Conventions {
        self.conventions.clone().unwrap_or_default()
    }

    /// Reference URL with a normalized base path.
    pub fn ref_url(&self) -> RefUrl {
        let mut url = self.ref_url.clone().unwrap_or_default();
        url.base_path = normalize_base_path(&url.base_path);
        url
    }

    /// Check conventions and presenter declarations.
    pub fn validate(&self) -> Result<(), Error> {
        let conventions = self.conventions();
        for (field, value) in [
            ("default_action", &conventions.default_action),
            ("action_key", &conventions.action_key),
        ] {
            if !is_word(value) {
                return Err(Error::configuration(format!(
                    "conventions.{field} must be a non-empty word, got '{value}'"
                )));
            }
        }

        let mut seen = HashSet::new();
        for presenter in &self.presenters {
            validate_presenter_name(&presenter.name)
                .map_err(|e| Error::configuration(e.to_string()))?;
            if !seen.insert(presenter.name.as_str()) {
                return Err(Error::configuration(format!(
                    "presenter '{}' is declared twice",
                    presenter.name
                )));
            }
            if presenter.opaque && !presenter.members.is_empty() {
                return Err(Error::configuration(format!(
                    "opaque presenter '{}' cannot declare members",
                    presenter.name
                )));
            }
            for member in &presenter.members {
                if !is_word(&member.name) {
                    return Err(Error::configuration(format!(
                        "presenter '{}' has invalid member name '{}'",
                        presenter.name, member.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Registry of the declared presenters.
    pub fn build_directory(&self) -> Result<StaticDirectory, Error> {
        self.validate()?;
        let mut directory = StaticDirectory::new();
        for presenter in &self.presenters {
            if presenter.opaque {
                directory = directory.with_opaque(&presenter.name);
                continue;
            }
            let mut signatures = match &presenter.class {
                Some(class) => PresenterSignatures::with_class(class.as_str()),
                None => PresenterSignatures::new(&presenter.name),
            };
            for member in &presenter.members {
                let signature = HandlerSignature::new(member.parameters.clone())
                    .context(format!("{}::{}", presenter.name, member.name))?;
                signatures = signatures.member(&member.name, signature);
            }
            directory = directory.with_presenter(&presenter.name, signatures);
        }
        Ok(directory)
    }
}

fn is_word(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
