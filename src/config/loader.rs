use anyhow::Context;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::LinkConfig;
use crate::errors::Error;

/// Name of the configuration file searched for in ancestor directories
pub const CONFIG_FILE_NAME: &str = ".linkgen.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<LinkConfig, Error> {
    let config = toml::from_str::<LinkConfig>(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a specific configuration file.
pub fn load_config_from_path(path: &Path) -> anyhow::Result<LinkConfig> {
    let contents = read_config_file(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_and_validate_config(&contents)
        .map_err(|e| match e {
            Error::Configuration {
                message,
                path: None,
            } => Error::configuration_at(message, path),
            other => other,
        })
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Try loading config from a specific path, logging anything but a missing file
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<LinkConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a configuration file.
pub fn load_config_from(start: &Path) -> LinkConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LinkConfig::default()
        })
}

/// Search the working directory and its ancestors for a configuration file.
pub fn load_config() -> LinkConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            LinkConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_ancestors_stop_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_directory_ancestors_end_at_root() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a"), 10).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[test]
    fn test_parse_rejects_bad_conventions() {
        let err = parse_and_validate_config("[conventions]\naction_key = \"do-it\"\n").unwrap_err();
        assert!(err.to_string().contains("conventions.action_key"));
    }

    #[test]
    fn test_explicit_path_error_records_path_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[conventions]\ndefault_action = \"\"\n").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        let message = format!("{err:#}");
        assert_eq!(message.matches("Configuration error").count(), 1);

        match err.downcast_ref::<Error>() {
            Some(Error::Configuration { path: found, .. }) => {
                assert_eq!(found.as_deref(), Some(path.as_path()))
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_toml_types() {
        assert!(matches!(
            parse_and_validate_config("presenters = 3"),
            Err(Error::Toml(_))
        ));
    }
}
