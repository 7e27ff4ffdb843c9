//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to the knowledge table (or None if not found).
    pub knowledge: Option<PathBuf>,

    /// Path to the classifier settings (or None if not found).
    pub classifier: Option<PathBuf>,

    /// Source of the knowledge table (for diagnostics).
    pub knowledge_source: ConfigSource,

    /// Source of the classifier settings (for diagnostics).
    pub classifier_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in the explicit or XDG config directory.
    XdgConfig,

    /// Found in /etc/spamplan/.
    SystemConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::SystemConfig => write!(f, "system config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_KNOWLEDGE_PATH: &str = "SPAMPLAN_KNOWLEDGE";
pub const ENV_CLASSIFIER_PATH: &str = "SPAMPLAN_CLASSIFIER";
pub const ENV_CONFIG_DIR: &str = "SPAMPLAN_CONFIG_DIR";

/// Standard config file names, in lookup order.
const KNOWLEDGE_FILENAMES: [&str; 2] = ["knowledge.json", "knowledge.toml"];
const CLASSIFIER_FILENAMES: [&str; 2] = ["classifier.json", "classifier.toml"];

/// Application name for XDG directories.
const APP_NAME: &str = "spamplan";

/// Resolve configuration paths using the standard resolution order.
///
/// Resolution order for each config file:
/// 1. Explicit CLI path (if provided)
/// 2. Environment variable (SPAMPLAN_KNOWLEDGE, SPAMPLAN_CLASSIFIER)
/// 3. Explicit config directory, else SPAMPLAN_CONFIG_DIR, + filename
/// 4. XDG config directory (~/.config/spamplan/)
/// 5. System config (/etc/spamplan/)
/// 6. Built-in defaults (None)
pub fn resolve_config(
    config_dir: Option<&Path>,
    cli_knowledge: Option<&Path>,
    cli_classifier: Option<&Path>,
) -> ConfigPaths {
    let mut paths = ConfigPaths::default();

    paths.knowledge = resolve_single_config(
        config_dir,
        cli_knowledge,
        ENV_KNOWLEDGE_PATH,
        &KNOWLEDGE_FILENAMES,
        &mut paths.knowledge_source,
    );

    paths.classifier = resolve_single_config(
        config_dir,
        cli_classifier,
        ENV_CLASSIFIER_PATH,
        &CLASSIFIER_FILENAMES,
        &mut paths.classifier_source,
    );

    paths
}

/// Resolve a single configuration file path.
fn resolve_single_config(
    config_dir: Option<&Path>,
    cli_path: Option<&Path>,
    env_var: &str,
    filenames: &[&str],
    source: &mut ConfigSource,
) -> Option<PathBuf> {
    // 1. CLI argument (returned even if missing so the loader reports it)
    if let Some(path) = cli_path {
        *source = ConfigSource::CliArgument;
        return Some(path.to_path_buf());
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(env_var) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            *source = ConfigSource::Environment;
            return Some(path);
        }
    }

    // 3. Config directory (explicit, then environment)
    let dir = config_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(ENV_CONFIG_DIR).ok().map(PathBuf::from));
    if let Some(dir) = dir {
        // An explicit directory is authoritative: no fallback to XDG/system.
        if let Some(path) = find_in_dir(&dir, filenames) {
            *source = if config_dir.is_some() {
                ConfigSource::CliArgument
            } else {
                ConfigSource::Environment
            };
            return Some(path);
        }
        *source = ConfigSource::BuiltinDefault;
        return None;
    }

    // 4. XDG config directory
    if let Some(xdg_config) = xdg_config_dir() {
        if let Some(path) = find_in_dir(&xdg_config, filenames) {
            *source = ConfigSource::XdgConfig;
            return Some(path);
        }
    }

    // 5. System config
    if let Some(path) = find_in_dir(&system_config_dir(), filenames) {
        *source = ConfigSource::SystemConfig;
        return Some(path);
    }

    // 6. Built-in default (None)
    *source = ConfigSource::BuiltinDefault;
    None
}

fn find_in_dir(dir: &Path, filenames: &[&str]) -> Option<PathBuf> {
    filenames
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Get the XDG config directory for spamplan.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(format!("{}", ConfigSource::SystemConfig), "system config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_empty_config_dir_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let paths = resolve_config(Some(dir.path()), None, None);
        assert!(paths.knowledge.is_none());
        assert!(paths.classifier.is_none());
        assert_eq!(paths.knowledge_source, ConfigSource::BuiltinDefault);
        assert_eq!(paths.classifier_source, ConfigSource::BuiltinDefault);
    }

    #[test]
    fn test_config_dir_finds_toml_variant() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("classifier.toml"), "").unwrap();
        let paths = resolve_config(Some(dir.path()), None, None);
        assert_eq!(paths.classifier, Some(dir.path().join("classifier.toml")));
        assert_eq!(paths.classifier_source, ConfigSource::CliArgument);
        assert!(paths.knowledge.is_none());
    }

    #[test]
    fn test_cli_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.json");
        let paths = resolve_config(Some(dir.path()), Some(&explicit), None);
        assert_eq!(paths.knowledge, Some(explicit));
        assert_eq!(paths.knowledge_source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_system_config_dir() {
        assert_eq!(system_config_dir(), PathBuf::from("/etc/spamplan"));
    }
}
