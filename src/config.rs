//! Server configuration: a single JSON file selected with `--config`.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Commands denied out of the box: everything granting interactive shell or
/// tunnel access to remote machines, plus the App Engine, Bare Metal and
/// AI product groups. Release-track expansion in the denylist covers the
/// alpha/beta/preview forms of each entry.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "compute start-iap-tunnel",
    "compute connect-to-serial-port",
    "compute tpus tpu-vm ssh",
    "compute tpus queued-resources ssh",
    "compute ssh",
    "cloud-shell ssh",
    "workstations ssh",
    "app instances ssh",
    "app",
    "alpha bms",
    "beta ai",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    run_gcloud_command: RunGcloudCommandConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunGcloudCommandConfig {
    #[serde(default)]
    allowlist: Vec<String>,
    #[serde(default)]
    denylist: Vec<String>,
}

impl Config {
    /// Load configuration from an absolute path. Relative paths are rejected
    /// so the server's behavior never depends on its working directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_absolute() {
            return Err(ConfigError::RelativePath(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }

    pub fn allowlist(&self) -> &[String] {
        &self.run_gcloud_command.allowlist
    }

    /// The built-in denylist merged with user entries. Defaults come first;
    /// user entries that duplicate a default are dropped.
    pub fn merged_denylist(&self) -> Vec<String> {
        let mut merged: Vec<String> =
            DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect();
        for entry in &self.run_gcloud_command.denylist {
            if !merged.contains(entry) {
                merged.push(entry.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_allowlist_and_denylist() {
        let file = write_config(
            r#"{"run_gcloud_command": {"allowlist": ["compute"], "denylist": ["sql"]}}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.allowlist(), ["compute".to_string()]);
        assert!(config.merged_denylist().contains(&"sql".to_string()));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert!(config.allowlist().is_empty());
        assert_eq!(config.merged_denylist().len(), DEFAULT_DENYLIST.len());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file = write_config(r#"{"run_gcloud_command": {}, "future": true}"#);
        assert!(Config::load(file.path()).is_ok());
    }

    #[test]
    fn relative_path_is_rejected() {
        let err = Config::load(Path::new("relative/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::RelativePath(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_, _)));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let file = write_config("not json");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_, _)));
    }

    #[test]
    fn default_denylist_blocks_product_groups_without_config() {
        use crate::policy::{AllowMatcher, CommandPolicy, DenyMatcher, PolicyDecision};

        let config = Config::default();
        let policy = CommandPolicy::new(
            AllowMatcher::new(config.allowlist()),
            DenyMatcher::new(config.merged_denylist()),
        );
        let deploy = vec!["app".to_string(), "deploy".to_string()];
        assert_eq!(policy.evaluate(&deploy), PolicyDecision::DeniedByDenylist);
        let bms = vec!["alpha".to_string(), "bms".to_string(), "list".to_string()];
        assert_eq!(policy.evaluate(&bms), PolicyDecision::DeniedByDenylist);
        let ai = vec!["beta".to_string(), "ai".to_string(), "models".to_string()];
        assert_eq!(policy.evaluate(&ai), PolicyDecision::DeniedByDenylist);
        // word boundary still holds for the broad "app" entry
        let apphub = vec!["apphub".to_string(), "list".to_string()];
        assert_eq!(policy.evaluate(&apphub), PolicyDecision::Allowed);
    }

    #[test]
    fn merged_denylist_keeps_defaults_first_and_dedupes() {
        let file = write_config(
            r#"{"run_gcloud_command": {"denylist": ["compute ssh", "sql connect"]}}"#,
        );
        let config = Config::load(file.path()).unwrap();
        let merged = config.merged_denylist();
        assert_eq!(merged[..DEFAULT_DENYLIST.len()], DEFAULT_DENYLIST
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()[..]);
        assert_eq!(merged.len(), DEFAULT_DENYLIST.len() + 1);
        assert_eq!(merged.last().map(String::as_str), Some("sql connect"));
    }
}
