//! Library error taxonomy.

use thiserror::Error;

/// Errors loading the `--config` JSON file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config path must be absolute: {0}")]
    RelativePath(String),

    #[error("failed to read config file {0}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse config file {0}")]
    Parse(String, #[source] serde_json::Error),
}

/// Errors from the Google Cloud REST clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation}: failed to obtain access token")]
    Auth {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("{operation}: request failed")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: server returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Errors from `init` scaffolding.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("unsupported agent: {0} (supported: gemini-cli)")]
    UnknownAgent(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_message_names_the_path() {
        let err = ConfigError::RelativePath("foo/bar.json".into());
        assert!(err.to_string().contains("foo/bar.json"));
    }

    #[test]
    fn unknown_agent_message_lists_supported_agents() {
        let err = InstallError::UnknownAgent("claude".into());
        assert!(err.to_string().contains("gemini-cli"));
    }
}
