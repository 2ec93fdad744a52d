// Path: crates/validator/src/config.rs
//! Loading of the inspector configuration.

use std::path::Path;

// Re-export the config types from the central `types` crate so that callers
// only need this crate to build a session.
pub use vigil_types::config::{
    AnchorConfig, CommitteeConfig, ExplorerConfig, InspectorConfig, PollConfig, VotePolicy,
};
use vigil_types::error::CoreError;

/// Parses an `InspectorConfig` from TOML text. Missing fields take their defaults.
pub fn from_toml_str(text: &str) -> Result<InspectorConfig, CoreError> {
    toml::from_str(text).map_err(|e| CoreError::Config(e.to_string()))
}

/// Reads and parses an `InspectorConfig` from a TOML file.
pub fn load(path: &Path) -> Result<InspectorConfig, CoreError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
    let config = from_toml_str(&text)?;
    tracing::debug!(
        target: "config",
        path = %path.display(),
        vote_policy = ?config.vote_policy,
        council_members = config.poll.council_members.len(),
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "vote_policy = \"per_vote\"\n[anchor]\nipfs_gateway = \"gw.example/ipfs\""
        )
        .unwrap();
        let config = load(file.path()).unwrap();
        assert_eq!(config.vote_policy, VotePolicy::PerVote);
        assert_eq!(config.anchor.ipfs_gateway, "gw.example/ipfs");
        assert_eq!(config.anchor.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        assert!(matches!(
            from_toml_str("vote_policy = 3"),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            load(Path::new("/nonexistent/vigil.toml")),
            Err(CoreError::Config(_))
        ));
    }
}
