//! Default locations

use std::path::PathBuf;

/// Project-local directory holding configuration
pub const PROJECT_DIR: &str = ".prompt-reviewer";

/// Project-local configuration file (`./.prompt-reviewer/config.toml`)
pub fn project_config_path() -> PathBuf {
    PathBuf::from(PROJECT_DIR).join("config.toml")
}

/// Configuration file to use when none is given on the command line.
///
/// Prefers the project-local file when it exists, then the platform config
/// directory, then `~/.prompt-reviewer/config.toml`.
pub fn default_config_path() -> PathBuf {
    let local = project_config_path();
    if local.exists() {
        return local;
    }

    directories::ProjectDirs::from("com", "prompt-reviewer", "prompt-reviewer")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(PROJECT_DIR)
                .join("config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_config_path() {
        let path = project_config_path();
        assert!(path.starts_with(PROJECT_DIR));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
