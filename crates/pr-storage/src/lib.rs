//! pr-storage - Storage library for prompt-reviewer
//!
//! This crate provides the file system bucket store and the default paths
//! used by the CLI.

mod bucket_store;
mod paths;

pub use bucket_store::FileSystemStore;
pub use paths::{default_config_path, project_config_path, PROJECT_DIR};
