//! Session configuration.
//!
//! Every key is optional; a missing file section keeps the defaults below.
//!
//! ```toml
//! on_conflict = "error"        # error | overwrite
//! on_move_conflict = "swap"    # error | overwrite | swap
//! fill_gaps = "placeholder"    # error | placeholder
//! validate_on_save = true
//! strict_integrity = false
//! export_path = "genie_edits.json"
//! ```

use std::path::{Path, PathBuf};

use genie_primitives::{ConflictPolicy, GapPolicy, MovePolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config{}: {source}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
	Parse {
		path: Option<PathBuf>,
		#[source]
		source: toml::de::Error,
	},
}

/// Defaults and switches for one editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
	/// Policy used by create, clone and paste when none is given.
	pub on_conflict: ConflictPolicy,
	/// Policy used by move when none is given.
	pub on_move_conflict: MovePolicy,
	/// Gap policy used when none is given.
	pub fill_gaps: GapPolicy,
	/// When false, `save` skips the deferred reference pass and the chain and
	/// duplicate-name checks.
	pub validate_on_save: bool,
	/// When true, `save` also refuses datasets with structural problems or dangling ids.
	pub strict_integrity: bool,
	/// Where a successful save also writes the export JSON.
	pub export_path: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
	fn default() -> Self {
		Self {
			on_conflict: ConflictPolicy::Error,
			on_move_conflict: MovePolicy::Error,
			fill_gaps: GapPolicy::Placeholder,
			validate_on_save: true,
			strict_integrity: false,
			export_path: None,
		}
	}
}

impl WorkspaceConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		toml::from_str(source).map_err(|source| ConfigError::Parse { path: None, source })
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		toml::from_str(&content).map_err(|source| ConfigError::Parse {
			path: Some(path.to_path_buf()),
			source,
		})
	}
}
