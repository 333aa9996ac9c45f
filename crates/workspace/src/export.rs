//! Export side-channel.
//!
//! Entities created during a session are tracked under a random UUID so downstream
//! tooling (and tracked references) can find them after ids change. The registry is
//! written as JSON next to a saved dataset; it plays no part in save correctness.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use genie_primitives::{EntityKind, Handle};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
	#[error("failed to access export file {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("malformed export json: {0}")]
	Json(#[from] serde_json::Error),
}

impl ExportError {
	fn io(path: &Path, source: std::io::Error) -> Self {
		Self::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}

/// One tracked entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
	pub name: String,
	pub id: i32,
	pub uuid: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_id: Option<i32>,
}

/// A recorded link between two entities, e.g. a tech pointing at its effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
	pub source: String,
	pub target: String,
	pub relation: String,
}

/// Session registry of created entities and their links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportRegistry {
	#[serde(skip_serializing_if = "Vec::is_empty")]
	units: Vec<ExportEntry>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	graphics: Vec<ExportEntry>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	sounds: Vec<ExportEntry>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	techs: Vec<ExportEntry>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	effects: Vec<ExportEntry>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	dependencies: Vec<Dependency>,
}

impl ExportRegistry {
	pub fn entries(&self, kind: EntityKind) -> &[ExportEntry] {
		match kind {
			EntityKind::Unit => &self.units,
			EntityKind::Graphic => &self.graphics,
			EntityKind::Sound => &self.sounds,
			EntityKind::Tech => &self.techs,
			EntityKind::Effect => &self.effects,
		}
	}

	fn entries_mut(&mut self, kind: EntityKind) -> &mut Vec<ExportEntry> {
		match kind {
			EntityKind::Unit => &mut self.units,
			EntityKind::Graphic => &mut self.graphics,
			EntityKind::Sound => &mut self.sounds,
			EntityKind::Tech => &mut self.techs,
			EntityKind::Effect => &mut self.effects,
		}
	}

	pub fn dependencies(&self) -> &[Dependency] {
		&self.dependencies
	}

	/// Tracks a created entity and returns its new UUID.
	pub fn track(&mut self, kind: EntityKind, name: &str, id: i32, base_id: Option<i32>) -> String {
		let uuid = Uuid::new_v4().to_string();
		self.entries_mut(kind).push(ExportEntry {
			name: name.to_string(),
			id,
			uuid: uuid.clone(),
			base_id,
		});
		uuid
	}

	/// Current id of a tracked entity of `kind`.
	pub fn id_for(&self, kind: EntityKind, uuid: &str) -> Option<i32> {
		self.entries(kind).iter().find(|entry| entry.uuid == uuid).map(|entry| entry.id)
	}

	/// Kind and current id of a tracked entity of any kind.
	pub fn get_id_by_uuid(&self, uuid: &str) -> Option<(EntityKind, i32)> {
		EntityKind::ALL
			.into_iter()
			.find_map(|kind| self.id_for(kind, uuid).map(|id| (kind, id)))
	}

	/// UUID of the most recently tracked entity at `id`.
	pub fn uuid_of(&self, kind: EntityKind, id: i32) -> Option<&str> {
		self.entries(kind)
			.iter()
			.rev()
			.find(|entry| entry.id == id)
			.map(|entry| entry.uuid.as_str())
	}

	/// Follows a move: entries and dependency ends at `src` now live at `dst`. With
	/// `swap`, those at `dst` move to `src`; otherwise the entity at `dst` was destroyed,
	/// so its entries and dependencies are retired and its UUIDs no longer resolve.
	pub fn relocate(&mut self, kind: EntityKind, src: i32, dst: i32, swap: bool) {
		let from = Handle::new(kind, src).to_string();
		let to = Handle::new(kind, dst).to_string();
		let mut retired = 0usize;
		if !swap {
			let entries = self.entries_mut(kind);
			let before = entries.len();
			entries.retain(|entry| entry.id != dst);
			retired = before - entries.len();
			self.dependencies
				.retain(|dependency| dependency.source != to && dependency.target != to);
		}

		let mut moved = 0usize;
		for entry in self.entries_mut(kind) {
			if entry.id == src {
				entry.id = dst;
				moved += 1;
			} else if swap && entry.id == dst {
				entry.id = src;
				moved += 1;
			}
		}
		for dependency in &mut self.dependencies {
			for end in [&mut dependency.source, &mut dependency.target] {
				if *end == from {
					end.clone_from(&to);
				} else if swap && *end == to {
					end.clone_from(&from);
				}
			}
		}
		if moved > 0 || retired > 0 {
			debug!(target: "genie::workspace", %kind, src, dst, moved, retired, "relocated export entries");
		}
	}

	/// Records that `source` refers to `target` through `relation`.
	pub fn link(&mut self, source: Handle, target: Handle, relation: &str) {
		let dependency = Dependency {
			source: source.to_string(),
			target: target.to_string(),
			relation: relation.to_string(),
		};
		if !self.dependencies.contains(&dependency) {
			self.dependencies.push(dependency);
		}
	}

	/// Names tracked under more than one id.
	pub fn duplicate_names(&self, kind: EntityKind) -> Vec<(String, Vec<i32>)> {
		let mut by_name: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
		for entry in self.entries(kind).iter().filter(|entry| !entry.name.is_empty()) {
			let ids = by_name.entry(entry.name.as_str()).or_default();
			if !ids.contains(&entry.id) {
				ids.push(entry.id);
			}
		}
		by_name
			.into_iter()
			.filter(|(_, ids)| ids.len() > 1)
			.map(|(name, ids)| (name.to_string(), ids))
			.collect()
	}

	pub fn is_empty(&self) -> bool {
		EntityKind::ALL.into_iter().all(|kind| self.entries(kind).is_empty()) && self.dependencies.is_empty()
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// Short human-readable count, e.g. `2 units, 1 graphics, 1 deps`.
	pub fn summary(&self) -> String {
		let mut out = String::new();
		for kind in EntityKind::ALL {
			let count = self.entries(kind).len();
			if count > 0 {
				let sep = if out.is_empty() { "" } else { ", " };
				let _ = write!(out, "{sep}{count} {}", kind.plural());
			}
		}
		if !self.dependencies.is_empty() {
			let sep = if out.is_empty() { "" } else { ", " };
			let _ = write!(out, "{sep}{} deps", self.dependencies.len());
		}
		if out.is_empty() {
			out.push_str("no items registered");
		}
		out
	}

	pub fn to_json(&self) -> Result<String, ExportError> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	pub fn from_json(source: &str) -> Result<Self, ExportError> {
		Ok(serde_json::from_str(source)?)
	}

	/// Writes the JSON through a temp file in the target directory, so a failed write
	/// leaves any previous export intact.
	pub fn write(&self, path: &Path) -> Result<(), ExportError> {
		let json = self.to_json()?;
		let dir = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
		staged
			.write_all(json.as_bytes())
			.map_err(|e| ExportError::io(staged.path(), e))?;
		staged.persist(path).map_err(|e| ExportError::io(path, e.error))?;

		debug!(target: "genie::workspace", path = %path.display(), summary = %self.summary(), "wrote exports");
		Ok(())
	}

	pub fn read(path: &Path) -> Result<Self, ExportError> {
		let json = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
		Self::from_json(&json)
	}
}
