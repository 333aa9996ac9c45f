use std::path::Path;

use genie_dataset::{DatCodec, Dataset, FieldDef, FieldError, FieldKind, PostcardCodec, Record};
use genie_primitives::{ConflictPolicy, EntityKind, FieldValue, GapPolicy, Groups, Handle, MovePolicy, Origin, RefValue};
use genie_tables::{CloneSpec, CreateSpec, TableError};
use tracing::{debug, error, info, warn};

use crate::clipboard::Clipboard;
use crate::config::WorkspaceConfig;
use crate::error::{Error, Result};
use crate::export::ExportRegistry;
use crate::integrity::{self, IntegrityReport};
use crate::refs::{ReferenceLog, ValidationError, Validator};

/// One editing session over a loaded dataset.
///
/// Owns everything that must not outlive the dataset it describes: the pending
/// reference log, the clipboard and the export registry.
#[derive(Debug)]
pub struct Workspace<C: DatCodec = PostcardCodec> {
	dataset: Dataset,
	refs: ReferenceLog,
	exports: ExportRegistry,
	clipboard: Option<Clipboard>,
	config: WorkspaceConfig,
	codec: C,
}

impl Workspace {
	/// Wraps an in-memory dataset with default settings.
	pub fn new(dataset: Dataset) -> Self {
		Self::with_codec(dataset, PostcardCodec)
	}

	/// Loads a dataset written by [`PostcardCodec`].
	pub fn open(path: &Path, config: WorkspaceConfig) -> Result<Self> {
		Self::open_with(PostcardCodec, path, config)
	}
}

impl<C: DatCodec> Workspace<C> {
	pub fn with_codec(dataset: Dataset, codec: C) -> Self {
		Self {
			dataset,
			refs: ReferenceLog::default(),
			exports: ExportRegistry::default(),
			clipboard: None,
			config: WorkspaceConfig::default(),
			codec,
		}
	}

	pub fn open_with(codec: C, path: &Path, config: WorkspaceConfig) -> Result<Self> {
		let dataset = codec.load(path)?;
		info!(target: "genie::workspace", path = %path.display(), civs = dataset.civ_count(), "opened dataset");
		Ok(Self::with_codec(dataset, codec).with_config(config))
	}

	pub fn with_config(mut self, config: WorkspaceConfig) -> Self {
		self.config = config;
		self
	}

	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	/// Direct access to the tables. Edits made here bypass the reference log.
	pub fn dataset_mut(&mut self) -> &mut Dataset {
		&mut self.dataset
	}

	pub fn refs(&self) -> &ReferenceLog {
		&self.refs
	}

	pub fn exports(&self) -> &ExportRegistry {
		&self.exports
	}

	pub fn config(&self) -> &WorkspaceConfig {
		&self.config
	}

	pub fn codec(&self) -> &C {
		&self.codec
	}

	/// A create request carrying this session's default policies.
	pub fn create_spec(&self, name: impl Into<String>) -> CreateSpec {
		CreateSpec::new(name)
			.on_conflict(self.config.on_conflict)
			.gaps(self.config.fill_gaps)
	}

	/// A clone request carrying this session's default policies.
	pub fn clone_spec(&self, source: i32) -> CloneSpec {
		CloneSpec::new(source)
			.on_conflict(self.config.on_conflict)
			.gaps(self.config.fill_gaps)
	}

	/// Creates a record and tracks it in the export registry.
	pub fn create<R: Record>(&mut self, spec: CreateSpec) -> Result<i32> {
		let name = spec.name.clone();
		let template = spec.template;
		let id = self.dataset.tables_mut::<R>().create(spec)?;
		self.exports.track(R::KIND, &name, id, template);
		info!(target: "genie::workspace", kind = %R::KIND, id, %name, outcome = "success", "created");
		Ok(id)
	}

	/// Clones a record and tracks the copy in the export registry.
	pub fn clone_entity<R: Record>(&mut self, spec: CloneSpec) -> Result<i32> {
		let source = spec.source;
		let id = self.dataset.tables_mut::<R>().clone_entity(spec)?;
		let name = self.real_name::<R>(id).unwrap_or_default();
		self.exports.track(R::KIND, &name, id, Some(source));
		info!(target: "genie::workspace", kind = %R::KIND, source, id, outcome = "success", "cloned");
		Ok(id)
	}

	/// Moves a record using the configured move and gap policies.
	pub fn move_entity<R: Record>(&mut self, src: i32, dst: i32) -> Result<()> {
		self.move_entity_with::<R>(src, dst, self.config.on_move_conflict, self.config.fill_gaps)
	}

	pub fn move_entity_with<R: Record>(&mut self, src: i32, dst: i32, policy: MovePolicy, gaps: GapPolicy) -> Result<()> {
		self.dataset.tables_mut::<R>().move_entity(src, dst, policy, gaps)?;
		if src != dst {
			self.exports.relocate(R::KIND, src, dst, policy == MovePolicy::Swap);
		}
		info!(target: "genie::workspace", kind = %R::KIND, src, dst, ?policy, outcome = "success", "moved");
		Ok(())
	}

	/// Replaces the record at `id` with a placeholder in the selected groups.
	pub fn delete<R: Record>(&mut self, id: i32, groups: &Groups) -> Result<bool> {
		let had_record = self.dataset.tables_mut::<R>().delete(id, groups)?;
		info!(target: "genie::workspace", kind = %R::KIND, id, had_record, outcome = "success", "deleted");
		Ok(had_record)
	}

	pub fn get<R: Record>(&self, id: i32, group: usize) -> Option<&R> {
		self.dataset.tables::<R>().get(id, group)
	}

	pub fn exists(&self, kind: EntityKind, id: i32) -> bool {
		self.dataset.exists(kind, id)
	}

	pub fn exists_raw(&self, kind: EntityKind, id: i32) -> bool {
		self.dataset.exists_raw(kind, id)
	}

	pub fn count(&self, kind: EntityKind) -> usize {
		self.dataset.count(kind)
	}

	/// Writes `value` to the named field of every real record at `id` in `groups`.
	///
	/// Enumeration and range checks fail here. Reference fields are written as given
	/// and their target is only checked by the next validation pass. Returns the number
	/// of records written.
	#[track_caller]
	pub fn set_field<R: Record>(&mut self, id: i32, groups: &Groups, name: &str, value: impl Into<FieldValue>) -> Result<usize> {
		let origin = Origin::caller();
		let def = R::field(R::KIND, name)?;
		let value = value.into();
		if let FieldKind::Reference(target) = def.kind
			&& let Some(raw) = value.as_int().and_then(|raw| i32::try_from(raw).ok())
		{
			return self.assign_reference(id, groups, def, target, RefValue::Id(raw), origin);
		}
		self.write_field(id, groups, def, &value)
	}

	/// Assigns a reference field from a raw id, a typed handle or a tracked UUID.
	#[track_caller]
	pub fn set_reference<R: Record>(&mut self, id: i32, groups: &Groups, name: &str, value: impl Into<RefValue>) -> Result<usize> {
		let origin = Origin::caller();
		self.set_reference_from::<R>(id, groups, name, value.into(), origin)
	}

	/// Like [`Workspace::set_reference`], tagging the recorded origin with `label`.
	#[track_caller]
	pub fn set_reference_labeled<R: Record>(
		&mut self,
		id: i32,
		groups: &Groups,
		name: &str,
		value: impl Into<RefValue>,
		label: &'static str,
	) -> Result<usize> {
		let origin = Origin::labeled(label);
		self.set_reference_from::<R>(id, groups, name, value.into(), origin)
	}

	fn set_reference_from<R: Record>(&mut self, id: i32, groups: &Groups, name: &str, value: RefValue, origin: Origin) -> Result<usize> {
		let def = R::field(R::KIND, name)?;
		let FieldKind::Reference(target) = def.kind else {
			return Err(FieldError::TypeMismatch {
				field: def.name,
				expected: "plain value",
				found: "reference",
			}
			.into());
		};
		self.assign_reference(id, groups, def, target, value, origin)
	}

	fn assign_reference<R: Record>(
		&mut self,
		id: i32,
		groups: &Groups,
		def: &'static FieldDef<R>,
		target: EntityKind,
		value: RefValue,
		origin: Origin,
	) -> Result<usize> {
		let stored = match &value {
			RefValue::Id(raw) => *raw,
			RefValue::Handle(handle) if handle.kind != target => {
				return Err(FieldError::HandleKindMismatch {
					field: def.name.to_string(),
					expected: target,
					found: handle.kind,
				}
				.into());
			}
			RefValue::Handle(handle) => handle.id,
			RefValue::Tracked(uuid) => self.exports.id_for(target, uuid).unwrap_or(-1),
		};
		let written = self.write_field(id, groups, def, &FieldValue::Int(stored.into()))?;
		self.refs.add_deferred(target, value, def.name, origin)?;
		if stored >= 0 && self.exports.uuid_of(R::KIND, id).is_some() {
			self.exports.link(Handle::new(R::KIND, id), Handle::new(target, stored), def.name);
		}
		Ok(written)
	}

	/// Checks every target before writing any, so a missing component leaves all
	/// records untouched.
	fn write_field<R: Record>(&mut self, id: i32, groups: &Groups, def: &'static FieldDef<R>, value: &FieldValue) -> Result<usize> {
		let tables = self.dataset.tables_mut::<R>();
		let mut targets = 0usize;
		for record in tables.records_mut(id, groups) {
			def.read(record)?;
			targets += 1;
		}
		if targets == 0 {
			return Err(FieldError::NoRecord { kind: R::KIND, id }.into());
		}
		for record in tables.records_mut(id, groups) {
			def.write(record, value)?;
		}
		debug!(target: "genie::workspace", kind = %R::KIND, id, field = def.name, %value, records = targets, "set field");
		Ok(targets)
	}

	/// Reads the named field of the real record at `id` in `group`.
	pub fn get_field<R: Record>(&self, id: i32, group: usize, name: &str) -> Result<FieldValue> {
		let def = R::field(R::KIND, name)?;
		let record = self
			.dataset
			.tables::<R>()
			.get(id, group)
			.filter(|record| !record.is_placeholder())
			.ok_or(FieldError::NoRecord { kind: R::KIND, id })?;
		Ok(def.read(record)?)
	}

	/// Stores every group's record at `id` for a later [`Workspace::paste`].
	pub fn copy<R: Record>(&mut self, id: i32) -> Result<()> {
		let tables = self.dataset.tables::<R>();
		if !tables.exists(id) {
			return Err(TableError::InvalidId {
				kind: R::KIND,
				id: id.into(),
				role: "source",
				reason: "no record exists at this id",
			}
			.into());
		}
		self.clipboard = Some(Clipboard::new(id, tables.snapshot_records(id)));
		debug!(target: "genie::workspace", kind = %R::KIND, id, "copied");
		Ok(())
	}

	/// Writes the clipboard to `dest`, or appends when `dest` is `None`.
	pub fn paste<R: Record>(&mut self, dest: Option<i32>, conflict: ConflictPolicy, gaps: GapPolicy) -> Result<i32> {
		let clipboard = self.clipboard.as_ref().ok_or(Error::ClipboardEmpty)?;
		let records = clipboard.records::<R>().ok_or(Error::ClipboardKind {
			expected: R::KIND,
			found: clipboard.kind(),
		})?;
		let source = clipboard.source_id();
		let id = self.dataset.tables_mut::<R>().place_records(dest, records, conflict, gaps)?;
		let name = self.real_name::<R>(id).unwrap_or_default();
		self.exports.track(R::KIND, &name, id, Some(source));
		info!(target: "genie::workspace", kind = %R::KIND, source, id, outcome = "success", "pasted");
		Ok(id)
	}

	pub fn clear_clipboard(&mut self) {
		self.clipboard = None;
	}

	pub fn clipboard(&self) -> Option<&Clipboard> {
		self.clipboard.as_ref()
	}

	/// A reference value that follows the record tracked at `id` through later moves.
	pub fn tracked_ref(&self, kind: EntityKind, id: i32) -> Option<RefValue> {
		self.exports.uuid_of(kind, id).map(|uuid| RefValue::Tracked(uuid.to_string()))
	}

	/// Drops every pending reference without checking it.
	pub fn discard_pending_references(&mut self) {
		debug!(target: "genie::refs", discarded = self.refs.len(), "discarded pending references");
		self.refs.clear();
	}

	/// Checks every pending reference against the current dataset and clears the log.
	pub fn validate_references(&mut self) -> Result<(), ValidationError> {
		let failures = Validator::new(&self.dataset, &self.exports).validate_all(&mut self.refs);
		if failures.is_empty() {
			return Ok(());
		}
		for failure in &failures {
			error!(
				target: "genie::refs",
				kind = %failure.kind,
				value = %failure.value,
				field = %failure.field,
				origin = %failure.origin,
				"{failure}"
			);
		}
		Err(ValidationError { failures })
	}

	pub fn check_integrity(&self) -> IntegrityReport {
		integrity::check(&self.dataset, &self.exports)
	}

	/// Validates pending references and checks for looping unit chains and duplicate
	/// export names, then writes the dataset to `path`.
	///
	/// Nothing is written when any of these fail. With `strict_integrity` the structural
	/// checks must pass as well; with `validate_on_save` off only those run.
	pub fn save(&mut self, path: &Path) -> Result<()> {
		if self.config.validate_on_save {
			self.validate_references()?;
		}
		let report = match (self.config.strict_integrity, self.config.validate_on_save) {
			(true, true) => self.check_integrity(),
			(true, false) => integrity::check_structure(&self.dataset),
			(false, true) => integrity::check_on_save(&self.dataset, &self.exports),
			(false, false) => IntegrityReport::default(),
		};
		if !report.is_clean() {
			warn!(target: "genie::workspace", path = %path.display(), issues = report.len(), "integrity check failed");
			return Err(Error::Integrity(report));
		}
		self.write_dataset(path)
	}

	/// Writes the dataset without running the reference pass or any integrity check.
	pub fn save_unchecked(&mut self, path: &Path) -> Result<()> {
		self.write_dataset(path)
	}

	/// The export JSON is best effort: once the dataset is on disk a failed export
	/// write is logged and the save still succeeds.
	fn write_dataset(&self, path: &Path) -> Result<()> {
		self.codec.write(&self.dataset, path)?;
		if let Some(export_path) = &self.config.export_path {
			if let Err(err) = self.exports.write(export_path) {
				warn!(target: "genie::workspace", path = %export_path.display(), error = %err, "export write failed");
			}
		}
		info!(target: "genie::workspace", path = %path.display(), exports = %self.exports.summary(), outcome = "success", "saved");
		Ok(())
	}

	fn real_name<R: Record>(&self, id: i32) -> Option<String> {
		let tables = self.dataset.tables::<R>();
		(0..tables.group_count())
			.filter_map(|group| tables.get(id, group))
			.find(|record| !record.is_placeholder())
			.map(|record| record.name().to_string())
	}
}
