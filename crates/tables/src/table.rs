use genie_primitives::{ConflictPolicy, GapPolicy, Groups, MovePolicy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alloc::{allocate_next, validate_positive};
use crate::entity::{Entity, Placeholders, index_to_id};
use crate::error::TableError;
use crate::spec::{CloneSpec, CreateSpec};

/// One table position: a record (real or placeholder), or `None` in data loaded from a
/// file that already had null slots.
pub type Slot<R> = Option<R>;

/// Every group's table for one entity kind.
///
/// Group 0 is the representative group: its length is the append position used by the
/// allocator. Placement operations grow every group together; only explicitly
/// restricted writes leave some groups with placeholders where others hold records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTables<R> {
	groups: Vec<Vec<Slot<R>>>,
}

impl<R: Entity> Default for EntityTables<R> {
	fn default() -> Self {
		Self::new(1)
	}
}

impl<R: Entity> EntityTables<R> {
	/// Creates `group_count` empty groups.
	pub fn new(group_count: usize) -> Self {
		Self {
			groups: (0..group_count).map(|_| Vec::new()).collect(),
		}
	}

	/// Wraps tables as they were loaded, null slots included.
	pub fn from_groups(groups: Vec<Vec<Slot<R>>>) -> Self {
		Self { groups }
	}

	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	/// Returns one group's slots.
	pub fn group(&self, group: usize) -> Option<&[Slot<R>]> {
		self.groups.get(group).map(Vec::as_slice)
	}

	/// Iterates every group's slots in group order.
	pub fn groups(&self) -> impl Iterator<Item = &[Slot<R>]> {
		self.groups.iter().map(Vec::as_slice)
	}

	/// Number of slots in the representative group.
	pub fn count(&self) -> usize {
		self.groups.first().map_or(0, Vec::len)
	}

	/// Number of identifiers holding a real record in at least one group.
	pub fn count_active(&self) -> usize {
		let longest = self.groups.iter().map(Vec::len).max().unwrap_or(0);
		(0..longest).filter(|&index| self.real_at(index).is_some()).count()
	}

	/// Returns the slot content at `id` in `group`, placeholders included.
	pub fn get(&self, id: i32, group: usize) -> Option<&R> {
		let index = usize::try_from(id).ok()?;
		self.groups.get(group)?.get(index)?.as_ref()
	}

	pub fn get_mut(&mut self, id: i32, group: usize) -> Option<&mut R> {
		let index = usize::try_from(id).ok()?;
		self.groups.get_mut(group)?.get_mut(index)?.as_mut()
	}

	/// True only for a real record at a valid index in at least one group.
	pub fn exists(&self, id: i32) -> bool {
		usize::try_from(id).is_ok_and(|index| self.real_at(index).is_some())
	}

	/// True for any non-empty slot in at least one group, placeholder or not.
	pub fn exists_raw(&self, id: i32) -> bool {
		let Ok(index) = usize::try_from(id) else {
			return false;
		};
		self.groups
			.iter()
			.any(|group| group.get(index).is_some_and(Option::is_some))
	}

	/// Fingerprint classification; see [`Entity::is_placeholder`].
	pub fn is_placeholder(record: &R) -> bool {
		record.is_placeholder()
	}

	/// First real record with `name` in `group`.
	pub fn find_by_name(&self, name: &str, group: usize) -> Option<i32> {
		self.iter_real(group)
			.find(|(_, record)| record.name() == name)
			.map(|(id, _)| id)
	}

	/// First real record in any group, scanning group by group.
	pub fn first_real(&self) -> Option<&R> {
		self.groups
			.iter()
			.flat_map(|group| group.iter().flatten())
			.find(|record| !record.is_placeholder())
	}

	/// Highest identifier holding a real record in any group.
	pub fn max_real_id(&self) -> Option<i32> {
		self.groups
			.iter()
			.filter_map(|group| group.iter().rposition(|slot| is_real(slot.as_ref())))
			.max()
			.map(index_to_id)
	}

	/// Real records of `group` with their identifiers.
	pub fn iter_real(&self, group: usize) -> impl Iterator<Item = (i32, &R)> {
		self.groups
			.get(group)
			.into_iter()
			.flat_map(|slots| slots.iter().enumerate())
			.filter_map(|(index, slot)| {
				slot.as_ref()
					.filter(|record| !record.is_placeholder())
					.map(|record| (index_to_id(index), record))
			})
	}

	/// Real records at `id` within the selected groups.
	pub fn records_mut<'a>(&'a mut self, id: i32, groups: &'a Groups) -> impl Iterator<Item = &'a mut R> + 'a {
		let index = usize::try_from(id).ok();
		self.groups
			.iter_mut()
			.enumerate()
			.filter(move |(group, _)| groups.contains(*group))
			.filter_map(move |(_, slots)| slots.get_mut(index?)?.as_mut())
			.filter(|record| !record.is_placeholder())
	}

	/// Builds a placeholder factory from the first real record, else the kind's blank.
	pub fn placeholder_factory(&self) -> Option<Placeholders<R>> {
		self.first_real()
			.cloned()
			.or_else(R::blank)
			.map(Placeholders::from_template)
	}

	/// True if any selected group is too short to address `required`.
	pub fn needs_extension(&self, required: usize, groups: &Groups) -> bool {
		self.selected(groups).any(|slots| slots.len() <= required)
	}

	/// Extends every selected group until its length exceeds `required`.
	///
	/// Each new position receives its own placeholder whose self-id is its position.
	/// Returns the number of slots inserted across all groups.
	pub fn ensure_capacity(&mut self, required: usize, groups: &Groups, gaps: GapPolicy) -> Result<usize, TableError> {
		if !self.needs_extension(required, groups) {
			return Ok(0);
		}
		if gaps == GapPolicy::Error {
			return Err(self.gap_error(required));
		}
		let factory = self.placeholder_factory().ok_or(TableError::TemplateNotFound {
			kind: R::KIND,
			template: None,
		})?;
		Ok(self.extend_with(required, groups, &factory))
	}

	/// Creates a record from a template and returns its identifier.
	///
	/// Capacity is grown in every group; only the groups in `spec.groups` receive the
	/// record, the others hold a placeholder at the new position.
	pub fn create(&mut self, spec: CreateSpec) -> Result<i32, TableError> {
		let id = self.resolve_dest(spec.id)?;
		let index = validate_positive(R::KIND, id, "destination")?;
		self.check_gap(index, spec.gaps)?;
		self.check_conflict(id, spec.conflict)?;

		let mut template = match spec.template {
			Some(template_id) => self.real_record(template_id).cloned().ok_or(TableError::TemplateNotFound {
				kind: R::KIND,
				template: Some(template_id),
			})?,
			None => self.first_real().cloned().or_else(R::blank).ok_or(TableError::TemplateNotFound {
				kind: R::KIND,
				template: None,
			})?,
		};
		let factory = Placeholders::from_template(template.clone());

		template.set_id(id);
		template.set_name(&spec.name);
		template.set_enabled(true);

		self.extend_with(index, &Groups::All, &factory);
		for group in spec.groups.indices(self.groups.len()) {
			self.groups[group][index] = Some(template.clone());
		}

		debug!(target: "genie::tables", kind = %R::KIND, id, name = %spec.name, "created");
		Ok(id)
	}

	/// Copies the record at `spec.source` to a new or explicit identifier.
	///
	/// A group holding its own real record at the source copies that record; other
	/// groups copy the first real source record found across groups.
	pub fn clone_entity(&mut self, spec: CloneSpec) -> Result<i32, TableError> {
		validate_positive(R::KIND, spec.source, "source")?;
		let fallback = self
			.real_record(spec.source)
			.cloned()
			.ok_or(TableError::TemplateNotFound {
				kind: R::KIND,
				template: Some(spec.source),
			})?;
		let id = self.resolve_dest(spec.dest)?;
		let index = validate_positive(R::KIND, id, "destination")?;
		self.check_gap(index, spec.gaps)?;
		self.check_conflict(id, spec.conflict)?;

		let factory = Placeholders::from_template(fallback.clone());
		let sources: Vec<R> = spec
			.groups
			.indices(self.groups.len())
			.map(|group| {
				self.get(spec.source, group)
					.filter(|record| !record.is_placeholder())
					.unwrap_or(&fallback)
					.clone()
			})
			.collect();

		self.extend_with(index, &Groups::All, &factory);
		for (group, mut record) in spec.groups.indices(self.groups.len()).zip(sources) {
			record.set_id(id);
			if let Some(name) = &spec.name {
				record.set_name(name);
			}
			record.set_enabled(true);
			self.groups[group][index] = Some(record);
		}

		debug!(target: "genie::tables", kind = %R::KIND, source = spec.source, id, "cloned");
		Ok(id)
	}

	/// Relocates the record at `src` to `dst` in every group.
	///
	/// Under [`MovePolicy::Overwrite`] (and [`MovePolicy::Error`] once the destination is
	/// known to be free) the source slot receives a fresh placeholder; under
	/// [`MovePolicy::Swap`] both slots exchange records and self-ids. A group with no
	/// source slot still gets a placeholder at `dst` if that slot was empty.
	pub fn move_entity(&mut self, src: i32, dst: i32, policy: MovePolicy, gaps: GapPolicy) -> Result<(), TableError> {
		let src_index = validate_positive(R::KIND, src, "source")?;
		let dst_index = validate_positive(R::KIND, dst, "destination")?;
		if !self.exists(src) {
			return Err(TableError::InvalidId {
				kind: R::KIND,
				id: src.into(),
				role: "source",
				reason: "no record exists at this id",
			});
		}
		if src == dst {
			return Ok(());
		}
		self.check_gap(dst_index, gaps)?;
		if policy == MovePolicy::Error && self.exists(dst) {
			return Err(TableError::Conflict { kind: R::KIND, id: dst });
		}
		let factory = self.placeholder_factory().ok_or(TableError::TemplateNotFound {
			kind: R::KIND,
			template: None,
		})?;

		self.extend_with(src_index.max(dst_index), &Groups::All, &factory);
		for slots in &mut self.groups {
			match policy {
				MovePolicy::Swap => {
					slots.swap(src_index, dst_index);
					for (index, id) in [(src_index, src), (dst_index, dst)] {
						match &mut slots[index] {
							Some(record) => record.set_id(id),
							empty => *empty = Some(factory.make(index)),
						}
					}
				}
				MovePolicy::Overwrite | MovePolicy::Error => match slots[src_index].take() {
					Some(mut record) => {
						record.set_id(dst);
						slots[dst_index] = Some(record);
						slots[src_index] = Some(factory.make(src_index));
					}
					None => {
						if slots[dst_index].is_none() {
							slots[dst_index] = Some(factory.make(dst_index));
						}
					}
				},
			}
		}

		debug!(target: "genie::tables", kind = %R::KIND, src, dst, ?policy, "moved");
		Ok(())
	}

	/// Replaces the slot at `id` with a placeholder in the selected groups.
	///
	/// Returns whether a real record occupied the slot in any selected group. Ids past
	/// the end of the table are a no-op.
	pub fn delete(&mut self, id: i32, groups: &Groups) -> Result<bool, TableError> {
		let index = validate_positive(R::KIND, id, "target")?;
		if !self.selected(groups).any(|slots| index < slots.len()) {
			return Ok(false);
		}
		let factory = self.placeholder_factory();

		let mut had_record = false;
		for (group, slots) in self.groups.iter_mut().enumerate() {
			if !groups.contains(group) {
				continue;
			}
			let Some(slot) = slots.get_mut(index) else {
				continue;
			};
			had_record |= is_real(slot.as_ref());
			if let Some(factory) = &factory {
				*slot = Some(factory.make(index));
			} else if let Some(record) = slot {
				record.disable();
			}
		}

		debug!(target: "genie::tables", kind = %R::KIND, id, had_record, "deleted");
		Ok(had_record)
	}

	/// Copies every group's slot at `id`, for a later [`EntityTables::place_records`].
	pub fn snapshot_records(&self, id: i32) -> Vec<Slot<R>> {
		(0..self.groups.len()).map(|group| self.get(id, group).cloned()).collect()
	}

	/// Writes a per-group snapshot to a new or explicit identifier.
	///
	/// Group `g` receives `records[g]` when that is a real record, otherwise the first
	/// real record of the snapshot. Names and flags are kept as captured.
	pub fn place_records(
		&mut self,
		dest: Option<i32>,
		records: &[Slot<R>],
		conflict: ConflictPolicy,
		gaps: GapPolicy,
	) -> Result<i32, TableError> {
		let fallback = records
			.iter()
			.flatten()
			.find(|record| !record.is_placeholder())
			.cloned()
			.ok_or(TableError::TemplateNotFound {
				kind: R::KIND,
				template: None,
			})?;
		let id = self.resolve_dest(dest)?;
		let index = validate_positive(R::KIND, id, "destination")?;
		self.check_gap(index, gaps)?;
		self.check_conflict(id, conflict)?;

		let factory = Placeholders::from_template(fallback.clone());
		self.extend_with(index, &Groups::All, &factory);
		for (group, slots) in self.groups.iter_mut().enumerate() {
			let mut record = records
				.get(group)
				.and_then(Option::as_ref)
				.filter(|record| !record.is_placeholder())
				.unwrap_or(&fallback)
				.clone();
			record.set_id(id);
			slots[index] = Some(record);
		}

		debug!(target: "genie::tables", kind = %R::KIND, id, "placed");
		Ok(id)
	}

	fn selected<'a>(&'a self, groups: &'a Groups) -> impl Iterator<Item = &'a Vec<Slot<R>>> + 'a {
		self.groups
			.iter()
			.enumerate()
			.filter(move |(group, _)| groups.contains(*group))
			.map(|(_, slots)| slots)
	}

	fn real_at(&self, index: usize) -> Option<&R> {
		self.groups
			.iter()
			.filter_map(|group| group.get(index)?.as_ref())
			.find(|record| !record.is_placeholder())
	}

	fn real_record(&self, id: i32) -> Option<&R> {
		self.real_at(usize::try_from(id).ok()?)
	}

	fn resolve_dest(&self, dest: Option<i32>) -> Result<i32, TableError> {
		match dest {
			Some(id) => Ok(id),
			None => Ok(allocate_next(self)),
		}
	}

	/// Placing at `index` is a gap when some group would need placeholders below it.
	fn check_gap(&self, index: usize, gaps: GapPolicy) -> Result<(), TableError> {
		if gaps == GapPolicy::Error && self.groups.iter().any(|slots| slots.len() < index) {
			return Err(self.gap_error(index));
		}
		Ok(())
	}

	fn check_conflict(&self, id: i32, conflict: ConflictPolicy) -> Result<(), TableError> {
		if conflict == ConflictPolicy::Error && self.exists(id) {
			return Err(TableError::Conflict { kind: R::KIND, id });
		}
		Ok(())
	}

	fn gap_error(&self, index: usize) -> TableError {
		TableError::GapNotAllowed {
			kind: R::KIND,
			id: index_to_id(index),
			len: self.groups.iter().map(Vec::len).min().unwrap_or(0),
		}
	}

	fn extend_with(&mut self, required: usize, groups: &Groups, factory: &Placeholders<R>) -> usize {
		let mut inserted = 0;
		for (group, slots) in self.groups.iter_mut().enumerate() {
			if !groups.contains(group) {
				continue;
			}
			while slots.len() <= required {
				slots.push(Some(factory.make(slots.len())));
				inserted += 1;
			}
		}
		if inserted > 0 {
			debug!(target: "genie::tables", kind = %R::KIND, required, inserted, "extended");
		}
		inserted
	}
}

fn is_real<R: Entity>(slot: Option<&R>) -> bool {
	slot.is_some_and(|record| !record.is_placeholder())
}
