use genie_primitives::{ConflictPolicy, GapPolicy, Groups};

/// Request to create a record from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpec {
	pub name: String,
	/// Destination id; `None` appends.
	pub id: Option<i32>,
	/// Template id; `None` uses the first real record, then the kind's blank record.
	pub template: Option<i32>,
	/// Groups that receive the new record. Capacity is always grown in every group.
	pub groups: Groups,
	pub conflict: ConflictPolicy,
	pub gaps: GapPolicy,
}

impl CreateSpec {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			id: None,
			template: None,
			groups: Groups::All,
			conflict: ConflictPolicy::default(),
			gaps: GapPolicy::default(),
		}
	}

	pub fn at(mut self, id: i32) -> Self {
		self.id = Some(id);
		self
	}

	pub fn from_template(mut self, template: i32) -> Self {
		self.template = Some(template);
		self
	}

	pub fn in_groups(mut self, groups: Groups) -> Self {
		self.groups = groups;
		self
	}

	pub fn on_conflict(mut self, conflict: ConflictPolicy) -> Self {
		self.conflict = conflict;
		self
	}

	pub fn gaps(mut self, gaps: GapPolicy) -> Self {
		self.gaps = gaps;
		self
	}
}

/// Request to copy an existing record to another id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSpec {
	pub source: i32,
	/// Destination id; `None` appends.
	pub dest: Option<i32>,
	/// New name; `None` keeps each source record's name.
	pub name: Option<String>,
	pub groups: Groups,
	pub conflict: ConflictPolicy,
	pub gaps: GapPolicy,
}

impl CloneSpec {
	pub fn new(source: i32) -> Self {
		Self {
			source,
			dest: None,
			name: None,
			groups: Groups::All,
			conflict: ConflictPolicy::default(),
			gaps: GapPolicy::default(),
		}
	}

	pub fn to(mut self, dest: i32) -> Self {
		self.dest = Some(dest);
		self
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn in_groups(mut self, groups: Groups) -> Self {
		self.groups = groups;
		self
	}

	pub fn on_conflict(mut self, conflict: ConflictPolicy) -> Self {
		self.conflict = conflict;
		self
	}

	pub fn gaps(mut self, gaps: GapPolicy) -> Self {
		self.gaps = gaps;
		self
	}
}
