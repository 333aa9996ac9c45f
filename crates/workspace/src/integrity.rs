//! Whole-dataset consistency checks.
//!
//! Unlike the deferred reference pass, which only checks assignments made in this
//! session, these checks scan every table as it is. [`check_on_save`] covers looping
//! unit chains and duplicate export names and runs on every validated save.
//! [`check_structure`] covers table shape and dangling ids; save runs it only with
//! `strict_integrity`. The `check` command runs both through [`check`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use genie_dataset::{Dataset, Effect, Fields, Graphic, Record, Sound, Tech, Unit};
use genie_primitives::EntityKind;

use crate::export::ExportRegistry;

/// Unit-to-unit fields whose chains must not loop.
const CHAIN_FIELDS: [&str; 2] = ["dead_unit_id", "projectile_unit_id"];

/// One problem found by [`check`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityIssue {
	#[error("{kind}: group {group} has {len} slots, group 0 has {expected}")]
	LengthMismatch {
		kind: EntityKind,
		group: usize,
		len: usize,
		expected: usize,
	},

	#[error("{kind}: group {group} has a null slot at {id}")]
	NullSlot { kind: EntityKind, group: usize, id: i32 },

	#[error("{kind}: group {group} slot {id} stores self-id {stored}")]
	IdMismatch {
		kind: EntityKind,
		group: usize,
		id: i32,
		stored: i32,
	},

	#[error("{kind} {id}: {field} points at missing {target} {value}")]
	DanglingReference {
		kind: EntityKind,
		id: i32,
		field: &'static str,
		target: EntityKind,
		value: i64,
	},

	#[error("unit {field} chain loops: {}", format_cycle(ids))]
	Cycle { field: &'static str, ids: Vec<i32> },

	#[error("{kind}: export name {name:?} is tracked at ids {ids:?}")]
	DuplicateExportName { kind: EntityKind, name: String, ids: Vec<i32> },
}

fn format_cycle(ids: &[i32]) -> String {
	let mut out: Vec<String> = ids.iter().map(ToString::to_string).collect();
	if let Some(first) = ids.first() {
		out.push(first.to_string());
	}
	out.join(" -> ")
}

/// Every issue found in one pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
	issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
	pub fn is_clean(&self) -> bool {
		self.issues.is_empty()
	}

	pub fn len(&self) -> usize {
		self.issues.len()
	}

	pub fn is_empty(&self) -> bool {
		self.issues.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &IntegrityIssue> {
		self.issues.iter()
	}
}

impl fmt::Display for IntegrityReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.issues.is_empty() {
			return f.write_str("no integrity issues");
		}
		write!(f, "{} integrity issue(s)", self.issues.len())?;
		for issue in &self.issues {
			write!(f, "\n  {issue}")?;
		}
		Ok(())
	}
}

/// Runs every check against `dataset` and the session's export registry.
pub fn check(dataset: &Dataset, exports: &ExportRegistry) -> IntegrityReport {
	let mut report = check_structure(dataset);
	report.issues.extend(check_on_save(dataset, exports).issues);
	report
}

/// Slot counts, null slots, stored self-ids and dangling reference fields.
pub fn check_structure(dataset: &Dataset) -> IntegrityReport {
	let mut issues = Vec::new();
	scan_kind::<Unit>(dataset, &mut issues);
	scan_kind::<Graphic>(dataset, &mut issues);
	scan_kind::<Sound>(dataset, &mut issues);
	scan_kind::<Tech>(dataset, &mut issues);
	scan_kind::<Effect>(dataset, &mut issues);
	IntegrityReport { issues }
}

/// Looping `dead_unit_id`/`projectile_unit_id` chains and export names tracked at
/// more than one id.
pub fn check_on_save(dataset: &Dataset, exports: &ExportRegistry) -> IntegrityReport {
	let mut issues = Vec::new();
	for field in CHAIN_FIELDS {
		issues.extend(unit_cycles(dataset, field).into_iter().map(|ids| IntegrityIssue::Cycle { field, ids }));
	}
	for kind in EntityKind::ALL {
		issues.extend(
			exports
				.duplicate_names(kind)
				.into_iter()
				.map(|(name, ids)| IntegrityIssue::DuplicateExportName { kind, name, ids }),
		);
	}
	IntegrityReport { issues }
}

fn scan_kind<R: Record>(dataset: &Dataset, issues: &mut Vec<IntegrityIssue>) {
	let tables = dataset.tables::<R>();
	let expected = tables.count();
	let mut dangling = BTreeSet::new();

	for (group, slots) in tables.groups().enumerate() {
		if slots.len() != expected {
			issues.push(IntegrityIssue::LengthMismatch {
				kind: R::KIND,
				group,
				len: slots.len(),
				expected,
			});
		}
		for (index, slot) in slots.iter().enumerate() {
			let id = i32::try_from(index).unwrap_or(i32::MAX);
			let Some(record) = slot else {
				issues.push(IntegrityIssue::NullSlot { kind: R::KIND, group, id });
				continue;
			};
			if record.id() != id {
				issues.push(IntegrityIssue::IdMismatch {
					kind: R::KIND,
					group,
					id,
					stored: record.id(),
				});
			}
			if record.is_placeholder() {
				continue;
			}
			for (def, target) in R::fields().references() {
				let Some(value) = def.read(record).ok().and_then(|value| value.as_int()) else {
					continue;
				};
				let exists = i32::try_from(value).is_ok_and(|target_id| dataset.exists(target, target_id));
				if value >= 0 && !exists && dangling.insert((id, def.name)) {
					issues.push(IntegrityIssue::DanglingReference {
						kind: R::KIND,
						id,
						field: def.name,
						target,
						value,
					});
				}
			}
		}
	}
}

/// Distinct cycles through `field` among real units of group 0, each starting at its
/// smallest id. Self-references mean "no successor" and are ignored.
fn unit_cycles(dataset: &Dataset, field: &str) -> Vec<Vec<i32>> {
	let Some(def) = Unit::fields().get(field) else {
		return Vec::new();
	};
	let next: BTreeMap<i32, i32> = dataset
		.units
		.iter_real(0)
		.filter_map(|(id, unit)| {
			let target = i32::try_from(def.read(unit).ok()?.as_int()?).ok()?;
			(target >= 0 && target != id).then_some((id, target))
		})
		.collect();

	let mut cycles = BTreeSet::new();
	let mut settled = BTreeSet::new();
	for &start in next.keys() {
		let mut path = Vec::new();
		let mut current = start;
		while !settled.contains(&current) {
			if let Some(pos) = path.iter().position(|&id| id == current) {
				let mut cycle: Vec<i32> = path[pos..].to_vec();
				if let Some(min) = cycle.iter().enumerate().min_by_key(|(_, id)| **id).map(|(at, _)| at) {
					cycle.rotate_left(min);
				}
				cycles.insert(cycle);
				break;
			}
			path.push(current);
			match next.get(&current) {
				Some(&target) => current = target,
				None => break,
			}
		}
		settled.extend(path);
	}
	cycles.into_iter().collect()
}

#[cfg(test)]
mod tests {
	use genie_dataset::records::CombatInfo;
	use genie_tables::EntityTables;
	use pretty_assertions::assert_eq;

	use super::*;

	fn units(chain: &[(i32, i32)]) -> Dataset {
		let mut dataset = Dataset::new(["Gaia"]);
		let slots = chain
			.iter()
			.map(|&(id, dead)| {
				let mut unit = Unit::new(id, "Villager");
				unit.hit_points = 25;
				unit.dead_unit_id = dead;
				Some(unit)
			})
			.collect();
		dataset.units = EntityTables::from_groups(vec![slots]);
		dataset
	}

	#[test]
	fn clean_dataset_has_no_issues() {
		let dataset = units(&[(0, -1), (1, 0), (2, 2)]);
		let report = check(&dataset, &ExportRegistry::default());
		assert!(report.is_clean(), "{report}");
	}

	#[test]
	fn dead_unit_loop_is_reported_once_from_smallest_id() {
		let dataset = units(&[(0, 2), (1, 0), (2, 1), (3, 1)]);
		let report = check(&dataset, &ExportRegistry::default());
		assert_eq!(
			report.iter().cloned().collect::<Vec<_>>(),
			vec![IntegrityIssue::Cycle {
				field: "dead_unit_id",
				ids: vec![0, 2, 1],
			}]
		);
		assert!(report.to_string().contains("0 -> 2 -> 1 -> 0"));
		assert!(check_structure(&dataset).is_clean());
		assert_eq!(check_on_save(&dataset, &ExportRegistry::default()), report);
	}

	#[test]
	fn projectile_chain_needs_combat_component() {
		let mut dataset = units(&[(0, -1), (1, -1)]);
		for (id, target) in [(0, 1), (1, 0)] {
			if let Some(unit) = dataset.units.get_mut(id, 0) {
				unit.combat = Some(CombatInfo {
					projectile_unit_id: target,
					..CombatInfo::default()
				});
			}
		}
		let report = check(&dataset, &ExportRegistry::default());
		assert_eq!(report.len(), 1);
		assert!(matches!(
			report.iter().next(),
			Some(IntegrityIssue::Cycle { field: "projectile_unit_id", ids }) if ids == &vec![0, 1]
		));
	}

	#[test]
	fn structural_problems_are_reported_per_group() {
		let mut dataset = Dataset::new(["Gaia", "Britons"]);
		let archer = Unit::new(0, "Archer");
		let mut stray = Unit::new(5, "Stray");
		stray.hit_points = 10;
		dataset.units = EntityTables::from_groups(vec![vec![Some(archer.clone()), Some(stray)], vec![Some(archer), None, None]]);

		assert!(check_on_save(&dataset, &ExportRegistry::default()).is_clean());
		let issues: Vec<IntegrityIssue> = check(&dataset, &ExportRegistry::default()).iter().cloned().collect();
		assert_eq!(
			issues,
			vec![
				IntegrityIssue::IdMismatch {
					kind: EntityKind::Unit,
					group: 0,
					id: 1,
					stored: 5,
				},
				IntegrityIssue::LengthMismatch {
					kind: EntityKind::Unit,
					group: 1,
					len: 3,
					expected: 2,
				},
				IntegrityIssue::NullSlot {
					kind: EntityKind::Unit,
					group: 1,
					id: 1,
				},
				IntegrityIssue::NullSlot {
					kind: EntityKind::Unit,
					group: 1,
					id: 2,
				},
			]
		);
	}

	#[test]
	fn dangling_reference_is_reported_once_across_groups() {
		let mut dataset = Dataset::new(["Gaia", "Britons"]);
		let mut archer = Unit::new(0, "Archer");
		archer.standing_graphic = 12;
		dataset.units = EntityTables::from_groups(vec![vec![Some(archer.clone())], vec![Some(archer)]]);

		let issues: Vec<IntegrityIssue> = check(&dataset, &ExportRegistry::default()).iter().cloned().collect();
		assert_eq!(
			issues,
			vec![IntegrityIssue::DanglingReference {
				kind: EntityKind::Unit,
				id: 0,
				field: "standing_graphic",
				target: EntityKind::Graphic,
				value: 12,
			}]
		);
	}

	#[test]
	fn duplicate_export_names_are_issues() {
		let mut exports = ExportRegistry::default();
		exports.track(EntityKind::Tech, "Loom", 22, None);
		exports.track(EntityKind::Tech, "Loom", 23, None);
		let report = check(&Dataset::new(["Gaia"]), &exports);
		assert_eq!(
			report.iter().cloned().collect::<Vec<_>>(),
			vec![IntegrityIssue::DuplicateExportName {
				kind: EntityKind::Tech,
				name: "Loom".to_string(),
				ids: vec![22, 23],
			}]
		);
	}
}
