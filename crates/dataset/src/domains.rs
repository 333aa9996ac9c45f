//! Closed value sets for enumeration and bitmask fields.
//!
//! These fields are checked when they are assigned, never deferred: a value outside
//! the domain cannot become valid later.

use std::fmt;

/// Whether a domain lists exact values or combinable flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainShape {
	/// The value must equal one of the listed values.
	Enumeration,
	/// The value must be a non-negative combination of the listed flags.
	Bitmask,
}

/// A named, closed set of legal values.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDomain {
	pub name: &'static str,
	pub shape: DomainShape,
	pub values: &'static [(&'static str, i64)],
}

/// Raised when an enumeration or bitmask field is assigned a value outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: invalid {} {value} for {domain} (valid: {valid})", match shape { DomainShape::Bitmask => "bitmask", DomainShape::Enumeration => "value" })]
pub struct EnumValueError {
	pub field: String,
	pub domain: &'static str,
	pub shape: DomainShape,
	pub value: i64,
	pub valid: String,
}

impl EnumDomain {
	/// Union of every flag; only meaningful for bitmasks.
	pub fn flags(&self) -> i64 {
		self.values.iter().fold(0, |acc, (_, value)| acc | value)
	}

	pub fn contains(&self, value: i64) -> bool {
		match self.shape {
			DomainShape::Enumeration => self.values.iter().any(|(_, legal)| *legal == value),
			DomainShape::Bitmask => value >= 0 && value & !self.flags() == 0,
		}
	}

	/// Name of the listed value, if `value` is listed exactly.
	pub fn label(&self, value: i64) -> Option<&'static str> {
		self.values.iter().find(|(_, legal)| *legal == value).map(|(name, _)| *name)
	}

	/// Checks `value` for assignment to `field`.
	pub fn check(&self, field: &str, value: i64) -> Result<(), EnumValueError> {
		if self.contains(value) {
			return Ok(());
		}
		Err(EnumValueError {
			field: field.to_string(),
			domain: self.name,
			shape: self.shape,
			value,
			valid: self.to_string(),
		})
	}
}

impl fmt::Display for EnumDomain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, (name, value)) in self.values.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{name}={value}")?;
		}
		Ok(())
	}
}

pub static UNIT_TYPE: EnumDomain = EnumDomain {
	name: "UnitType",
	shape: DomainShape::Enumeration,
	values: &[
		("EYE_CANDY", 10),
		("TREES_AOK", 15),
		("ANIMATED", 20),
		("DOPPELGANGER", 25),
		("MOVING", 30),
		("ACTOR", 40),
		("SUPERCLASS", 50),
		("PROJECTILE", 60),
		("COMBATANT", 70),
		("BUILDING", 80),
		("TREE_AOE", 90),
	],
};

pub static BLAST_ATTACK_LEVEL: EnumDomain = EnumDomain {
	name: "BlastAttackLevel",
	shape: DomainShape::Enumeration,
	values: &[
		("DAMAGE_RESOURCES", 0),
		("DAMAGE_TREES", 1),
		("DAMAGE_NEARBY_UNITS", 2),
		("DAMAGE_TARGET_ONLY", 3),
	],
};

pub static CHARGE_TYPE: EnumDomain = EnumDomain {
	name: "ChargeType",
	shape: DomainShape::Enumeration,
	values: &[
		("NONE", 0),
		("ATTACK", 1),
		("AREA_ATTACK", 2),
		("AGILITY", 3),
		("PROJECTILE", 4),
	],
};

pub static GARRISON_TYPE: EnumDomain = EnumDomain {
	name: "GarrisonType",
	shape: DomainShape::Bitmask,
	values: &[
		("VILLAGER", 1),
		("INFANTRY", 2),
		("CAVALRY", 4),
		("MONK", 8),
		("HERDABLE", 16),
		("SIEGE", 32),
		("SHIP", 64),
	],
};

pub static STORE_MODE: EnumDomain = EnumDomain {
	name: "StoreMode",
	shape: DomainShape::Bitmask,
	values: &[
		("KEEP_DECAYABLE", 0),
		("KEEP_PERMANENT", 1),
		("GIVE_AND_TAKE", 2),
		("ENABLES_ON_COMPLETION_RESETS", 4),
		("ENABLES_ON_COMPLETION_STAYS", 8),
		("LOCAL_STORAGE", 16),
		("PREVENT_POPULATION_DROP", 32),
	],
};

pub static GRAPHIC_LAYER: EnumDomain = EnumDomain {
	name: "GraphicLayer",
	shape: DomainShape::Enumeration,
	values: &[
		("TERRAIN", 0),
		("SHADOW", 5),
		("RUBBLE", 6),
		("PLANTS", 10),
		("FLIERS", 20),
		("DEFAULT", 21),
		("BIRDS", 30),
	],
};

pub static TECH_TYPE: EnumDomain = EnumDomain {
	name: "TechType",
	shape: DomainShape::Enumeration,
	values: &[("NORMAL", 0), ("AGE", 2)],
};

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::listed(70, true)]
	#[case::unlisted(71, false)]
	#[case::negative(-1, false)]
	fn enumeration_membership(#[case] value: i64, #[case] legal: bool) {
		assert_eq!(UNIT_TYPE.contains(value), legal);
	}

	#[rstest]
	#[case::single_flag(4, true)]
	#[case::combined(1 | 2 | 64, true)]
	#[case::empty(0, true)]
	#[case::unknown_bit(128, false)]
	#[case::negative(-2, false)]
	fn bitmask_membership(#[case] value: i64, #[case] legal: bool) {
		assert_eq!(GARRISON_TYPE.contains(value), legal);
	}

	#[test]
	fn error_lists_valid_values() {
		let err = TECH_TYPE.check("tech_type", 9).unwrap_err();
		assert_eq!(err.value, 9);
		assert_eq!(err.to_string(), "tech_type: invalid value 9 for TechType (valid: NORMAL=0, AGE=2)");
		assert_eq!(TECH_TYPE.label(2), Some("AGE"));
	}
}
