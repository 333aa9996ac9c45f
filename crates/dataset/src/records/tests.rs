use genie_primitives::{EntityKind, FieldValue};
use genie_tables::Entity;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::fields::{Component, FieldError, FieldKind, Fields};

fn archer() -> Unit {
	let mut unit = Unit::new(4, "Archer");
	unit.hit_points = 30;
	unit.combat = Some(CombatInfo::default());
	unit
}

#[test]
fn base_fields_round_through_dispatch() {
	let mut unit = archer();
	let def = Unit::field(EntityKind::Unit, "hit_points").unwrap();
	def.write(&mut unit, &FieldValue::Int(45)).unwrap();
	assert_eq!(unit.hit_points, 45);
	assert_eq!(def.read(&unit), Ok(FieldValue::Int(45)));
}

#[test]
fn component_fields_require_the_component() {
	let mut unit = archer();
	let reload = Unit::field(EntityKind::Unit, "reload_time").unwrap();
	reload.write(&mut unit, &FieldValue::Float(1.5)).unwrap();
	assert_eq!(unit.combat.as_ref().map(|combat| combat.reload_time), Some(1.5));

	let garrison = Unit::field(EntityKind::Unit, "garrison_type").unwrap();
	assert_eq!(garrison.component, Component::Building);
	assert_eq!(
		garrison.write(&mut unit, &FieldValue::Int(2)),
		Err(FieldError::ComponentMissing {
			field: "garrison_type",
			component: Component::Building,
		})
	);
	assert!(garrison.read(&unit).is_err());
}

#[test]
fn enum_fields_are_checked_before_writing() {
	let mut unit = archer();
	let def = Unit::field(EntityKind::Unit, "unit_type").unwrap();
	let err = def.write(&mut unit, &FieldValue::Int(71)).unwrap_err();
	assert!(matches!(err, FieldError::EnumValue(ref inner) if inner.domain == "UnitType" && inner.value == 71));
	assert_eq!(unit.unit_type, 70);

	def.write(&mut unit, &FieldValue::Int(80)).unwrap();
	assert_eq!(unit.unit_type, 80);
}

#[test]
fn unknown_fields_are_reported_with_kind() {
	assert_eq!(
		Graphic::field(EntityKind::Graphic, "hit_points").unwrap_err(),
		FieldError::UnknownField {
			kind: EntityKind::Graphic,
			field: "hit_points".to_string(),
		}
	);
}

#[rstest]
#[case::unit_projectile("projectile_unit_id", EntityKind::Unit)]
#[case::unit_sound("selection_sound", EntityKind::Sound)]
#[case::unit_tech("research_tech_id", EntityKind::Tech)]
fn unit_reference_targets(#[case] name: &str, #[case] target: EntityKind) {
	let def = Unit::field(EntityKind::Unit, name).unwrap();
	assert_eq!(def.kind, FieldKind::Reference(target));
}

#[test]
fn reference_listing_covers_tech_links() {
	let targets: Vec<(&str, EntityKind)> = Tech::fields().references().map(|(def, kind)| (def.name, kind)).collect();
	assert_eq!(
		targets,
		vec![
			("effect_id", EntityKind::Effect),
			("research_location", EntityKind::Unit),
			("required_tech", EntityKind::Tech),
		]
	);
}

#[rstest]
#[case::graphic(Graphic::blank().unwrap().is_placeholder())]
#[case::sound(Sound::blank().unwrap().is_placeholder())]
#[case::tech(Tech::blank().unwrap().is_placeholder())]
#[case::effect(Effect::blank().unwrap().is_placeholder())]
fn blanks_are_placeholders(#[case] placeholder: bool) {
	assert!(placeholder);
}

#[test]
fn fingerprints_follow_minimal_values() {
	let mut sound = Sound::new(0, "").with_file("a.wav", 100);
	sound.enabled = false;
	assert!(!sound.is_placeholder());
	sound.set_minimal();
	assert!(sound.is_placeholder());

	let mut unit = Unit::new(0, "");
	unit.enabled = false;
	assert!(unit.is_placeholder());
	assert!(Unit::blank().is_none());
}
