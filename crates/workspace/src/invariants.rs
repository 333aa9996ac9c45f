use std::path::Path;

use genie_dataset::{Graphic, Unit};
use genie_primitives::Groups;

use crate::error::Error;
use crate::test_fixtures::session;

/// Must leave the reference log empty after validation, whether it passed or not.
///
/// * Enforced in: `Validator::validate_all`
/// * Failure symptom: a reference fixed after a failed save keeps failing later saves.
#[cfg_attr(test, test)]
pub(crate) fn test_log_empty_after_validation() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dying_graphic", 40)
		.unwrap();
	assert_eq!(workspace.refs().len(), 1);

	assert!(workspace.validate_references().is_err());
	assert!(workspace.refs().is_empty());
	assert!(workspace.validate_references().is_ok());
}

/// Must not call the codec when any deferred reference is dangling or a unit chain
/// loops.
///
/// * Enforced in: `Workspace::save`
/// * Failure symptom: a dataset with a dangling id or a looping chain reaches disk.
#[cfg_attr(test, test)]
pub(crate) fn test_failed_save_writes_nothing() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "attack_graphic", 3)
		.unwrap();

	let err = workspace.save(Path::new("out.dat")).unwrap_err();
	assert!(matches!(err, Error::Validation(ref failure) if failure.failures.len() == 1));
	assert_eq!(workspace.codec().written(), 0);

	workspace
		.set_field::<Unit>(0, &Groups::All, "attack_graphic", -1)
		.unwrap();
	let spec = workspace.clone_spec(0);
	let twin = workspace.clone_entity::<Unit>(spec).unwrap();
	workspace
		.set_field::<Unit>(twin, &Groups::All, "dead_unit_id", 0)
		.unwrap();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dead_unit_id", twin)
		.unwrap();

	let err = workspace.save(Path::new("out.dat")).unwrap_err();
	assert!(matches!(err, Error::Integrity(ref report) if report.len() == 1));
	assert_eq!(workspace.codec().written(), 0);
}

/// Must accept a reference whose target is created after the assignment.
///
/// * Enforced in: `ReferenceLog::add_deferred`
/// * Failure symptom: edit scripts must be ordered so targets exist before use.
#[cfg_attr(test, test)]
pub(crate) fn test_forward_reference_accepted() {
	let mut workspace = session();
	workspace
		.set_field::<Unit>(0, &Groups::All, "dying_graphic", 1)
		.unwrap();
	let spec = workspace.create_spec("archer_die");
	assert_eq!(workspace.create::<Graphic>(spec).unwrap(), 1);

	workspace.save(Path::new("out.dat")).unwrap();
	assert_eq!(workspace.codec().written(), 1);
}
