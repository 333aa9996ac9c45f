use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use genie_dataset::records::CombatInfo;
use genie_dataset::{CodecError, DatCodec, Dataset, Graphic, Unit};
use genie_tables::EntityTables;

use crate::workspace::Workspace;

/// Keeps written datasets in memory, keyed by path.
#[derive(Debug, Default)]
pub(crate) struct MemoryCodec {
	pub(crate) files: RefCell<Vec<(PathBuf, Dataset)>>,
}

impl MemoryCodec {
	pub(crate) fn written(&self) -> usize {
		self.files.borrow().len()
	}
}

impl DatCodec for MemoryCodec {
	fn load(&self, path: &Path) -> Result<Dataset, CodecError> {
		self.files
			.borrow()
			.iter()
			.rev()
			.find(|(written, _)| written == path)
			.map(|(_, dataset)| dataset.clone())
			.ok_or_else(|| CodecError::Io {
				path: path.to_path_buf(),
				source: io::Error::from(io::ErrorKind::NotFound),
			})
	}

	fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CodecError> {
		self.files.borrow_mut().push((path.to_path_buf(), dataset.clone()));
		Ok(())
	}
}

/// Two civilizations, one archer at unit 0 and one graphic at 0.
pub(crate) fn sample_dataset() -> Dataset {
	let mut archer = Unit::new(0, "Archer");
	archer.hit_points = 30;
	archer.standing_graphic = 0;
	archer.combat = Some(CombatInfo::default());

	let mut dataset = Dataset::new(["Gaia", "Britons"]);
	dataset.units = EntityTables::from_groups(vec![vec![Some(archer.clone())], vec![Some(archer)]]);
	dataset.graphics = EntityTables::from_groups(vec![vec![Some(Graphic::new(0, "archer_stand", "a_stand.slp"))]]);
	dataset
}

pub(crate) fn session() -> Workspace<MemoryCodec> {
	Workspace::with_codec(sample_dataset(), MemoryCodec::default())
}
