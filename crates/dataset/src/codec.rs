//! Reading and writing datasets.
//!
//! The editing core never interprets bytes: it hands a whole [`Dataset`] to a
//! [`DatCodec`]. [`PostcardCodec`] is the bundled implementation, a versioned
//! `postcard` envelope written through a temporary file so a failed write never
//! clobbers the previous file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::Dataset;

/// Whole-file load and write entry points.
pub trait DatCodec {
	fn load(&self, path: &Path) -> Result<Dataset, CodecError>;

	/// Writes `dataset` to `path`; either the whole file is replaced or nothing is.
	fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CodecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("i/o error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to encode dataset: {0}")]
	Encode(#[source] postcard::Error),

	#[error("failed to decode {}: {source}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: postcard::Error,
	},

	#[error("{} is not a dataset file", path.display())]
	BadMagic { path: PathBuf },

	#[error("{} has format version {found}; this build reads version {supported}", path.display())]
	UnsupportedVersion { path: PathBuf, found: u16, supported: u16 },
}

impl CodecError {
	fn io(path: &Path, source: std::io::Error) -> Self {
		Self::Io {
			path: path.to_path_buf(),
			source,
		}
	}
}

const MAGIC: [u8; 8] = *b"GENIEDAT";

/// Current envelope version.
pub const FORMAT_VERSION: u16 = 1;

#[derive(Serialize)]
struct Envelope<'a> {
	magic: [u8; 8],
	version: u16,
	dataset: &'a Dataset,
}

#[derive(Deserialize)]
struct Header {
	magic: [u8; 8],
	version: u16,
}

/// Versioned `postcard` envelope: magic, format version, dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostcardCodec;

impl PostcardCodec {
	pub fn encode(&self, dataset: &Dataset) -> Result<Vec<u8>, CodecError> {
		postcard::to_stdvec(&Envelope {
			magic: MAGIC,
			version: FORMAT_VERSION,
			dataset,
		})
		.map_err(CodecError::Encode)
	}

	/// Decodes bytes read from `path`; `path` only labels errors.
	pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<Dataset, CodecError> {
		let decode_err = |source| CodecError::Decode {
			path: path.to_path_buf(),
			source,
		};
		let (header, rest) = postcard::take_from_bytes::<Header>(bytes).map_err(|_| CodecError::BadMagic {
			path: path.to_path_buf(),
		})?;
		if header.magic != MAGIC {
			return Err(CodecError::BadMagic {
				path: path.to_path_buf(),
			});
		}
		if header.version != FORMAT_VERSION {
			return Err(CodecError::UnsupportedVersion {
				path: path.to_path_buf(),
				found: header.version,
				supported: FORMAT_VERSION,
			});
		}
		postcard::from_bytes(rest).map_err(decode_err)
	}
}

impl DatCodec for PostcardCodec {
	fn load(&self, path: &Path) -> Result<Dataset, CodecError> {
		let bytes = std::fs::read(path).map_err(|e| CodecError::io(path, e))?;
		let dataset = self.decode(&bytes, path)?;
		debug!(target: "genie::codec", path = %path.display(), bytes = bytes.len(), "loaded");
		Ok(dataset)
	}

	fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), CodecError> {
		let bytes = self.encode(dataset)?;
		let dir = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| CodecError::io(dir, e))?;
		staged.write_all(&bytes).map_err(|e| CodecError::io(staged.path(), e))?;
		staged.as_file().sync_all().map_err(|e| CodecError::io(path, e))?;
		staged.persist(path).map_err(|e| CodecError::io(path, e.error))?;

		info!(target: "genie::codec", path = %path.display(), bytes = bytes.len(), outcome = "success", "wrote dataset");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use genie_tables::CreateSpec;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::records::Graphic;

	fn sample() -> Dataset {
		let mut dataset = Dataset::new(["Gaia", "Britons"]);
		dataset
			.tables_mut::<Graphic>()
			.create(CreateSpec::new("archer_attack").at(3))
			.unwrap();
		dataset
	}

	#[test]
	fn encode_then_decode_preserves_placeholders() {
		let codec = PostcardCodec;
		let dataset = sample();
		let bytes = codec.encode(&dataset).unwrap();
		assert_eq!(&bytes[..8], b"GENIEDAT");
		assert_eq!(codec.decode(&bytes, Path::new("mem")).unwrap(), dataset);
	}

	#[test]
	fn rejects_foreign_bytes() {
		let codec = PostcardCodec;
		let err = codec.decode(b"NOTADATFILE-----", Path::new("x.dat")).unwrap_err();
		assert!(matches!(err, CodecError::BadMagic { .. }));
		assert!(matches!(codec.decode(b"", Path::new("x.dat")), Err(CodecError::BadMagic { .. })));
	}

	#[test]
	fn rejects_newer_versions() {
		let codec = PostcardCodec;
		let mut bytes = codec.encode(&sample()).unwrap();
		bytes[8] = 9;
		assert!(matches!(
			codec.decode(&bytes, Path::new("x.dat")),
			Err(CodecError::UnsupportedVersion { found: 9, supported: 1, .. })
		));
	}
}
