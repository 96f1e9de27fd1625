mod error;

pub use error::{Error, Result};

use std::{
	fs,
	io::Write,
	path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use dossier_domain::{
	matching::{AssignmentSnapshot, Persona, TargetSpec},
	profile::Profile,
};

/// Durable JSON snapshots keyed by path. Every save is a whole-snapshot
/// replace through a temp file in the target directory; there is no partial
/// update and no locking, so concurrent saves race and the last one wins.
#[derive(Clone, Debug)]
pub struct ProfileStore {
	profiles_path: PathBuf,
	matches_path: PathBuf,
	personas_path: PathBuf,
	targets_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PersonaFile {
	personas: Vec<Persona>,
}

#[derive(Debug, Deserialize)]
struct TargetFile {
	targets: Vec<TargetSpec>,
}

impl ProfileStore {
	pub fn new(storage: &dossier_config::Storage) -> Self {
		Self {
			profiles_path: PathBuf::from(&storage.profiles_path),
			matches_path: PathBuf::from(&storage.matches_path),
			personas_path: PathBuf::from(&storage.personas_path),
			targets_path: PathBuf::from(&storage.targets_path),
		}
	}

	/// A missing snapshot is an empty store, never an error.
	pub fn load_profiles(&self) -> Result<Vec<Profile>> {
		if !self.profiles_path.exists() {
			return Ok(Vec::new());
		}

		read_json(&self.profiles_path)
	}

	pub fn save_profiles(&self, profiles: &[Profile]) -> Result<()> {
		write_json_atomic(&self.profiles_path, &profiles)
	}

	pub fn load_personas(&self) -> Result<Vec<Persona>> {
		let file: PersonaFile = read_json_required(&self.personas_path)?;

		Ok(file.personas)
	}

	pub fn load_targets(&self) -> Result<Vec<TargetSpec>> {
		let file: TargetFile = read_json_required(&self.targets_path)?;

		Ok(file.targets)
	}

	pub fn save_assignment_snapshot(&self, snapshot: &AssignmentSnapshot) -> Result<()> {
		write_json_atomic(&self.matches_path, snapshot)
	}

	pub fn load_assignment_snapshot(&self) -> Result<Option<AssignmentSnapshot>> {
		if !self.matches_path.exists() {
			return Ok(None);
		}

		Ok(Some(read_json(&self.matches_path)?))
	}
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	serde_json::from_str(&raw).map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })
}

fn read_json_required<T: DeserializeOwned>(path: &Path) -> Result<T> {
	if !path.exists() {
		return Err(Error::NotFound { path: path.to_path_buf() });
	}

	read_json(path)
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	fs::create_dir_all(parent)
		.map_err(|err| Error::Write { path: path.to_path_buf(), source: err })?;

	let payload = serde_json::to_vec_pretty(value)
		.map_err(|err| Error::Serialize { path: path.to_path_buf(), source: err })?;
	let mut tmp = tempfile::NamedTempFile::new_in(parent)
		.map_err(|err| Error::Write { path: path.to_path_buf(), source: err })?;

	tmp.write_all(&payload)
		.map_err(|err| Error::Write { path: path.to_path_buf(), source: err })?;
	tmp.flush().map_err(|err| Error::Write { path: path.to_path_buf(), source: err })?;
	tmp.persist(path)
		.map_err(|err| Error::Write { path: path.to_path_buf(), source: err.error })?;

	Ok(())
}
