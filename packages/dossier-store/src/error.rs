use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No data file at {path:?}.")]
	NotFound { path: PathBuf },
	#[error("Failed to read data file at {path:?}.")]
	Read { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse data file at {path:?}.")]
	Parse { path: PathBuf, source: serde_json::Error },
	#[error("Failed to serialize snapshot for {path:?}.")]
	Serialize { path: PathBuf, source: serde_json::Error },
	#[error("Failed to write data file at {path:?}.")]
	Write { path: PathBuf, source: std::io::Error },
}
