pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Matching failed: {message}")]
	Matching { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Source {reference} unavailable: {message}")]
	Source { reference: String, message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<dossier_store::Error> for Error {
	fn from(err: dossier_store::Error) -> Self {
		match err {
			dossier_store::Error::NotFound { path } => Self::NotFound {
				message: format!("{path:?} not found. Add the file to use this operation."),
			},
			other => Self::Storage { message: other.to_string() },
		}
	}
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
