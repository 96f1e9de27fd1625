mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Activity, Config, Matching, Providers, ReasoningProviderConfig, RecordProviderConfig, Service,
	Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	for (label, path) in [
		("storage.profiles_path", &cfg.storage.profiles_path),
		("storage.matches_path", &cfg.storage.matches_path),
		("storage.personas_path", &cfg.storage.personas_path),
		("storage.targets_path", &cfg.storage.targets_path),
	] {
		if path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.providers.reasoning.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.reasoning.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.reasoning.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.reasoning.max_tokens must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.reasoning.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.reasoning.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.records.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.records.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.records.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.records.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if cfg.activity.min_events == 0 {
		return Err(Error::Validation {
			message: "activity.min_events must be greater than zero.".to_string(),
		});
	}
	if cfg.activity.event_limit == 0 {
		return Err(Error::Validation {
			message: "activity.event_limit must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("activity.top_tags", cfg.activity.top_tags),
		("activity.primary_tags", cfg.activity.primary_tags),
		("activity.max_paths", cfg.activity.max_paths),
		("activity.max_messages", cfg.activity.max_messages),
		("activity.max_message_chars", cfg.activity.max_message_chars),
		("activity.max_capabilities", cfg.activity.max_capabilities),
	] {
		if value == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if cfg.activity.primary_tags > cfg.activity.top_tags {
		return Err(Error::Validation {
			message: "activity.primary_tags must not exceed activity.top_tags.".to_string(),
		});
	}

	if cfg.matching.top_k == 0 {
		return Err(Error::Validation {
			message: "matching.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.max_assignments == 0 {
		return Err(Error::Validation {
			message: "matching.max_assignments must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.providers.reasoning.api_key = cfg.providers.reasoning.api_key.trim().to_string();
	cfg.providers.records.token = cfg.providers.records.token.trim().to_string();
}
