use serde::{Deserialize, Serialize};

use crate::activity::ActivitySummary;

/// The required reasoning-output schema. Deserialization is the validation
/// gate: a response missing any field is rejected wholesale and the caller
/// falls back to [`fallback_fields`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SynthesizedFields {
	pub expertise_areas: Vec<String>,
	pub frameworks: Vec<String>,
	pub work_style: String,
	pub activity_pattern: String,
	pub summary: String,
	pub best_for: Vec<String>,
}

/// The persisted unit. `login` is the unique key in the store; `degraded`
/// marks profiles whose synthesized fields came from the deterministic
/// fallback rather than the reasoning service.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Profile {
	pub login: String,
	pub name: String,
	pub avatar_url: String,
	pub total_events: u64,
	pub primary_tags: Vec<String>,
	pub source: String,
	pub expertise_areas: Vec<String>,
	pub frameworks: Vec<String>,
	pub work_style: String,
	pub activity_pattern: String,
	pub summary: String,
	pub best_for: Vec<String>,
	#[serde(default)]
	pub degraded: bool,
}

pub fn build_profile(
	summary: &ActivitySummary,
	source: &str,
	primary_tags: usize,
	fields: SynthesizedFields,
	degraded: bool,
) -> Profile {
	Profile {
		login: summary.login.clone(),
		name: summary.name.clone(),
		avatar_url: summary.avatar_url.clone(),
		total_events: summary.event_count(),
		primary_tags: summary.tags.top(primary_tags).into_iter().map(|(tag, _)| tag).collect(),
		source: source.to_string(),
		expertise_areas: fields.expertise_areas,
		frameworks: fields.frameworks,
		work_style: fields.work_style,
		activity_pattern: fields.activity_pattern,
		summary: fields.summary,
		best_for: fields.best_for,
		degraded,
	}
}

/// Placeholder fields built purely from aggregated activity; used whenever
/// the reasoning service is unavailable or its output fails validation.
pub fn fallback_fields(event_count: u64, source: &str) -> SynthesizedFields {
	SynthesizedFields {
		expertise_areas: vec!["Code contribution".to_string()],
		frameworks: Vec::new(),
		work_style: "active contributor".to_string(),
		activity_pattern: format!("Made {event_count} commits"),
		summary: format!("Active contributor to {source}"),
		best_for: vec!["Code review".to_string(), "Technical questions".to_string()],
	}
}
