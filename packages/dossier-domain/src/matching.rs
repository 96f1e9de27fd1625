use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// A candidate in assignment matching, loaded from the persona file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Persona {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub headline: String,
	#[serde(default)]
	pub skills: Vec<String>,
	#[serde(default)]
	pub domains: Vec<String>,
	#[serde(default)]
	pub interests: Vec<String>,
	#[serde(default)]
	pub work_style: String,
}

/// A named matching target with its required capabilities.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TargetSpec {
	pub name: String,
	pub description: String,
	#[serde(default)]
	pub required_capabilities: Vec<String>,
	#[serde(default)]
	pub notes: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
	Low,
	Medium,
	High,
}
impl Confidence {
	/// Case-insensitive gate for untrusted reasoning output.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"low" => Some(Self::Low),
			"medium" => Some(Self::Medium),
			"high" => Some(Self::High),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Assignment {
	pub target: String,
	pub confidence: Confidence,
	pub justification: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PersonaMatchReport {
	pub persona_id: String,
	pub persona_name: String,
	pub assignments: Vec<Assignment>,
	pub overall_summary: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssignmentFailure {
	pub persona_id: String,
	pub persona_name: String,
	pub reason: String,
}

/// The latest assignment run, persisted whole and always replaced.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssignmentSnapshot {
	pub reports: Vec<PersonaMatchReport>,
	pub failures: Vec<AssignmentFailure>,
	pub persona_count: usize,
	pub target_count: usize,
	pub generated_at: String,
	pub live_reasoning: bool,
}

/// A free-text search hit: the full profile enriched with the match fields.
/// Flattening puts the match fields after the profile's, so they win on any
/// key collision.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchMatch {
	#[serde(flatten)]
	pub profile: Profile,
	pub relevance_score: f32,
	pub match_reason: String,
}
