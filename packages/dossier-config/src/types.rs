use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub activity: Activity,
	pub matching: Matching,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub profiles_path: String,
	pub matches_path: String,
	pub personas_path: String,
	pub targets_path: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub reasoning: ReasoningProviderConfig,
	pub records: RecordProviderConfig,
}

/// An empty `api_key` disables live reasoning: synthesis degrades to the
/// deterministic fallback and matching runs the offline scorers.
#[derive(Debug, Deserialize)]
pub struct ReasoningProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// An empty `token` means unauthenticated access (subject to the source's
/// rate limits).
#[derive(Debug, Deserialize)]
pub struct RecordProviderConfig {
	pub api_base: String,
	#[serde(default)]
	pub token: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Activity {
	pub min_events: u64,
	pub event_limit: u32,
	pub top_tags: u32,
	pub primary_tags: u32,
	pub max_paths: u32,
	pub max_messages: u32,
	pub max_message_chars: u32,
	pub max_capabilities: u32,
}

#[derive(Debug, Deserialize)]
pub struct Matching {
	pub top_k: u32,
	pub max_assignments: u32,
}
