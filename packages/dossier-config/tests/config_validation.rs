use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

const SAMPLE_CONFIG_TOML: &str = r#"
[service]
http_bind = "127.0.0.1:8080"
log_level = "info"

[storage]
profiles_path = "data/profiles.json"
matches_path  = "data/matches.json"
personas_path = "data/personas.json"
targets_path  = "data/targets.json"

[providers.reasoning]
provider_id = "anthropic"
api_base    = "https://api.example.com"
api_key     = "key"
path        = "/v1/chat/completions"
model       = "reasoner-1"
max_tokens  = 1200
timeout_ms  = 30000

[providers.records]
api_base   = "https://api.github.com"
token      = ""
timeout_ms = 15000

[activity]
min_events        = 2
event_limit       = 100
top_tags          = 5
primary_tags      = 3
max_paths         = 20
max_messages      = 20
max_message_chars = 100
max_capabilities  = 5

[matching]
top_k           = 3
max_assignments = 3
"#;

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::map::Map<String, Value>),
{
	let mut value: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample.");
	let root = value.as_table_mut().expect("Sample config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("dossier_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> dossier_config::Result<dossier_config::Config> {
	let path = write_temp_config(payload);
	let result = dossier_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

#[test]
fn loads_a_valid_config() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Expected valid config.");

	assert_eq!(cfg.activity.min_events, 2);
	assert_eq!(cfg.matching.top_k, 3);
	assert_eq!(cfg.providers.reasoning.model, "reasoner-1");
}

#[test]
fn empty_reasoning_key_is_allowed_and_trimmed() {
	let payload = sample_with(|root| {
		let providers = root
			.get_mut("providers")
			.and_then(Value::as_table_mut)
			.expect("Sample must include [providers].");
		let reasoning = providers
			.get_mut("reasoning")
			.and_then(Value::as_table_mut)
			.expect("Sample must include [providers.reasoning].");

		reasoning.insert("api_key".to_string(), Value::String("   ".to_string()));
	});
	let cfg = load_payload(payload).expect("Expected valid config.");

	assert!(cfg.providers.reasoning.api_key.is_empty());
}

#[test]
fn rejects_zero_min_events() {
	let payload = sample_with(|root| {
		let activity = root
			.get_mut("activity")
			.and_then(Value::as_table_mut)
			.expect("Sample must include [activity].");

		activity.insert("min_events".to_string(), Value::Integer(0));
	});
	let err = load_payload(payload).expect_err("Expected min_events validation error.");

	assert!(err.to_string().contains("activity.min_events"));
}

#[test]
fn rejects_primary_tags_exceeding_top_tags() {
	let payload = sample_with(|root| {
		let activity = root
			.get_mut("activity")
			.and_then(Value::as_table_mut)
			.expect("Sample must include [activity].");

		activity.insert("primary_tags".to_string(), Value::Integer(9));
	});
	let err = load_payload(payload).expect_err("Expected primary_tags validation error.");

	assert!(err.to_string().contains("activity.primary_tags"));
}

#[test]
fn rejects_empty_profiles_path() {
	let payload = sample_with(|root| {
		let storage = root
			.get_mut("storage")
			.and_then(Value::as_table_mut)
			.expect("Sample must include [storage].");

		storage.insert("profiles_path".to_string(), Value::String(String::new()));
	});
	let err = load_payload(payload).expect_err("Expected storage validation error.");

	assert!(err.to_string().contains("storage.profiles_path"));
}
