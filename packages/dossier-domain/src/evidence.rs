use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::activity::ActivitySummary;

#[derive(Clone, Copy, Debug)]
pub struct EvidenceCaps {
	pub top_tags: usize,
	pub max_paths: usize,
	pub max_messages: usize,
	pub max_message_chars: usize,
}
impl Default for EvidenceCaps {
	fn default() -> Self {
		Self { top_tags: 5, max_paths: 20, max_messages: 20, max_message_chars: 100 }
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TagCount {
	pub tag: String,
	pub count: u64,
}

/// Bounded projection of an [`ActivitySummary`], the only activity content
/// that may reach a prompt.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EvidenceBundle {
	pub login: String,
	pub name: String,
	pub event_count: u64,
	pub mean_additions: f64,
	pub mean_deletions: f64,
	pub top_tags: Vec<TagCount>,
	pub paths: Vec<String>,
	pub messages: Vec<String>,
}

/// Pure and order-preserving: identical summaries always yield identical
/// bundles. Paths are deduplicated in first-seen order before the cap;
/// messages are the first line of each of the first `max_messages` records
/// (the record source yields newest-first), truncated on a char boundary.
pub fn select(summary: &ActivitySummary, caps: &EvidenceCaps) -> EvidenceBundle {
	let top_tags = summary
		.tags
		.top(caps.top_tags)
		.into_iter()
		.map(|(tag, count)| TagCount { tag, count })
		.collect();
	let mut seen = HashSet::new();
	let mut paths = Vec::new();

	for path in &summary.paths {
		if paths.len() == caps.max_paths {
			break;
		}
		if seen.insert(path.as_str()) {
			paths.push(path.clone());
		}
	}

	let messages = summary
		.records
		.iter()
		.take(caps.max_messages)
		.map(|record| first_line(&record.message, caps.max_message_chars))
		.collect();

	EvidenceBundle {
		login: summary.login.clone(),
		name: summary.name.clone(),
		event_count: summary.event_count(),
		mean_additions: summary.mean_additions(),
		mean_deletions: summary.mean_deletions(),
		top_tags,
		paths,
		messages,
	}
}

fn first_line(message: &str, max_chars: usize) -> String {
	message.lines().next().unwrap_or("").chars().take(max_chars).collect()
}
