use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::tags;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventAuthor {
	pub login: String,
	pub name: Option<String>,
	pub avatar_url: Option<String>,
}

/// One unit of activity as delivered by a record source. `paths` may be empty
/// when the source could not provide file details for the event; the size
/// counters are still meaningful in that case.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RawEventRecord {
	pub author: Option<EventAuthor>,
	pub message: String,
	pub timestamp: Option<String>,
	pub additions: u64,
	pub deletions: u64,
	pub paths: Vec<String>,
}

/// Tag multiset that remembers first-seen order so that top-K selection can
/// break count ties deterministically.
#[derive(Clone, Debug, Default)]
pub struct TagCounts {
	counts: HashMap<String, u64>,
	order: Vec<String>,
}
impl TagCounts {
	pub fn bump(&mut self, tag: &str) {
		match self.counts.get_mut(tag) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(tag.to_string(), 1);
				self.order.push(tag.to_string());
			},
		}
	}

	pub fn count_of(&self, tag: &str) -> u64 {
		self.counts.get(tag).copied().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Top K tags by descending count, ties broken by first-seen order.
	pub fn top(&self, k: usize) -> Vec<(String, u64)> {
		let mut ranked: Vec<(usize, String, u64)> = self
			.order
			.iter()
			.enumerate()
			.map(|(index, tag)| (index, tag.clone(), self.count_of(tag)))
			.collect();

		ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

		ranked.into_iter().take(k).map(|(_, tag, count)| (tag, count)).collect()
	}
}

/// Per-entity accumulator for one aggregation run. Records keep their
/// insertion order (source order, not chronological); `paths` is the flat
/// pre-dedup list the evidence selector samples from.
#[derive(Clone, Debug)]
pub struct ActivitySummary {
	pub login: String,
	pub name: String,
	pub avatar_url: String,
	pub records: Vec<RawEventRecord>,
	pub tags: TagCounts,
	pub paths: Vec<String>,
}
impl ActivitySummary {
	fn new(author: &EventAuthor) -> Self {
		Self {
			login: author.login.clone(),
			name: author.name.clone().unwrap_or_else(|| author.login.clone()),
			avatar_url: author.avatar_url.clone().unwrap_or_default(),
			records: Vec::new(),
			tags: TagCounts::default(),
			paths: Vec::new(),
		}
	}

	pub fn event_count(&self) -> u64 {
		self.records.len() as u64
	}

	pub fn mean_additions(&self) -> f64 {
		mean(self.records.iter().map(|record| record.additions))
	}

	pub fn mean_deletions(&self) -> f64 {
		mean(self.records.iter().map(|record| record.deletions))
	}
}

/// Groups raw records by entity. Records without a resolvable author are
/// dropped silently; failed tag detection never discards the record or its
/// size counters.
pub fn aggregate(records: &[RawEventRecord]) -> BTreeMap<String, ActivitySummary> {
	let mut by_entity: BTreeMap<String, ActivitySummary> = BTreeMap::new();

	for record in records {
		let Some(author) = record.author.as_ref() else {
			continue;
		};
		let summary = by_entity
			.entry(author.login.clone())
			.or_insert_with(|| ActivitySummary::new(author));

		for path in &record.paths {
			summary.paths.push(path.clone());

			if let Some(tag) = tags::detect_tag(path) {
				summary.tags.bump(tag);
			}
		}

		summary.records.push(record.clone());
	}

	by_entity
}

fn mean(values: impl ExactSizeIterator<Item = u64>) -> f64 {
	let len = values.len();

	if len == 0 {
		return 0.0;
	}

	values.sum::<u64>() as f64 / len as f64
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(login: Option<&str>, message: &str, paths: &[&str]) -> RawEventRecord {
		RawEventRecord {
			author: login.map(|login| EventAuthor {
				login: login.to_string(),
				name: None,
				avatar_url: None,
			}),
			message: message.to_string(),
			timestamp: None,
			additions: 10,
			deletions: 4,
			paths: paths.iter().map(|path| path.to_string()).collect(),
		}
	}

	#[test]
	fn drops_records_without_an_author() {
		let records =
			vec![record(None, "orphan", &["src/main.rs"]), record(Some("alice"), "keep", &[])];
		let summaries = aggregate(&records);

		assert_eq!(summaries.len(), 1);
		assert_eq!(summaries["alice"].event_count(), 1);
	}

	#[test]
	fn counts_sizes_even_when_paths_are_absent() {
		let records = vec![record(Some("alice"), "a", &[]), record(Some("alice"), "b", &[])];
		let summaries = aggregate(&records);
		let summary = &summaries["alice"];

		assert_eq!(summary.event_count(), 2);
		assert!(summary.tags.is_empty());
		assert_eq!(summary.mean_additions(), 10.0);
		assert_eq!(summary.mean_deletions(), 4.0);
	}

	#[test]
	fn tag_ties_break_by_first_seen_order() {
		let mut tags = TagCounts::default();

		tags.bump("Rust");
		tags.bump("Python");
		tags.bump("Python");
		tags.bump("Go");

		let top = tags.top(3);

		assert_eq!(top[0], ("Python".to_string(), 2));
		assert_eq!(top[1], ("Rust".to_string(), 1));
		assert_eq!(top[2], ("Go".to_string(), 1));
	}

	#[test]
	fn groups_paths_and_tags_per_entity() {
		let records = vec![
			record(Some("alice"), "py", &["src/main.py"]),
			record(Some("bob"), "rs", &["src/lib.rs"]),
			record(Some("alice"), "js", &["app/index.js", "src/main.py"]),
		];
		let summaries = aggregate(&records);
		let alice = &summaries["alice"];

		assert_eq!(alice.paths, vec!["src/main.py", "app/index.js", "src/main.py"]);
		assert_eq!(alice.tags.count_of("Python"), 2);
		assert_eq!(alice.tags.count_of("JavaScript"), 1);
		assert_eq!(summaries["bob"].tags.count_of("Rust"), 1);
	}
}
