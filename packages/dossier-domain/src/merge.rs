use std::collections::HashSet;

use crate::profile::Profile;

/// Combines an existing profile with a newly synthesized one for the same
/// entity. The policy is deliberately asymmetric and callers depend on it:
/// `total_events` is summed, `expertise_areas` is a set union ordered
/// first-seen (existing before incoming) and capped at `max_capabilities`,
/// and every other field, `primary_tags` included, takes the incoming
/// profile's value (last-synthesis-wins).
pub fn merge_profiles(existing: &Profile, incoming: &Profile, max_capabilities: usize) -> Profile {
	let mut merged = incoming.clone();

	merged.total_events = existing.total_events + incoming.total_events;
	merged.expertise_areas =
		union_capped(&existing.expertise_areas, &incoming.expertise_areas, max_capabilities);

	merged
}

fn union_capped(existing: &[String], incoming: &[String], cap: usize) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut union = Vec::new();

	for value in existing.iter().chain(incoming) {
		if union.len() == cap {
			break;
		}
		if seen.insert(value.as_str()) {
			union.push(value.clone());
		}
	}

	union
}
