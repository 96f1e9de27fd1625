//! Deterministic matchers used when no reasoning credentials are configured.
//! These are the offline mode, not a fallback for unparsable live output.

use dossier_domain::{
	matching::{Assignment, Confidence, Persona, PersonaMatchReport, SearchMatch, TargetSpec},
	profile::Profile,
};

/// Keyword scorer: expertise hits 30, language 20, framework 25, best-for 15,
/// capped at 100; top K by descending score, stable on ties.
pub fn keyword_search(query: &str, profiles: &[Profile], top_k: usize) -> Vec<SearchMatch> {
	let query_lower = query.to_lowercase();
	let words: Vec<&str> = query_lower.split_whitespace().collect();
	let mut matches = Vec::new();

	for profile in profiles {
		let mut score = 0u32;
		let mut reasons = Vec::new();

		for expertise in &profile.expertise_areas {
			let expertise_lower = expertise.to_lowercase();

			if words.iter().any(|word| expertise_lower.contains(word)) {
				score += 30;
				reasons.push(format!("expertise in {expertise}"));
			}
		}
		for tag in &profile.primary_tags {
			if query_lower.contains(&tag.to_lowercase()) {
				score += 20;
				reasons.push(format!("works with {tag}"));
			}
		}
		for framework in &profile.frameworks {
			if query_lower.contains(&framework.to_lowercase()) {
				score += 25;
				reasons.push(format!("uses {framework}"));
			}
		}
		for item in &profile.best_for {
			let item_lower = item.to_lowercase();

			if words.iter().any(|word| word.len() > 3 && item_lower.contains(word)) {
				score += 15;
				reasons.push(format!("good at {item_lower}"));
			}
		}

		if score > 0 {
			reasons.truncate(3);
			matches.push(SearchMatch {
				profile: profile.clone(),
				relevance_score: score.min(100) as f32,
				match_reason: format!("Strong match: {}", reasons.join(", ")),
			});
		}
	}

	matches.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
	matches.truncate(top_k);

	matches
}

/// Rule-based assignment: skill overlap against the target's text blob
/// counts double, domain and interest overlap count once. High ≥ 6,
/// Medium ≥ 3, else Low.
pub fn assign(
	personas: &[Persona],
	targets: &[TargetSpec],
	max_assignments: usize,
) -> Vec<PersonaMatchReport> {
	personas.iter().map(|persona| assign_one(persona, targets, max_assignments)).collect()
}

fn assign_one(
	persona: &Persona,
	targets: &[TargetSpec],
	max_assignments: usize,
) -> PersonaMatchReport {
	let mut scored: Vec<(usize, u32, Vec<String>, Vec<String>)> = targets
		.iter()
		.enumerate()
		.map(|(index, target)| {
			let blob = target_blob(target);
			let skills = overlap(&persona.skills, &blob);
			let domains = overlap(&persona.domains, &blob);
			let interests = overlap(&persona.interests, &blob);
			let score = skills.len() as u32 * 2 + domains.len() as u32 + interests.len() as u32;

			(index, score, skills, domains)
		})
		.collect();

	scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

	let assignments = scored
		.into_iter()
		.take(max_assignments)
		.map(|(index, score, skills, domains)| {
			let mut bits = Vec::new();

			if !skills.is_empty() {
				bits.push(format!("skills match: {}", skills.join(", ")));
			}
			if !domains.is_empty() {
				bits.push(format!("domain experience in {}", domains.join(", ")));
			}
			if bits.is_empty() {
				bits.push("relevant interests based on general experience".to_string());
			}

			Assignment {
				target: targets[index].name.clone(),
				confidence: confidence_for(score),
				justification: format!("Rule-based match ({}).", bits.join("; ")),
			}
		})
		.collect();

	PersonaMatchReport {
		persona_id: persona.id.clone(),
		persona_name: persona.name.clone(),
		assignments,
		overall_summary: "Rule-based recommendation generated without the reasoning service."
			.to_string(),
	}
}

fn confidence_for(score: u32) -> Confidence {
	if score >= 6 {
		Confidence::High
	} else if score >= 3 {
		Confidence::Medium
	} else {
		Confidence::Low
	}
}

fn target_blob(target: &TargetSpec) -> String {
	format!(
		"{} {} {} {}",
		target.name,
		target.description,
		target.required_capabilities.join(" "),
		target.notes
	)
	.to_lowercase()
}

fn overlap(values: &[String], blob: &str) -> Vec<String> {
	let mut found: Vec<String> = Vec::new();

	for value in values {
		let lower = value.to_lowercase();

		if blob.contains(&lower) && !found.contains(&lower) {
			found.push(lower);
		}
	}

	found
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile(login: &str, tags: &[&str], expertise: &[&str], frameworks: &[&str]) -> Profile {
		Profile {
			login: login.to_string(),
			name: login.to_string(),
			avatar_url: String::new(),
			total_events: 2,
			primary_tags: tags.iter().map(|tag| tag.to_string()).collect(),
			source: "acme/api".to_string(),
			expertise_areas: expertise.iter().map(|area| area.to_string()).collect(),
			frameworks: frameworks.iter().map(|name| name.to_string()).collect(),
			work_style: "steady".to_string(),
			activity_pattern: "Made 2 commits".to_string(),
			summary: "summary".to_string(),
			best_for: Vec::new(),
			degraded: false,
		}
	}

	fn persona(id: &str, skills: &[&str], domains: &[&str]) -> Persona {
		Persona {
			id: id.to_string(),
			name: id.to_string(),
			headline: String::new(),
			skills: skills.iter().map(|skill| skill.to_string()).collect(),
			domains: domains.iter().map(|domain| domain.to_string()).collect(),
			interests: Vec::new(),
			work_style: String::new(),
		}
	}

	fn target(name: &str, description: &str, capabilities: &[&str]) -> TargetSpec {
		TargetSpec {
			name: name.to_string(),
			description: description.to_string(),
			required_capabilities: capabilities
				.iter()
				.map(|capability| capability.to_string())
				.collect(),
			notes: String::new(),
		}
	}

	#[test]
	fn keyword_search_ranks_by_score_and_caps_at_top_k() {
		let profiles = vec![
			profile("alice", &["Rust"], &["Distributed systems"], &["axum"]),
			profile("bob", &["Python"], &["Data pipelines"], &[]),
			profile("carol", &["Rust"], &[], &[]),
		];
		let matches = keyword_search("rust systems work with axum", &profiles, 2);

		assert_eq!(matches.len(), 2);
		assert_eq!(matches[0].profile.login, "alice");
		assert!(matches[0].relevance_score > matches[1].relevance_score);
	}

	#[test]
	fn keyword_search_skips_zero_score_profiles() {
		let profiles = vec![profile("bob", &["Python"], &["Data pipelines"], &[])];

		assert!(keyword_search("embedded firmware", &profiles, 3).is_empty());
	}

	#[test]
	fn assignment_confidence_follows_the_thresholds() {
		let personas = vec![persona("p1", &["rust", "grpc", "postgres"], &["payments"])];
		let targets = vec![
			target("Ledger", "A payments ledger in rust with grpc and postgres", &["rust"]),
			target("Docs", "A documentation portal", &[]),
		];
		let reports = assign(&personas, &targets, 3);
		let assignments = &reports[0].assignments;

		assert_eq!(assignments[0].target, "Ledger");
		assert_eq!(assignments[0].confidence, Confidence::High);
		assert_eq!(assignments[1].target, "Docs");
		assert_eq!(assignments[1].confidence, Confidence::Low);
	}

	#[test]
	fn assignment_is_deterministic_for_equal_scores() {
		let personas = vec![persona("p1", &[], &[])];
		let targets = vec![target("A", "x", &[]), target("B", "y", &[])];
		let first = assign(&personas, &targets, 2);
		let second = assign(&personas, &targets, 2);

		assert_eq!(first[0].assignments[0].target, "A");
		assert_eq!(second[0].assignments[0].target, "A");
	}
}
