use serde::{Deserialize, Serialize};

use dossier_domain::{matching::SearchMatch, profile::Profile, repair};

use crate::{DossierService, Error, Result, offline};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchResponse {
	pub query: String,
	pub matches: Vec<SearchMatch>,
	pub message: Option<String>,
	pub live_reasoning: bool,
}

#[derive(Debug, Deserialize)]
struct RawSearchMatch {
	login: String,
	relevance_score: f32,
	match_reason: String,
}

impl DossierService {
	/// Free-text matching over the stored snapshot. An empty store returns
	/// an informational empty response without touching the reasoning
	/// service; unparsable reasoning output is an explicit error because no
	/// safe fallback ranking exists.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim().to_string();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let profiles = self.store.load_profiles()?;

		if profiles.is_empty() {
			return Ok(SearchResponse {
				query,
				matches: Vec::new(),
				message: Some("No profiles available. Synthesize profiles first.".to_string()),
				live_reasoning: self.live_reasoning(),
			});
		}

		if !self.live_reasoning() {
			let matches =
				offline::keyword_search(&query, &profiles, self.cfg.matching.top_k as usize);

			return Ok(SearchResponse {
				query,
				matches,
				message: Some(
					"Offline keyword matching; configure a reasoning api_key for semantic search."
						.to_string(),
				),
				live_reasoning: false,
			});
		}

		let prompt = build_search_prompt(&query, &profiles, self.cfg.matching.top_k)?;
		let raw = self
			.providers
			.reasoning
			.complete(&self.cfg.providers.reasoning, &prompt)
			.await
			.map_err(|err| Error::Provider { message: err.to_string() })?;
		let parsed: Vec<RawSearchMatch> = serde_json::from_str(repair::strip_fences(&raw))
			.map_err(|_| Error::Matching {
				message: "Reasoning output is not a valid match list.".to_string(),
			})?;
		let matches = enrich(parsed, &profiles, self.cfg.matching.top_k as usize);

		Ok(SearchResponse { query, matches, message: None, live_reasoning: true })
	}
}

fn build_search_prompt(query: &str, profiles: &[Profile], top_k: u32) -> Result<String> {
	let serialized = serde_json::to_string_pretty(profiles)
		.map_err(|err| Error::Storage { message: err.to_string() })?;

	Ok(format!(
		"You are a contributor matching system. Given a search query and \
		 contributor profiles, identify the top {top_k} most relevant contributors.\n\n\
		 Query: \"{query}\"\n\n\
		 Contributor Profiles:\n{serialized}\n\n\
		 Rank by technical expertise, relevant frameworks and languages, and work \
		 style alignment when the query mentions it.\n\n\
		 Return ONLY a valid JSON array in this exact format:\n\
		 [\n\
		   {{ \"login\": \"login\", \"relevance_score\": 95, \"match_reason\": \"specific reason citing their expertise\" }}\n\
		 ]\n\n\
		 If fewer than {top_k} profiles match well, return only the good matches. \
		 Do not include markdown or any text outside the JSON array."
	))
}

/// Logins absent from the snapshot are dropped silently; present ones are
/// enriched with the full stored profile.
fn enrich(parsed: Vec<RawSearchMatch>, profiles: &[Profile], top_k: usize) -> Vec<SearchMatch> {
	parsed
		.into_iter()
		.filter_map(|raw| {
			profiles.iter().find(|profile| profile.login == raw.login).map(|profile| SearchMatch {
				profile: profile.clone(),
				relevance_score: raw.relevance_score,
				match_reason: raw.match_reason,
			})
		})
		.take(top_k)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn profile(login: &str) -> Profile {
		Profile {
			login: login.to_string(),
			name: login.to_string(),
			avatar_url: String::new(),
			total_events: 2,
			primary_tags: vec!["Rust".to_string()],
			source: "acme/api".to_string(),
			expertise_areas: vec!["Systems".to_string()],
			frameworks: Vec::new(),
			work_style: "steady".to_string(),
			activity_pattern: "Made 2 commits".to_string(),
			summary: "summary".to_string(),
			best_for: Vec::new(),
			degraded: false,
		}
	}

	#[test]
	fn enrich_drops_logins_missing_from_the_snapshot() {
		let profiles = vec![profile("alice"), profile("bob")];
		let parsed = vec![
			RawSearchMatch {
				login: "alice".to_string(),
				relevance_score: 90.0,
				match_reason: "strong".to_string(),
			},
			RawSearchMatch {
				login: "carol".to_string(),
				relevance_score: 80.0,
				match_reason: "fabricated".to_string(),
			},
		];
		let matches = enrich(parsed, &profiles, 3);

		assert_eq!(matches.len(), 1);
		assert_eq!(matches[0].profile.login, "alice");
		assert_eq!(matches[0].match_reason, "strong");
	}

	#[test]
	fn search_prompt_includes_query_and_profiles() {
		let profiles = vec![profile("alice")];
		let prompt = build_search_prompt("async networking", &profiles, 3).expect("prompt failed");

		assert!(prompt.contains("async networking"));
		assert!(prompt.contains("\"login\": \"alice\""));
	}
}
