use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use dossier_domain::{
	activity::{self, ActivitySummary},
	evidence::{self, EvidenceBundle},
	merge::merge_profiles,
	profile::{self, Profile, SynthesizedFields},
	repair,
};

use crate::{DossierService, Error, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SynthesizeRequest {
	pub sources: Vec<String>,
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceFailure {
	pub source: String,
	pub reason: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SynthesizeResponse {
	pub profiles: Vec<Profile>,
	pub failed_sources: Vec<SourceFailure>,
	pub live_reasoning: bool,
}

impl DossierService {
	/// Aggregates each source, synthesizes a profile per qualifying entity,
	/// merges the results into the stored snapshot, and saves the snapshot
	/// whole. An unavailable source is reported in `failed_sources` and
	/// never aborts the run for the remaining sources; only when every
	/// requested source fails does the run surface a source error.
	pub async fn synthesize_profiles(&self, req: SynthesizeRequest) -> Result<SynthesizeResponse> {
		let sources: Vec<String> = req
			.sources
			.iter()
			.map(|source| source.trim().to_string())
			.filter(|source| !source.is_empty())
			.collect();

		if sources.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one source is required.".to_string(),
			});
		}

		let limit = req.limit.unwrap_or(self.cfg.activity.event_limit);
		let mut snapshot: BTreeMap<String, Profile> = self
			.store
			.load_profiles()?
			.into_iter()
			.map(|profile| (profile.login.clone(), profile))
			.collect();
		let mut failed_sources = Vec::new();

		for source in &sources {
			let fetched = self
				.providers
				.records
				.fetch_recent_events(&self.cfg.providers.records, source, limit)
				.await;
			let records = match fetched {
				Ok(records) => records,
				Err(err) => {
					tracing::warn!(%source, "Record fetch failed: {err}.");
					failed_sources
						.push(SourceFailure { source: source.clone(), reason: err.to_string() });

					continue;
				},
			};

			for (login, summary) in activity::aggregate(&records) {
				if summary.event_count() < self.cfg.activity.min_events {
					continue;
				}

				let incoming = self.synthesize_one(&summary, source).await;
				let merged = match snapshot.get(&login) {
					Some(existing) => merge_profiles(
						existing,
						&incoming,
						self.cfg.activity.max_capabilities as usize,
					),
					None => incoming,
				};

				snapshot.insert(login, merged);
			}
		}

		if failed_sources.len() == sources.len() {
			let reason = failed_sources
				.first()
				.map(|failure| failure.reason.clone())
				.unwrap_or_default();

			return Err(Error::Source {
				reference: sources.join(", "),
				message: reason,
			});
		}

		let profiles: Vec<Profile> = snapshot.into_values().collect();

		self.store.save_profiles(&profiles)?;

		Ok(SynthesizeResponse { profiles, failed_sources, live_reasoning: self.live_reasoning() })
	}

	/// Never fails past this boundary: one completion attempt, and any
	/// transport or validation failure yields the deterministic fallback
	/// profile instead of an error.
	async fn synthesize_one(&self, summary: &ActivitySummary, source: &str) -> Profile {
		let primary_tags = self.cfg.activity.primary_tags as usize;

		if !self.live_reasoning() {
			return profile::build_profile(
				summary,
				source,
				primary_tags,
				profile::fallback_fields(summary.event_count(), source),
				true,
			);
		}

		let bundle = evidence::select(summary, &crate::evidence_caps(&self.cfg));
		let prompt = build_synthesis_prompt(&bundle, source);
		let fields = match self
			.providers
			.reasoning
			.complete(&self.cfg.providers.reasoning, &prompt)
			.await
		{
			Ok(raw) => parse_synthesized_fields(&raw),
			Err(err) => {
				tracing::warn!(login = %summary.login, "Completion call failed: {err}.");

				None
			},
		};

		match fields {
			Some(fields) => profile::build_profile(summary, source, primary_tags, fields, false),
			None => {
				tracing::warn!(login = %summary.login, "Synthesis degraded to fallback profile.");

				profile::build_profile(
					summary,
					source,
					primary_tags,
					profile::fallback_fields(summary.event_count(), source),
					true,
				)
			},
		}
	}
}

fn parse_synthesized_fields(raw: &str) -> Option<SynthesizedFields> {
	serde_json::from_str(repair::strip_fences(raw)).ok()
}

/// The prompt contains capped evidence plus fixed instructional text, and
/// nothing else.
fn build_synthesis_prompt(bundle: &EvidenceBundle, source: &str) -> String {
	let tags = bundle
		.top_tags
		.iter()
		.map(|entry| format!("{} ({} files)", entry.tag, entry.count))
		.collect::<Vec<_>>()
		.join(", ");
	let messages =
		bundle.messages.iter().map(|line| format!("- {line}")).collect::<Vec<_>>().join("\n");
	let paths = bundle.paths.iter().map(|path| format!("- {path}")).collect::<Vec<_>>().join("\n");

	format!(
		"Analyze this contributor's activity and create a concise profile.\n\n\
		 Contributor: {login}\n\
		 Source: {source}\n\
		 Total Commits: {events}\n\
		 Average Lines Added per Commit: {additions:.0}\n\
		 Average Lines Deleted per Commit: {deletions:.0}\n\
		 Top Languages: {tags}\n\n\
		 Recent Commit Messages:\n{messages}\n\n\
		 Sample File Paths Modified:\n{paths}\n\n\
		 Generate a JSON object with these exact fields:\n\
		 {{\n\
		   \"expertise_areas\": [\"3-5 specific technical areas based on files and commits\"],\n\
		   \"frameworks\": [\"2-4 frameworks or libraries inferred from paths and messages\"],\n\
		   \"work_style\": \"2-4 word description of their coding style\",\n\
		   \"activity_pattern\": \"one sentence describing their commit habits\",\n\
		   \"summary\": \"2-3 sentence professional profile\",\n\
		   \"best_for\": [\"3-4 specific things they would be excellent to consult on\"]\n\
		 }}\n\n\
		 Rules:\n\
		 - Be specific and evidence-based; cite file types and commit patterns.\n\
		 - Infer frameworks from file paths and commit messages only.\n\
		 - Return ONLY valid JSON with no markdown fences or surrounding text.",
		login = bundle.login,
		events = bundle.event_count,
		additions = bundle.mean_additions,
		deletions = bundle.mean_deletions,
	)
}
