use std::time::Duration;

use color_eyre::Result;
use reqwest::{
	Client,
	header::{HeaderMap, HeaderValue, USER_AGENT},
};
use serde::Deserialize;

use dossier_config::RecordProviderConfig;
use dossier_domain::activity::{EventAuthor, RawEventRecord};

const USER_AGENT_VALUE: &str = "dossier";

#[derive(Debug, Deserialize)]
struct CommitListItem {
	sha: String,
	commit: CommitBody,
	author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
	message: String,
	author: Option<CommitMeta>,
}

#[derive(Debug, Deserialize)]
struct CommitMeta {
	name: Option<String>,
	date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
	login: String,
	avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CommitDetail {
	#[serde(default)]
	stats: CommitStats,
	#[serde(default)]
	files: Vec<CommitFile>,
}

#[derive(Debug, Default, Deserialize)]
struct CommitStats {
	#[serde(default)]
	additions: u64,
	#[serde(default)]
	deletions: u64,
}

#[derive(Debug, Deserialize)]
struct CommitFile {
	filename: String,
}

/// Lists the most recent commits for a source ref (newest first), then
/// fetches per-commit detail for paths and size counters. A failed detail
/// fetch degrades that record to empty paths and zero counters instead of
/// failing the batch; a record without an author is kept and left for the
/// aggregator to drop.
pub async fn fetch_recent_events(
	cfg: &RecordProviderConfig,
	source: &str,
	limit: u32,
) -> Result<Vec<RawEventRecord>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let repo = normalize_source(source);
	let url = format!("{}/repos/{}/commits", cfg.api_base, repo);
	let listed: Vec<CommitListItem> = client
		.get(url)
		.query(&[("per_page", limit)])
		.headers(headers(cfg)?)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;
	let mut records = Vec::with_capacity(listed.len());

	for item in listed {
		let CommitListItem { sha, commit, author } = item;
		let CommitBody { message, author: meta } = commit;
		let detail = fetch_detail(&client, cfg, &repo, &sha).await.unwrap_or_default();

		records.push(RawEventRecord {
			author: author.map(|author| EventAuthor {
				login: author.login,
				name: meta.as_ref().and_then(|meta| meta.name.clone()),
				avatar_url: author.avatar_url,
			}),
			message,
			timestamp: meta.and_then(|meta| meta.date),
			additions: detail.stats.additions,
			deletions: detail.stats.deletions,
			paths: detail.files.into_iter().map(|file| file.filename).collect(),
		});
	}

	Ok(records)
}

/// Accepts a full repository URL or a bare `owner/repo` ref.
pub fn normalize_source(source: &str) -> String {
	let trimmed = source.trim().trim_end_matches('/');

	if !trimmed.starts_with("http") {
		return trimmed.to_string();
	}

	let tail = trimmed.rsplit("github.com/").next().unwrap_or(trimmed);
	let mut segments = tail.split('/').filter(|segment| !segment.is_empty());

	match (segments.next(), segments.next()) {
		(Some(owner), Some(repo)) => format!("{owner}/{repo}"),
		_ => trimmed.to_string(),
	}
}

async fn fetch_detail(
	client: &Client,
	cfg: &RecordProviderConfig,
	repo: &str,
	sha: &str,
) -> Result<CommitDetail> {
	let url = format!("{}/repos/{}/commits/{}", cfg.api_base, repo, sha);
	let detail = client
		.get(url)
		.headers(headers(cfg)?)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	Ok(detail)
}

fn headers(cfg: &RecordProviderConfig) -> Result<HeaderMap> {
	let mut headers = if cfg.token.is_empty() {
		crate::base_headers(&cfg.default_headers)?
	} else {
		crate::auth_headers(&cfg.token, &cfg.default_headers)?
	};

	headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

	Ok(headers)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_full_urls_to_owner_repo() {
		assert_eq!(normalize_source("https://github.com/acme/api"), "acme/api");
		assert_eq!(normalize_source("https://github.com/acme/api/"), "acme/api");
		assert_eq!(normalize_source("http://github.com/acme/api/tree/main"), "acme/api");
	}

	#[test]
	fn passes_bare_refs_through() {
		assert_eq!(normalize_source("acme/api"), "acme/api");
		assert_eq!(normalize_source("  acme/api  "), "acme/api");
	}

	#[test]
	fn degraded_detail_parses_from_empty_object() {
		let detail: CommitDetail = serde_json::from_str("{}").expect("parse failed");

		assert_eq!(detail.stats.additions, 0);
		assert!(detail.files.is_empty());
	}
}
