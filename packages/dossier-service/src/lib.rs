pub mod assignment;
pub mod offline;
pub mod profiles;
pub mod search;
pub mod synthesize;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use dossier_config::{Config, ReasoningProviderConfig, RecordProviderConfig};
use dossier_domain::{activity::RawEventRecord, evidence::EvidenceCaps};
use dossier_providers::{reasoning, records};
use dossier_store::ProfileStore;

pub use dossier_domain::matching::AssignmentSnapshot;
pub use profiles::ProfilesResponse;
pub use search::{SearchRequest, SearchResponse};
pub use synthesize::{SourceFailure, SynthesizeRequest, SynthesizeResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait RecordSource
where
	Self: Send + Sync,
{
	fn fetch_recent_events<'a>(
		&'a self,
		cfg: &'a RecordProviderConfig,
		source: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<RawEventRecord>>>;
}

pub trait Reasoning
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a ReasoningProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub records: Arc<dyn RecordSource>,
	pub reasoning: Arc<dyn Reasoning>,
}

pub struct DossierService {
	pub cfg: Config,
	pub store: ProfileStore,
	pub providers: Providers,
}

struct DefaultProviders;

impl RecordSource for DefaultProviders {
	fn fetch_recent_events<'a>(
		&'a self,
		cfg: &'a RecordProviderConfig,
		source: &'a str,
		limit: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<RawEventRecord>>> {
		Box::pin(records::fetch_recent_events(cfg, source, limit))
	}
}

impl Reasoning for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a ReasoningProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(reasoning::complete(cfg, prompt))
	}
}

impl Providers {
	pub fn new(records: Arc<dyn RecordSource>, reasoning: Arc<dyn Reasoning>) -> Self {
		Self { records, reasoning }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { records: provider.clone(), reasoning: provider }
	}
}

impl DossierService {
	pub fn new(cfg: Config) -> Self {
		let store = ProfileStore::new(&cfg.storage);

		Self { cfg, store, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		let store = ProfileStore::new(&cfg.storage);

		Self { cfg, store, providers }
	}

	/// Live reasoning means credentials are configured, not that the service
	/// is reachable; reachability failures surface per operation.
	pub fn live_reasoning(&self) -> bool {
		!self.cfg.providers.reasoning.api_key.is_empty()
	}
}

pub(crate) fn evidence_caps(cfg: &Config) -> EvidenceCaps {
	EvidenceCaps {
		top_tags: cfg.activity.top_tags as usize,
		max_paths: cfg.activity.max_paths as usize,
		max_messages: cfg.activity.max_messages as usize,
		max_message_chars: cfg.activity.max_message_chars as usize,
	}
}
