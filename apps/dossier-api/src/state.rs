use std::sync::Arc;

use dossier_service::DossierService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DossierService>,
}
impl AppState {
	pub fn new(config: dossier_config::Config) -> Self {
		Self { service: Arc::new(DossierService::new(config)) }
	}
}
