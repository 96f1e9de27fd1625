use serde::{Deserialize, Serialize};

use dossier_domain::profile::Profile;

use crate::{DossierService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProfilesResponse {
	pub profiles: Vec<Profile>,
	pub count: usize,
}

impl DossierService {
	pub fn profiles(&self) -> Result<ProfilesResponse> {
		let profiles = self.store.load_profiles()?;
		let count = profiles.len();

		Ok(ProfilesResponse { profiles, count })
	}
}
