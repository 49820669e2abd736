use std::sync::Arc;

use scripture_corpus::Corpora;
use scripture_service::SearchService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	/// Loads both corpora from disk and wires the default embedding provider.
	pub fn new(config: scripture_config::Config) -> color_eyre::Result<Self> {
		let corpora = Corpora::load(&config.corpus)?;
		let service = SearchService::new(config, Arc::new(corpora))?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: SearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
