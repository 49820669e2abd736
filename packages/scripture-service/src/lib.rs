pub mod search;

mod error;
mod resolve;

pub use error::{Error, Result};
pub use search::{SearchHit, SearchRequest};

use std::{future::Future, pin::Pin, sync::Arc};

use scripture_config::{Config, EmbeddingProviderConfig};
use scripture_corpus::Corpora;
use scripture_domain::similarity::Ranker;
use scripture_providers::embedding;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>>;
}

/// Serves queries against the shared corpora. Cheap to share behind an `Arc`.
pub struct SearchService {
	pub cfg: Config,
	pub corpora: Arc<Corpora>,
	ranker: Arc<Ranker>,
	provider: Arc<dyn EmbeddingProvider>,
}
impl SearchService {
	pub fn new(cfg: Config, corpora: Arc<Corpora>) -> Result<Self> {
		Self::with_provider(cfg, corpora, Arc::new(DefaultProvider))
	}

	pub fn with_provider(
		cfg: Config,
		corpora: Arc<Corpora>,
		provider: Arc<dyn EmbeddingProvider>,
	) -> Result<Self> {
		let ranker = Ranker::new(cfg.search.ranker_workers as usize)?;

		Ok(Self { cfg, corpora, ranker: Arc::new(ranker), provider })
	}
}

struct DefaultProvider;
impl EmbeddingProvider for DefaultProvider {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}
