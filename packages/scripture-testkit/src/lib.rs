//! Fixtures shared by the service and HTTP tests: a small synthetic corpus, stub embedding
//! providers that never touch the network, and a configuration tuned for fast retries.

use std::{
	path::PathBuf,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::Map;

use scripture_config::{
	ChapterColumns, Config, Corpus, EmbeddingProviderConfig, Providers, Retry, Search, Service,
	VerseColumns,
};
use scripture_corpus::Corpora;
use scripture_domain::corpus::CorpusUnit;
use scripture_providers::Error;
use scripture_service::{BoxFuture, EmbeddingProvider};

pub use reqwest::StatusCode;

/// Dimension of every fixture vector.
pub const DIMENSION: usize = 3;
/// Verses of John 3 present in [`sample_corpora`].
pub const JOHN_3_VERSES: u32 = 20;
/// Verses 14 through 18 of John 3 point along this axis; everything else points along x.
pub const LOVE_VECTOR: [f32; DIMENSION] = [0.0, 1.0, 0.0];

pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			cors_allow_any_origin: true,
		},
		corpus: Corpus {
			chapter_path: PathBuf::from("chapters.csv"),
			verse_path: PathBuf::from("verses.csv"),
			chapter_columns: ChapterColumns::default(),
			verse_columns: VerseColumns::default(),
		},
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				api_key_env: None,
				path: "/embeddings".to_string(),
				model: "stub-embedding".to_string(),
				dimensions: None,
				timeout_ms: 1_000,
				default_headers: Map::new(),
				retry: Retry { max_attempts: 3, initial_backoff_ms: 1, max_backoff_ms: 4 },
			},
		},
		search: Search { ranker_workers: 2, ..Search::default() },
	}
}

/// Chapters John 3, John 4 and Genesis 1, and verses John 3:1 through John 3:20.
pub fn sample_corpora() -> scripture_corpus::Result<Corpora> {
	let chapters = vec![
		unit("John 3", "There was a man of the Pharisees", [0.2, 0.9, 0.1]),
		unit("John 4", "When therefore the Lord knew", [0.9, 0.2, 0.1]),
		unit("Genesis 1", "In the beginning God created", [0.1, 0.1, 0.9]),
	];
	let verses = (1..=JOHN_3_VERSES)
		.map(|verse| {
			let vector = if (14..=18).contains(&verse) {
				[0.05 * (verse - 13) as f32, 1.0, 0.0]
			} else {
				[1.0, 0.1 * verse as f32, 0.0]
			};

			unit(&format!("John 3:{verse}"), &format!("text {verse}"), vector)
		})
		.collect();

	Corpora::new(chapters, verses)
}

fn unit(location: &str, text: &str, vector: [f32; DIMENSION]) -> CorpusUnit {
	CorpusUnit { location: location.to_string(), text: text.to_string(), vector: vector.to_vec() }
}

/// Shared call counter for the stub providers.
#[derive(Clone, Debug, Default)]
pub struct CallCounter(Arc<AtomicUsize>);
impl CallCounter {
	pub fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}

	fn bump(&self) -> usize {
		self.0.fetch_add(1, Ordering::SeqCst) + 1
	}
}

/// Returns the same vector for every input.
pub struct FixedEmbedding {
	pub vector: Vec<f32>,
	pub calls: CallCounter,
}
impl FixedEmbedding {
	pub fn new(vector: Vec<f32>) -> Self {
		Self { vector, calls: CallCounter::default() }
	}
}
impl EmbeddingProvider for FixedEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>> {
		self.calls.bump();

		let vectors = vec![self.vector.clone(); texts.len()];

		Box::pin(async move { Ok(vectors) })
	}
}

/// Answers 503 for the first `failures` calls, then behaves like [`FixedEmbedding`].
pub struct FlakyEmbedding {
	pub failures: usize,
	pub vector: Vec<f32>,
	pub calls: CallCounter,
}
impl FlakyEmbedding {
	pub fn new(failures: usize, vector: Vec<f32>) -> Self {
		Self { failures, vector, calls: CallCounter::default() }
	}
}
impl EmbeddingProvider for FlakyEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>> {
		let call = self.calls.bump();
		let outcome = if call <= self.failures {
			Err(Error::from_status(StatusCode::SERVICE_UNAVAILABLE, "overloaded".to_string()))
		} else {
			Ok(vec![self.vector.clone(); texts.len()])
		};

		Box::pin(async move { outcome })
	}
}

/// Always fails with the given status.
pub struct FailingEmbedding {
	pub status: StatusCode,
	pub calls: CallCounter,
}
impl FailingEmbedding {
	pub fn new(status: StatusCode) -> Self {
		Self { status, calls: CallCounter::default() }
	}
}
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>> {
		self.calls.bump();

		let status = self.status;

		Box::pin(async move { Err(Error::from_status(status, "quota exceeded".to_string())) })
	}
}

/// Never answers, so every call runs into the configured timeout.
#[derive(Default)]
pub struct PendingEmbedding {
	pub calls: CallCounter,
}
impl EmbeddingProvider for PendingEmbedding {
	fn embed<'a>(
		&'a self,
		_cfg: &'a EmbeddingProviderConfig,
		_texts: &'a [String],
	) -> BoxFuture<'a, scripture_providers::Result<Vec<Vec<f32>>>> {
		self.calls.bump();

		Box::pin(std::future::pending())
	}
}
