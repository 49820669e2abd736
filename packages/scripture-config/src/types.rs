use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
	#[serde(default = "default_true")]
	pub cors_allow_any_origin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Corpus {
	pub chapter_path: PathBuf,
	pub verse_path: PathBuf,
	#[serde(default)]
	pub chapter_columns: ChapterColumns,
	#[serde(default)]
	pub verse_columns: VerseColumns,
}

/// Zero-based column positions of the chapter CSV.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChapterColumns {
	pub book: usize,
	pub chapter: usize,
	pub text: usize,
	pub vector: usize,
}
impl Default for ChapterColumns {
	fn default() -> Self {
		Self { book: 1, chapter: 2, text: 3, vector: 5 }
	}
}

/// Zero-based column positions of the verse CSV. The location column already holds
/// "<book> <chapter>:<verse>".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerseColumns {
	pub location: usize,
	pub text: usize,
	pub vector: usize,
}
impl Default for VerseColumns {
	fn default() -> Self {
		Self { location: 1, text: 2, vector: 4 }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	/// Optional. Environment variable consulted when `api_key` is empty.
	pub api_key_env: Option<String>,
	pub path: String,
	pub model: String,
	/// Optional. Forwarded to providers that support shortened embeddings.
	pub dimensions: Option<u32>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	#[serde(default)]
	pub retry: Retry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retry {
	pub max_attempts: u32,
	pub initial_backoff_ms: u64,
	pub max_backoff_ms: u64,
}
impl Default for Retry {
	fn default() -> Self {
		Self { max_attempts: 3, initial_backoff_ms: 200, max_backoff_ms: 2_000 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result cap for verse and chapter searches.
	pub max_results: u32,
	pub ranker_workers: u32,
	pub passage: Passage,
}
impl Default for Search {
	fn default() -> Self {
		Self { max_results: 50, ranker_workers: 8, passage: Passage::default() }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Passage {
	pub window_size: u32,
	pub num_sequences: u32,
	/// Number of top-ranked verses merged alongside the selected windows.
	pub verse_hits: u32,
	pub keep_single_verse_runs: bool,
	pub drop_lowest_after_reference: bool,
	pub respect_chapter_boundaries: bool,
}
impl Default for Passage {
	fn default() -> Self {
		Self {
			window_size: 5,
			num_sequences: 500,
			verse_hits: 0,
			keep_single_verse_runs: false,
			drop_lowest_after_reference: true,
			respect_chapter_boundaries: false,
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_true() -> bool {
	true
}
