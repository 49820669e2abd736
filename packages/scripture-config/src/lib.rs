mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	ChapterColumns, Config, Corpus, EmbeddingProviderConfig, Passage, Providers, Retry, Search,
	Service, VerseColumns,
};

use std::{env, fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg)?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	for (label, path) in
		[("corpus.chapter_path", &cfg.corpus.chapter_path), ("corpus.verse_path", &cfg.corpus.verse_path)]
	{
		if path.as_os_str().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	let chapter = &cfg.corpus.chapter_columns;

	if has_duplicates(&[chapter.book, chapter.chapter, chapter.text, chapter.vector]) {
		return Err(Error::Validation {
			message: "corpus.chapter_columns must name distinct columns.".to_string(),
		});
	}

	let verse = &cfg.corpus.verse_columns;

	if has_duplicates(&[verse.location, verse.text, verse.vector]) {
		return Err(Error::Validation {
			message: "corpus.verse_columns must name distinct columns.".to_string(),
		});
	}

	let embedding = &cfg.providers.embedding;

	for (label, value) in [
		("providers.embedding.provider_id", &embedding.provider_id),
		("providers.embedding.api_base", &embedding.api_base),
		("providers.embedding.model", &embedding.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "Provider embedding api_key must be non-empty.".to_string(),
		});
	}
	if embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if embedding.dimensions == Some(0) {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero when set."
				.to_string(),
		});
	}
	if embedding.retry.max_attempts == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.retry.max_attempts must be greater than zero."
				.to_string(),
		});
	}
	if embedding.retry.initial_backoff_ms > embedding.retry.max_backoff_ms {
		return Err(Error::Validation {
			message: "providers.embedding.retry.initial_backoff_ms must not exceed max_backoff_ms."
				.to_string(),
		});
	}

	for (label, header) in &embedding.default_headers {
		if !header.is_string() {
			return Err(Error::Validation {
				message: format!("providers.embedding.default_headers.{label} must be a string."),
			});
		}
	}

	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if cfg.search.ranker_workers == 0 {
		return Err(Error::Validation {
			message: "search.ranker_workers must be greater than zero.".to_string(),
		});
	}
	if cfg.search.passage.window_size == 0 {
		return Err(Error::Validation {
			message: "search.passage.window_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.passage.num_sequences == 0 {
		return Err(Error::Validation {
			message: "search.passage.num_sequences must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) -> Result<()> {
	let embedding = &mut cfg.providers.embedding;

	if embedding.api_key_env.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false) {
		embedding.api_key_env = None;
	}
	if embedding.api_key.trim().is_empty()
		&& let Some(name) = embedding.api_key_env.as_deref()
	{
		embedding.api_key = env::var(name)
			.map_err(|err| Error::MissingEnv { name: name.to_string(), source: err })?;
	}

	embedding.api_base = embedding.api_base.trim_end_matches('/').to_string();

	Ok(())
}

fn has_duplicates(columns: &[usize]) -> bool {
	columns.iter().enumerate().any(|(idx, column)| columns[..idx].contains(column))
}
