use std::time::Duration;

use tokio::time;

use scripture_domain::{
	merge,
	reference::{Granularity, ParsedReference},
};

use crate::{Error, Result, SearchService};

impl SearchService {
	/// Picks the query vector: the stored vector of a verbatim reference when the corpus has
	/// one, otherwise an embedding of the query. Passage ranges are embedded by their text.
	pub(crate) async fn resolve_vector(
		&self,
		granularity: Granularity,
		query: &str,
		reference: Option<&ParsedReference>,
	) -> Result<Vec<f32>> {
		let corpus = self.corpora.for_granularity(granularity);
		let mut text = query.to_string();

		if let Some(reference) = reference {
			if granularity == Granularity::Passage
				&& reference.has_range()
				&& let Some(passage) = merge::reference_passage(reference, &self.corpora.verse_index)
			{
				tracing::debug!(reference = %reference, "Embedding passage text in place of the citation.");

				text = passage.text;
			}
			if let Some(location) = reference.canonical_location(granularity)
				&& let Some(unit) = corpus.get(&location)
			{
				tracing::debug!(%location, "Using stored vector for exact reference.");

				return Ok(unit.vector.clone());
			}
		}

		let vector = self.embed_with_retry(text).await?;

		if vector.len() != corpus.dimension() {
			return Err(Error::DimensionMismatch {
				location: "query".to_string(),
				expected: corpus.dimension(),
				actual: vector.len(),
			});
		}

		Ok(vector)
	}

	async fn embed_with_retry(&self, text: String) -> Result<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let texts = vec![text];
		let timeout = Duration::from_millis(cfg.timeout_ms);
		let max_backoff = Duration::from_millis(cfg.retry.max_backoff_ms);
		let mut backoff = Duration::from_millis(cfg.retry.initial_backoff_ms);
		let mut attempt = 0;

		loop {
			attempt += 1;

			let outcome = match time::timeout(timeout, self.provider.embed(cfg, &texts)).await {
				Ok(outcome) => outcome,
				Err(_) => Err(scripture_providers::Error::Timeout { timeout_ms: cfg.timeout_ms }),
			};

			match outcome {
				Ok(mut vectors) =>
					return vectors.pop().ok_or_else(|| Error::EmbeddingProvider {
						attempts: attempt,
						message: "Provider returned no vectors.".to_string(),
					}),
				Err(err) if err.is_retryable() && attempt < cfg.retry.max_attempts => {
					tracing::warn!(
						attempt,
						error = %err,
						backoff_ms = backoff.as_millis() as u64,
						"Embedding call failed. Retrying."
					);

					time::sleep(backoff).await;

					backoff = (backoff * 2).min(max_backoff);
				},
				Err(err) => {
					tracing::error!(attempt, error = %err, "Embedding call failed.");

					return Err(Error::EmbeddingProvider { attempts: attempt, message: err.to_string() });
				},
			}
		}
	}
}
