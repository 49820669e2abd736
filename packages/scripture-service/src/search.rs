use std::sync::Arc;

use serde::{Deserialize, Serialize};

use scripture_config::Search;
use scripture_corpus::Corpora;
use scripture_domain::{
	boost,
	corpus::{PassageCandidate, Scored},
	merge::{self, MergeOptions},
	reference::{self, Granularity, ParsedReference},
	similarity::{self, Ranker},
	window::{self, WindowOptions},
};

use crate::{Error, Result, SearchService};

/// Raw query parameters. Every field is optional so that missing values surface as
/// [`Error::MalformedQuery`] instead of a deserialization rejection.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchRequest {
	pub search_by: Option<String>,
	pub query: Option<String>,
	#[serde(alias = "x")]
	pub limit: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
	pub index: usize,
	pub location: String,
	pub verse: String,
	pub similarity: f32,
}

#[derive(Clone, Debug)]
struct Query {
	granularity: Granularity,
	text: String,
	limit: usize,
}
impl Query {
	fn from_request(req: SearchRequest, max_results: usize) -> Result<Self> {
		let search_by = required(req.search_by, "search_by")?;
		let text = required(req.query, "query")?;
		let granularity = search_by
			.parse::<Granularity>()
			.map_err(|message| Error::MalformedQuery { message })?;
		let limit = match req.limit.as_deref().map(str::trim) {
			None | Some("") => max_results,
			Some(raw) => raw.parse::<usize>().map_err(|_| Error::MalformedQuery {
				message: format!("limit must be a non-negative integer, got {raw:?}."),
			})?,
		};

		Ok(Self { granularity, text, limit: limit.clamp(1, max_results.max(1)) })
	}
}

impl SearchService {
	/// Runs one query end to end and returns hits ordered by descending similarity.
	pub async fn search(&self, req: SearchRequest) -> Result<Vec<SearchHit>> {
		let query = Query::from_request(req, self.cfg.search.max_results as usize)?;
		let reference = reference::parse(&query.text);

		if let Some(reference) = &reference {
			tracing::debug!(%reference, "Query names a reference.");
		}

		let vector = self.resolve_vector(query.granularity, &query.text, reference.as_ref()).await?;
		let corpora = Arc::clone(&self.corpora);
		let ranker = Arc::clone(&self.ranker);
		let search_cfg = self.cfg.search.clone();
		let granularity = query.granularity;
		let hits = tokio::task::spawn_blocking(move || {
			assemble(&corpora, &ranker, &search_cfg, &query, reference.as_ref(), &vector)
		})
		.await
		.map_err(|err| Error::Internal { message: format!("Search worker failed: {err}.") })??;

		tracing::info!(search_by = %granularity, hits = hits.len(), "Search completed.");

		Ok(hits)
	}
}

fn required(value: Option<String>, name: &str) -> Result<String> {
	match value {
		Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
		_ => Err(Error::MalformedQuery { message: format!("{name} is required.") }),
	}
}

fn assemble(
	corpora: &Corpora,
	ranker: &Ranker,
	cfg: &Search,
	query: &Query,
	reference: Option<&ParsedReference>,
	vector: &[f32],
) -> Result<Vec<SearchHit>> {
	let corpus = corpora.for_granularity(query.granularity);
	let mut ranked = ranker.rank(corpus.units(), vector)?;

	boost::boost(&mut ranked, reference, query.granularity);
	similarity::sort_by_similarity(&mut ranked);

	if query.granularity != Granularity::Passage {
		return Ok(ranked
			.iter()
			.take(query.limit)
			.enumerate()
			.map(|(index, scored)| SearchHit {
				index,
				location: scored.unit.location.clone(),
				verse: scored.unit.text.clone(),
				similarity: scored.similarity,
			})
			.collect());
	}

	let windows = window::select_windows(
		&ranked,
		&WindowOptions {
			window_size: cfg.passage.window_size as usize,
			num_sequences: cfg.passage.num_sequences as usize,
			respect_chapter_boundaries: cfg.passage.respect_chapter_boundaries,
		},
	)?;
	let verse_hits = ranked.iter().take(cfg.passage.verse_hits as usize);
	let items = windows
		.iter()
		.map(|candidate| candidate as &dyn Scored)
		.chain(verse_hits.map(|scored| scored as &dyn Scored));
	let passages = merge::merge(
		items,
		reference,
		&corpora.verse_index,
		&MergeOptions {
			keep_single_verse_runs: cfg.passage.keep_single_verse_runs,
			drop_lowest_after_reference: cfg.passage.drop_lowest_after_reference,
		},
	);

	Ok(passages
		.into_iter()
		.enumerate()
		.map(|(index, passage)| passage_hit(index, passage))
		.collect())
}

fn passage_hit(index: usize, passage: PassageCandidate) -> SearchHit {
	SearchHit { index, location: passage.location, verse: passage.text, similarity: passage.score }
}
