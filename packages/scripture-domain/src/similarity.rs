use std::cmp::Ordering;

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{
	Error, Result,
	corpus::{CorpusUnit, ScoredUnit},
};

/// Cosine similarity of two equal-length vectors. A zero-norm side scores 0.0.
pub fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> Option<f32> {
	if lhs.len() != rhs.len() {
		return None;
	}

	let mut dot = 0.0_f32;
	let mut lhs_norm = 0.0_f32;
	let mut rhs_norm = 0.0_f32;

	for (l, r) in lhs.iter().zip(rhs.iter()) {
		dot += l * r;
		lhs_norm += l * l;
		rhs_norm += r * r;
	}

	if lhs_norm == 0.0 || rhs_norm == 0.0 {
		return Some(0.0);
	}

	Some(dot / (lhs_norm.sqrt() * rhs_norm.sqrt()))
}

pub fn cmp_f32_desc(lhs: f32, rhs: f32) -> Ordering {
	rhs.total_cmp(&lhs)
}

pub fn sort_by_similarity(units: &mut [ScoredUnit<'_>]) {
	units.sort_by(|left, right| cmp_f32_desc(left.similarity, right.similarity));
}

/// Scores corpus units against a query vector on a fixed-width worker pool.
///
/// Unit indices are split into one contiguous chunk per worker; [`Ranker::rank`] returns only
/// after every chunk has been scored.
pub struct Ranker {
	pool: ThreadPool,
	workers: usize,
}
impl Ranker {
	pub fn new(workers: usize) -> Result<Self> {
		if workers == 0 {
			return Err(Error::InvalidArgument {
				message: "Ranker needs at least one worker.".to_string(),
			});
		}

		let pool = ThreadPoolBuilder::new()
			.num_threads(workers)
			.thread_name(|idx| format!("ranker-{idx}"))
			.build()
			.map_err(|err| Error::InvalidArgument {
				message: format!("Failed to build ranker pool: {err}."),
			})?;

		Ok(Self { pool, workers })
	}

	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Returns one scored copy per unit, sorted by descending similarity. Ties keep no
	/// particular order.
	pub fn rank<'a>(&self, units: &'a [CorpusUnit], query: &[f32]) -> Result<Vec<ScoredUnit<'a>>> {
		if units.is_empty() {
			return Ok(Vec::new());
		}

		let chunk_len = units.len().div_ceil(self.workers);
		let chunks: Vec<Vec<ScoredUnit<'a>>> = self.pool.install(|| {
			units
				.par_chunks(chunk_len)
				.map(|chunk| chunk.iter().map(|unit| score(unit, query)).collect::<Result<Vec<_>>>())
				.collect::<Result<Vec<_>>>()
		})?;
		let mut scored: Vec<ScoredUnit<'a>> = chunks.into_iter().flatten().collect();

		sort_by_similarity(&mut scored);

		Ok(scored)
	}
}

fn score<'a>(unit: &'a CorpusUnit, query: &[f32]) -> Result<ScoredUnit<'a>> {
	let similarity =
		cosine_similarity(&unit.vector, query).ok_or_else(|| Error::DimensionMismatch {
			location: unit.location.clone(),
			expected: query.len(),
			actual: unit.vector.len(),
		})?;

	Ok(ScoredUnit { unit, similarity })
}
