use std::collections::BTreeMap;

use crate::{
	EXACT_MATCH_SCORE,
	corpus::{PassageCandidate, Scored},
	location,
	reference::ParsedReference,
	similarity::cmp_f32_desc,
	verse_index::VerseTextIndex,
};

/// Largest verse gap that still joins two hits into one run.
pub const MAX_VERSE_GAP: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeOptions {
	/// Emit runs made of a single hit instead of dropping them.
	pub keep_single_verse_runs: bool,
	/// After appending the reference passage, drop the lowest-scoring candidate.
	pub drop_lowest_after_reference: bool,
}
impl Default for MergeOptions {
	fn default() -> Self {
		Self { keep_single_verse_runs: false, drop_lowest_after_reference: true }
	}
}

/// Assembles window and verse hits into contiguous passages.
///
/// Hits are grouped per chapter by their starting verse and joined while consecutive starts
/// are at most [`MAX_VERSE_GAP`] apart. Each run's text is back-filled from `index` across the
/// whole span; its score is the mean of the hits that formed it. A parsed reference adds one
/// passage scored [`EXACT_MATCH_SCORE`]. Output is sorted by descending score.
pub fn merge<I>(
	items: I,
	reference: Option<&ParsedReference>,
	index: &VerseTextIndex,
	options: &MergeOptions,
) -> Vec<PassageCandidate>
where
	I: IntoIterator,
	I::Item: Scored,
{
	let mut chapters: BTreeMap<String, Vec<(u32, f32)>> = BTreeMap::new();

	for item in items {
		let Some(parsed) = location::parse_verse(item.location()) else {
			tracing::debug!(location = %item.location(), "Skipping hit without a verse location.");

			continue;
		};

		chapters.entry(parsed.chapter_key.to_string()).or_default().push((parsed.verse, item.score()));
	}

	let mut candidates = Vec::new();

	for (chapter_key, mut hits) in chapters {
		hits.sort_by_key(|(verse, _)| *verse);

		for run in split_runs(&hits) {
			if run.len() < 2 && !options.keep_single_verse_runs {
				continue;
			}

			let first = run[0].0;
			let last = run[run.len() - 1].0;
			let score = run.iter().map(|(_, score)| *score).sum::<f32>() / run.len() as f32;

			candidates.push(PassageCandidate {
				location: location::range(&chapter_key, first, last),
				text: index.range_text(&chapter_key, first, last),
				score,
			});
		}
	}

	if let Some(passage) = reference.and_then(|reference| reference_passage(reference, index)) {
		candidates.push(passage);
		candidates.sort_by(|left, right| cmp_f32_desc(left.score, right.score));

		if options.drop_lowest_after_reference {
			candidates.pop();
		}
	}

	candidates.sort_by(|left, right| cmp_f32_desc(left.score, right.score));

	candidates
}

/// The passage a parsed reference names, read from `index`.
///
/// A missing or inverted end verse becomes `verse_start + 2`; the end is then clamped to the
/// last verse of the chapter. Chapter-only references, chapters absent from the index and
/// ranges with no indexed text yield `None`.
pub fn reference_passage(
	reference: &ParsedReference,
	index: &VerseTextIndex,
) -> Option<PassageCandidate> {
	if reference.is_chapter_only() {
		return None;
	}

	let chapter_key = reference.chapter_key();
	let last = index.last_verse(&chapter_key)?;
	let start = reference.verse_start();
	let mut end = reference.verse_end();

	if end <= start {
		end = start.saturating_add(2);
	}

	end = end.min(last).max(start);

	let text = index.range_text(&chapter_key, start, end);

	if text.is_empty() {
		return None;
	}

	Some(PassageCandidate {
		location: location::range(&chapter_key, start, end),
		text,
		score: EXACT_MATCH_SCORE,
	})
}

fn split_runs(hits: &[(u32, f32)]) -> Vec<&[(u32, f32)]> {
	let mut runs = Vec::new();
	let mut start = 0;

	for idx in 1..hits.len() {
		if hits[idx].0 - hits[idx - 1].0 > MAX_VERSE_GAP {
			runs.push(&hits[start..idx]);

			start = idx;
		}
	}

	if start < hits.len() {
		runs.push(&hits[start..]);
	}

	runs
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{corpus::CorpusUnit, reference};

	fn index(chapter_key: &str, verses: u32) -> VerseTextIndex {
		let units: Vec<CorpusUnit> = (1..=verses)
			.map(|verse| CorpusUnit {
				location: format!("{chapter_key}:{verse}"),
				text: format!("v{verse}"),
				vector: vec![1.0],
			})
			.collect();

		VerseTextIndex::build(&units)
	}

	fn hit(location: &str, score: f32) -> PassageCandidate {
		PassageCandidate { location: location.to_string(), text: String::new(), score }
	}

	#[test]
	fn near_contiguous_hits_form_one_back_filled_run() {
		let index = index("John 3", 10);
		let hits = vec![hit("John 3:1", 0.9), hit("John 3:2", 0.8), hit("John 3:4", 0.7)];
		let merged = merge(&hits, None, &index, &MergeOptions::default());

		assert_eq!(merged.len(), 1);
		assert_eq!(merged[0].location, "John 3:1-4");
		assert_eq!(merged[0].text, "1 v1 2 v2 3 v3 4 v4");
		assert!((merged[0].score - (0.9 + 0.8 + 0.7) / 3.0).abs() < 1e-6);
	}

	#[test]
	fn isolated_verse_is_dropped() {
		let index = index("John 3", 20);
		let hits = vec![hit("John 3:16", 0.95)];

		assert!(merge(&hits, None, &index, &MergeOptions::default()).is_empty());

		let kept = merge(
			&hits,
			None,
			&index,
			&MergeOptions { keep_single_verse_runs: true, drop_lowest_after_reference: true },
		);

		assert_eq!(kept[0].location, "John 3:16-16");
	}

	#[test]
	fn gaps_wider_than_three_split_runs() {
		let index = index("John 3", 20);
		let hits = vec![
			hit("John 3:1-5", 0.5),
			hit("John 3:2-6", 0.6),
			hit("John 3:10", 0.9),
			hit("John 3:13", 0.8),
		];
		let merged = merge(&hits, None, &index, &MergeOptions::default());
		let locations: Vec<&str> = merged.iter().map(|passage| passage.location.as_str()).collect();

		assert_eq!(locations, vec!["John 3:10-13", "John 3:1-2"]);
	}

	#[test]
	fn chapters_never_join() {
		let mut units = Vec::new();

		for chapter in ["John 3", "John 4"] {
			units.push(CorpusUnit {
				location: format!("{chapter}:1"),
				text: "x".to_string(),
				vector: vec![1.0],
			});
		}

		let index = VerseTextIndex::build(&units);
		let hits = vec![hit("John 3:1", 0.9), hit("John 4:1", 0.9)];

		assert!(merge(&hits, None, &index, &MergeOptions::default()).is_empty());
	}

	#[test]
	fn reference_passage_ranks_first_and_lowest_is_dropped() {
		let index = index("John 3", 36);
		let hits = vec![
			hit("John 3:1", 0.5),
			hit("John 3:2", 0.5),
			hit("John 3:20", 0.3),
			hit("John 3:21", 0.3),
		];
		let parsed = reference::parse("John 3:16");
		let merged = merge(&hits, parsed.as_ref(), &index, &MergeOptions::default());

		assert_eq!(merged.len(), 2);
		assert_eq!(merged[0].location, "John 3:16-18");
		assert_eq!(merged[0].text, "16 v16 17 v17 18 v18");
		assert_eq!(merged[0].score, EXACT_MATCH_SCORE);
		assert_eq!(merged[1].location, "John 3:1-2");
	}

	#[test]
	fn reference_end_is_clamped_to_the_chapter() {
		let index = index("John 3", 36);
		let parsed = reference::parse("John 3:35-40").expect("reference");
		let passage = reference_passage(&parsed, &index).expect("passage");

		assert_eq!(passage.location, "John 3:35-36");

		let chapter_only = reference::parse("John 3").expect("reference");

		assert!(reference_passage(&chapter_only, &index).is_none());
	}

	#[test]
	fn unknown_chapter_names_no_passage() {
		let index = index("John 3", 36);
		let parsed = reference::parse("John 99:1-4000000000").expect("reference");

		assert!(reference_passage(&parsed, &index).is_none());
	}

	#[test]
	fn start_verse_at_the_numeric_limit_names_no_passage() {
		let index = index("John 3", 36);
		let parsed = reference::parse("John 3:4294967295").expect("reference");

		assert_eq!(parsed.verse_start(), u32::MAX);
		assert!(reference_passage(&parsed, &index).is_none());
	}
}
