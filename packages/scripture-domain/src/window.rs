use crate::{
	Error, Result,
	book::Book,
	corpus::{PassageCandidate, ScoredUnit},
	location,
	similarity::cmp_f32_desc,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowOptions {
	pub window_size: usize,
	pub num_sequences: usize,
	/// Skip windows whose first and last verse sit in different chapters.
	pub respect_chapter_boundaries: bool,
}

/// Picks the best contiguous window for each starting-offset class.
///
/// Units are laid out in canonical book/chapter/verse order and treated as one linear sequence.
/// Offset `i` scans starts `i, i + num_sequences, ...`; an offset that never fits a whole window
/// contributes nothing. Candidates come back sorted by descending mean similarity.
pub fn select_windows(
	units: &[ScoredUnit<'_>],
	options: &WindowOptions,
) -> Result<Vec<PassageCandidate>> {
	if options.window_size == 0 || options.num_sequences == 0 {
		return Err(Error::InvalidArgument {
			message: "window_size and num_sequences must be greater than zero.".to_string(),
		});
	}

	let width = options.window_size;

	if units.len() < width {
		return Ok(Vec::new());
	}

	let mut ordered: Vec<ScoredUnit<'_>> = units.to_vec();

	ordered.sort_by_cached_key(|scored| order_key(unit_location(scored)));

	let mut prefix = Vec::with_capacity(ordered.len() + 1);
	let mut running = 0.0_f64;

	prefix.push(running);

	for scored in &ordered {
		running += f64::from(scored.similarity);

		prefix.push(running);
	}

	let last_start = ordered.len() - width;
	let mut candidates = Vec::new();

	for offset in 0..options.num_sequences.min(last_start + 1) {
		let mut best: Option<(usize, f64)> = None;

		for start in (offset..=last_start).step_by(options.num_sequences) {
			let window = &ordered[start..start + width];

			if options.respect_chapter_boundaries && !same_chapter(window) {
				continue;
			}

			let mean = (prefix[start + width] - prefix[start]) / width as f64;

			if best.is_none_or(|(_, score)| mean > score) {
				best = Some((start, mean));
			}
		}

		if let Some((start, mean)) = best {
			candidates.push(candidate(&ordered[start..start + width], mean as f32));
		}
	}

	candidates.sort_by(|left, right| cmp_f32_desc(left.score, right.score));

	tracing::debug!(
		units = ordered.len(),
		window_size = width,
		candidates = candidates.len(),
		"Selected passage windows."
	);

	Ok(candidates)
}

fn candidate(window: &[ScoredUnit<'_>], score: f32) -> PassageCandidate {
	let first = window[0].location();
	let last = window[window.len() - 1].location();
	let location = match (location::parse_verse(first), location::parse_verse(last)) {
		(Some(first), Some(last)) => location::range(first.chapter_key, first.verse, last.verse),
		_ => format!("{first}-{last}"),
	};
	let text = window
		.iter()
		.map(|scored| match location::parse_verse(scored.location()) {
			Some(parsed) => format!("{} {}", parsed.verse, scored.unit.text),
			None => scored.unit.text.clone(),
		})
		.collect::<Vec<_>>()
		.join(" ");

	PassageCandidate { location, text, score }
}

fn same_chapter(window: &[ScoredUnit<'_>]) -> bool {
	fn chapter_of<'a>(scored: &ScoredUnit<'a>) -> Option<&'a str> {
		location::parse_verse(unit_location(scored)).map(|parsed| parsed.chapter_key)
	}

	match (window.first(), window.last()) {
		(Some(first), Some(last)) => {
			let first = chapter_of(first);

			first.is_some() && first == chapter_of(last)
		},
		_ => false,
	}
}

fn unit_location<'a>(scored: &ScoredUnit<'a>) -> &'a str {
	&scored.unit.location
}

// Canonical order for verse locations; anything unparsable sorts after, by its raw text.
fn order_key(location: &str) -> (usize, u32, u32, &str) {
	let parsed = location::parse_verse(location).and_then(|verse| {
		let (book, chapter) = location::parse_chapter_key(verse.chapter_key)?;

		Some((book.ordinal(), chapter, verse.verse))
	});

	match parsed {
		Some((book, chapter, verse)) => (book, chapter, verse, location),
		None => (Book::ALL.len(), u32::MAX, u32::MAX, location),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::CorpusUnit;

	fn units(locations: &[(&str, f32)]) -> Vec<CorpusUnit> {
		locations
			.iter()
			.map(|(location, _)| CorpusUnit {
				location: location.to_string(),
				text: format!("text of {location}"),
				vector: vec![1.0],
			})
			.collect()
	}

	fn scored<'a>(units: &'a [CorpusUnit], scores: &[(&str, f32)]) -> Vec<ScoredUnit<'a>> {
		units
			.iter()
			.zip(scores)
			.map(|(unit, (_, similarity))| ScoredUnit { unit, similarity: *similarity })
			.collect()
	}

	fn options(window_size: usize, num_sequences: usize) -> WindowOptions {
		WindowOptions { window_size, num_sequences, respect_chapter_boundaries: false }
	}

	#[test]
	fn orders_verses_numerically_before_windowing() {
		let scores = [("John 3:10", 0.9), ("John 3:2", 0.1), ("John 3:1", 0.1), ("John 3:9", 0.9)];
		let corpus = units(&scores);
		let scored = scored(&corpus, &scores);
		let windows = select_windows(&scored, &options(2, 4)).expect("windows");

		assert_eq!(windows[0].location, "John 3:9-10");
		assert_eq!(windows[0].text, "9 text of John 3:9 10 text of John 3:10");
		assert!((windows[0].score - 0.9).abs() < 1e-6);
	}

	#[test]
	fn keeps_the_best_window_per_offset() {
		let scores = [
			("Genesis 1:1", 0.1),
			("Genesis 1:2", 0.2),
			("Genesis 1:3", 0.9),
			("Genesis 1:4", 0.8),
			("Genesis 1:5", 0.1),
			("Genesis 1:6", 0.1),
		];
		let corpus = units(&scores);
		let scored = scored(&corpus, &scores);
		let windows = select_windows(&scored, &options(2, 2)).expect("windows");
		let locations: Vec<&str> = windows.iter().map(|window| window.location.as_str()).collect();

		assert_eq!(locations, vec!["Genesis 1:3-4", "Genesis 1:2-3"]);
	}

	#[test]
	fn too_few_units_yield_nothing() {
		let scores = [("John 3:16", 0.9), ("John 3:17", 0.8)];
		let corpus = units(&scores);
		let scored = scored(&corpus, &scores);

		assert!(select_windows(&scored, &options(3, 2)).expect("windows").is_empty());
	}

	#[test]
	fn chapter_boundaries_can_be_respected() {
		let scores = [("John 3:35", 0.9), ("John 3:36", 0.9), ("John 4:1", 0.9), ("John 4:2", 0.1)];
		let corpus = units(&scores);
		let scored = scored(&corpus, &scores);
		let crossing = select_windows(&scored, &options(2, 1)).expect("windows");

		assert_eq!(crossing.len(), 1);

		let bounded = select_windows(
			&scored,
			&WindowOptions { window_size: 3, num_sequences: 1, respect_chapter_boundaries: true },
		)
		.expect("windows");

		assert!(bounded.is_empty());
	}

	#[test]
	fn zero_width_is_rejected() {
		assert!(select_windows(&[], &options(0, 1)).is_err());
	}
}
