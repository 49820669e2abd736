use std::collections::HashMap;

use crate::{corpus::CorpusUnit, location};

/// Maps "Book C:V" to the display text "V <verse text>". Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct VerseTextIndex {
	entries: HashMap<String, String>,
	last_verse: HashMap<String, u32>,
}
impl VerseTextIndex {
	pub fn build(units: &[CorpusUnit]) -> Self {
		let mut entries = HashMap::with_capacity(units.len());
		let mut last_verse: HashMap<String, u32> = HashMap::new();

		for unit in units {
			let Some(parsed) = location::parse_verse(&unit.location) else {
				tracing::warn!(location = %unit.location, "Skipping unit without a verse location.");

				continue;
			};
			let key = format!("{}:{}", parsed.chapter_key, parsed.verse);
			let last = last_verse.entry(parsed.chapter_key.to_string()).or_insert(0);

			*last = (*last).max(parsed.verse);

			entries.insert(key, format!("{} {}", parsed.verse, unit.text));
		}

		Self { entries, last_verse }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn get(&self, location: &str) -> Option<&str> {
		self.entries.get(location).map(String::as_str)
	}

	/// Highest verse number known for "Book C".
	pub fn last_verse(&self, chapter_key: &str) -> Option<u32> {
		self.last_verse.get(chapter_key).copied()
	}

	/// Display texts of `start..=end` in "Book C", joined by spaces. Missing verses are skipped.
	pub fn range_text(&self, chapter_key: &str, start: u32, end: u32) -> String {
		let mut out = String::new();

		for verse in start..=end {
			let Some(text) = self.entries.get(&format!("{chapter_key}:{verse}")) else {
				continue;
			};

			if !out.is_empty() {
				out.push(' ');
			}

			out.push_str(text);
		}

		out
	}
}
