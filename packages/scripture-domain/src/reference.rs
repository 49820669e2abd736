use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
	book::{Book, BookMatcher},
	location,
};

// A lazy word-run followed by up to three integers; any non-digit run separates them.
static REFERENCE_PATTERN: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"([\w\s]+?)(\d+)(?:\D+?(\d+))?(?:\D+?(\d+))?").ok());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
	Verse,
	Chapter,
	Passage,
}
impl Granularity {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Verse => "verse",
			Self::Chapter => "chapter",
			Self::Passage => "passage",
		}
	}
}
impl fmt::Display for Granularity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for Granularity {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"verse" => Ok(Self::Verse),
			"chapter" => Ok(Self::Chapter),
			"passage" => Ok(Self::Passage),
			other => Err(format!("search_by must be one of verse, chapter, or passage, got {other:?}.")),
		}
	}
}

/// A scripture reference recognized in free text.
///
/// `verse_start == 0` marks a chapter-only reference and `verse_end == 0` a single verse.
/// Values only come out of [`parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedReference {
	book: Book,
	chapter: u32,
	verse_start: u32,
	verse_end: u32,
}
impl ParsedReference {
	pub fn book(&self) -> Book {
		self.book
	}

	pub fn chapter(&self) -> u32 {
		self.chapter
	}

	pub fn verse_start(&self) -> u32 {
		self.verse_start
	}

	pub fn verse_end(&self) -> u32 {
		self.verse_end
	}

	pub fn is_chapter_only(&self) -> bool {
		self.verse_start == 0
	}

	pub fn has_range(&self) -> bool {
		self.verse_end > self.verse_start
	}

	pub fn chapter_key(&self) -> String {
		location::chapter(self.book, self.chapter)
	}

	/// The single location this reference names in the corpus that serves `granularity`.
	///
	/// Passage references without a proper range fall back to the single verse, and
	/// chapter-only references name no verse or passage.
	pub fn canonical_location(&self, granularity: Granularity) -> Option<String> {
		match granularity {
			Granularity::Chapter => Some(self.chapter_key()),
			_ if self.is_chapter_only() => None,
			Granularity::Passage if self.has_range() => Some(location::passage(
				self.book,
				self.chapter,
				self.verse_start,
				self.verse_end,
			)),
			Granularity::Verse | Granularity::Passage =>
				Some(location::verse(self.book, self.chapter, self.verse_start)),
		}
	}
}
impl fmt::Display for ParsedReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.verse_start, self.verse_end) {
			(0, _) => write!(f, "{} {}", self.book, self.chapter),
			(start, 0) => write!(f, "{} {}:{start}", self.book, self.chapter),
			(start, end) => write!(f, "{} {}:{start}-{end}", self.book, self.chapter),
		}
	}
}

/// Recognizes a reference such as "John 3:16", "1 jn 3 16-18" or "Psalm 23".
///
/// Returns `None` when no canonical book or alias is found, even if numbers are present.
/// A fourth number is ignored.
pub fn parse(query: &str) -> Option<ParsedReference> {
	let captures = REFERENCE_PATTERN.as_ref()?.captures(query)?;
	let book = BookMatcher::global().find(captures.get(1)?.as_str())?;
	let number = |idx: usize| {
		captures.get(idx).and_then(|found| found.as_str().parse::<u32>().ok()).unwrap_or(0)
	};

	Some(ParsedReference { book, chapter: number(2), verse_start: number(3), verse_end: number(4) })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn reference(book: Book, chapter: u32, verse_start: u32, verse_end: u32) -> ParsedReference {
		ParsedReference { book, chapter, verse_start, verse_end }
	}

	#[test]
	fn reference_pattern_compiles() {
		assert!(REFERENCE_PATTERN.is_some());
	}

	#[test]
	fn parses_single_verse() {
		assert_eq!(parse("John 3:16"), Some(reference(Book::John, 3, 16, 0)));
	}

	#[test]
	fn alias_resolves_to_canonical_book() {
		assert_eq!(parse("Jn 3:16"), Some(reference(Book::John, 3, 16, 0)));
		assert_eq!(parse("psalm 23"), Some(reference(Book::Psalms, 23, 0, 0)));
	}

	#[test]
	fn unknown_book_is_no_match() {
		assert_eq!(parse("Zog 3:16"), None);
		assert_eq!(parse("love thy neighbor"), None);
	}

	#[test]
	fn numbered_books_win_over_their_suffix() {
		assert_eq!(parse("1 John 3:16"), Some(reference(Book::FirstJohn, 3, 16, 0)));
		assert_eq!(parse("3 john 1:4"), Some(reference(Book::ThirdJohn, 1, 4, 0)));
	}

	#[test]
	fn separators_are_tolerated() {
		assert_eq!(parse("Genesis 1:1-3"), Some(reference(Book::Genesis, 1, 1, 3)));
		assert_eq!(parse("genesis 1 1 3"), Some(reference(Book::Genesis, 1, 1, 3)));
		assert_eq!(parse("Song of Solomon 2 - 4"), Some(reference(Book::SongOfSolomon, 2, 4, 0)));
	}

	#[test]
	fn fourth_number_is_ignored() {
		assert_eq!(parse("Romans 8:28-30-39"), Some(reference(Book::Romans, 8, 28, 30)));
	}

	#[test]
	fn canonical_location_depends_on_granularity() {
		let verse = reference(Book::John, 3, 16, 0);
		let range = reference(Book::John, 3, 16, 18);
		let chapter = reference(Book::Genesis, 1, 0, 0);

		assert_eq!(verse.canonical_location(Granularity::Verse).as_deref(), Some("John 3:16"));
		assert_eq!(verse.canonical_location(Granularity::Chapter).as_deref(), Some("John 3"));
		assert_eq!(verse.canonical_location(Granularity::Passage).as_deref(), Some("John 3:16"));
		assert_eq!(
			range.canonical_location(Granularity::Passage).as_deref(),
			Some("John 3:16-18")
		);
		assert_eq!(chapter.canonical_location(Granularity::Chapter).as_deref(), Some("Genesis 1"));
		assert_eq!(chapter.canonical_location(Granularity::Verse), None);
	}

	#[test]
	fn granularity_parses_case_insensitively() {
		assert_eq!("Passage".parse::<Granularity>(), Ok(Granularity::Passage));
		assert!("book".parse::<Granularity>().is_err());
	}
}
