//! Canonical location strings: "Book Chapter", "Book Chapter:Verse" and the range form
//! "Book Chapter:Start-End".

use crate::book::Book;

/// A location split at its last colon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerseLocation<'a> {
	/// The enclosing "Book Chapter".
	pub chapter_key: &'a str,
	pub verse: u32,
	pub verse_end: Option<u32>,
}

pub fn chapter(book: Book, chapter: u32) -> String {
	format!("{book} {chapter}")
}

pub fn verse(book: Book, chapter: u32, verse: u32) -> String {
	format!("{book} {chapter}:{verse}")
}

pub fn passage(book: Book, chapter: u32, start: u32, end: u32) -> String {
	format!("{book} {chapter}:{start}-{end}")
}

pub fn range(chapter_key: &str, start: u32, end: u32) -> String {
	format!("{chapter_key}:{start}-{end}")
}

/// Parses "Book C:V" or "Book C:V-E". Chapter-level locations yield `None`.
pub fn parse_verse(location: &str) -> Option<VerseLocation<'_>> {
	let (chapter_key, rest) = location.rsplit_once(':')?;
	let (start, end) = match rest.split_once('-') {
		Some((start, end)) => (start, Some(end)),
		None => (rest, None),
	};
	let verse = start.trim().parse().ok()?;
	let verse_end = match end {
		Some(end) => Some(end.trim().parse().ok()?),
		None => None,
	};
	let chapter_key = chapter_key.trim();

	if chapter_key.is_empty() {
		return None;
	}

	Some(VerseLocation { chapter_key, verse, verse_end })
}

/// Splits "Book C" into the canonical book and chapter number.
pub fn parse_chapter_key(chapter_key: &str) -> Option<(Book, u32)> {
	let (book, chapter) = chapter_key.trim().rsplit_once(' ')?;

	Some((Book::from_name(book)?, chapter.parse().ok()?))
}
