use std::{fmt, sync::LazyLock};

use serde::Serialize;

static MATCHER: LazyLock<BookMatcher> = LazyLock::new(BookMatcher::new);

/// Abbreviations and common misspellings. Every entry resolves to exactly one canonical book.
const ALIASES: &[(&str, Book)] = &[
	("Psalm", Book::Psalms),
	("Pslam", Book::Psalms),
	("Pslams", Book::Psalms),
	("Gen", Book::Genesis),
	("Ex", Book::Exodus),
	("Lev", Book::Leviticus),
	("Num", Book::Numbers),
	("Deut", Book::Deuteronomy),
	("Josh", Book::Joshua),
	("Judg", Book::Judges),
	("1 Sam", Book::FirstSamuel),
	("2 Sam", Book::SecondSamuel),
	("1Sam", Book::FirstSamuel),
	("2Sam", Book::SecondSamuel),
	("1 Ki", Book::FirstKings),
	("2 Ki", Book::SecondKings),
	("1Ki", Book::FirstKings),
	("2Ki", Book::SecondKings),
	("1 Chr", Book::FirstChronicles),
	("2 Chr", Book::SecondChronicles),
	("1Chr", Book::FirstChronicles),
	("2Chr", Book::SecondChronicles),
	("Ezr", Book::Ezra),
	("Neh", Book::Nehemiah),
	("Est", Book::Esther),
	("Prov", Book::Proverbs),
	("Eccl", Book::Ecclesiastes),
	("Song", Book::SongOfSolomon),
	("Isa", Book::Isaiah),
	("Jer", Book::Jeremiah),
	("Lam", Book::Lamentations),
	("Ezek", Book::Ezekiel),
	("Dan", Book::Daniel),
	("Hos", Book::Hosea),
	("Am", Book::Amos),
	("Ob", Book::Obadiah),
	("Jon", Book::Jonah),
	("Mic", Book::Micah),
	("Nah", Book::Nahum),
	("Hab", Book::Habakkuk),
	("Zeph", Book::Zephaniah),
	("Hag", Book::Haggai),
	("Zech", Book::Zechariah),
	("Mal", Book::Malachi),
	("Matt", Book::Matthew),
	("Mk", Book::Mark),
	("Lk", Book::Luke),
	("Jn", Book::John),
	("Rom", Book::Romans),
	("1 Cor", Book::FirstCorinthians),
	("2 Cor", Book::SecondCorinthians),
	("1Cor", Book::FirstCorinthians),
	("2Cor", Book::SecondCorinthians),
	("Gal", Book::Galatians),
	("Eph", Book::Ephesians),
	("Phil", Book::Philippians),
	("Col", Book::Colossians),
	("1 Thess", Book::FirstThessalonians),
	("2 Thess", Book::SecondThessalonians),
	("1Thess", Book::FirstThessalonians),
	("2Thess", Book::SecondThessalonians),
	("1 Tim", Book::FirstTimothy),
	("2 Tim", Book::SecondTimothy),
	("1Tim", Book::FirstTimothy),
	("2Tim", Book::SecondTimothy),
	("Tit", Book::Titus),
	("Phlm", Book::Philemon),
	("Heb", Book::Hebrews),
	("Jas", Book::James),
	("1 Pet", Book::FirstPeter),
	("2 Pet", Book::SecondPeter),
	("1Pet", Book::FirstPeter),
	("2Pet", Book::SecondPeter),
	("1 Jn", Book::FirstJohn),
	("2 Jn", Book::SecondJohn),
	("3 Jn", Book::ThirdJohn),
	("1Jn", Book::FirstJohn),
	("2Jn", Book::SecondJohn),
	("3Jn", Book::ThirdJohn),
	("Rev", Book::Revelation),
];

/// The 66 canonical books, declared in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum Book {
	Genesis,
	Exodus,
	Leviticus,
	Numbers,
	Deuteronomy,
	Joshua,
	Judges,
	Ruth,
	FirstSamuel,
	SecondSamuel,
	FirstKings,
	SecondKings,
	FirstChronicles,
	SecondChronicles,
	Ezra,
	Nehemiah,
	Esther,
	Job,
	Psalms,
	Proverbs,
	Ecclesiastes,
	SongOfSolomon,
	Isaiah,
	Jeremiah,
	Lamentations,
	Ezekiel,
	Daniel,
	Hosea,
	Joel,
	Amos,
	Obadiah,
	Jonah,
	Micah,
	Nahum,
	Habakkuk,
	Zephaniah,
	Haggai,
	Zechariah,
	Malachi,
	Matthew,
	Mark,
	Luke,
	John,
	Acts,
	Romans,
	FirstCorinthians,
	SecondCorinthians,
	Galatians,
	Ephesians,
	Philippians,
	Colossians,
	FirstThessalonians,
	SecondThessalonians,
	FirstTimothy,
	SecondTimothy,
	Titus,
	Philemon,
	Hebrews,
	James,
	FirstPeter,
	SecondPeter,
	FirstJohn,
	SecondJohn,
	ThirdJohn,
	Jude,
	Revelation,
}
impl Book {
	pub const ALL: [Book; 66] = [
		Book::Genesis,
		Book::Exodus,
		Book::Leviticus,
		Book::Numbers,
		Book::Deuteronomy,
		Book::Joshua,
		Book::Judges,
		Book::Ruth,
		Book::FirstSamuel,
		Book::SecondSamuel,
		Book::FirstKings,
		Book::SecondKings,
		Book::FirstChronicles,
		Book::SecondChronicles,
		Book::Ezra,
		Book::Nehemiah,
		Book::Esther,
		Book::Job,
		Book::Psalms,
		Book::Proverbs,
		Book::Ecclesiastes,
		Book::SongOfSolomon,
		Book::Isaiah,
		Book::Jeremiah,
		Book::Lamentations,
		Book::Ezekiel,
		Book::Daniel,
		Book::Hosea,
		Book::Joel,
		Book::Amos,
		Book::Obadiah,
		Book::Jonah,
		Book::Micah,
		Book::Nahum,
		Book::Habakkuk,
		Book::Zephaniah,
		Book::Haggai,
		Book::Zechariah,
		Book::Malachi,
		Book::Matthew,
		Book::Mark,
		Book::Luke,
		Book::John,
		Book::Acts,
		Book::Romans,
		Book::FirstCorinthians,
		Book::SecondCorinthians,
		Book::Galatians,
		Book::Ephesians,
		Book::Philippians,
		Book::Colossians,
		Book::FirstThessalonians,
		Book::SecondThessalonians,
		Book::FirstTimothy,
		Book::SecondTimothy,
		Book::Titus,
		Book::Philemon,
		Book::Hebrews,
		Book::James,
		Book::FirstPeter,
		Book::SecondPeter,
		Book::FirstJohn,
		Book::SecondJohn,
		Book::ThirdJohn,
		Book::Jude,
		Book::Revelation,
	];

	pub fn name(self) -> &'static str {
		match self {
			Self::Genesis => "Genesis",
			Self::Exodus => "Exodus",
			Self::Leviticus => "Leviticus",
			Self::Numbers => "Numbers",
			Self::Deuteronomy => "Deuteronomy",
			Self::Joshua => "Joshua",
			Self::Judges => "Judges",
			Self::Ruth => "Ruth",
			Self::FirstSamuel => "1 Samuel",
			Self::SecondSamuel => "2 Samuel",
			Self::FirstKings => "1 Kings",
			Self::SecondKings => "2 Kings",
			Self::FirstChronicles => "1 Chronicles",
			Self::SecondChronicles => "2 Chronicles",
			Self::Ezra => "Ezra",
			Self::Nehemiah => "Nehemiah",
			Self::Esther => "Esther",
			Self::Job => "Job",
			Self::Psalms => "Psalms",
			Self::Proverbs => "Proverbs",
			Self::Ecclesiastes => "Ecclesiastes",
			Self::SongOfSolomon => "Song of Solomon",
			Self::Isaiah => "Isaiah",
			Self::Jeremiah => "Jeremiah",
			Self::Lamentations => "Lamentations",
			Self::Ezekiel => "Ezekiel",
			Self::Daniel => "Daniel",
			Self::Hosea => "Hosea",
			Self::Joel => "Joel",
			Self::Amos => "Amos",
			Self::Obadiah => "Obadiah",
			Self::Jonah => "Jonah",
			Self::Micah => "Micah",
			Self::Nahum => "Nahum",
			Self::Habakkuk => "Habakkuk",
			Self::Zephaniah => "Zephaniah",
			Self::Haggai => "Haggai",
			Self::Zechariah => "Zechariah",
			Self::Malachi => "Malachi",
			Self::Matthew => "Matthew",
			Self::Mark => "Mark",
			Self::Luke => "Luke",
			Self::John => "John",
			Self::Acts => "Acts",
			Self::Romans => "Romans",
			Self::FirstCorinthians => "1 Corinthians",
			Self::SecondCorinthians => "2 Corinthians",
			Self::Galatians => "Galatians",
			Self::Ephesians => "Ephesians",
			Self::Philippians => "Philippians",
			Self::Colossians => "Colossians",
			Self::FirstThessalonians => "1 Thessalonians",
			Self::SecondThessalonians => "2 Thessalonians",
			Self::FirstTimothy => "1 Timothy",
			Self::SecondTimothy => "2 Timothy",
			Self::Titus => "Titus",
			Self::Philemon => "Philemon",
			Self::Hebrews => "Hebrews",
			Self::James => "James",
			Self::FirstPeter => "1 Peter",
			Self::SecondPeter => "2 Peter",
			Self::FirstJohn => "1 John",
			Self::SecondJohn => "2 John",
			Self::ThirdJohn => "3 John",
			Self::Jude => "Jude",
			Self::Revelation => "Revelation",
		}
	}

	/// Position in canonical order, Genesis = 0.
	pub fn ordinal(self) -> usize {
		self as usize
	}

	/// Exact, case-insensitive lookup of a canonical name. Aliases are not consulted.
	pub fn from_name(name: &str) -> Option<Self> {
		let name = name.trim();

		Self::ALL.into_iter().find(|book| book.name().eq_ignore_ascii_case(name))
	}
}
impl fmt::Display for Book {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
impl From<Book> for &'static str {
	fn from(book: Book) -> Self {
		book.name()
	}
}

#[derive(Debug)]
struct BookKey {
	words: Vec<String>,
	len: usize,
	book: Book,
}

/// Matches free text against every canonical name and alias.
///
/// A key matches when its lowercase words occur in order anywhere in the text, with any
/// filler between them, so "songxxofxxsolomon" matches "Song of Solomon". Keys are tried
/// longest first, which keeps "1 John" from being shadowed by "John". Equal-length keys keep
/// table order: canonical names before aliases.
#[derive(Debug)]
pub struct BookMatcher {
	keys: Vec<BookKey>,
}
impl BookMatcher {
	pub fn new() -> Self {
		let canonical = Book::ALL.into_iter().map(|book| (book.name(), book));
		let mut keys: Vec<BookKey> = canonical
			.chain(ALIASES.iter().copied())
			.map(|(key, book)| BookKey {
				words: key.split_whitespace().map(str::to_lowercase).collect(),
				len: key.len(),
				book,
			})
			.collect();

		keys.sort_by(|left, right| right.len.cmp(&left.len));

		Self { keys }
	}

	/// Shared matcher, built on first use and immutable afterwards.
	pub fn global() -> &'static Self {
		&MATCHER
	}

	pub fn find(&self, text: &str) -> Option<Book> {
		let haystack = text.to_lowercase();

		self.keys.iter().find(|key| words_in_order(&haystack, &key.words)).map(|key| key.book)
	}
}
impl Default for BookMatcher {
	fn default() -> Self {
		Self::new()
	}
}

fn words_in_order(haystack: &str, words: &[String]) -> bool {
	let mut rest = haystack;

	for word in words {
		let Some(pos) = rest.find(word.as_str()) else {
			return false;
		};

		rest = &rest[pos + word.len()..];
	}

	true
}
