mod error;
mod reader;
mod vector;

pub use error::{Error, Result};
pub use reader::{load_chapters, load_verses, read_chapters, read_verses};
pub use vector::parse_vector;

use scripture_domain::{
	corpus::{Corpus, CorpusKind, CorpusUnit},
	reference::Granularity,
	verse_index::VerseTextIndex,
};

/// Both corpora and the verse text index, loaded once and shared read-only by every query.
#[derive(Debug)]
pub struct Corpora {
	pub chapters: Corpus,
	pub verses: Corpus,
	pub verse_index: VerseTextIndex,
}
impl Corpora {
	/// Validates both unit sets against one shared dimension and builds the verse index.
	pub fn new(chapters: Vec<CorpusUnit>, verses: Vec<CorpusUnit>) -> Result<Self> {
		if chapters.is_empty() {
			return Err(Error::EmptyCorpus { origin: "chapters".to_string() });
		}
		if verses.is_empty() {
			return Err(Error::EmptyCorpus { origin: "verses".to_string() });
		}

		let chapters = Corpus::new(CorpusKind::Chapter, chapters)?;
		let verses = Corpus::new(CorpusKind::Verse, verses)?;

		if chapters.dimension() != verses.dimension() {
			let first = verses.units().first().map(|unit| unit.location.clone()).unwrap_or_default();

			return Err(Error::DimensionMismatch {
				location: first,
				expected: chapters.dimension(),
				actual: verses.dimension(),
			});
		}

		let verse_index = VerseTextIndex::build(verses.units());

		Ok(Self { chapters, verses, verse_index })
	}

	pub fn load(cfg: &scripture_config::Corpus) -> Result<Self> {
		let chapters = load_chapters(&cfg.chapter_path, &cfg.chapter_columns)?;
		let verses = load_verses(&cfg.verse_path, &cfg.verse_columns)?;
		let corpora = Self::new(chapters, verses)?;

		tracing::info!(
			chapters = corpora.chapters.len(),
			verses = corpora.verses.len(),
			dimension = corpora.dimension(),
			"Corpora loaded."
		);

		Ok(corpora)
	}

	/// The corpus that serves `granularity`. Passage queries read verses.
	pub fn for_granularity(&self, granularity: Granularity) -> &Corpus {
		match CorpusKind::for_granularity(granularity) {
			CorpusKind::Chapter => &self.chapters,
			CorpusKind::Verse => &self.verses,
		}
	}

	pub fn dimension(&self) -> usize {
		self.chapters.dimension()
	}
}
