use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord};

use scripture_config::{ChapterColumns, VerseColumns};
use scripture_domain::corpus::CorpusUnit;

use crate::{Error, Result, vector};

/// Reads chapter rows from a CSV file with a header row. Locations are "<book> <chapter>".
pub fn load_chapters(path: &Path, columns: &ChapterColumns) -> Result<Vec<CorpusUnit>> {
	let file = open(path)?;

	read_chapters(file, &path.display().to_string(), columns)
}

/// Reads verse rows from a CSV file with a header row. Locations are taken verbatim.
pub fn load_verses(path: &Path, columns: &VerseColumns) -> Result<Vec<CorpusUnit>> {
	let file = open(path)?;

	read_verses(file, &path.display().to_string(), columns)
}

pub fn read_chapters<R>(
	reader: R,
	origin: &str,
	columns: &ChapterColumns,
) -> Result<Vec<CorpusUnit>>
where
	R: Read,
{
	read_rows(reader, origin, |row| {
		let book = row.field(columns.book)?;
		let chapter = row.field(columns.chapter)?;

		Ok(CorpusUnit {
			location: format!("{} {}", book.trim(), chapter.trim()),
			text: row.field(columns.text)?.to_string(),
			vector: row.vector(columns.vector)?,
		})
	})
}

pub fn read_verses<R>(reader: R, origin: &str, columns: &VerseColumns) -> Result<Vec<CorpusUnit>>
where
	R: Read,
{
	read_rows(reader, origin, |row| {
		Ok(CorpusUnit {
			location: row.field(columns.location)?.trim().to_string(),
			text: row.field(columns.text)?.to_string(),
			vector: row.vector(columns.vector)?,
		})
	})
}

struct Row<'a> {
	record: &'a StringRecord,
	origin: &'a str,
	line: u64,
}
impl Row<'_> {
	fn field(&self, column: usize) -> Result<&str> {
		self.record.get(column).ok_or_else(|| Error::MissingColumn {
			origin: self.origin.to_string(),
			row: self.line,
			column,
		})
	}

	fn vector(&self, column: usize) -> Result<Vec<f32>> {
		vector::parse_vector(self.field(column)?)
			.ok_or_else(|| Error::InvalidVector { origin: self.origin.to_string(), row: self.line })
	}
}

fn read_rows<R, F>(reader: R, origin: &str, mut to_unit: F) -> Result<Vec<CorpusUnit>>
where
	R: Read,
	F: FnMut(&Row<'_>) -> Result<CorpusUnit>,
{
	let mut csv = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);
	let mut units = Vec::new();
	let mut record = StringRecord::new();

	loop {
		let more = csv
			.read_record(&mut record)
			.map_err(|source| Error::Csv { origin: origin.to_string(), source })?;

		if !more {
			break;
		}

		let line = record.position().map(|position| position.line()).unwrap_or_default();

		units.push(to_unit(&Row { record: &record, origin, line })?);
	}

	if units.is_empty() {
		return Err(Error::EmptyCorpus { origin: origin.to_string() });
	}

	tracing::debug!(origin, rows = units.len(), "Read corpus rows.");

	Ok(units)
}

fn open(path: &Path) -> Result<File> {
	File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
	use super::*;

	const CHAPTERS: &str = "\
,book,chapter,text,tokens,embedding
0,Genesis,1,In the beginning,4,\"[0.1, 0.2]\"
1,Genesis,2,Thus the heavens,3,\"[0.3, 0.4]\"
";

	#[test]
	fn chapter_locations_join_book_and_chapter() {
		let units = read_chapters(CHAPTERS.as_bytes(), "chapters", &ChapterColumns::default())
			.expect("chapters");

		assert_eq!(units.len(), 2);
		assert_eq!(units[0].location, "Genesis 1");
		assert_eq!(units[0].text, "In the beginning");
		assert_eq!(units[1].vector, vec![0.3, 0.4]);
	}

	#[test]
	fn malformed_vector_names_the_row() {
		let csv = ",location,text,tokens,embedding\n0,John 3:16,For God,2,\"[0.1, x]\"\n";
		let err = read_verses(csv.as_bytes(), "verses", &VerseColumns::default())
			.expect_err("malformed vector must fail");

		assert!(matches!(err, Error::InvalidVector { row: 2, .. }), "unexpected error: {err:?}");
	}

	#[test]
	fn short_rows_report_the_missing_column() {
		let csv = ",location,text\n0,John 3:16,For God\n";
		let err = read_verses(csv.as_bytes(), "verses", &VerseColumns::default())
			.expect_err("missing column must fail");

		assert!(matches!(err, Error::MissingColumn { column: 4, .. }), "unexpected error: {err:?}");
	}

	#[test]
	fn header_only_file_is_empty() {
		let header = ",location,text,tokens,embedding\n";
		let err = read_verses(header.as_bytes(), "verses", &VerseColumns::default())
			.expect_err("empty corpus must fail");

		assert!(matches!(err, Error::EmptyCorpus { .. }));
	}
}
