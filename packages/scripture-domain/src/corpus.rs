use std::collections::HashMap;

use serde::Serialize;

use crate::{Error, Result, reference::Granularity};

/// One indexed chunk of text with its precomputed embedding. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct CorpusUnit {
	pub location: String,
	pub text: String,
	pub vector: Vec<f32>,
}

/// A corpus unit paired with its similarity for one query. The shared unit is never written.
#[derive(Clone, Copy, Debug)]
pub struct ScoredUnit<'a> {
	pub unit: &'a CorpusUnit,
	pub similarity: f32,
}
impl ScoredUnit<'_> {
	pub fn location(&self) -> &str {
		&self.unit.location
	}
}

/// A contiguous verse range assembled for one query's response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassageCandidate {
	/// "Book Chapter:Start-End".
	pub location: String,
	pub text: String,
	pub score: f32,
}

/// Anything the passage merger can group by location.
pub trait Scored {
	fn location(&self) -> &str;

	fn score(&self) -> f32;
}
impl<T> Scored for &T
where
	T: Scored + ?Sized,
{
	fn location(&self) -> &str {
		(**self).location()
	}

	fn score(&self) -> f32 {
		(**self).score()
	}
}
impl Scored for ScoredUnit<'_> {
	fn location(&self) -> &str {
		&self.unit.location
	}

	fn score(&self) -> f32 {
		self.similarity
	}
}
impl Scored for PassageCandidate {
	fn location(&self) -> &str {
		&self.location
	}

	fn score(&self) -> f32 {
		self.score
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorpusKind {
	Chapter,
	Verse,
}
impl CorpusKind {
	/// Passage queries are served from verse units.
	pub fn for_granularity(granularity: Granularity) -> Self {
		match granularity {
			Granularity::Chapter => Self::Chapter,
			Granularity::Verse | Granularity::Passage => Self::Verse,
		}
	}
}

/// A read-only collection of units sharing one vector dimension, indexed by location.
#[derive(Debug)]
pub struct Corpus {
	kind: CorpusKind,
	units: Vec<CorpusUnit>,
	by_location: HashMap<String, usize>,
	dimension: usize,
}
impl Corpus {
	pub fn new(kind: CorpusKind, units: Vec<CorpusUnit>) -> Result<Self> {
		let Some(first) = units.first() else {
			return Err(Error::InvalidArgument {
				message: "A corpus must contain at least one unit.".to_string(),
			});
		};
		let dimension = first.vector.len();

		if dimension == 0 {
			return Err(Error::InvalidArgument {
				message: format!("Unit {} has an empty vector.", first.location),
			});
		}

		let mut by_location = HashMap::with_capacity(units.len());

		for (idx, unit) in units.iter().enumerate() {
			if unit.vector.len() != dimension {
				return Err(Error::DimensionMismatch {
					location: unit.location.clone(),
					expected: dimension,
					actual: unit.vector.len(),
				});
			}
			if by_location.insert(unit.location.clone(), idx).is_some() {
				tracing::warn!(location = %unit.location, "Duplicate corpus location; keeping the last unit.");
			}
		}

		Ok(Self { kind, units, by_location, dimension })
	}

	pub fn kind(&self) -> CorpusKind {
		self.kind
	}

	pub fn units(&self) -> &[CorpusUnit] {
		&self.units
	}

	pub fn len(&self) -> usize {
		self.units.len()
	}

	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn get(&self, location: &str) -> Option<&CorpusUnit> {
		self.by_location.get(location).map(|idx| &self.units[*idx])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit(location: &str, vector: Vec<f32>) -> CorpusUnit {
		CorpusUnit { location: location.to_string(), text: String::new(), vector }
	}

	#[test]
	fn indexes_units_by_location() {
		let corpus = Corpus::new(
			CorpusKind::Chapter,
			vec![unit("Genesis 1", vec![1.0, 0.0]), unit("Genesis 2", vec![0.0, 1.0])],
		)
		.expect("corpus");

		assert_eq!(corpus.dimension(), 2);
		assert_eq!(corpus.get("Genesis 2").map(|unit| unit.vector.clone()), Some(vec![0.0, 1.0]));
		assert!(corpus.get("Genesis 3").is_none());
	}

	#[test]
	fn rejects_mixed_dimensions() {
		let err = Corpus::new(
			CorpusKind::Verse,
			vec![unit("Genesis 1:1", vec![1.0, 0.0]), unit("Genesis 1:2", vec![1.0])],
		)
		.expect_err("mixed dimensions must fail");

		assert_eq!(
			err,
			Error::DimensionMismatch { location: "Genesis 1:2".to_string(), expected: 2, actual: 1 }
		);
	}

	#[test]
	fn rejects_empty_corpus() {
		assert!(Corpus::new(CorpusKind::Verse, Vec::new()).is_err());
	}
}
