pub mod book;
pub mod boost;
pub mod corpus;
pub mod location;
pub mod merge;
pub mod reference;
pub mod similarity;
pub mod verse_index;
pub mod window;

mod error;

pub use error::{Error, Result};

/// Score assigned to a unit or passage the query names verbatim. Exceeds any natural cosine
/// similarity the embeddings produce in practice.
pub const EXACT_MATCH_SCORE: f32 = 0.9999;
