use crate::{
	EXACT_MATCH_SCORE,
	corpus::ScoredUnit,
	reference::{Granularity, ParsedReference},
};

/// Raises the unit the reference names verbatim to [`EXACT_MATCH_SCORE`].
///
/// Returns the position of the boosted unit. At most one unit is touched; order is left to the
/// caller.
pub fn boost(
	units: &mut [ScoredUnit<'_>],
	reference: Option<&ParsedReference>,
	granularity: Granularity,
) -> Option<usize> {
	let target = reference?.canonical_location(granularity)?;
	let position = units.iter().position(|scored| scored.location() == target)?;

	units[position].similarity = EXACT_MATCH_SCORE;

	tracing::debug!(location = %target, "Boosted exact reference match.");

	Some(position)
}
