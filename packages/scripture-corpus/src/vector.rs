/// Parses a bracketed, comma-separated float list such as `[0.1, -0.2, 3e-4]`.
///
/// Brackets are optional and whitespace is ignored. Returns `None` for an empty list or any
/// entry that is not a finite number.
pub fn parse_vector(literal: &str) -> Option<Vec<f32>> {
	let trimmed = literal.trim();
	let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
	let inner = inner.strip_suffix(']').unwrap_or(inner).trim();

	if inner.is_empty() {
		return None;
	}

	inner
		.split(',')
		.map(|value| value.trim().parse::<f32>().ok().filter(|value| value.is_finite()))
		.collect()
}
