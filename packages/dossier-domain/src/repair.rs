/// Strips markdown code fencing (and a leading `json` language tag) that
/// reasoning services wrap around structured output, before any structural
/// parsing is attempted. Unfenced input passes through trimmed.
pub fn strip_fences(raw: &str) -> &str {
	let trimmed = raw.trim();
	let Some(after_open) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let inner = match after_open.find("```") {
		Some(end) => &after_open[..end],
		None => after_open,
	};

	inner.strip_prefix("json").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn passes_plain_payloads_through() {
		assert_eq!(strip_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
	}

	#[test]
	fn strips_fencing_and_language_tag() {
		assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
		assert_eq!(strip_fences("```\n[1, 2]\n```"), "[1, 2]");
	}

	#[test]
	fn tolerates_a_missing_closing_fence() {
		assert_eq!(strip_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
	}

	#[test]
	fn ignores_text_after_the_closing_fence() {
		assert_eq!(strip_fences("```json\n{}\n```\nHope this helps!"), "{}");
	}
}
