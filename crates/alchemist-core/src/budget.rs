//! Character-count token heuristics and fixed-size context chunking.

use crate::error::{AlchemistError, Result};

/// Rough characters-per-token ratio used for every budget decision.
pub const CHARS_PER_TOKEN: usize = 4;

/// Approximate token count of `text` as `floor(chars / CHARS_PER_TOKEN)`.
///
/// Absent and empty text both count as zero.
pub fn estimate_tokens(text: Option<&str>) -> usize {
    text.map_or(0, |t| t.chars().count() / CHARS_PER_TOKEN)
}

/// Partition `context` into contiguous slices of at most `limit` tokens
/// (`limit * CHARS_PER_TOKEN` characters).
///
/// Every slice except possibly the last holds exactly that many characters,
/// and joining the slices reproduces `context`. An empty context yields no
/// slices. `limit == 0` and an absent context are caller errors.
pub fn split_context(context: Option<&str>, limit: usize) -> Result<Vec<&str>> {
    if limit == 0 {
        return Err(AlchemistError::InvalidChunkLimit);
    }
    let context = context.ok_or(AlchemistError::MissingContext)?;
    let chunk_chars = limit.saturating_mul(CHARS_PER_TOKEN);

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut taken = 0;
    for (idx, _) in context.char_indices() {
        if taken == chunk_chars {
            chunks.push(&context[start..idx]);
            start = idx;
            taken = 0;
        }
        taken += 1;
    }
    if start < context.len() {
        chunks.push(&context[start..]);
    }
    Ok(chunks)
}
