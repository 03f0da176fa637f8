//! Batch conversion of multi-line sharing-link input.

use tracing::{debug, info};

use crate::error::{EmbedError, Result};
use crate::synth::{ConvertedLink, Variant};
use crate::url_parser::{extract_id, Strictness};

/// Split raw input into trimmed candidate URLs, dropping blank lines.
pub fn split_input(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Convert every line of `raw`, preserving input order.
///
/// All-or-nothing: the first line that is not a sharing link fails the
/// whole batch and nothing is returned for the lines before it.
pub fn convert_batch(raw: &str, variant: Variant) -> Result<Vec<ConvertedLink>> {
    let lines = split_input(raw);
    if lines.is_empty() {
        return Err(EmbedError::EmptyInput);
    }

    let links = lines
        .into_iter()
        .map(|line| {
            let id = extract_id(line, Strictness::Strict)?;
            debug!(%id, "extracted file id");
            Ok(ConvertedLink::new(line, id, variant))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = links.len(), %variant, "converted batch");
    Ok(links)
}
