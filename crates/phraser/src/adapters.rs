// Per-row phrasing of the cleaned body and header columns.

use tracing::debug;

use crate::PhraseError;
use crate::config::{BODY_COLUMN, HEADER_COLUMN};
use crate::model::PhraseModel;
use crate::record::Record;

/// Phrased text of `row[field]`.
pub fn phrase_on_field<R>(row: &R, field: &str, model: &PhraseModel) -> Result<String, PhraseError>
where
    R: Record + ?Sized,
{
    let text = row
        .field(field)
        .ok_or_else(|| PhraseError::MissingColumn(field.to_string()))?;
    model.apply(text)
}

/// Phrased text of the `clean_body` field.
pub fn phrase_on_body<R>(row: &R, model: &PhraseModel) -> Result<String, PhraseError>
where
    R: Record + ?Sized,
{
    phrase_on_field(row, BODY_COLUMN, model)
}

/// Phrased text of the `clean_header` field.
pub fn phrase_on_header<R>(row: &R, model: &PhraseModel) -> Result<String, PhraseError>
where
    R: Record + ?Sized,
{
    phrase_on_field(row, HEADER_COLUMN, model)
}

/// Phrased text of `field` for every row, in row order.
pub fn phrase_column<R: Record>(
    rows: &[R],
    field: &str,
    model: &PhraseModel,
) -> Result<Vec<String>, PhraseError> {
    let phrased = rows
        .iter()
        .map(|row| phrase_on_field(row, field, model))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(rows = phrased.len(), field, "phrased column");
    Ok(phrased)
}
