use crate::types::DbId;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A path id that is not a valid primary key. No record can match it.
    #[error("Entity not found: {entity} with id {raw}")]
    UnknownId { entity: &'static str, raw: String },

    /// The requested list page does not exist.
    #[error("Invalid page.")]
    InvalidPage,

    /// Field-level failures for a single payload.
    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    /// Field-level failures for a batch payload, one entry per element.
    ///
    /// Elements that passed validation carry an empty [`FieldErrors`].
    #[error("Validation failed for {} of {} records", count_invalid(.0), .0.len())]
    InvalidBatch(Vec<FieldErrors>),
}

fn count_invalid(errors: &[FieldErrors]) -> usize {
    errors.iter().filter(|e| !e.is_empty()).count()
}
