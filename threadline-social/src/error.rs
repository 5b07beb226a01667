use thiserror::Error;

/// Per-record normalization failures.
///
/// A failure here never poisons sibling records: batch callers skip the
/// offending row and keep a count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("malformed timestamp in `{field}` ({value:?}): {reason}")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("record has no `{field}` identifier")]
    MissingIdentifier { field: &'static str },
}

impl NormalizeError {
    pub(crate) fn malformed(
        field: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedTimestamp {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
