//! Error types for `leadflow-core`.
//!
//! The view pipeline itself is total and never fails. Errors only arise at
//! the edge, when filter state arrives as untyped strings (query parameters,
//! fixture files) and has to be parsed into the closed vocabularies the
//! pipeline works with.

/// Errors from parsing filter state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A status filter named a value outside the record's status enum.
    #[error("unknown status '{value}', expected one of: all, {expected}")]
    UnknownStatus { value: String, expected: String },

    /// A sort directive named a field the record cannot be sorted by.
    #[error("unknown sort field '{value}', expected one of: {expected}")]
    UnknownSortField { value: String, expected: String },

    /// A value outside some other closed vocabulary, such as a request category.
    #[error("unknown value '{value}', expected one of: {expected}")]
    UnknownValue { value: String, expected: String },

    /// A sort direction other than ascending or descending.
    #[error("unknown sort direction '{value}', expected 'asc' or 'desc'")]
    UnknownDirection { value: String },
}
