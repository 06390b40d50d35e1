use thiserror::Error;

/// Errors surfaced by the ingestion pipeline.
///
/// `Validation` is raised synchronously at construction; the remaining
/// variants surface through the result of a run. A failed content type
/// reports exactly one of these and leaves nothing bound in the store.
#[derive(Debug, Error)]
pub enum Error {
    /// A required construction option is missing or empty.
    #[error("missing required option: {option}")]
    Validation { option: &'static str },

    /// A remote page request failed (network, auth, unknown content type).
    #[error("fetch failed for content type '{content_type}': {reason}")]
    Fetch {
        content_type: String,
        reason: String,
    },

    /// A caller-supplied transform rejected an entry.
    #[error("transform failed for content type '{content_type}': {reason}")]
    Transform {
        content_type: String,
        reason: String,
    },

    /// Template rendering or artifact registration failed.
    #[error("template emission failed for content type '{content_type}': {reason}")]
    Template {
        content_type: String,
        reason: String,
    },
}
