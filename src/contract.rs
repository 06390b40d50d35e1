//! # contract: collaborator interfaces for the ingestion pipeline
//!
//! This module defines the traits through which the core talks to its
//! external collaborators, plus the plain data types crossing those
//! boundaries:
//!
//! - [`EntrySource`]: one page of entries from the remote content API.
//! - [`TemplateRenderer`]: the host's template engine, handed a template
//!   path and one transformed entry.
//! - [`ArtifactSink`]: the host's file-writing mechanism, handed finished
//!   [`BuildArtifact`]s.
//!
//! ## Interface & Extensibility
//! - All methods are async, returning results and using boxed error types.
//! - Implementors convert meaningful upstream failures into a boxed error;
//!   the core maps boxed collaborator errors into its own taxonomy at each
//!   pipeline stage.
//!
//! ## Mocking & Testing
//! - Each trait is annotated for `mockall` so consumers can generate
//!   deterministic mocks for unit/integration tests (enabled under the
//!   `test-export-mocks` feature, on by default).

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Boxed error type for collaborator traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Credentials for the remote content API: a tenant identifier plus a
/// bearer-style secret.
#[derive(Clone)]
pub struct Credentials {
    pub space_id: String,
    pub access_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("space_id", &self.space_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// One remote entry as delivered by the content API: identifying metadata
/// under `sys`, editor-defined values under `fields`.
///
/// Both maps are dynamically shaped; they are validated at this boundary by
/// deserialization and treated as opaque mappings from here on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub sys: Map<String, Value>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of a paged entry query. `total` is the number of entries
/// matching the query overall, not the page's own size.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPage {
    pub items: Vec<RawEntry>,
    pub total: usize,
}

/// A virtual output file produced from a templated entry, registered with
/// the host's file writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    /// Relative output path, as computed by the content type's path function.
    pub path: String,
    pub contents: Vec<u8>,
}

/// Trait for fetching one page of entries from the remote content API.
///
/// `params` is the complete query parameter list for the request, including
/// `content_type`, `skip` and `limit`. Implemented by the real delivery
/// client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn fetch_page(
        &self,
        credentials: &Credentials,
        params: &[(String, String)],
    ) -> Result<EntryPage, BoxError>;
}

/// Trait for the host's template engine.
///
/// Renders the template file at `template_path` with a single transformed
/// entry bound into the template's variable scope. Failure modes are
/// template-syntax errors and missing-file errors, both boxed.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(&self, template_path: &Path, entry: &Value) -> Result<String, BoxError>;
}

/// Trait for the host's output-file mechanism.
///
/// Registered artifacts are consumed during the host's own file-writing
/// phase; registration is not rolled back when a later entry fails.
#[cfg_attr(any(test, feature = "test-export-mocks"), mockall::automock)]
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn add_artifact(&self, artifact: BuildArtifact) -> Result<(), BoxError>;
}
