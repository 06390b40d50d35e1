//! Construction-time configuration: plugin options, content-type specs and
//! the per-type transform policy.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::contract::{BoxError, Credentials, RawEntry};
use crate::error::Error;
use crate::store::SharedStore;

/// Caller-supplied transform: one raw entry in, the exposed shape out.
pub type TransformFn = Arc<dyn Fn(&RawEntry) -> Result<Value, BoxError> + Send + Sync>;

/// Caller-supplied path function for templated output files. Must return a
/// non-empty relative path.
pub type OutputPathFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// How raw entries are reshaped before being exposed to the build.
#[derive(Clone, Default)]
pub enum TransformPolicy {
    /// Shallow-merge `fields` and `sys` into one flat mapping, field values
    /// winning on key collision.
    #[default]
    Flatten,
    /// Expose the raw entry unchanged, `sys` and `fields` as distinct
    /// nested objects.
    Raw,
    /// Apply a caller-supplied function to each entry.
    Custom(TransformFn),
}

impl fmt::Debug for TransformPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformPolicy::Flatten => f.write_str("Flatten"),
            TransformPolicy::Raw => f.write_str("Raw"),
            TransformPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Per-entry template emission settings for a content type.
#[derive(Clone)]
pub struct TemplateSpec {
    /// Template file handed to the host's renderer.
    pub path: PathBuf,
    /// Computes the relative output path for one transformed entry.
    pub output: OutputPathFn,
}

impl fmt::Debug for TemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateSpec")
            .field("path", &self.path)
            .field("output", &"<fn>")
            .finish()
    }
}

/// One content type to ingest.
#[derive(Clone, Debug)]
pub struct ContentTypeSpec {
    /// Key under which this type's results are exposed to the build. Unique
    /// per run; a duplicate name is caller error (last write wins).
    pub name: String,
    /// Remote content type identifier.
    pub id: String,
    /// Extra query parameters merged into every page request. These win
    /// over the pager's defaults on name collision.
    pub filters: Map<String, Value>,
    pub transform: TransformPolicy,
    pub template: Option<TemplateSpec>,
}

impl ContentTypeSpec {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            filters: Map::new(),
            transform: TransformPolicy::default(),
            template: None,
        }
    }
}

/// Construction options for the plugin.
///
/// `access_token`, `space_id` and `add_data_to` are required; validation
/// fails on the first one missing or empty, in that order. `content_types`
/// defaults to none.
#[derive(Clone, Debug, Default)]
pub struct PluginOptions {
    pub access_token: Option<String>,
    pub space_id: Option<String>,
    pub add_data_to: Option<SharedStore>,
    pub content_types: Vec<ContentTypeSpec>,
}

impl PluginOptions {
    /// Validate the options into a runnable configuration.
    pub fn validate(self) -> Result<PluginConfig, Error> {
        let access_token = require(self.access_token, "access_token")?;
        let space_id = require(self.space_id, "space_id")?;
        let add_data_to = self
            .add_data_to
            .ok_or(Error::Validation {
                option: "add_data_to",
            })?;
        Ok(PluginConfig {
            credentials: Credentials {
                space_id,
                access_token,
            },
            add_data_to,
            content_types: self.content_types,
        })
    }
}

fn require(value: Option<String>, option: &'static str) -> Result<String, Error> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Validation { option }),
    }
}

/// Validated configuration as held by a constructed plugin.
#[derive(Clone, Debug)]
pub struct PluginConfig {
    pub credentials: Credentials,
    pub add_data_to: SharedStore,
    pub content_types: Vec<ContentTypeSpec>,
}

impl PluginConfig {
    pub fn trace_loaded(&self) {
        info!(
            space_id = %self.credentials.space_id,
            content_types = self.content_types.len(),
            "Validated plugin configuration"
        );
        debug!(?self, "Plugin configuration (full debug)");
    }
}
