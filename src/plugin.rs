//! High-level pipeline: orchestrates fetch → transform → bind (and template
//! emission) for every configured content type.
//!
//! This module provides the top-level driver invoked once per build pass.
//! For each configured content type it:
//!   - Pages the remote API to exhaustion ([`crate::fetch`])
//!   - Applies the type's transform policy per entry ([`crate::transform`])
//!   - Renders templated types into build artifacts ([`crate::emit`])
//!   - Binds the finished sequence into the shared store ([`crate::store`])
//!
//! # Major Types
//! - [`Plugin`]: validated once at construction, run once per build pass
//! - [`RunReport`]: per-content-type entry/artifact counts for audit
//!
//! # Responsibilities
//! - Construction-time validation of required options, in a fixed order
//! - Concurrent fan-out across content types; completion only after every
//!   pipeline has settled
//! - A content type either fully succeeds or leaves nothing in the store
//!
//! # Error Handling
//! All runtime failures surface through [`Plugin::run`]'s result. Sibling
//! pipelines are not cancelled by a failure; only the first error in
//! configuration order is reported.

use futures::future::join_all;
use tracing::{error, info};

use crate::config::{ContentTypeSpec, PluginConfig, PluginOptions};
use crate::contract::{ArtifactSink, Credentials, EntrySource, TemplateRenderer};
use crate::emit;
use crate::error::Error;
use crate::fetch;
use crate::store::SharedStore;
use crate::transform;

/// Per-content-type slice of a [`RunReport`].
#[derive(Debug)]
pub struct ContentTypeReport {
    pub name: String,
    pub entries: usize,
    pub artifacts: usize,
}

/// Summary of one completed build pass, in configuration order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub content_types: Vec<ContentTypeReport>,
}

/// The build-time ingestion plugin.
pub struct Plugin {
    config: PluginConfig,
}

impl Plugin {
    /// Validate `options` and construct the plugin.
    ///
    /// Fails with [`Error::Validation`] naming the first missing required
    /// option, in the order `access_token`, `space_id`, `add_data_to`.
    pub fn new(options: PluginOptions) -> Result<Self, Error> {
        let config = options.validate()?;
        config.trace_loaded();
        Ok(Self { config })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Run one build pass: fetch, transform and bind every configured
    /// content type, emitting templated artifacts where configured.
    ///
    /// Content types are processed concurrently and independently; the
    /// returned future resolves only after all of them have settled.
    /// Successfully settled types stay bound in the store even when a
    /// sibling fails.
    pub async fn run<S, R, W>(
        &self,
        source: &S,
        renderer: &R,
        sink: &W,
    ) -> Result<RunReport, Error>
    where
        S: EntrySource,
        R: TemplateRenderer,
        W: ArtifactSink,
    {
        info!(
            content_types = self.config.content_types.len(),
            "Starting ingestion run"
        );

        let results = join_all(self.config.content_types.iter().map(|spec| {
            process_content_type(
                source,
                renderer,
                sink,
                &self.config.credentials,
                &self.config.add_data_to,
                spec,
            )
        }))
        .await;

        let mut report = RunReport::default();
        let mut first_error = None;
        for (spec, result) in self.config.content_types.iter().zip(results) {
            match result {
                Ok(content_type) => report.content_types.push(content_type),
                Err(e) => {
                    error!(content_type = %spec.name, error = %e, "Content type failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!(
                    content_types = report.content_types.len(),
                    "Ingestion run complete"
                );
                Ok(report)
            }
        }
    }
}

/// Fetch, transform, emit and bind one content type.
///
/// Binding happens last so a failed type is absent from the store rather
/// than partially populated.
async fn process_content_type<S, R, W>(
    source: &S,
    renderer: &R,
    sink: &W,
    credentials: &Credentials,
    store: &SharedStore,
    spec: &ContentTypeSpec,
) -> Result<ContentTypeReport, Error>
where
    S: EntrySource,
    R: TemplateRenderer,
    W: ArtifactSink,
{
    info!(content_type = %spec.name, id = %spec.id, "Processing content type");

    let raw_entries = fetch::fetch_all(source, credentials, spec).await?;

    let mut entries = Vec::with_capacity(raw_entries.len());
    for raw in &raw_entries {
        entries.push(transform::apply(&spec.transform, &spec.name, raw)?);
    }

    let artifacts = match &spec.template {
        Some(template) => emit::emit_all(renderer, sink, spec, template, &entries).await?,
        None => 0,
    };

    let count = entries.len();
    store.bind(&spec.name, entries);
    info!(content_type = %spec.name, entries = count, artifacts, "Content type complete");

    Ok(ContentTypeReport {
        name: spec.name.clone(),
        entries: count,
        artifacts,
    })
}
