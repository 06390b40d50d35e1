//! Per-entry template rendering and artifact registration.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ContentTypeSpec, TemplateSpec};
use crate::contract::{ArtifactSink, BuildArtifact, TemplateRenderer};
use crate::error::Error;

/// Render every transformed entry of `spec` through its template and
/// register the output with the host's file writer. Returns the number of
/// artifacts registered.
///
/// Aborts on the first render or registration failure; artifacts already
/// registered for this spec are not rolled back. Colliding output paths are
/// not guarded; the host writes them in registration order and the later
/// entry wins.
pub async fn emit_all<R, W>(
    renderer: &R,
    sink: &W,
    spec: &ContentTypeSpec,
    template: &TemplateSpec,
    entries: &[Value],
) -> Result<usize, Error>
where
    R: TemplateRenderer + ?Sized,
    W: ArtifactSink + ?Sized,
{
    let mut emitted = 0;
    for entry in entries {
        let path = (template.output)(entry);
        if path.is_empty() {
            warn!(content_type = %spec.name, "Output path function returned an empty path");
        }

        let rendered = renderer
            .render(&template.path, entry)
            .await
            .map_err(|e| Error::Template {
                content_type: spec.name.clone(),
                reason: e.to_string(),
            })?;

        sink.add_artifact(BuildArtifact {
            path: path.clone(),
            contents: rendered.into_bytes(),
        })
        .await
        .map_err(|e| Error::Template {
            content_type: spec.name.clone(),
            reason: e.to_string(),
        })?;

        debug!(content_type = %spec.name, path = %path, "Registered templated artifact");
        emitted += 1;
    }
    Ok(emitted)
}
