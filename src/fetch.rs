//! Paged retrieval of all entries for one content type.

use serde_json::Value;
use tracing::debug;

use crate::config::ContentTypeSpec;
use crate::contract::{Credentials, EntrySource, RawEntry};
use crate::error::Error;

/// Page size used when the caller's filters do not override `limit`.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Fetch every entry of `spec`'s content type, repeating the query with an
/// advancing `skip` offset until the remote reports exhaustion.
///
/// Pages are concatenated in fetch order, never reordered or deduplicated.
/// The loop terminates when a page comes back smaller than the requested
/// page size, or when the accumulated count reaches the remote-reported
/// total, whichever comes first. Any page failure fails the whole content
/// type; no partial result is returned.
pub async fn fetch_all<S>(
    source: &S,
    credentials: &Credentials,
    spec: &ContentTypeSpec,
) -> Result<Vec<RawEntry>, Error>
where
    S: EntrySource + ?Sized,
{
    let page_size = numeric_filter(spec, "limit")
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let mut skip = numeric_filter(spec, "skip").unwrap_or(0);
    let mut entries: Vec<RawEntry> = Vec::new();

    loop {
        let params = page_params(spec, skip, page_size);
        debug!(content_type = %spec.id, skip, limit = page_size, "Fetching entry page");

        let page = source
            .fetch_page(credentials, &params)
            .await
            .map_err(|e| Error::Fetch {
                content_type: spec.id.clone(),
                reason: e.to_string(),
            })?;

        let fetched = page.items.len();
        entries.extend(page.items);
        debug!(
            content_type = %spec.id,
            fetched,
            accumulated = entries.len(),
            total = page.total,
            "Fetched entry page"
        );

        if fetched < page_size || entries.len() >= page.total {
            break;
        }
        skip += page_size;
    }

    Ok(entries)
}

/// Final query parameters for one page request. Caller filters ride along
/// verbatim; their `limit` already determined the page size and their
/// `skip` seeded the starting offset, so those two keys are carried by the
/// pager's own advancing values.
fn page_params(spec: &ContentTypeSpec, skip: usize, limit: usize) -> Vec<(String, String)> {
    let mut params = vec![
        ("content_type".to_string(), spec.id.clone()),
        ("skip".to_string(), skip.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    for (key, value) in &spec.filters {
        if key == "skip" || key == "limit" {
            continue;
        }
        params.push((key.clone(), query_value(value)));
    }
    params
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn numeric_filter(spec: &ContentTypeSpec, key: &str) -> Option<usize> {
    match spec.filters.get(key)? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
