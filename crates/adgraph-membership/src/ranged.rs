//! Ranged attribute retrieval
//!
//! When a multi-valued attribute exceeds the server's value limit the plain
//! read comes back empty and the values must be fetched window by window
//! through the ranged retrieval convention: a base-scoped query for
//! `member;range=0-1499` answers with the actual window under a synthetic
//! attribute name, and the final window is signalled by a `-*` upper bound
//! (e.g. `member;range=3000-*`).

use tracing::{debug, instrument, warn};

use adgraph_directory::{DirectoryResult, DirectorySearch, SearchScope};

/// Fixed window width used by ranged retrieval.
pub const RANGE_WIDTH: usize = 1500;

/// Retrieve the complete value set of a ranged multi-valued attribute.
///
/// Issues base-scoped queries against the entry's own DN, advancing the
/// window by [`RANGE_WIDTH`] until the server signals the terminal window. An
/// entry with no attributes at all on the first window means the true value
/// set is empty.
///
/// An absorbable directory failure mid-run stops collection and returns what
/// was gathered so far; a fatal failure propagates.
#[instrument(skip(directory), fields(base_dn = %base_dn, attribute = %attribute))]
pub async fn retrieve_ranged_values<D>(
    directory: &D,
    domain: &str,
    base_dn: &str,
    attribute: &str,
) -> DirectoryResult<Vec<String>>
where
    D: DirectorySearch + ?Sized,
{
    let mut values = Vec::new();
    let mut bottom = 0usize;

    loop {
        let top = bottom + RANGE_WIDTH - 1;
        let window = format!("{attribute};range={bottom}-{top}");
        bottom += RANGE_WIDTH;

        let entries = match directory
            .search(
                "(objectclass=*)",
                SearchScope::Base,
                &[window.as_str()],
                domain,
                base_dn,
            )
            .await
        {
            Ok(entries) => entries,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(
                    error = %e,
                    window = %window,
                    collected = values.len(),
                    "Ranged retrieval window failed, stopping collection"
                );
                break;
            }
        };

        // Base scope against our own DN yields at most one entry.
        let Some(entry) = entries.into_iter().next() else {
            break;
        };

        // An entry with no attributes at all means there are no values.
        let Some(name) = entry.attribute_names().next().map(str::to_string) else {
            break;
        };

        let finished = name.ends_with("-*");
        if let Some(window_values) = entry.get_strings(&name) {
            values.extend(window_values.iter().cloned());
        }
        if finished {
            break;
        }
    }

    debug!(count = values.len(), "Ranged retrieval complete");
    Ok(values)
}
