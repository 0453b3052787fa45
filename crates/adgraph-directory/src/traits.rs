//! Directory collaborator traits
//!
//! Capability-based trait seams for everything the membership engine consumes
//! but does not own: the raw search primitive, entry classification, topology
//! resolution, and SID translation. Production backends implement these over a
//! live directory connection; tests implement them in memory.

use async_trait::async_trait;

use crate::entry::{SearchEntry, SearchScope};
use crate::error::DirectoryResult;
use crate::topology::DomainHandle;
use crate::types::{MappedPrincipal, ObjectKind, ResolvedEntry};

/// The sole raw query primitive.
#[async_trait]
pub trait DirectorySearch: Send + Sync {
    /// Issue a filtered, scoped search against a named domain and base DN,
    /// returning raw entries with the requested attributes.
    ///
    /// `scope` is [`SearchScope::Base`] for self lookups (identity attributes,
    /// ranged member windows) and wider for everything else. Implementations
    /// must support base-scoped queries against a specific distinguished name.
    async fn search(
        &self,
        filter: &str,
        scope: SearchScope,
        attributes: &[&str],
        domain: &str,
        base_dn: &str,
    ) -> DirectoryResult<Vec<SearchEntry>>;
}

/// Capability for classifying raw entries into graph identities.
pub trait EntryClassifier: Send + Sync {
    /// Turn a raw entry into an object kind plus display name, or `None`
    /// when the entry cannot be classified.
    fn classify(&self, entry: &SearchEntry) -> Option<ResolvedEntry>;
}

/// Capability for resolving domain and forest topology.
#[async_trait]
pub trait DomainTopology: Send + Sync {
    /// Resolve a domain name to its domain object, or `None` when resolution
    /// fails. Passing `None` resolves the current (default) domain.
    async fn resolve_domain(&self, name: Option<&str>) -> Option<DomainHandle>;
}

/// Capability for SID-to-name translation.
#[async_trait]
pub trait SidResolver: Send + Sync {
    /// Determine the owning domain of a SID, or `None` when unknown.
    async fn sid_to_domain_name(&self, sid: &str) -> Option<String>;

    /// Resolve a SID to a display name, constrained to objects of the
    /// expected kind, scoped to the given domain.
    async fn sid_to_display(
        &self,
        sid: &str,
        domain: &str,
        attributes: &[&str],
        expected: ObjectKind,
    ) -> Option<String>;

    /// Resolve a SID of unknown object kind to a principal.
    async fn unknown_sid_to_display(
        &self,
        sid: &str,
        domain: &str,
        attributes: &[&str],
    ) -> Option<MappedPrincipal>;
}

/// Umbrella trait for a full directory client.
///
/// Blanket-implemented for any type carrying all four capabilities, so the
/// engine can take a single generic parameter.
pub trait DirectoryClient:
    DirectorySearch + EntryClassifier + DomainTopology + SidResolver
{
}

impl<T> DirectoryClient for T where
    T: DirectorySearch + EntryClassifier + DomainTopology + SidResolver
{
}
