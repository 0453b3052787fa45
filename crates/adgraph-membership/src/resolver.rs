//! Member principal resolution
//!
//! Maps one member distinguished name to its cached or freshly resolved
//! identity. Cache-first: a hit never touches the directory. Misses fall into
//! one of two paths, chosen by the structural shape of the DN:
//!
//! - Foreign security principals (members of a trusted foreign domain,
//!   referenced by SID instead of a native account object) are resolved by
//!   cross-domain SID translation.
//! - Everything else gets a base-scoped self query for identity attributes,
//!   is classified, and is written back into the shared cache.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use adgraph_directory::dn::{convert_dn_to_domain, leaf_rdn_value};
use adgraph_directory::{
    DirectoryClient, DirectoryResult, DirectorySearch, EntryClassifier, MappedPrincipal,
    SearchScope, SidResolver,
};

use crate::cache::PrincipalCache;

/// Identity attributes requested when resolving a member entry.
pub const IDENTITY_ATTRIBUTES: [&str; 4] = [
    "samaccountname",
    "distinguishedname",
    "samaccounttype",
    "dnshostname",
];

/// Container marker for foreign security principal objects.
const FSP_CONTAINER: &str = "ForeignSecurityPrincipals";

/// Prefix of a domain SID rendered as a leaf RDN.
const DOMAIN_SID_RDN_PREFIX: &str = "CN=S-1-5-21";

/// Substring marking a domain SID anywhere in a DN.
const DOMAIN_SID_MARKER: &str = "S-1-5-21";

/// Cache-first resolver from member DN to [`MappedPrincipal`].
pub struct PrincipalResolver<D> {
    directory: Arc<D>,
    cache: PrincipalCache,
}

impl<D> Clone for PrincipalResolver<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            cache: self.cache.clone(),
        }
    }
}

impl<D: DirectoryClient> PrincipalResolver<D> {
    /// Create a resolver over a directory client and a shared cache.
    pub fn new(directory: Arc<D>, cache: PrincipalCache) -> Self {
        Self { directory, cache }
    }

    /// The shared cache this resolver reads and populates.
    pub fn cache(&self) -> &PrincipalCache {
        &self.cache
    }

    /// Resolve one member DN.
    ///
    /// `Ok(None)` means the member is unresolvable and should be skipped;
    /// `Err` is reserved for fatal directory failures. Absorbable failures
    /// degrade to `Ok(None)` so one bad member never aborts its parent.
    #[instrument(skip(self), fields(dn = %dn))]
    pub async fn resolve(&self, dn: &str) -> DirectoryResult<Option<MappedPrincipal>> {
        if let Some(principal) = self.cache.lookup(dn).await {
            return Ok(Some(principal));
        }

        if dn.contains(FSP_CONTAINER) && !dn.starts_with(DOMAIN_SID_RDN_PREFIX) {
            return Ok(self.resolve_foreign_principal(dn).await);
        }

        self.resolve_by_self_query(dn).await
    }

    /// Resolve a foreign-security-principal member.
    ///
    /// A DN whose leaf starts with `CN=S-1-5-21` never reaches this point:
    /// those are locally well-known SIDs handled by a different, pre-cached
    /// resolution path, and are unresolvable here. A foreign domain SID
    /// embedded elsewhere in the DN is translated cross-domain; the result is
    /// deliberately not cached because its DN is not a key other callers will
    /// look up.
    async fn resolve_foreign_principal(&self, dn: &str) -> Option<MappedPrincipal> {
        if !dn.contains(DOMAIN_SID_MARKER) {
            return None;
        }

        let sid = leaf_rdn_value(dn);
        let owning_domain = self.directory.sid_to_domain_name(sid).await?;
        let principal = self
            .directory
            .unknown_sid_to_display(sid, &owning_domain, &IDENTITY_ATTRIBUTES)
            .await;

        if principal.is_none() {
            debug!(sid = %sid, domain = %owning_domain, "Foreign SID did not translate");
        }
        principal
    }

    /// Resolve a member by querying its own entry and classifying it.
    async fn resolve_by_self_query(&self, dn: &str) -> DirectoryResult<Option<MappedPrincipal>> {
        let Some(domain) = convert_dn_to_domain(dn) else {
            debug!(dn = %dn, "Member DN has no domain components");
            return Ok(None);
        };

        let entries = match self
            .directory
            .search(
                "(objectclass=*)",
                SearchScope::Base,
                &IDENTITY_ATTRIBUTES,
                &domain,
                dn,
            )
            .await
        {
            Ok(entries) => entries,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!(dn = %dn, error = %e, "Member lookup failed, treating as unresolvable");
                return Ok(None);
            }
        };

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };

        let Some(resolved) = self.directory.classify(&entry) else {
            debug!(dn = %dn, "Member entry could not be classified");
            return Ok(None);
        };

        self.cache
            .store(dn, resolved.kind, &resolved.display_name)
            .await;
        Ok(Some(resolved.into()))
    }
}
