//! Membership resolution engine
//!
//! The engine is an explicitly constructed context object: it owns the shared
//! principal cache and finished-forest set and borrows a directory client
//! through its trait seams. Orchestration code creates one engine per run and
//! invokes it concurrently from as many workers as it likes; the only shared
//! mutable state is the cache and the forest set, both safe under races.

use std::sync::Arc;

use tracing::{debug, instrument};

use adgraph_directory::dn::convert_dn_to_domain;
use adgraph_directory::{
    DirectoryClient, GroupMember, ObjectKind, ResolvedEntry, SearchEntry, SidResolver,
};

use crate::cache::PrincipalCache;
use crate::forest::{produce_enterprise_dcs, FinishedForests};
use crate::ranged::retrieve_ranged_values;
use crate::resolver::{PrincipalResolver, IDENTITY_ATTRIBUTES};
use crate::stream::{EdgeSink, EdgeStream};

/// Membership resolution engine over a directory client `D`.
///
/// Cheap to share: public operations take `&self` and spawn their work onto
/// the runtime, handing back a pull-driven [`EdgeStream`].
pub struct MembershipEngine<D> {
    directory: Arc<D>,
    resolver: PrincipalResolver<D>,
    finished_forests: FinishedForests,
}

impl<D: DirectoryClient + 'static> MembershipEngine<D> {
    /// Create an engine with a fresh principal cache.
    pub fn new(directory: Arc<D>) -> Self {
        Self::with_cache(directory, PrincipalCache::new())
    }

    /// Create an engine over an existing cache, e.g. one pre-seeded with
    /// well-known principals by the orchestration layer.
    pub fn with_cache(directory: Arc<D>, cache: PrincipalCache) -> Self {
        let resolver = PrincipalResolver::new(Arc::clone(&directory), cache);
        Self {
            directory,
            resolver,
            finished_forests: FinishedForests::default(),
        }
    }

    /// The shared principal cache.
    pub fn cache(&self) -> &PrincipalCache {
        self.resolver.cache()
    }

    /// Produce every membership edge for one directory object: direct
    /// members (ranged retrieval included) plus its primary-group edge.
    ///
    /// `resolved` is the subject's pre-classified identity and `domain_sid`
    /// the SID prefix of the domain being enumerated, used to build the
    /// primary group SID. Unresolvable members are skipped; only a fatal
    /// directory failure terminates the stream early.
    #[instrument(skip(self, entry, resolved), fields(dn = %entry.dn(), kind = %resolved.kind))]
    pub fn resolve_memberships(
        &self,
        entry: SearchEntry,
        resolved: ResolvedEntry,
        domain_sid: &str,
    ) -> EdgeStream {
        let (sink, stream) = EdgeStream::channel();
        let directory = Arc::clone(&self.directory);
        let resolver = self.resolver.clone();
        let domain_sid = domain_sid.to_string();

        tokio::spawn(async move {
            produce_memberships(directory, resolver, sink, entry, resolved, domain_sid).await;
        });

        stream
    }

    /// Emit one edge per enterprise domain controller in the forest owning
    /// `domain_name` (`None` for the current domain), exactly once per forest
    /// across the whole process. An unresolvable domain yields an empty
    /// stream, not an error.
    #[instrument(skip(self))]
    pub fn enumerate_enterprise_dcs(&self, domain_name: Option<&str>) -> EdgeStream {
        let (sink, stream) = EdgeStream::channel();

        tokio::spawn(produce_enterprise_dcs(
            Arc::clone(&self.directory),
            Arc::clone(&self.finished_forests),
            sink,
            domain_name.map(str::to_string),
        ));

        stream
    }
}

/// Producer task behind [`MembershipEngine::resolve_memberships`].
async fn produce_memberships<D: DirectoryClient>(
    directory: Arc<D>,
    resolver: PrincipalResolver<D>,
    sink: EdgeSink,
    entry: SearchEntry,
    resolved: ResolvedEntry,
    domain_sid: String,
) {
    let subject_name = resolved.display_name.clone();
    let subject_domain = convert_dn_to_domain(entry.dn());

    // Pre-store a group's own identity so self-referential and mutually
    // nesting groups resolve from cache instead of re-querying their own DN.
    if resolved.kind == ObjectKind::Group {
        resolver
            .cache()
            .store(entry.dn(), ObjectKind::Group, &subject_name)
            .await;
    }

    let mut members: Vec<String> = entry
        .get_strings("member")
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    // An empty plain attribute does not necessarily mean zero members: the
    // server omits oversized values entirely, so fall back to ranged
    // retrieval before concluding anything.
    if members.is_empty() {
        match subject_domain.as_deref() {
            Some(domain) => {
                match retrieve_ranged_values(&*directory, domain, entry.dn(), "member").await {
                    Ok(ranged) => members = ranged,
                    Err(e) => {
                        sink.fail(e).await;
                        return;
                    }
                }
            }
            None => {
                debug!(dn = %entry.dn(), "Subject DN has no domain components, skipping ranged retrieval");
            }
        }
    }

    for member_dn in members {
        match resolver.resolve(&member_dn).await {
            Ok(Some(principal)) => {
                let edge = GroupMember::new(principal.display_name, &subject_name, principal.kind);
                if !sink.emit(edge).await {
                    return;
                }
            }
            Ok(None) => {
                debug!(member = %member_dn, "Skipping unresolvable member");
            }
            Err(e) => {
                sink.fail(e).await;
                return;
            }
        }
    }

    // Primary-group membership is not carried on the member list; it lives
    // as a RID on the member object itself.
    let Some(rid) = entry.get_string("primarygroupid") else {
        return;
    };
    let Some(domain) = subject_domain else {
        return;
    };

    let primary_group_sid = format!("{domain_sid}-{rid}");
    let Some(group_name) = directory
        .sid_to_display(
            &primary_group_sid,
            &domain,
            &IDENTITY_ATTRIBUTES,
            ObjectKind::Group,
        )
        .await
    else {
        debug!(sid = %primary_group_sid, "Primary group SID did not resolve");
        return;
    };

    sink.emit(GroupMember::new(&subject_name, group_name, resolved.kind))
        .await;
}
