//! Enterprise domain controller enumeration
//!
//! Every enterprise domain controller in a forest is a member of that
//! forest's `ENTERPRISE DOMAIN CONTROLLERS` group. Sibling domains of the
//! same forest all trigger this enumeration, so the forest is claimed in a
//! shared finished set before any edge is emitted: whichever caller claims it
//! first emits the edges, every later caller produces nothing.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use adgraph_directory::{DomainTopology, GroupMember, ObjectKind};

use crate::stream::EdgeSink;

/// Shared set of forests whose controllers have already been emitted.
pub(crate) type FinishedForests = Arc<Mutex<HashSet<String>>>;

/// Emit one edge per enterprise domain controller of the forest owning
/// `domain_name`, exactly once per forest across the process.
pub(crate) async fn produce_enterprise_dcs<D>(
    directory: Arc<D>,
    finished: FinishedForests,
    sink: EdgeSink,
    domain_name: Option<String>,
) where
    D: DomainTopology,
{
    let Some(domain) = directory.resolve_domain(domain_name.as_deref()).await else {
        debug!(domain = ?domain_name, "Domain resolution failed, nothing to enumerate");
        return;
    };

    let forest = domain.forest;

    // Claim the forest before emitting so concurrent sibling-domain calls
    // cannot both produce its edges.
    {
        let mut finished = finished.lock().await;
        if !finished.insert(forest.name.clone()) {
            debug!(forest = %forest.name, "Forest already enumerated");
            return;
        }
    }

    let group_name = format!("ENTERPRISE DOMAIN CONTROLLERS@{}", forest.name);
    let mut emitted = 0usize;

    for forest_domain in forest.domains {
        for controller in forest_domain.controllers {
            let edge = GroupMember::new(controller.host_name, &group_name, ObjectKind::Computer);
            if !sink.emit(edge).await {
                return;
            }
            emitted += 1;
        }
    }

    info!(forest = %forest.name, controllers = emitted, "Enterprise DC enumeration complete");
}
