//! # Membership Resolution Engine
//!
//! Enumerates group-membership relationships in an Active Directory style
//! directory and emits them as graph edges for downstream security-graph
//! analysis.
//!
//! Given one directory object, the engine discovers every principal that is a
//! member of it:
//!
//! - Direct members from the `member` attribute
//! - Oversized member lists via ranged attribute retrieval
//! - Foreign-domain principals via cross-domain SID translation
//! - Primary-group membership via the `primarygroupid` RID
//!
//! Member identities are resolved through a shared process-wide cache so that
//! concurrent workers enumerating different objects never repeat a directory
//! round-trip for the same DN. A separate entry point emits the enterprise
//! domain controller edges of a forest, memoized per forest.
//!
//! Directory connectivity, classification, topology discovery, and SID
//! translation are consumed through the trait seams in [`adgraph_directory`];
//! the engine owns only the resolution algorithm and its caches.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use adgraph_membership::MembershipEngine;
//!
//! let engine = MembershipEngine::new(Arc::new(directory));
//!
//! let mut edges = engine.resolve_memberships(entry, resolved, "S-1-5-21-111-222-333");
//! while let Some(edge) = edges.next().await {
//!     println!("{:?}", edge?);
//! }
//! ```

pub mod cache;
pub mod engine;
mod forest;
pub mod ranged;
pub mod resolver;
pub mod stream;

// Re-exports
pub use cache::PrincipalCache;
pub use engine::MembershipEngine;
pub use ranged::{retrieve_ranged_values, RANGE_WIDTH};
pub use resolver::{PrincipalResolver, IDENTITY_ATTRIBUTES};
pub use stream::EdgeStream;
