//! # Directory Contracts
//!
//! Interface contracts and shared types for Active Directory membership graph
//! collection.
//!
//! This crate defines what the membership resolution engine consumes from its
//! environment without implementing any of it: the raw search primitive, entry
//! classification, domain/forest topology, and SID translation, along with the
//! data shapes flowing across those seams (raw entries, resolved identities,
//! membership edges).
//!
//! ## Example
//!
//! ```ignore
//! use adgraph_directory::prelude::*;
//!
//! struct LiveDirectory { /* connection pool, etc. */ }
//!
//! #[async_trait::async_trait]
//! impl DirectorySearch for LiveDirectory {
//!     async fn search(
//!         &self,
//!         filter: &str,
//!         scope: SearchScope,
//!         attributes: &[&str],
//!         domain: &str,
//!         base_dn: &str,
//!     ) -> DirectoryResult<Vec<SearchEntry>> {
//!         // issue the query against a live connection
//!         # unimplemented!()
//!     }
//! }
//! ```

pub mod dn;
pub mod entry;
pub mod error;
pub mod topology;
pub mod traits;
pub mod types;

// Re-exports
pub use entry::{SearchEntry, SearchScope};
pub use error::{DirectoryError, DirectoryResult};
pub use topology::{DomainController, DomainHandle, Forest, ForestDomain};
pub use traits::{DirectoryClient, DirectorySearch, DomainTopology, EntryClassifier, SidResolver};
pub use types::{GroupMember, MappedPrincipal, ObjectKind, ResolvedEntry};

/// Convenience prelude for implementors and consumers of the contracts.
pub mod prelude {
    pub use crate::entry::{SearchEntry, SearchScope};
    pub use crate::error::{DirectoryError, DirectoryResult};
    pub use crate::topology::{DomainController, DomainHandle, Forest, ForestDomain};
    pub use crate::traits::{
        DirectoryClient, DirectorySearch, DomainTopology, EntryClassifier, SidResolver,
    };
    pub use crate::types::{GroupMember, MappedPrincipal, ObjectKind, ResolvedEntry};
}
