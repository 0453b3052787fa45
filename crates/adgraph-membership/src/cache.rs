//! Shared principal cache
//!
//! Process-wide DN → resolved principal map shared by all concurrent
//! resolution workers. A store is an idempotent upsert: the same DN always
//! resolves to the same identity, so last-write-wins under a race is safe. A
//! momentary miss during a concurrent store only costs a redundant directory
//! resolution.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use adgraph_directory::{MappedPrincipal, ObjectKind};

/// Cloneable handle to the shared DN → principal cache.
///
/// Entries accumulate monotonically for the lifetime of the process; there is
/// no eviction within a run.
#[derive(Debug, Clone, Default)]
pub struct PrincipalCache {
    inner: Arc<RwLock<HashMap<String, MappedPrincipal>>>,
}

impl PrincipalCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a distinguished name. Never fails; `None` is a miss.
    pub async fn lookup(&self, dn: &str) -> Option<MappedPrincipal> {
        self.inner.read().await.get(dn).cloned()
    }

    /// Store a resolved principal under its distinguished name.
    ///
    /// Idempotent upsert; a value written for a DN is treated as authoritative
    /// for the rest of the run.
    pub async fn store(&self, dn: &str, kind: ObjectKind, display_name: &str) {
        debug!(dn = %dn, kind = %kind, display_name = %display_name, "Caching principal");
        self.inner
            .write()
            .await
            .insert(dn.to_string(), MappedPrincipal::new(display_name, kind));
    }

    /// Number of cached principals.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_miss_then_hit() {
        let cache = PrincipalCache::new();
        let dn = "CN=Ops,DC=corp,DC=local";

        assert!(cache.lookup(dn).await.is_none());

        cache.store(dn, ObjectKind::Group, "OPS@CORP.LOCAL").await;

        let hit = cache.lookup(dn).await.expect("expected a cache hit");
        assert_eq!(hit.display_name, "OPS@CORP.LOCAL");
        assert_eq!(hit.kind, ObjectKind::Group);
    }

    #[tokio::test]
    async fn test_store_is_idempotent() {
        let cache = PrincipalCache::new();
        let dn = "CN=JDoe,DC=corp,DC=local";

        cache.store(dn, ObjectKind::User, "JDOE@CORP.LOCAL").await;
        cache.store(dn, ObjectKind::User, "JDOE@CORP.LOCAL").await;

        assert_eq!(cache.len().await, 1);
        let hit = cache.lookup(dn).await.unwrap();
        assert_eq!(hit.display_name, "JDOE@CORP.LOCAL");
    }

    #[tokio::test]
    async fn test_concurrent_stores_and_lookups() {
        let cache = PrincipalCache::new();
        let mut handles = Vec::new();

        for i in 0..32 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let dn = format!("CN=U{i},DC=corp,DC=local");
                cache
                    .store(&dn, ObjectKind::User, &format!("U{i}@CORP.LOCAL"))
                    .await;
                cache.lookup(&dn).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
        assert_eq!(cache.len().await, 32);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = PrincipalCache::new();
        let other = cache.clone();

        cache
            .store("CN=A,DC=corp,DC=local", ObjectKind::Computer, "A.CORP.LOCAL")
            .await;

        assert!(other.lookup("CN=A,DC=corp,DC=local").await.is_some());
    }
}
