//! Domain and forest topology types
//!
//! Shapes returned by the topology collaborator. Topology discovery itself
//! (locating controllers, walking trusts) lives outside this crate; the engine
//! only consumes the resolved view.

use serde::{Deserialize, Serialize};

/// A single domain controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainController {
    /// DNS host name of the controller.
    pub host_name: String,
}

impl DomainController {
    /// Create a new controller record.
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
        }
    }
}

/// One domain inside a forest, with its enumerated controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestDomain {
    /// DNS name of the domain.
    pub name: String,
    /// Domain controllers serving this domain.
    pub controllers: Vec<DomainController>,
}

impl ForestDomain {
    /// Create a new forest domain record.
    pub fn new(name: impl Into<String>, controllers: Vec<DomainController>) -> Self {
        Self {
            name: name.into(),
            controllers,
        }
    }
}

/// A forest: the common root shared by a set of trusted domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forest {
    /// DNS name of the forest root.
    pub name: String,
    /// All member domains of the forest.
    pub domains: Vec<ForestDomain>,
}

impl Forest {
    /// Create a new forest record.
    pub fn new(name: impl Into<String>, domains: Vec<ForestDomain>) -> Self {
        Self {
            name: name.into(),
            domains,
        }
    }
}

/// A resolved domain: name, SID prefix, and its owning forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainHandle {
    /// DNS name of the domain.
    pub name: String,
    /// Security identifier prefix of the domain (e.g. `S-1-5-21-...`).
    pub sid: String,
    /// The forest this domain belongs to.
    pub forest: Forest,
}

impl DomainHandle {
    /// Create a new domain handle.
    pub fn new(name: impl Into<String>, sid: impl Into<String>, forest: Forest) -> Self {
        Self {
            name: name.into(),
            sid: sid.into(),
            forest,
        }
    }
}
