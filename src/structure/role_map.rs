//! Role mapping resolution (ISO 32000-2:2020, Section 14.8.6).
//!
//! A role written on a structure element is resolved by following mapping
//! edges until a standard structure type of the namespace being evaluated is
//! reached. The mapping graph is keyed by `(role, namespace)`; a
//! namespace-scoped table takes precedence over the document-global
//! `RoleMap`, which is consulted when the role is unmapped in the namespace.
//!
//! The graph is producer supplied and may be cyclic or arbitrarily deep, so
//! every walk carries a visited set and a hop budget.

use super::tree::StructTree;
use super::types::{NamespaceId, RoleCategory, StandardNamespace, StructElemId, StructType};
use crate::error::Result;
use std::collections::HashSet;
use std::fmt;

/// Default hop budget for a single resolution.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// A role that resolved to a standard structure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    /// The standard type reached
    pub struct_type: StructType,
    /// Vocabulary the standard type belongs to
    pub namespace: StandardNamespace,
    /// Number of mapping edges followed (0 for a standard role)
    pub hops: usize,
}

impl ResolvedRole {
    /// Role category of the resolved type.
    pub fn category(&self) -> RoleCategory {
        self.struct_type.category()
    }
}

/// Why a role could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// The walk reached a role with no outgoing edge that is not standard
    Unmapped {
        /// The last role reached
        role: String,
        /// Namespace URI it was evaluated in
        namespace: String,
    },
    /// The walk revisited a `(role, namespace)` pair
    Cycle {
        /// Roles visited, ending with the repeated one
        chain: Vec<String>,
    },
    /// The walk exceeded the hop budget without a repeated pair
    TooDeep {
        /// The role the walk started from
        role: String,
        /// The hop budget that was exhausted
        depth: usize,
    },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmapped { role, namespace } => write!(
                f,
                "role '{}' is not mapped to a standard structure type of namespace {}",
                role, namespace
            ),
            Self::Cycle { chain } => write!(f, "role map cycle: {}", chain.join(" -> ")),
            Self::TooDeep { role, depth } => write!(
                f,
                "role '{}' does not reach a standard structure type within {} mappings",
                role, depth
            ),
        }
    }
}

/// Outcome of resolving a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The role terminates in a standard structure type
    Standard(ResolvedRole),
    /// The role does not terminate
    Unresolvable(Unresolved),
}

impl Resolution {
    /// Check if the role resolved.
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }

    /// The resolved type, if any.
    pub fn struct_type(&self) -> Option<&StructType> {
        match self {
            Self::Standard(resolved) => Some(&resolved.struct_type),
            Self::Unresolvable(_) => None,
        }
    }

    /// The resolved category, if any.
    pub fn category(&self) -> Option<RoleCategory> {
        self.struct_type().map(StructType::category)
    }
}

/// A standard role mapped to something other than itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedRole {
    /// The standard role used as a mapping key
    pub role: String,
    /// The role it is mapped to
    pub target: String,
    /// `None` for the global `RoleMap`, else the namespace URI
    pub namespace: Option<String>,
    /// Namespace URI of the target, when a `RoleMapNS` entry names one
    pub target_namespace: Option<String>,
}

/// Resolves roles against the mapping tables of one structure tree.
#[derive(Debug, Clone, Copy)]
pub struct RoleResolver<'a> {
    tree: &'a StructTree,
    max_depth: usize,
}

impl<'a> RoleResolver<'a> {
    /// Create a resolver with the given hop budget.
    pub fn new(tree: &'a StructTree, max_depth: usize) -> Self {
        Self { tree, max_depth }
    }

    /// The tree this resolver reads.
    pub fn tree(&self) -> &'a StructTree {
        self.tree
    }

    /// Resolve `role` as written on an element with namespace `ns`.
    pub fn resolve(&self, role: &str, ns: Option<NamespaceId>) -> Resolution {
        let mut current = role.to_string();
        let mut current_ns = ns.or(self.tree.default_namespace());
        let mut visited: HashSet<(String, Option<NamespaceId>)> = HashSet::new();
        let mut chain: Vec<String> = Vec::new();
        let mut hops = 0;

        loop {
            let vocabulary = self.tree.vocabulary(current_ns);
            if let Some(struct_type) = StructType::from_standard_name(&current, vocabulary) {
                return Resolution::Standard(ResolvedRole {
                    struct_type,
                    namespace: vocabulary.clone(),
                    hops,
                });
            }

            chain.push(current.clone());
            if !visited.insert((current.clone(), current_ns)) {
                log::error!("Role map cycle detected: {}", chain.join(" -> "));
                return Resolution::Unresolvable(Unresolved::Cycle { chain });
            }

            if hops >= self.max_depth {
                log::error!(
                    "Role '{}' exceeds the role map depth of {} mappings",
                    role,
                    self.max_depth
                );
                return Resolution::Unresolvable(Unresolved::TooDeep {
                    role: role.to_string(),
                    depth: self.max_depth,
                });
            }

            match self.next_edge(&current, current_ns) {
                Some((target, target_ns)) => {
                    current = target;
                    current_ns = target_ns;
                    hops += 1;
                },
                None => {
                    let namespace = vocabulary.uri().to_string();
                    log::warn!("Role '{}' is not mapped to a standard type", current);
                    return Resolution::Unresolvable(Unresolved::Unmapped {
                        role: current,
                        namespace,
                    });
                },
            }
        }
    }

    /// Resolve the role of a structure element.
    pub fn resolve_elem(&self, id: StructElemId) -> Result<Resolution> {
        let elem = self.tree.get(id)?;
        Ok(self.resolve(elem.role(), elem.namespace()))
    }

    /// Follow one mapping edge: the namespace table first, then the global one.
    fn next_edge(
        &self,
        role: &str,
        ns: Option<NamespaceId>,
    ) -> Option<(String, Option<NamespaceId>)> {
        if let Some(ns_id) = ns {
            let scoped = self
                .tree
                .namespace(ns_id)
                .ok()
                .and_then(|namespace| namespace.role_map().get(role));
            if let Some(target) = scoped {
                return Some((target.role.clone(), target.namespace.or(Some(ns_id))));
            }
        }
        self.tree
            .role_map()
            .get(role)
            .map(|target| (target.clone(), self.tree.default_namespace()))
    }

    /// Standard roles mapped to a different role, in the global table and in
    /// every namespace table. Roles listed in `permitted` are skipped.
    pub fn remapped_standard_roles(&self, permitted: &[String]) -> Vec<RemappedRole> {
        let is_permitted = |role: &str| permitted.iter().any(|p| p == role);
        let mut remapped = Vec::new();

        let global_vocabulary = self.tree.vocabulary(None);
        for (role, target) in self.tree.role_map() {
            let standard = global_vocabulary.is_standard(role)
                || StandardNamespace::Pdf1_7.is_standard(role);
            if standard && role != target && !is_permitted(role) {
                remapped.push(RemappedRole {
                    role: role.clone(),
                    target: target.clone(),
                    namespace: None,
                    target_namespace: None,
                });
            }
        }

        // Identity means the same name in the same namespace.
        for (_, namespace) in self.tree.namespaces() {
            for (role, target) in namespace.role_map() {
                if !namespace.kind().is_standard(role) || is_permitted(role) {
                    continue;
                }
                let target_uri = match target.namespace {
                    Some(id) => self.tree.namespace(id).ok().map(|ns| ns.uri()),
                    None => Some(namespace.uri()),
                };
                if *role != target.role || target_uri != Some(namespace.uri()) {
                    remapped.push(RemappedRole {
                        role: role.clone(),
                        target: target.role.clone(),
                        namespace: Some(namespace.uri().to_string()),
                        target_namespace: target_uri.map(str::to_string),
                    });
                }
            }
        }

        remapped
    }
}
