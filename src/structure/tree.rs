//! The structure tree (StructTreeRoot) and its mutation API.
//!
//! Nodes live in an arena indexed by [`StructElemId`]; parent and child links
//! are ids, never references, so the tree can be mutated freely while rules
//! walk the role-mapping graph through [`super::RoleResolver`].

use super::attributes::AttributeDict;
use super::types::{
    MarkedContentRef, Namespace, NamespaceId, RoleTarget, StandardNamespace, StructChild,
    StructElem, StructElemId,
};
use crate::encoding::TextString;
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use indexmap::IndexMap;

/// The root of a structure tree.
#[derive(Debug, Clone, Default)]
pub struct StructTree {
    nodes: Vec<StructElem>,
    roots: Vec<StructElemId>,
    namespaces: Vec<Namespace>,
    default_namespace: Option<NamespaceId>,
    role_map: IndexMap<String, String>,
}

/// Snapshot of the tree shape, used to undo a rejected operation.
#[derive(Debug, Clone, Copy)]
pub struct TreeCheckpoint {
    nodes: usize,
    roots: usize,
    parent: Option<(StructElemId, usize)>,
}

impl StructTree {
    /// Create an empty structure tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements ever created (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no element has been created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level elements (`K` of the StructTreeRoot).
    pub fn roots(&self) -> &[StructElemId] {
        &self.roots
    }

    /// Get an element.
    pub fn get(&self, id: StructElemId) -> Result<&StructElem> {
        self.nodes.get(id.0).ok_or(Error::UnknownStructElem(id))
    }

    fn get_mut(&mut self, id: StructElemId) -> Result<&mut StructElem> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownStructElem(id))
    }

    /// Check whether `id` names an element of this tree.
    pub fn contains(&self, id: StructElemId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Create a detached element with the given role.
    pub fn create_elem(&mut self, role: impl Into<String>) -> StructElemId {
        let id = StructElemId(self.nodes.len());
        self.nodes.push(StructElem::new(role));
        id
    }

    /// Create an element and append it to the StructTreeRoot.
    pub fn add_root(&mut self, role: impl Into<String>) -> StructElemId {
        let id = self.create_elem(role);
        self.roots.push(id);
        id
    }

    /// Create an element and append it below `parent`.
    pub fn add_elem(&mut self, parent: StructElemId, role: impl Into<String>) -> Result<StructElemId> {
        self.get(parent)?;
        let id = self.create_elem(role);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Append an existing detached element below `parent`.
    pub fn attach(&mut self, parent: StructElemId, child: StructElemId) -> Result<()> {
        self.get(parent)?;
        if self.get(child)?.parent.is_some() || self.roots.contains(&child) {
            return Err(Error::InvalidStructure(format!("{} is already attached", child)));
        }
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(Error::InvalidStructure(format!(
                "attaching {} below {} would create a cycle",
                child, parent
            )));
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(StructChild::Elem(child));
        Ok(())
    }

    /// Detach an element from its parent (or from the root); its subtree is
    /// no longer part of the document.
    pub fn remove(&mut self, id: StructElemId) -> Result<()> {
        match self.get(id)?.parent {
            Some(parent) => {
                self.get_mut(parent)?
                    .children
                    .retain(|c| *c != StructChild::Elem(id));
                self.get_mut(id)?.parent = None;
            },
            None => self.roots.retain(|r| *r != id),
        }
        Ok(())
    }

    /// Change the role of an element.
    pub fn set_role(&mut self, id: StructElemId, role: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.role = role.into();
        Ok(())
    }

    /// Set or clear the explicit namespace of an element.
    pub fn set_namespace(&mut self, id: StructElemId, ns: Option<NamespaceId>) -> Result<()> {
        if let Some(ns) = ns {
            self.namespace(ns)?;
        }
        self.get_mut(id)?.namespace = ns;
        Ok(())
    }

    /// Append an attribute dictionary (it loses to every earlier one).
    pub fn add_attributes(&mut self, id: StructElemId, attributes: AttributeDict) -> Result<()> {
        self.get_mut(id)?.attributes.push(attributes);
        Ok(())
    }

    /// Insert an attribute dictionary at `index` in document order.
    pub fn insert_attributes(
        &mut self,
        id: StructElemId,
        index: usize,
        attributes: AttributeDict,
    ) -> Result<()> {
        let elem = self.get_mut(id)?;
        let index = index.min(elem.attributes.len());
        elem.attributes.insert(index, attributes);
        Ok(())
    }

    /// Add a `Ref` pointer from `id` to `target`.
    pub fn add_ref(&mut self, id: StructElemId, target: StructElemId) -> Result<()> {
        self.get_mut(id)?.props.refs.push(target);
        Ok(())
    }

    /// Set or clear the alternate description.
    pub fn set_alt(&mut self, id: StructElemId, alt: Option<TextString>) -> Result<()> {
        self.get_mut(id)?.props.alt = alt;
        Ok(())
    }

    /// Set or clear the replacement text.
    pub fn set_actual_text(&mut self, id: StructElemId, text: Option<TextString>) -> Result<()> {
        self.get_mut(id)?.props.actual_text = text;
        Ok(())
    }

    /// Set or clear the expansion text.
    pub fn set_expansion(&mut self, id: StructElemId, text: Option<TextString>) -> Result<()> {
        self.get_mut(id)?.props.expansion = text;
        Ok(())
    }

    /// Set or clear the language.
    pub fn set_lang(&mut self, id: StructElemId, lang: Option<TextString>) -> Result<()> {
        self.get_mut(id)?.props.lang = lang;
        Ok(())
    }

    /// Link marked content to its owning element.
    pub fn add_marked_content(&mut self, id: StructElemId, mcr: MarkedContentRef) -> Result<()> {
        self.get_mut(id)?.children.push(StructChild::MarkedContent(mcr));
        Ok(())
    }

    /// Link an object (annotation, XObject) to its owning element.
    pub fn add_object_ref(&mut self, id: StructElemId, obj: ObjectRef) -> Result<()> {
        self.get_mut(id)?.children.push(StructChild::Object(obj));
        Ok(())
    }

    // ===== Namespaces and role maps =====

    /// Register a namespace by URI, reusing an existing one with the same URI.
    pub fn add_namespace(&mut self, uri: &str) -> NamespaceId {
        if let Some(pos) = self.namespaces.iter().position(|ns| ns.uri() == uri) {
            return NamespaceId(pos);
        }
        self.namespaces.push(Namespace::new(uri));
        NamespaceId(self.namespaces.len() - 1)
    }

    /// Get a namespace.
    pub fn namespace(&self, id: NamespaceId) -> Result<&Namespace> {
        self.namespaces.get(id.0).ok_or(Error::UnknownNamespace(id.0))
    }

    /// All namespaces with their ids.
    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &Namespace)> {
        self.namespaces
            .iter()
            .enumerate()
            .map(|(i, ns)| (NamespaceId(i), ns))
    }

    /// Declare the namespace used by elements without an explicit one.
    pub fn set_default_namespace(&mut self, ns: Option<NamespaceId>) -> Result<()> {
        if let Some(ns) = ns {
            self.namespace(ns)?;
        }
        self.default_namespace = ns;
        Ok(())
    }

    /// The declared default namespace.
    pub fn default_namespace(&self) -> Option<NamespaceId> {
        self.default_namespace
    }

    /// The vocabulary that applies to an element with namespace `ns`.
    pub fn vocabulary(&self, ns: Option<NamespaceId>) -> &StandardNamespace {
        static IMPLICIT: StandardNamespace = StandardNamespace::Pdf1_7;
        match ns.or(self.default_namespace) {
            Some(id) => self.namespaces.get(id.0).map_or(&IMPLICIT, |n| n.kind()),
            None => &IMPLICIT,
        }
    }

    /// Add (or replace) a document-global mapping (`RoleMap`).
    pub fn add_role_mapping(&mut self, role: impl Into<String>, target: impl Into<String>) {
        self.role_map.insert(role.into(), target.into());
    }

    /// The document-global role map.
    pub fn role_map(&self) -> &IndexMap<String, String> {
        &self.role_map
    }

    /// Add (or replace) a mapping scoped to namespace `ns` (`RoleMapNS`).
    ///
    /// `target_ns` of `None` keeps the target in `ns`.
    pub fn add_namespace_role_mapping(
        &mut self,
        ns: NamespaceId,
        role: impl Into<String>,
        target: impl Into<String>,
        target_ns: Option<NamespaceId>,
    ) -> Result<()> {
        if let Some(t) = target_ns {
            self.namespace(t)?;
        }
        let namespace = self
            .namespaces
            .get_mut(ns.0)
            .ok_or(Error::UnknownNamespace(ns.0))?;
        namespace.role_map.insert(
            role.into(),
            RoleTarget {
                role: target.into(),
                namespace: target_ns,
            },
        );
        Ok(())
    }

    // ===== Transactions =====

    /// Remember the current shape before staging elements below `parent`.
    pub fn checkpoint(&self, parent: Option<StructElemId>) -> TreeCheckpoint {
        TreeCheckpoint {
            nodes: self.nodes.len(),
            roots: self.roots.len(),
            parent: parent.and_then(|p| self.nodes.get(p.0).map(|e| (p, e.children.len()))),
        }
    }

    /// Drop everything staged since `checkpoint`.
    ///
    /// Only valid when the staged operation created new elements and appended
    /// children to the checkpointed parent.
    pub fn rollback(&mut self, checkpoint: TreeCheckpoint) {
        self.nodes.truncate(checkpoint.nodes);
        self.roots.truncate(checkpoint.roots);
        if let Some((parent, len)) = checkpoint.parent {
            if let Some(elem) = self.nodes.get_mut(parent.0) {
                elem.children.truncate(len);
            }
        }
    }
}
