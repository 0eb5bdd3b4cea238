//! Structure tree traversal.
//!
//! Pre-order walks over the arena in document order, ancestor chains, and
//! reading-order extraction of marked content for a page.

use super::tree::StructTree;
use super::types::{StructChild, StructElemId};

/// Iterator over the ancestors of an element, nearest first.
pub struct Ancestors<'a> {
    tree: &'a StructTree,
    next: Option<StructElemId>,
}

impl Iterator for Ancestors<'_> {
    type Item = StructElemId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.get(current).ok().and_then(|e| e.parent());
        Some(current)
    }
}

/// Pre-order iterator over a subtree, the start element included.
pub struct Descendants<'a> {
    tree: &'a StructTree,
    stack: Vec<StructElemId>,
}

impl Iterator for Descendants<'_> {
    type Item = StructElemId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Ok(elem) = self.tree.get(current) {
            // Reverse so the first child is visited first
            let children: Vec<_> = elem.child_elems().collect();
            self.stack.extend(children.into_iter().rev());
        }
        Some(current)
    }
}

impl StructTree {
    /// Ancestors of `id`, parent first. `id` itself is not included.
    pub fn ancestors(&self, id: StructElemId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).ok().and_then(|e| e.parent()),
        }
    }

    /// Pre-order walk of the subtree rooted at `id`.
    pub fn descendants(&self, id: StructElemId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    /// Pre-order walk of every element reachable from the StructTreeRoot.
    pub fn walk(&self) -> impl Iterator<Item = StructElemId> + '_ {
        self.roots().iter().flat_map(move |root| self.descendants(*root))
    }
}

/// Represents an ordered content item extracted from the structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedContent {
    /// Page number
    pub page: usize,
    /// Marked Content ID
    pub mcid: u32,
    /// Owning structure element
    pub owner: StructElemId,
    /// Role as written on the owner
    pub role: String,
}

/// Traverse the structure tree and extract ordered content for a specific page.
///
/// Marked content references are returned in document order, which is the
/// logical reading order of a tagged document.
pub fn traverse_structure_tree(tree: &StructTree, page: usize) -> Vec<OrderedContent> {
    let mut result = Vec::new();
    for id in tree.walk() {
        let Ok(elem) = tree.get(id) else { continue };
        for child in elem.children() {
            if let StructChild::MarkedContent(mcr) = child {
                if mcr.page == page {
                    result.push(OrderedContent {
                        page: mcr.page,
                        mcid: mcr.mcid,
                        owner: id,
                        role: elem.role().to_string(),
                    });
                }
            }
        }
    }
    result
}

/// Extract all marked content IDs in reading order for a page.
pub fn extract_reading_order(tree: &StructTree, page: usize) -> Vec<u32> {
    traverse_structure_tree(tree, page)
        .into_iter()
        .map(|c| c.mcid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::types::MarkedContentRef;

    #[test]
    fn test_simple_traversal() {
        // Document
        //   ├─ P (MCID=0, page=0)
        //   └─ P (MCID=1, page=0)
        let mut tree = StructTree::new();
        let doc = tree.add_root("Document");
        let p1 = tree.add_elem(doc, "P").unwrap();
        tree.add_marked_content(p1, MarkedContentRef { page: 0, mcid: 0 }).unwrap();
        let p2 = tree.add_elem(doc, "P").unwrap();
        tree.add_marked_content(p2, MarkedContentRef { page: 0, mcid: 1 }).unwrap();

        assert_eq!(extract_reading_order(&tree, 0), vec![0, 1]);
    }

    #[test]
    fn test_page_filtering() {
        let mut tree = StructTree::new();
        let doc = tree.add_root("Document");
        let p1 = tree.add_elem(doc, "P").unwrap();
        tree.add_marked_content(p1, MarkedContentRef { page: 0, mcid: 0 }).unwrap();
        let p2 = tree.add_elem(doc, "P").unwrap();
        tree.add_marked_content(p2, MarkedContentRef { page: 1, mcid: 0 }).unwrap();

        assert_eq!(traverse_structure_tree(&tree, 0).len(), 1);
        assert_eq!(traverse_structure_tree(&tree, 1)[0].owner, p2);
    }

    #[test]
    fn test_nested_structure_order() {
        // Document
        //   └─ Sect
        //       ├─ H1 (MCID=1)
        //       └─ P (MCID=0)
        let mut tree = StructTree::new();
        let doc = tree.add_root("Document");
        let sect = tree.add_elem(doc, "Sect").unwrap();
        let h1 = tree.add_elem(sect, "H1").unwrap();
        tree.add_marked_content(h1, MarkedContentRef { page: 0, mcid: 1 }).unwrap();
        let p = tree.add_elem(sect, "P").unwrap();
        tree.add_marked_content(p, MarkedContentRef { page: 0, mcid: 0 }).unwrap();

        assert_eq!(extract_reading_order(&tree, 0), vec![1, 0]);
        assert_eq!(tree.walk().collect::<Vec<_>>(), vec![doc, sect, h1, p]);
    }

    #[test]
    fn test_ancestors() {
        let mut tree = StructTree::new();
        let doc = tree.add_root("Document");
        let l = tree.add_elem(doc, "L").unwrap();
        let li = tree.add_elem(l, "LI").unwrap();
        assert_eq!(tree.ancestors(li).collect::<Vec<_>>(), vec![l, doc]);
        assert_eq!(tree.ancestors(doc).count(), 0);
    }
}
