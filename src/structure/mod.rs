//! PDF Logical Structure (Tagged PDF) model.
//!
//! This module implements the structure tree of a tagged document according
//! to ISO 32000-1:2008 Section 14.7 and ISO 32000-2:2020 Section 14.8.
//!
//! ## Overview
//!
//! A structure tree consists of:
//! - **StructTreeRoot**: The root of the structure hierarchy ([`StructTree`])
//! - **StructElem**: Structure elements (paragraphs, headings, lists, etc.)
//! - **Namespaces**: PDF 1.7, PDF 2.0, MathML or producer-defined vocabularies
//! - **RoleMap / RoleMapNS**: Mappings from custom roles to standard types
//! - **Marked Content**: Tagged content in page streams (BDC/EMC operators)
//!
//! ## Role Resolution
//!
//! Custom roles are resolved by [`RoleResolver`], which follows mapping edges
//! until a standard type is reached and reports cycles and excessive chains
//! as unresolvable.
//!
//! ## Example
//!
//! ```
//! use pdfua_check::structure::{RoleResolver, StructTree, StructType};
//!
//! let mut tree = StructTree::new();
//! let doc = tree.add_root("Document");
//! tree.add_elem(doc, "Chapter").unwrap();
//! tree.add_role_mapping("Chapter", "Sect");
//!
//! let resolver = RoleResolver::new(&tree, 32);
//! assert_eq!(resolver.resolve("Chapter", None).struct_type(), Some(&StructType::Sect));
//! ```

pub mod attributes;
pub mod role_map;
pub mod traversal;
mod tree;
mod types;

pub use attributes::{
    effective_list_numbering, first_attribute, AttributeDict, EffectiveListNumbering,
    ListNumbering,
};
pub use role_map::{
    RemappedRole, Resolution, ResolvedRole, RoleResolver, Unresolved, DEFAULT_MAX_DEPTH,
};
pub use traversal::{extract_reading_order, traverse_structure_tree, OrderedContent};
pub use tree::{StructTree, TreeCheckpoint};
pub use types::{
    AccessibilityProps, MarkedContentRef, Namespace, NamespaceId, RoleCategory, RoleTarget,
    StandardNamespace, StructChild, StructElem, StructElemId, StructType, NS_MATHML, NS_PDF_1_7,
    NS_PDF_2_0,
};
