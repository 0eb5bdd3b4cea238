//! Individual PDF/UA rule modules.
//!
//! Every module exposes a `check` function with the same signature: it reads
//! the document through a [`CheckContext`] and records violations, warnings
//! and statistics in a [`UaValidationResult`]. Rules are independent of each
//! other; their order only decides which violation is surfaced first in
//! fail-fast mode.
//!
//! Some modules also expose narrower entry points used by the incremental
//! triggers (annotation add, layout element add, tag open and content
//! emission).

pub mod annotations;
pub mod catalog;
pub mod encryption;
pub mod figures;
pub mod files;
pub mod links;
pub mod lists;
pub mod references;
pub mod roles;
pub mod strings;
pub mod toc;
pub mod xfa;

use super::context::CheckContext;
use super::pdf_ua::UaValidationResult;
use crate::error::Result;

/// Signature shared by all finalization rules.
pub type RuleFn = fn(&CheckContext<'_>, &mut UaValidationResult) -> Result<()>;

/// Finalization rules in evaluation order.
pub const FINALIZATION_RULES: &[(&str, RuleFn)] = &[
    ("tagged", catalog::check_tagged),
    ("catalog", catalog::check),
    ("roles", roles::check),
    ("references", references::check),
    ("lists", lists::check),
    ("toc", toc::check),
    ("figures", figures::check),
    ("links", links::check),
    ("annotations", annotations::check),
    ("files", files::check),
    ("strings", strings::check),
    ("encryption", encryption::check),
    ("xfa", xfa::check),
];
