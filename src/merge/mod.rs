//! Plain deep merge
//!
//! Builds a new record from its inputs, never mutating them:
//! - Records: deep-merge by key (recursive)
//! - Arrays: REPLACE in the pairwise form, CONCATENATE in the variadic form
//! - Scalars: override (last wins)
//!
//! Every record and array in the output is freshly allocated, so the
//! result can be mutated without touching any input.

mod detach;
mod pairwise;
mod variadic;

pub use pairwise::merge_deep;
pub use variadic::{merge_all, merge_deep_all, MergeOptions};
