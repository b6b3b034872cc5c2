//! Node model - vnode descriptors and how they are built.
//!
//! A render pass produces a fresh tree of [`VNode`]s. Every node records:
//! - its kind (element tag, text, or component)
//! - an optional attribute snapshot
//! - its normalized children
//! - a shape flag summarizing kind and children arrangement
//! - the component that was rendering when it was created
//!
//! ```text
//! render fn ──create_vnode──► VNode ──clone_vnode / normalize_vnode──► patcher
//! ```

mod create;
mod node;

pub use create::*;
pub use node::*;
