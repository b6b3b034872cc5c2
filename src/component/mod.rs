//! Components - definitions, instances, render context, props.
//!
//! # Prop refresh
//!
//! ```text
//! parent render ──raw attributes──► init_props ──PropMap──► ReactiveProps::wrap ──► instance
//! ```
//!
//! The refresh runs once per render pass, before the instance renders, and
//! always rebuilds the whole set.

mod context;
mod definition;
mod instance;
mod props;
mod reactive;

pub use context::*;
pub use definition::*;
pub use instance::*;
pub use props::*;
pub use reactive::*;
