//! Error type shared by the node model and the component layer.

use thiserror::Error;

/// Failures surfaced to the render caller.
///
/// None of these are transient. Each one is a defect in the code that
/// produced the render output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A list was handed over where a single child was expected.
    /// Grouping sibling nodes under one child is not supported.
    #[error("multiple children cannot be normalized into a single node")]
    UnsupportedMultiChild,

    /// The renderer tried to bind a second host node to a vnode.
    #[error("host node already bound to this vnode")]
    HostAlreadyBound,

    /// A component's render function failed.
    #[error("render failed in component `{component}`: {message}")]
    Render { component: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
