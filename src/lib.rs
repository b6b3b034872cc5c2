//! # vnode-core
//!
//! Node model and prop ingestion for a declarative UI runtime.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! observable prop set.
//!
//! ## Architecture
//!
//! A render pass describes what should be shown as a tree of lightweight
//! [`VNode`]s. Before a component renders, its raw attributes are filtered
//! against the declared schema and installed as a [`ReactiveProps`] set.
//!
//! ```text
//! raw attributes → init_props → ReactiveProps → render fn → VNode tree → patcher
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Dynamic values, attribute bags, shape flags
//! - [`vnode`] - VNode creation, children normalization, cloning
//! - [`component`] - Definitions, instances, render context, props
//! - [`config`] - Thread-local runtime configuration
//! - [`error`] - Error type

pub mod component;
pub mod config;
pub mod error;
pub mod types;
pub mod vnode;

pub use types::*;

pub use error::{Error, Result};

pub use config::{reset_runtime_config, runtime_config, set_runtime_config, RuntimeConfig};

pub use vnode::{
    clone_vnode, create_blank_text_vnode, create_text_vnode, create_vnode, h, is_vnode,
    normalize_children, normalize_vnode, Children, HostHandle, NodeKind, RawChildren, VNode,
    VNodeChild, DEFAULT_TEXT,
};

pub use component::{
    camelize, current_rendering_instance, init_props, is_reserved_prop, reset_render_stack,
    resolve_props, with_rendering_instance, ComponentDef, ComponentInstance, PropOptions,
    PropType, PropsOptions, ReactiveProps, RenderScope, RESERVED_PROPS,
};
