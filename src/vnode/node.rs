//! VNode - one point in the rendered UI tree.

use std::any::Any;
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::component::{ComponentDef, ComponentInstance};
use crate::error::{Error, Result};
use crate::types::{Attributes, ShapeFlags};

/// Opaque handle to the platform node a renderer created for a vnode.
pub type HostHandle = Rc<dyn Any>;

// =============================================================================
// Node Kind
// =============================================================================

/// What a vnode stands for.
#[derive(Clone)]
pub enum NodeKind {
    /// Host element, identified by tag name.
    Element(String),
    /// Text node. The payload lives in [`Children::Text`].
    Text,
    /// Component reference.
    Component(Rc<ComponentDef>),
}

impl NodeKind {
    /// Element kind from a tag name.
    pub fn element(tag: impl Into<String>) -> Self {
        NodeKind::Element(tag.into())
    }

    /// Category bit for this kind.
    pub fn shape(&self) -> ShapeFlags {
        match self {
            NodeKind::Element(_) => ShapeFlags::ELEMENT,
            NodeKind::Text => ShapeFlags::TEXT,
            NodeKind::Component(_) => ShapeFlags::COMPONENT,
        }
    }
}

impl PartialEq for NodeKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeKind::Element(a), NodeKind::Element(b)) => a == b,
            (NodeKind::Text, NodeKind::Text) => true,
            (NodeKind::Component(a), NodeKind::Component(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Element(tag) => f.debug_tuple("Element").field(tag).finish(),
            NodeKind::Text => write!(f, "Text"),
            NodeKind::Component(def) => f.debug_tuple("Component").field(&def.name()).finish(),
        }
    }
}

// =============================================================================
// Children
// =============================================================================

/// Normalized children of a vnode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Children {
    #[default]
    None,
    /// Raw text payload (text nodes).
    Text(String),
    /// Ordered child nodes.
    List(Vec<VNode>),
}

impl Children {
    pub fn is_list(&self) -> bool {
        matches!(self, Children::List(_))
    }

    pub fn as_list(&self) -> Option<&[VNode]> {
        match self {
            Children::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Children::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Children-arrangement bits matching this shape.
    pub(crate) fn shape(&self) -> ShapeFlags {
        match self {
            Children::None => ShapeFlags::empty(),
            Children::Text(_) => ShapeFlags::TEXT_CHILDREN,
            Children::List(_) => ShapeFlags::ARRAY_CHILDREN,
        }
    }
}

// =============================================================================
// VNode
// =============================================================================

/// Lightweight description of one point in the UI tree.
///
/// Built fresh on every render pass. Only the host slot changes after
/// creation, and only once. Children are private so the shape flag can
/// never drift from the actual children arrangement.
pub struct VNode {
    pub(crate) kind: NodeKind,
    pub(crate) attributes: Option<Rc<Attributes>>,
    pub(crate) children: Children,
    pub(crate) host: OnceCell<HostHandle>,
    pub(crate) render_context: Option<Weak<ComponentInstance>>,
    pub(crate) shape_flag: ShapeFlags,
}

impl VNode {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn attributes(&self) -> Option<&Rc<Attributes>> {
        self.attributes.as_ref()
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Mutable access to a list of children.
    ///
    /// Only list children are exposed: editing the list in place cannot change
    /// the arrangement, so the shape flag stays valid.
    pub fn children_list_mut(&mut self) -> Option<&mut Vec<VNode>> {
        match &mut self.children {
            Children::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn shape_flag(&self) -> ShapeFlags {
        self.shape_flag
    }

    /// Text payload of a text node.
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Text => self.children.as_text(),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    /// Component that was rendering when this node was created, if it is
    /// still alive.
    pub fn render_context(&self) -> Option<Rc<ComponentInstance>> {
        self.render_context.as_ref().and_then(Weak::upgrade)
    }

    /// True if both nodes were created under the same component (or both at
    /// the root).
    pub fn same_render_context(&self, other: &VNode) -> bool {
        match (&self.render_context, &other.render_context) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Host node bound by the renderer.
    pub fn host(&self) -> Option<&HostHandle> {
        self.host.get()
    }

    /// Bind the platform node. Fails if a host node is already bound.
    pub fn bind_host(&self, handle: HostHandle) -> Result<()> {
        self.host.set(handle).map_err(|_| Error::HostAlreadyBound)
    }
}

/// Cloning gives the node a fresh identity for its children list.
///
/// - attributes: shared snapshot (the `Rc` is cloned, not the map)
/// - list children: new list, each element cloned recursively
/// - text children, shape flag, host handle, render context: copied as-is
impl Clone for VNode {
    fn clone(&self) -> Self {
        let children = match &self.children {
            Children::List(list) => Children::List(list.iter().map(VNode::clone).collect()),
            other => other.clone(),
        };
        Self {
            kind: self.kind.clone(),
            attributes: self.attributes.clone(),
            children,
            host: self.host.clone(),
            render_context: self.render_context.clone(),
            shape_flag: self.shape_flag,
        }
    }
}

/// Structural equality: kind, attribute contents, children, shape.
/// Host binding and render context are identity data and are ignored.
impl PartialEq for VNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.attributes.as_deref() == other.attributes.as_deref()
            && self.children == other.children
            && self.shape_flag == other.shape_flag
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .field("shape_flag", &self.shape_flag)
            .field("host_bound", &self.host.get().is_some())
            .finish()
    }
}
