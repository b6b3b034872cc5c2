//! VNode construction and children normalization.
//!
//! Render functions call these to describe their output. Each raw children
//! value is classified exactly once, when the node is created.

use std::cell::OnceCell;
use std::rc::Rc;

use tracing::trace;

use super::node::{Children, NodeKind, VNode};
use crate::component::current_render_context;
use crate::error::{Error, Result};
use crate::types::{Attributes, ShapeFlags, Value};

/// Payload of a text node created without text.
pub const DEFAULT_TEXT: &str = " ";

// =============================================================================
// Raw input shapes
// =============================================================================

/// Children as handed to [`create_vnode`], before classification.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawChildren {
    #[default]
    Absent,
    /// Already-built child nodes, stored as-is.
    Nodes(Vec<VNode>),
    /// Any scalar. `Value::Null` counts as absent.
    Value(Value),
}

impl From<Vec<VNode>> for RawChildren {
    fn from(nodes: Vec<VNode>) -> Self {
        RawChildren::Nodes(nodes)
    }
}

impl From<Value> for RawChildren {
    fn from(value: Value) -> Self {
        RawChildren::Value(value)
    }
}

impl From<&str> for RawChildren {
    fn from(text: &str) -> Self {
        RawChildren::Value(text.into())
    }
}

impl From<String> for RawChildren {
    fn from(text: String) -> Self {
        RawChildren::Value(text.into())
    }
}

impl From<i64> for RawChildren {
    fn from(n: i64) -> Self {
        RawChildren::Value(n.into())
    }
}

impl From<i32> for RawChildren {
    fn from(n: i32) -> Self {
        RawChildren::Value(n.into())
    }
}

impl From<f64> for RawChildren {
    fn from(n: f64) -> Self {
        RawChildren::Value(n.into())
    }
}

impl From<bool> for RawChildren {
    fn from(b: bool) -> Self {
        RawChildren::Value(b.into())
    }
}

impl<T: Into<RawChildren>> From<Option<T>> for RawChildren {
    fn from(children: Option<T>) -> Self {
        children.map_or(RawChildren::Absent, Into::into)
    }
}

/// A single child of unknown shape, as produced by a render function.
#[derive(Debug, Clone, PartialEq)]
pub enum VNodeChild {
    Node(VNode),
    /// Several children where one was expected.
    List(Vec<VNodeChild>),
    Value(Value),
}

impl From<VNode> for VNodeChild {
    fn from(node: VNode) -> Self {
        VNodeChild::Node(node)
    }
}

impl From<Value> for VNodeChild {
    fn from(value: Value) -> Self {
        VNodeChild::Value(value)
    }
}

impl From<&str> for VNodeChild {
    fn from(text: &str) -> Self {
        VNodeChild::Value(text.into())
    }
}

impl From<i64> for VNodeChild {
    fn from(n: i64) -> Self {
        VNodeChild::Value(n.into())
    }
}

impl From<Vec<VNodeChild>> for VNodeChild {
    fn from(list: Vec<VNodeChild>) -> Self {
        VNodeChild::List(list)
    }
}

/// True if the child is a node.
pub fn is_vnode(child: &VNodeChild) -> bool {
    matches!(child, VNodeChild::Node(_))
}

// =============================================================================
// Creation
// =============================================================================

/// Create a vnode.
///
/// The render context is captured from the component currently rendering on
/// this thread. Element and component children are normalized; a text node
/// keeps its payload as raw text.
pub fn create_vnode(
    kind: NodeKind,
    attributes: Option<Attributes>,
    children: impl Into<RawChildren>,
) -> VNode {
    let mut vnode = VNode {
        shape_flag: kind.shape(),
        kind,
        attributes: attributes.map(Rc::new),
        children: Children::None,
        host: OnceCell::new(),
        render_context: current_render_context(),
    };

    let is_text = matches!(vnode.kind, NodeKind::Text);
    match children.into() {
        RawChildren::Value(value) if is_text && !value.is_null() => {
            vnode.children = Children::Text(value.to_string());
            vnode.shape_flag |= ShapeFlags::TEXT_CHILDREN;
        }
        children => normalize_children(&mut vnode, children),
    }

    trace!(kind = ?vnode.kind, shape = ?vnode.shape_flag, "vnode created");
    vnode
}

/// Element vnode shorthand.
pub fn h(tag: &str, attributes: Option<Attributes>, children: impl Into<RawChildren>) -> VNode {
    create_vnode(NodeKind::element(tag), attributes, children)
}

/// Create a text vnode.
pub fn create_text_vnode(text: impl Into<String>) -> VNode {
    create_vnode(NodeKind::Text, None, Value::Str(text.into()))
}

/// Text vnode holding [`DEFAULT_TEXT`].
pub fn create_blank_text_vnode() -> VNode {
    create_text_vnode(DEFAULT_TEXT)
}

/// Classify raw children and store them on `vnode`.
///
/// - absent / null: no children, children bits cleared
/// - node list: stored as-is, list bit set
/// - any other scalar: one text node holding its string form, list bit set
pub fn normalize_children(vnode: &mut VNode, children: RawChildren) {
    let children = match children {
        RawChildren::Absent => Children::None,
        RawChildren::Value(value) if value.is_null() => Children::None,
        RawChildren::Nodes(nodes) => Children::List(nodes),
        RawChildren::Value(value) => Children::List(vec![create_text_vnode(value.to_string())]),
    };
    vnode.shape_flag.remove(ShapeFlags::CHILDREN_MASK);
    vnode.shape_flag |= children.shape();
    vnode.children = children;
}

/// Turn one child into a vnode.
///
/// Nodes are cloned so the caller's tree is never aliased; scalars become
/// text nodes. Lists (node lists and list values alike, even empty ones) are
/// rejected with [`Error::UnsupportedMultiChild`].
pub fn normalize_vnode(child: &VNodeChild) -> Result<VNode> {
    match child {
        VNodeChild::List(_) | VNodeChild::Value(Value::List(_)) => Err(Error::UnsupportedMultiChild),
        VNodeChild::Node(node) => Ok(clone_vnode(node)),
        VNodeChild::Value(value) => Ok(create_text_vnode(value.to_string())),
    }
}

/// Clone a vnode, giving its children list a new identity.
///
/// See the [`Clone`] impl on [`VNode`] for exactly what is shared.
pub fn clone_vnode(vnode: &VNode) -> VNode {
    vnode.clone()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::attrs;

    fn div(children: impl Into<RawChildren>) -> VNode {
        h("div", None, children)
    }

    // =========================================================================
    // normalize_children
    // =========================================================================

    #[test]
    fn test_absent_children_clear_list_bit() {
        let node = div(RawChildren::Absent);
        assert_eq!(node.children(), &Children::None);
        assert!(!node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
        assert!(node.shape_flag().contains(ShapeFlags::ELEMENT));

        let node = div(Value::Null);
        assert_eq!(node.children(), &Children::None);
        assert!(!node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));

        let node = div(None::<&str>);
        assert_eq!(node.children(), &Children::None);
    }

    #[test]
    fn test_list_children_stored_as_is() {
        let kids = vec![create_text_vnode("a"), div(RawChildren::Absent)];
        let node = div(kids.clone());

        assert!(node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
        assert_eq!(node.children().as_list(), Some(kids.as_slice()));
    }

    #[test]
    fn test_empty_list_still_sets_list_bit() {
        let node = div(Vec::<VNode>::new());
        assert!(node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
        assert_eq!(node.children().as_list().map(<[VNode]>::len), Some(0));
    }

    #[test]
    fn test_scalar_children_become_one_text_node() {
        for (raw, expected) in [
            (Value::from("hello"), "hello"),
            (Value::from(42), "42"),
            (Value::from(1.5), "1.5"),
            (Value::from(1e20), "100000000000000000000"),
            (Value::from(1e-7), "1e-7"),
            (Value::from(false), "false"),
        ] {
            let node = div(raw);
            assert!(node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
            let list = node.children().as_list().expect("list children");
            assert_eq!(list.len(), 1);
            assert!(list[0].is_text());
            assert_eq!(list[0].text(), Some(expected));
        }
    }

    #[test]
    fn test_renormalizing_replaces_children_bits() {
        let mut node = div("x");
        assert!(node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));

        normalize_children(&mut node, RawChildren::Absent);
        assert_eq!(node.children(), &Children::None);
        assert!(!node.shape_flag().intersects(ShapeFlags::CHILDREN_MASK));
        assert!(node.shape_flag().contains(ShapeFlags::ELEMENT));
    }

    // =========================================================================
    // Text nodes
    // =========================================================================

    #[test]
    fn test_blank_text_node_is_single_space() {
        let node = create_blank_text_vnode();
        assert_eq!(node.kind(), &NodeKind::Text);
        assert_eq!(node.text(), Some(" "));
        assert!(node.shape_flag().contains(ShapeFlags::TEXT | ShapeFlags::TEXT_CHILDREN));
        assert!(!node.shape_flag().contains(ShapeFlags::ARRAY_CHILDREN));
    }

    #[test]
    fn test_text_node_keeps_payload() {
        let node = create_text_vnode("hi there");
        assert_eq!(node.children(), &Children::Text("hi there".into()));
        assert!(node.attributes().is_none());
    }

    // =========================================================================
    // normalize_vnode
    // =========================================================================

    #[test]
    fn test_normalize_vnode_rejects_any_list() {
        let cases = [
            VNodeChild::List(vec![]),
            VNodeChild::List(vec![VNodeChild::from("a")]),
            VNodeChild::List(vec![VNodeChild::Node(div("x")), VNodeChild::from(1_i64)]),
            VNodeChild::Value(Value::List(vec![])),
            VNodeChild::Value(Value::List(vec![Value::from(1)])),
        ];
        for child in &cases {
            assert_eq!(normalize_vnode(child), Err(Error::UnsupportedMultiChild));
        }
    }

    #[test]
    fn test_normalize_vnode_scalars_become_text() {
        let node = normalize_vnode(&VNodeChild::from(7_i64)).unwrap();
        assert_eq!(node.text(), Some("7"));

        let node = normalize_vnode(&VNodeChild::from("abc")).unwrap();
        assert_eq!(node.text(), Some("abc"));
    }

    #[test]
    fn test_normalize_vnode_clones_nodes() {
        let original = div(vec![create_text_vnode("a")]);
        let child = VNodeChild::Node(original.clone());
        let mut normalized = normalize_vnode(&child).unwrap();
        assert_eq!(normalized, original);

        normalized.children_list_mut().unwrap().clear();
        let VNodeChild::Node(inner) = &child else { unreachable!() };
        assert_eq!(inner.children().as_list().map(<[VNode]>::len), Some(1));
    }

    #[test]
    fn test_is_vnode() {
        assert!(is_vnode(&VNodeChild::Node(create_blank_text_vnode())));
        assert!(!is_vnode(&VNodeChild::from("text")));
        assert!(!is_vnode(&VNodeChild::List(vec![])));
    }

    // =========================================================================
    // clone_vnode
    // =========================================================================

    #[test]
    fn test_clone_gives_children_new_identity() {
        let original = div(vec![create_text_vnode("a"), create_text_vnode("b")]);
        let mut cloned = clone_vnode(&original);

        let orig_list = original.children().as_list().unwrap();
        let clone_list = cloned.children().as_list().unwrap();
        assert_ne!(orig_list.as_ptr(), clone_list.as_ptr());
        assert_eq!(orig_list, clone_list);

        cloned.children_list_mut().unwrap().push(create_text_vnode("c"));
        assert_eq!(original.children().as_list().unwrap().len(), 2);
        assert_eq!(cloned.children().as_list().unwrap().len(), 3);
    }

    #[test]
    fn test_clone_is_deep_for_nested_lists() {
        let inner = div(vec![create_text_vnode("deep")]);
        let original = div(vec![inner]);
        let mut cloned = clone_vnode(&original);

        cloned.children_list_mut().unwrap()[0]
            .children_list_mut()
            .unwrap()
            .clear();

        let orig_inner = &original.children().as_list().unwrap()[0];
        assert_eq!(orig_inner.children().as_list().unwrap().len(), 1);
    }

    #[test]
    fn test_clone_shares_attribute_snapshot() {
        let original = h("input", Some(attrs([("type", Value::from("text"))])), RawChildren::Absent);
        let cloned = clone_vnode(&original);

        assert!(Rc::ptr_eq(
            original.attributes().unwrap(),
            cloned.attributes().unwrap()
        ));
        assert_eq!(cloned.shape_flag(), original.shape_flag());
        assert_eq!(cloned.kind(), original.kind());
    }

    #[test]
    fn test_clone_copies_text_payload() {
        let original = create_text_vnode("t");
        assert_eq!(clone_vnode(&original).text(), Some("t"));
    }

    #[test]
    fn test_clone_copies_host_binding() {
        let original = div(RawChildren::Absent);
        original.bind_host(Rc::new(17_u32)).unwrap();

        let cloned = clone_vnode(&original);
        let host = cloned.host().expect("host copied");
        assert!(Rc::ptr_eq(host, original.host().unwrap()));
        assert_eq!(host.downcast_ref::<u32>(), Some(&17));
    }

    // =========================================================================
    // Host binding
    // =========================================================================

    #[test]
    fn test_host_binds_once() {
        let node = div(RawChildren::Absent);
        assert!(node.host().is_none());

        node.bind_host(Rc::new("first")).unwrap();
        assert_eq!(node.bind_host(Rc::new("second")), Err(Error::HostAlreadyBound));
        assert_eq!(node.host().unwrap().downcast_ref::<&str>(), Some(&"first"));
    }

    #[test]
    fn test_root_nodes_have_no_render_context() {
        let node = div(RawChildren::Absent);
        assert!(node.render_context().is_none());
    }
}
