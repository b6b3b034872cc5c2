//! Component instances.
//!
//! Only what the node model and the prop layer need: identity, the
//! definition, the current prop set, and a scoped render call. Mounting,
//! lifecycle hooks and the public proxy live elsewhere.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::{init_props, ComponentDef, ReactiveProps, RenderScope};
use crate::error::Result;
use crate::types::{Attributes, Value};
use crate::vnode::VNode;

thread_local! {
    static NEXT_UID: Cell<usize> = const { Cell::new(0) };
}

/// A live component.
pub struct ComponentInstance {
    uid: usize,
    def: Rc<ComponentDef>,
    props: RefCell<ReactiveProps>,
}

impl ComponentInstance {
    pub fn new(def: Rc<ComponentDef>) -> Rc<Self> {
        let uid = NEXT_UID.with(|next| {
            let uid = next.get();
            next.set(uid + 1);
            uid
        });
        Rc::new(Self {
            uid,
            def,
            props: RefCell::new(ReactiveProps::default()),
        })
    }

    pub fn uid(&self) -> usize {
        self.uid
    }

    pub fn def(&self) -> &Rc<ComponentDef> {
        &self.def
    }

    /// Handle onto the current prop set.
    pub fn props(&self) -> ReactiveProps {
        self.props.borrow().clone()
    }

    /// Tracked read of one prop.
    pub fn prop(&self, key: &str) -> Option<Value> {
        self.props.borrow().get(key)
    }

    /// Install a freshly built prop set. Only prop ingestion calls this.
    pub(crate) fn set_props(&self, props: ReactiveProps) {
        *self.props.borrow_mut() = props;
    }

    /// Run the render function with this instance as the render context.
    pub fn render(self: &Rc<Self>) -> Result<VNode> {
        let _scope = RenderScope::enter(self);
        let instance: &ComponentInstance = self;
        (self.def.render_fn())(instance)
    }

    /// Refresh props from `raw_attributes`, then render.
    pub fn update(self: &Rc<Self>, raw_attributes: Option<&Attributes>) -> Result<VNode> {
        init_props(self, raw_attributes);
        self.render()
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("uid", &self.uid)
            .field("component", &self.def.name())
            .field("props", &*self.props.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{current_rendering_instance, PropOptions, PropsOptions};
    use crate::error::Error;
    use crate::types::attrs;
    use crate::vnode::{create_text_vnode, h, NodeKind};

    fn greeting() -> Rc<ComponentDef> {
        ComponentDef::new(
            "Greeting",
            PropsOptions::new().prop("name", PropOptions::any()),
            |instance| {
                let name = instance.prop("name").unwrap_or_default();
                Ok(h("p", None, vec![create_text_vnode(format!("hi {}", name))]))
            },
        )
    }

    #[test]
    fn test_uids_are_unique() {
        let def = greeting();
        let a = ComponentInstance::new(def.clone());
        let b = ComponentInstance::new(def);
        assert_ne!(a.uid(), b.uid());
    }

    #[test]
    fn test_update_refreshes_props_and_renders() {
        let comp = ComponentInstance::new(greeting());
        let tree = comp.update(Some(&attrs([("name", Value::from("ada"))]))).unwrap();

        assert_eq!(tree.kind(), &NodeKind::element("p"));
        let text = &tree.children().as_list().unwrap()[0];
        assert_eq!(text.text(), Some("hi ada"));
    }

    #[test]
    fn test_nodes_record_rendering_instance() {
        let comp = ComponentInstance::new(greeting());
        let tree = comp.update(None).unwrap();

        let ctx = tree.render_context().expect("render context");
        assert!(Rc::ptr_eq(&ctx, &comp));
        assert!(tree.same_render_context(&tree.children().as_list().unwrap()[0]));
        assert!(current_rendering_instance().is_none());
    }

    #[test]
    fn test_render_error_restores_context() {
        let def = ComponentDef::new("Broken", PropsOptions::new(), |instance| {
            Err(Error::Render {
                component: instance.def().name().to_string(),
                message: "no template".into(),
            })
        });
        let comp = ComponentInstance::new(def);

        let err = comp.render().unwrap_err();
        assert!(matches!(err, Error::Render { ref component, .. } if component == "Broken"));
        assert!(current_rendering_instance().is_none());
    }

    #[test]
    fn test_nested_render_restores_parent_context() {
        let child_def = greeting();
        let parent_def = ComponentDef::new("Parent", PropsOptions::new(), move |_| {
            let child = ComponentInstance::new(child_def.clone());
            let child_tree = child.update(None)?;
            let own = h("section", None, vec![child_tree]);
            Ok(own)
        });
        let parent = ComponentInstance::new(parent_def);
        let tree = parent.render().unwrap();

        assert!(Rc::ptr_eq(&tree.render_context().unwrap(), &parent));
        let child_tree = &tree.children().as_list().unwrap()[0];
        assert!(!child_tree.same_render_context(&tree));
    }
}
