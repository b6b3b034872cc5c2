//! Component definitions and their declared prop schema.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::ComponentInstance;
use crate::error::Result;
use crate::types::Value;
use crate::vnode::VNode;

/// Render function of a component.
pub type RenderFn = Rc<dyn Fn(&ComponentInstance) -> Result<VNode>>;

/// Produces a fresh default value for one component instance.
pub type DefaultFactory = Rc<dyn Fn() -> Value>;

// =============================================================================
// Prop Type
// =============================================================================

/// Type constraint on a declared prop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropType {
    /// Accepts anything.
    #[default]
    Any,
    Bool,
    /// Integer values only.
    Int,
    /// Integers or floats.
    Number,
    String,
    List,
    Map,
    /// Any of the listed types.
    OneOf(Vec<PropType>),
}

impl PropType {
    /// Whether `value` satisfies this constraint. `Null` always passes;
    /// absence is what `required` checks.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (PropType::Any, _) => true,
            (PropType::Bool, Value::Bool(_)) => true,
            (PropType::Int, Value::Int(_)) => true,
            (PropType::Number, Value::Int(_) | Value::Float(_)) => true,
            (PropType::String, Value::Str(_)) => true,
            (PropType::List, Value::List(_)) => true,
            (PropType::Map, Value::Map(_)) => true,
            (PropType::OneOf(types), value) => types.iter().any(|t| t.accepts(value)),
            _ => false,
        }
    }
}

// =============================================================================
// Prop Options
// =============================================================================

/// Declaration of a single prop.
///
/// Defaults are always factories so two instances never share one value.
#[derive(Clone, Default)]
pub struct PropOptions {
    pub ty: PropType,
    pub required: bool,
    pub default: Option<DefaultFactory>,
}

impl PropOptions {
    /// Prop accepting any value.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn of(ty: PropType) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Default built by calling `factory` for each instance.
    pub fn default_with(mut self, factory: impl Fn() -> Value + 'static) -> Self {
        self.default = Some(Rc::new(factory));
        self
    }

    /// Default copied from `value` for each instance.
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.default_with(move || value.clone())
    }

    /// Run the default factory, if any.
    pub fn make_default(&self) -> Option<Value> {
        self.default.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for PropOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropOptions")
            .field("ty", &self.ty)
            .field("required", &self.required)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// A component's declared props, keyed by camel-form name.
#[derive(Debug, Clone, Default)]
pub struct PropsOptions {
    options: HashMap<String, PropOptions>,
}

impl PropsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a prop (builder style).
    pub fn prop(mut self, name: impl Into<String>, options: PropOptions) -> Self {
        self.options.insert(name.into(), options);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropOptions> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropOptions)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

// =============================================================================
// Component Definition
// =============================================================================

/// Static description of a component: name, prop schema, render function.
pub struct ComponentDef {
    name: String,
    props: PropsOptions,
    render: RenderFn,
}

impl ComponentDef {
    pub fn new(
        name: impl Into<String>,
        props: PropsOptions,
        render: impl Fn(&ComponentInstance) -> Result<VNode> + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            props,
            render: Rc::new(render),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn props_options(&self) -> &PropsOptions {
        &self.props
    }

    pub(crate) fn render_fn(&self) -> &RenderFn {
        &self.render
    }
}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDef")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}
