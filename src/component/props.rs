//! Prop ingestion - raw attributes in, observable prop set out.
//!
//! Per raw attribute:
//! 1. reserved framework names (`key`, `ref`, vnode hooks) are dropped
//! 2. the hyphenated name is camelized (`some-value` -> `someValue`)
//! 3. the value is kept only if the camel name is a declared prop
//!
//! Declared props still missing afterwards get their default, if they have
//! one. Nothing here fails: extraneous attributes are dropped, validation
//! problems are only logged.

use tracing::{debug, warn};

use super::{ComponentInstance, PropsOptions, ReactiveProps};
use crate::config::runtime_config;
use crate::types::{Attributes, PropMap};

/// Attribute names owned by the framework. They never become props.
pub const RESERVED_PROPS: &[&str] = &[
    "",
    "key",
    "ref",
    "ref_for",
    "ref_key",
    "onVnodeBeforeMount",
    "onVnodeMounted",
    "onVnodeBeforeUpdate",
    "onVnodeUpdated",
    "onVnodeBeforeUnmount",
    "onVnodeUnmounted",
];

pub fn is_reserved_prop(key: &str) -> bool {
    RESERVED_PROPS.contains(&key)
}

/// Hyphenated to camel form.
///
/// A `-` followed by a word character (ASCII alphanumeric or `_`) is removed
/// and that character upper-cased. Any other `-` is kept.
pub fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(&next)) if next.is_ascii_alphanumeric() || next == '_' => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Build the plain prop map for `options` from `raw_attributes`.
///
/// Attributes are visited in insertion order; if two names camelize to the
/// same prop, the one written later wins.
pub fn resolve_props(options: &PropsOptions, raw_attributes: Option<&Attributes>) -> PropMap {
    let mut props = PropMap::new();

    for (key, value) in raw_attributes.into_iter().flatten() {
        if is_reserved_prop(key) {
            debug!(attr = %key, "dropped reserved attribute");
            continue;
        }
        let camel_key = camelize(key);
        if options.contains(&camel_key) {
            props.insert(camel_key, value.clone());
        } else {
            debug!(attr = %key, "dropped undeclared attribute");
        }
    }

    for (name, opts) in options.iter() {
        if props.contains_key(name) {
            continue;
        }
        if let Some(value) = opts.make_default() {
            props.insert(name.to_string(), value);
        }
    }

    if runtime_config().validate_props {
        validate_props(options, &props);
    }
    props
}

fn validate_props(options: &PropsOptions, props: &PropMap) {
    for (name, opts) in options.iter() {
        match props.get(name) {
            None if opts.required => warn!(prop = %name, "missing required prop"),
            Some(value) if !opts.ty.accepts(value) => {
                warn!(prop = %name, expected = ?opts.ty, got = ?value, "invalid prop type");
            }
            _ => {}
        }
    }
}

/// Rebuild `instance`'s props from scratch and install them as an
/// observable set.
pub fn init_props(instance: &ComponentInstance, raw_attributes: Option<&Attributes>) {
    let props = resolve_props(instance.def().props_options(), raw_attributes);
    instance.set_props(ReactiveProps::wrap(props));
}
