//! Observable property set.
//!
//! Each declared prop gets its own signal: reading a key inside an effect or
//! derived subscribes to that key only, writing it re-runs exactly those
//! dependents. The key set is fixed when the map is wrapped.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::{PropMap, Value};

/// Reactive view over a component's props.
///
/// Cloning is cheap and yields another handle onto the same signals.
#[derive(Clone, Default)]
pub struct ReactiveProps {
    signals: Rc<HashMap<String, Signal<Value>>>,
}

impl ReactiveProps {
    /// Wrap a plain prop map.
    pub fn wrap(data: PropMap) -> Self {
        let signals = data
            .into_iter()
            .map(|(key, value)| (key, signal(value)))
            .collect();
        Self {
            signals: Rc::new(signals),
        }
    }

    /// Tracked read.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.signals.get(key).map(|s| s.get())
    }

    /// Write through to dependents. Returns `false` (and stores nothing) for
    /// keys that were not part of the wrapped map.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        match self.signals.get(key) {
            Some(s) => {
                s.set(value.into());
                true
            }
            None => false,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.signals.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.signals.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Plain copy of every prop. Reads each key, so it tracks all of them.
    pub fn snapshot(&self) -> PropMap {
        self.signals
            .iter()
            .map(|(key, s)| (key.clone(), s.get()))
            .collect()
    }

    /// True if both handles view the same signals.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.signals, &other.signals)
    }
}

impl fmt::Debug for ReactiveProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveProps")
            .field("keys", &self.keys())
            .finish()
    }
}
