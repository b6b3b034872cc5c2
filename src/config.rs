//! Runtime configuration.
//!
//! Thread-local like the rest of the render state: a render cycle runs on one
//! thread and reads whatever was configured there.

use std::cell::Cell;

/// Knobs for the property layer's diagnostics.
///
/// Log verbosity is left to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Warn about missing required props and props failing their type.
    pub validate_props: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            validate_props: cfg!(debug_assertions),
        }
    }
}

thread_local! {
    static CONFIG: Cell<Option<RuntimeConfig>> = const { Cell::new(None) };
}

/// Current configuration (defaults until set).
pub fn runtime_config() -> RuntimeConfig {
    CONFIG.with(|c| c.get()).unwrap_or_default()
}

/// Replace the configuration for this thread.
pub fn set_runtime_config(config: RuntimeConfig) {
    CONFIG.with(|c| c.set(Some(config)));
}

/// Restore defaults (for testing).
pub fn reset_runtime_config() {
    CONFIG.with(|c| c.set(None));
}
