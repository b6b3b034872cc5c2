//! Render context stack.
//!
//! Tracks which component is rendering on this thread so vnodes can record
//! it. Nested renders push on entry and pop on exit; the guard pops on drop,
//! so the outer component is restored even if the render function panics.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::ComponentInstance;

thread_local! {
    /// Stack of rendering components, innermost last. Entries are weak: the
    /// stack never keeps an instance alive.
    static RENDER_STACK: RefCell<Vec<Weak<ComponentInstance>>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Scope guard
// =============================================================================

/// Marks `instance` as the rendering component until dropped.
#[must_use = "the render context is popped as soon as the scope is dropped"]
#[derive(Debug)]
pub struct RenderScope {
    /// Stack depth before this scope pushed.
    depth: usize,
    /// Scopes are tied to the thread whose stack they pushed onto.
    _not_send: PhantomData<*const ()>,
}

impl RenderScope {
    pub fn enter(instance: &Rc<ComponentInstance>) -> Self {
        let depth = RENDER_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            let depth = stack.len();
            stack.push(Rc::downgrade(instance));
            depth
        });
        trace!(uid = instance.uid(), depth, "render scope entered");
        Self {
            depth,
            _not_send: PhantomData,
        }
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        RENDER_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            debug_assert_eq!(
                stack.len(),
                self.depth + 1,
                "render scopes must be dropped innermost first"
            );
            stack.truncate(self.depth);
        });
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Component currently rendering on this thread.
pub fn current_rendering_instance() -> Option<Rc<ComponentInstance>> {
    current_render_context().and_then(|weak| weak.upgrade())
}

/// Weak handle to the rendering component, as stored on vnodes.
pub fn current_render_context() -> Option<Weak<ComponentInstance>> {
    RENDER_STACK.with(|stack| stack.borrow().last().cloned())
}

/// Run `f` with `instance` as the rendering component.
pub fn with_rendering_instance<R, F>(instance: &Rc<ComponentInstance>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _scope = RenderScope::enter(instance);
    f()
}

/// Number of nested renders in progress.
pub fn render_depth() -> usize {
    RENDER_STACK.with(|stack| stack.borrow().len())
}

/// Clear the stack (for testing).
pub fn reset_render_stack() {
    RENDER_STACK.with(|stack| stack.borrow_mut().clear());
}
