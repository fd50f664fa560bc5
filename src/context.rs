//! Ambient logger for the current thread.
//!
//! Code deep in a call chain can log through [`from_context`] without a handle
//! being threaded through every signature. When no logger was installed a
//! silenced one is returned, so callers never have to check.

use std::{cell::RefCell, sync::Arc};

use crate::{Emitter, config::logger_config};

/// Shared handle to any emitter.
pub type SharedEmitter = Arc<dyn Emitter + Send + Sync>;

thread_local! {
    static CONTEXT: RefCell<Option<SharedEmitter>> = const { RefCell::new(None) };
}

/// Restores the previous ambient logger, even if the scoped closure panics.
struct Restore(Option<SharedEmitter>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        CONTEXT.with(|context| *context.borrow_mut() = previous);
    }
}

/// Runs `f` with `logger` as the ambient logger of this thread. Scopes nest.
pub fn scope<E, F, R>(logger: E, f: F) -> R
where
    E: Emitter + Send + Sync + 'static,
    F: FnOnce() -> R,
{
    let logger: SharedEmitter = Arc::new(logger);
    let previous = CONTEXT.with(|context| context.borrow_mut().replace(logger));
    let _restore = Restore(previous);
    f()
}

/// The ambient logger, or a silenced one when none is set.
pub fn from_context() -> SharedEmitter {
    CONTEXT
        .with(|context| context.borrow().clone())
        .unwrap_or_else(silenced)
}

pub fn has_context() -> bool {
    CONTEXT.with(|context| context.borrow().is_some())
}

/// A logger that never writes anything.
pub fn silenced() -> SharedEmitter {
    Arc::new(logger_config().quiet().build())
}

#[cfg(test)]
use crate::logger::test_logger;

#[test]
fn test_missing_context_is_silent() {
    assert!(!has_context());
    let log = from_context();
    log.shout("nothing");
}

#[test]
fn test_scope() {
    let (l, out) = test_logger();
    scope(l.clone(), || {
        assert!(has_context());
        from_context().shout("something");
        let g = l.group();
        scope(g, || from_context().say("inside group"));
        from_context().say("after group");
    });
    assert!(!has_context());
    assert_eq!(out.contents(), "[ts] something\n[ts] after group\n");
}

#[test]
fn test_scope_restored_after_panic() {
    let (l, _out) = test_logger();
    let result = std::panic::catch_unwind(|| scope(l, || panic!("boom")));
    assert!(result.is_err());
    assert!(!has_context());
}
