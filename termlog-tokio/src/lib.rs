//! # termlog-tokio
//! Task-scoped ambient loggers for tokio runtimes.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! termlog = "0.1.0"
//! termlog-tokio = "0.1.0"
//! tokio = {version = "1.40.0", features = ["full"]}
//! ```
//!
//! ```rust
//! use termlog::{Emitter, Logger};
//!
//! #[tokio::main]
//! async fn main() {
//!     termlog_tokio::scope(Logger::new(), async move {
//!         termlog_tokio::from_context().say("Hello, world!");
//!         // tasks spawned from here get a silenced logger unless they open their own scope
//!     })
//!     .await;
//! }
//! ```

use std::{future::Future, sync::Arc};

use termlog::{Emitter, context::{SharedEmitter, silenced}};

tokio::task_local! {
    /// Logger of the current task.
    static LOGGER: SharedEmitter;
}

/// Runs `f` with `logger` as the ambient logger of the current task.
pub async fn scope<E, F>(logger: E, f: F) -> F::Output
where
    E: Emitter + Send + Sync + 'static,
    F: Future,
{
    let logger: SharedEmitter = Arc::new(logger);
    LOGGER.scope(logger, f).await
}

/// The logger of the current task, or a silenced one outside of any scope.
pub fn from_context() -> SharedEmitter {
    LOGGER.try_with(Arc::clone).unwrap_or_else(|_| silenced())
}

pub fn has_context() -> bool {
    LOGGER.try_with(|_| ()).is_ok()
}

#[cfg(test)]
fn test_logger() -> (termlog::Logger, termlog::MemoryWriter) {
    let writer = termlog::MemoryWriter::new();
    let logger = termlog::logger_config()
        .with_time_format("[ts] ")
        .no_color()
        .with_output(writer.clone())
        .build();
    (logger, writer)
}

#[cfg(test)]
#[tokio::test]
async fn test_outside_scope_is_silent() {
    assert!(!has_context());
    from_context().shout("nothing");
}

#[cfg(test)]
#[tokio::test]
async fn test_scope() {
    let (l, out) = test_logger();
    scope(l.clone(), async {
        assert!(has_context());
        from_context().say("in scope");
        tokio::task::yield_now().await;
        termlog::notice!(from_context(), "after {}", "yield");
    })
    .await;
    assert!(!has_context());
    assert_eq!(out.contents(), "[ts] in scope\n[ts] after yield\n");
}

#[cfg(test)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_scoped_tasks() {
    let (l, out) = test_logger();
    let group = Arc::new(l.group());
    scope(group.clone(), async {
        from_context().say("buffered");
        l.say("direct");
    })
    .await;
    group.done();
    assert_eq!(out.take(), "[ts] direct\n[ts] buffered\n");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let l = l.clone();
            tokio::spawn(scope(l, async move {
                termlog::say!(from_context(), "task {i}");
            }))
        })
        .collect();
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(out.contents().lines().count(), 4);
}
