//! The builder session: the public entry point for turning source text into a
//! [`LuaSourceRoot`].
//!
//! A [`ModelBuilder`] owns an engine that is created lazily on the first build and
//! reused for every build after that. All builds are serialized through one internal
//! mutex, so a shared builder is safe to call from any number of threads. The session
//! ends with an explicit [`ModelBuilder::close`]; afterwards every build fails with
//! [`BuildError::Closed`].
//!
//! Malformed source is *not* an error at this level: it produces an `Ok` source root
//! whose diagnostics describe the problems. [`BuildError`] is reserved for session
//! faults (closed, internal panic).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use lumo_syntax::diagnostics::LineIndex;
use lumo_syntax::{lexer, parser};

use crate::model::builder::build_model;
use crate::source_root::LuaSourceRoot;

/// Configuration injected into a builder at construction.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Roots searched when resolving `require("a.b")` to a file
    /// (`<root>/a/b.lua`, then `<root>/a/b/init.lua`).
    pub module_search_paths: Vec<PathBuf>,
}

impl BuilderConfig {
    /// Add one module search path.
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.module_search_paths.push(path.into());
        self
    }
}

/// Failure of a build *session*, as opposed to problems in the source.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The builder was closed; no further builds are possible.
    #[error("model builder is closed")]
    Closed,
    /// The engine panicked while analyzing. The engine is discarded; the next
    /// build initializes a fresh one.
    #[error("internal model builder failure: {0}")]
    Internal(String),
}

/// Observable state of a builder, for tests and instrumentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderStats {
    /// How many times an engine has been initialized. Stays constant across
    /// builds while the engine is reused.
    pub generation: u64,
    /// Builds completed by the current engine.
    pub builds: u64,
    pub closed: bool,
}

/// The analysis engine. Holds the configuration and per-engine counters.
///
/// Creation is cheap today, but consumers observe engine identity through
/// [`BuilderStats::generation`], so the lazy-init contract is part of the API.
#[derive(Debug)]
struct Engine {
    config: BuilderConfig,
    builds: u64,
}

impl Engine {
    #[tracing::instrument(skip_all, fields(source_len = source.len()))]
    fn analyze(&self, source: &str) -> LuaSourceRoot {
        let lexed = lexer::lex(source);
        let parsed = parser::parse(&lexed.tokens);
        let line_index = LineIndex::new(source);
        let model = build_model(
            source,
            &parsed.chunk,
            &lexed.comments,
            &line_index,
            &self.config.module_search_paths,
        );

        let mut diagnostics = lexed.errors;
        diagnostics.extend(parsed.errors);

        LuaSourceRoot {
            model,
            diagnostics,
            source_len: source.len(),
            line_count: line_index.line_count(),
        }
    }
}

#[derive(Debug)]
struct State {
    engine: Option<Engine>,
    config: BuilderConfig,
    generation: u64,
    closed: bool,
    /// Test seam: makes the next build panic inside the engine.
    #[cfg(test)]
    panic_next: bool,
}

/// Thread-safe session for building source models.
#[derive(Debug)]
pub struct ModelBuilder {
    inner: Mutex<State>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl ModelBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            inner: Mutex::new(State {
                engine: None,
                config,
                generation: 0,
                closed: false,
                #[cfg(test)]
                panic_next: false,
            }),
        }
    }

    /// Build the source model for one Lua source.
    ///
    /// Malformed and empty sources both succeed; their problems are reported via
    /// [`LuaSourceRoot::diagnostics`].
    ///
    /// ## Errors
    /// - [`BuildError::Closed`] after [`close`](Self::close).
    /// - [`BuildError::Internal`] if the engine panics; the panicking engine is
    ///   dropped so later builds start clean.
    pub fn build(&self, source: &str) -> Result<LuaSourceRoot, BuildError> {
        let mut state = self.lock();

        if state.closed {
            return Err(BuildError::Closed);
        }

        if state.engine.is_none() {
            state.generation += 1;
            tracing::debug!(generation = state.generation, "initializing engine");
            state.engine = Some(Engine {
                config: state.config.clone(),
                builds: 0,
            });
        }

        #[cfg(test)]
        let panic_next = std::mem::take(&mut state.panic_next);

        // The Option was just filled; treat absence as an internal fault rather
        // than panicking.
        let Some(engine) = state.engine.as_mut() else {
            return Err(BuildError::Internal("engine missing after init".to_string()));
        };

        match catch_unwind(AssertUnwindSafe(|| {
            #[cfg(test)]
            if panic_next {
                panic!("injected engine failure");
            }
            engine.analyze(source)
        })) {
            Ok(root) => {
                engine.builds += 1;
                Ok(root)
            }
            Err(payload) => {
                state.engine = None;
                Err(BuildError::Internal(panic_message(payload)))
            }
        }
    }

    /// Current session counters.
    pub fn stats(&self) -> BuilderStats {
        let state = self.lock();
        BuilderStats {
            generation: state.generation,
            builds: state.engine.as_ref().map_or(0, |e| e.builds),
            closed: state.closed,
        }
    }

    /// Release the engine and end the session. Terminal: subsequent builds return
    /// [`BuildError::Closed`]. Closing twice is a no-op.
    pub fn close(&self) {
        let mut state = self.lock();
        state.engine = None;
        state.closed = true;
    }

    /// Lock the session state, recovering from poisoning.
    ///
    /// A panic inside `build` is already converted to `BuildError::Internal` with
    /// the engine discarded, so a poisoned mutex carries no broken invariants.
    fn lock(&self) -> MutexGuard<'_, State> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Arm the panic-injection seam: the next build panics inside the engine.
    #[cfg(test)]
    fn panic_on_next_build(&self) {
        self.lock().panic_next = true;
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_initialized_once() {
        let builder = ModelBuilder::default();
        assert_eq!(builder.stats().generation, 0);

        builder.build("local a = 1\n").expect("build");
        builder.build("local b = 2\n").expect("build");

        let stats = builder.stats();
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.builds, 2);
        assert!(!stats.closed);
    }

    #[test]
    fn test_malformed_source_is_ok_with_diagnostics() {
        let builder = ModelBuilder::default();
        let root = builder.build("function oops(").expect("build succeeds");
        assert!(root.has_errors());
    }

    #[test]
    fn test_empty_source_builds_empty_model() {
        let builder = ModelBuilder::default();
        let root = builder.build("").expect("build");
        assert!(root.diagnostics.is_empty());
        assert!(root.model.declarations.is_empty());
        assert_eq!(root.line_count, 1);
    }

    #[test]
    fn test_close_is_terminal() {
        let builder = ModelBuilder::default();
        builder.build("x = 1\n").expect("build");
        builder.close();
        builder.close(); // idempotent

        assert!(matches!(builder.build("x = 2\n"), Err(BuildError::Closed)));
        assert!(builder.stats().closed);
    }

    #[test]
    fn test_engine_panic_becomes_internal_error() {
        let builder = ModelBuilder::default();
        builder.build("x = 1\n").expect("build");
        assert_eq!(builder.stats().generation, 1);

        builder.panic_on_next_build();
        let err = builder.build("y = 2\n").expect_err("panic must surface as an error");
        assert!(matches!(err, BuildError::Internal(ref msg) if msg.contains("injected")));
        assert_eq!(builder.stats().builds, 0, "panicking engine was dropped");

        // The next build starts a fresh engine.
        let root = builder.build("z = 3\n").expect("rebuild after panic");
        assert!(!root.has_errors());
        let stats = builder.stats();
        assert_eq!(stats.generation, 2);
        assert_eq!(stats.builds, 1);
    }

    #[test]
    fn test_poisoned_lock_recovers() {
        use std::sync::Arc;

        let builder = Arc::new(ModelBuilder::default());
        let holder = Arc::clone(&builder);
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.lock().unwrap();
            panic!("poison the session lock");
        })
        .join();
        assert!(builder.inner.is_poisoned());

        let root = builder.build("x = 1\n").expect("build after poisoning");
        assert!(!root.has_errors());
        assert_eq!(builder.stats().generation, 1);
    }

    #[test]
    fn test_concurrent_builds_share_one_engine() {
        use std::sync::Arc;

        let builder = Arc::new(ModelBuilder::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let builder = Arc::clone(&builder);
                std::thread::spawn(move || {
                    let source = format!("local v{} = {}\n", i, i);
                    builder.build(&source).expect("build")
                })
            })
            .collect();
        for handle in handles {
            let root = handle.join().expect("thread");
            assert!(!root.has_errors());
        }

        let stats = builder.stats();
        assert_eq!(stats.generation, 1);
        assert_eq!(stats.builds, 8);
    }
}
