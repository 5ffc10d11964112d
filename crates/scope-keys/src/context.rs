//! Context gate: the read side of the UI flags that modulate classification.
//!
//! The state store owns a [`ContextCell`] and is its only writer. Readers
//! get [`ContextReader`] handles that always observe the latest value; there
//! is no buffering between a write and the next read.

use std::cell::Cell;
use std::rc::Rc;

use scope_common::types::Context;

/// Source of the current [`Context`].
pub trait ContextGate {
    /// Returns the context as of this instant.
    fn read(&self) -> Context;
}

/// A fixed snapshot.
impl ContextGate for Context {
    fn read(&self) -> Context {
        *self
    }
}

impl<G: ContextGate + ?Sized> ContextGate for &G {
    fn read(&self) -> Context {
        (**self).read()
    }
}

/// Single-writer owner of the shared context.
#[derive(Debug, Default)]
pub struct ContextCell {
    inner: Rc<Cell<Context>>,
}

impl ContextCell {
    /// Creates a cell holding `initial`.
    #[must_use]
    pub fn new(initial: Context) -> Self {
        Self {
            inner: Rc::new(Cell::new(initial)),
        }
    }

    /// Replaces the published context.
    pub fn publish(&self, ctx: Context) {
        self.inner.set(ctx);
    }

    /// Returns the published context.
    #[must_use]
    pub fn get(&self) -> Context {
        self.inner.get()
    }

    /// Hands out a read-only handle.
    #[must_use]
    pub fn reader(&self) -> ContextReader {
        ContextReader {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Read-only handle onto a [`ContextCell`].
#[derive(Debug, Clone)]
pub struct ContextReader {
    inner: Rc<Cell<Context>>,
}

impl ContextGate for ContextReader {
    fn read(&self) -> Context {
        self.inner.get()
    }
}
