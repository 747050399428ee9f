//! Document store abstraction for the store backend.
//!
//! Aggregates are persisted as whole documents: callers load the full
//! current document, transform it in memory, and put it back. The store
//! is the sole arbiter of serialization between concurrent writers and
//! uses last-write-wins semantics; it does not provide per-document
//! compare-and-swap, so two concurrent read-transform-write cycles on
//! the same document can lose one update. Callers minimize that window
//! by re-loading immediately before each mutation.

mod collection;
mod error;
mod memory;

pub use collection::{Collection, Document};
pub use error::{Result, StoreError};
pub use memory::InMemoryCollection;
