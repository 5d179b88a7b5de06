//! Dependency injection infrastructure.
//!
//! Handlers hold a [`Context`](crate::context::Context) and resolve the
//! repositories and services they need from it:
//!
//! - `FromRef<T>`: extract a value from a reference to `T`
//! - `#[derive(Context)]`: makes each field of the root context extractable
//! - `#[derive(FromContext)]`: builds a type by resolving each of its fields
//!
//! ```ignore
//! use crate::di::{FromContext, FromRef};
//!
//! #[derive(FromContext, Clone)]
//! pub struct ClassificationRepository {
//!     graph: Graph, // resolved via FromRef<Context>
//! }
//!
//! let repo = ClassificationRepository::from_ref(&ctx);
//! ```
//!
//! Nothing resolved this way is shared mutable state: the graph handle is a
//! pool reference and each repository call opens its own store session.

/// Trait for extracting a value from a reference to another type.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Blanket implementation: any Clone type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

// Re-export derive macros
pub use di_macros::{Context, FromContext};
