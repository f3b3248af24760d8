//! Core contract for immutable value types.
//!
//! A value type is equal to another by content, not by storage location:
//! structural equality, a structural hash computed once and cached, strict
//! type exactness in erased comparisons, and hash/equality consistency for
//! container use. The author supplies two primitives (field equality and
//! field hashing) plus access to an embedded [`HashCache`]; everything
//! else is provided by [`Value`] and the blanket [`DynValue`] impl.
//!
//! See [`Value`] for the contract's rules and a manual implementation
//! example; the `veq` facade crate adds `#[derive(Value)]`.

mod cache;
mod hasher;
mod type_tag;
mod value;

pub use cache::HashCache;
pub use hasher::ValueHasher;
pub use type_tag::TypeTag;
pub use value::{DynValue, Value, value_equals};
