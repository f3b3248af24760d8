//! Immutable value semantics for Rust types.
//!
//! `veq` lets a type opt into being compared by content rather than by
//! storage location: structural equality, a structural hash computed once
//! and cached, `==`/`!=` and hash-container wiring that all funnel through
//! one equality routine, and a type-erased comparison path with strict
//! runtime type exactness.
//!
//! The contract assumes the type is immutable after construction; the
//! library does not enforce that.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use veq::{HashCache, Value, value_equals};
//!
//! #[derive(Debug, Value)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     cache: HashCache,
//! }
//!
//! impl Point {
//!     fn new(x: i32, y: i32) -> Self {
//!         Point { x, y, cache: HashCache::new() }
//!     }
//! }
//!
//! assert_eq!(Point::new(1, 2), Point::new(1, 2));
//! assert_ne!(Point::new(1, 2), Point::new(1, 3));
//! assert!(value_equals(Some(&Point::new(1, 2)), Some(&Point::new(1, 2))));
//!
//! let mut set = HashSet::new();
//! set.insert(Point::new(1, 2));
//! set.insert(Point::new(1, 2));
//! assert_eq!(set.len(), 1);
//! ```
//!
//! # Features
//!
//! - `macros` (default) - the `#[derive(Value)]` macro
//! - `serde` - keeps the embedded hash cache out of serialized output

pub use veq_core::{DynValue, HashCache, TypeTag, Value, ValueHasher, value_equals};

#[cfg(feature = "macros")]
pub use veq_macros::Value;

pub mod prelude {
    pub use crate::{DynValue, HashCache, TypeTag, Value, value_equals};
}
