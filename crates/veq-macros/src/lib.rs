//! Proc macros for the veq value-semantics contract.
//!
//! Provides `#[derive(Value)]`, which turns a struct into an immutable
//! value type: structural equality and hashing over its fields, a cached
//! hash, and `PartialEq`/`Eq`/`Hash` impls that all funnel through the one
//! equality routine in `veq-core`.
//!
//! # Example
//!
//! ```ignore
//! use veq::{HashCache, Value};
//!
//! #[derive(Value)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     cache: HashCache,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_value;

/// Derive the `Value` trait for a struct.
///
/// The struct must embed exactly one [`HashCache`] field, found by its
/// type or marked explicitly with `#[value(cache)]`. All other fields
/// participate in equality and hashing in declaration order and must be
/// `PartialEq + Hash`; the struct's fields must never change after
/// construction.
///
/// Also generates `PartialEq`, `Eq` and `Hash`, so `==`/`!=` and hash
/// containers agree with `Value::value_eq` by construction.
///
/// # Attributes
///
/// - `#[value(name = "...")]` - Override the declared type name
///
/// # Field Attributes
///
/// - `#[value(cache)]` - Mark the hash cache field explicitly
/// - `#[value(skip)]` - Exclude a field from equality and hashing
///
/// # Example
///
/// ```ignore
/// #[derive(Value)]
/// #[value(name = "Reading")]
/// struct SensorReading {
///     sensor: String,
///     sequence: u64,
///
///     #[value(skip)]
///     annotation: String,
///
///     cache: HashCache,
/// }
/// ```
///
/// [`HashCache`]: https://docs.rs/veq-core
#[proc_macro_derive(Value, attributes(value))]
pub fn derive_value(input: TokenStream) -> TokenStream {
    derive_value::derive_value_impl(input)
}
