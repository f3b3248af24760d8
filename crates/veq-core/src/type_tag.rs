//! Deterministic hash-based type identity.
//!
//! This module provides [`TypeTag`], a 64-bit tag identifying a value type.
//! Name-based tags ([`TypeTag::from_name`]) are stable across builds and
//! processes and seed structural hashing, so two types with identical field
//! layouts still hash apart. `TypeId`-based tags ([`TypeTag::of`]) reflect
//! Rust's own notion of a concrete type, the same identity the erased
//! equality path enforces when it downcasts.
//!
//! # Examples
//!
//! ```
//! use veq_core::TypeTag;
//!
//! let tag1 = TypeTag::from_name("Point");
//! let tag2 = TypeTag::from_name("Point");
//! assert_eq!(tag1, tag2);  // Deterministic
//!
//! assert_ne!(TypeTag::from_name("Point"), TypeTag::from_name("Point3D"));
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain constant mixed into name-based tags so a tag can never collide
/// with a raw xxh64 of the same string used for another purpose.
const TAG_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit tag identifying a value type.
///
/// The same name always produces the same tag, so tags can be computed
/// anywhere without registration or ordering concerns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeTag(pub u64);

impl TypeTag {
    /// Create a tag from a type name.
    ///
    /// # Examples
    ///
    /// ```
    /// use veq_core::TypeTag;
    ///
    /// let hash1 = TypeTag::from_name("Point");
    /// let hash2 = TypeTag::from_name("Point");
    /// assert_eq!(hash1, hash2);
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeTag(TAG_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a tag from a Rust type's `TypeId`.
    ///
    /// Note: this produces a different tag than [`TypeTag::from_name`]
    /// since it is based on Rust's internal type representation, not the
    /// declared name.
    #[inline]
    pub fn of<T: 'static>() -> Self {
        Self::of_type_id(std::any::TypeId::of::<T>())
    }

    /// Create a tag from an existing `TypeId`.
    #[inline]
    pub fn of_type_id(type_id: std::any::TypeId) -> Self {
        use std::hash::{Hash, Hasher};

        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        type_id.hash(&mut hasher);
        TypeTag(hasher.finish())
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({:#018x})", self.0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
