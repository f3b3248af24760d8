//! The value-semantics contract.
//!
//! A type opts into immutable value semantics by implementing [`Value`]:
//! two structural primitives (`fields_eq`, `fields_hash`), an accessor for
//! its embedded [`HashCache`], and a name. The trait's provided methods
//! supply everything else — the cached hash and the typed equality
//! algorithm — and the blanket [`DynValue`] impl adds the type-erased
//! equality path with strict runtime type exactness.
//!
//! The contract assumes immutability: every public field of an instance
//! returns the same value for the instance's lifetime. The library does
//! not enforce that; implementors uphold it.
//!
//! # Example
//!
//! ```
//! use veq_core::{value_equals, HashCache, Value, ValueHasher};
//! use std::hash::{Hash, Hasher};
//!
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
//! impl Value for Point {
//!     fn fields_eq(&self, other: &Self) -> bool {
//!         self.x == other.x && self.y == other.y
//!     }
//!
//!     fn fields_hash(&self) -> u64 {
//!         let mut hasher = ValueHasher::with_tag(Self::type_tag());
//!         self.x.hash(&mut hasher);
//!         self.y.hash(&mut hasher);
//!         hasher.finish()
//!     }
//!
//!     fn hash_cache(&self) -> &HashCache {
//!         &self.cache
//!     }
//!
//!     fn type_name() -> &'static str {
//!         "Point"
//!     }
//! }
//!
//! let a = Point::new(1, 2);
//! let b = Point::new(1, 2);
//! assert!(a.value_eq(&b));
//! assert!(value_equals(Some(&a), Some(&b)));
//! ```
//!
//! The `#[derive(Value)]` macro from `veq-macros` generates the impl above
//! (plus `PartialEq`, `Eq` and `Hash`) from the struct's fields.

use std::any::Any;
use std::ptr;

use crate::{HashCache, TypeTag};

/// Trait for immutable value types.
///
/// Implementors supply the structural primitives; callers use the provided
/// [`Value::value_eq`] and [`Value::value_hash`], which must not be
/// overridden, or the erased path via [`DynValue`] and [`value_equals`].
pub trait Value: 'static {
    /// Structural equality over the type's fields, in declaration order,
    /// recursing through nested value types via their own `==`.
    ///
    /// Precondition, established by the wrappers and not to be re-checked
    /// here: the cached hashes of `self` and `other` are already known to
    /// be equal. `&Self` statically guarantees presence and exact type.
    fn fields_eq(&self, other: &Self) -> bool;

    /// Structural hash over the same fields, in the same fixed order,
    /// seeded with [`Value::type_tag`] (see
    /// [`ValueHasher`](crate::ValueHasher)).
    ///
    /// Must be pure and deterministic. The wrapper invokes it at most once
    /// per instance.
    fn fields_hash(&self) -> u64;

    /// Accessor for the embedded hash cache field.
    fn hash_cache(&self) -> &HashCache;

    /// The declared name of this value type.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Name-based tag for this value type. Seeds structural hashing and
    /// identifies the type in diagnostics.
    fn type_tag() -> TypeTag
    where
        Self: Sized,
    {
        TypeTag::from_name(Self::type_name())
    }

    /// The structural hash, computed on first call and cached thereafter.
    #[inline]
    fn value_hash(&self) -> u64 {
        self.hash_cache().get_or_compute(|| self.fields_hash())
    }

    /// The typed equality algorithm: reference-identity shortcut, hash
    /// fast-reject, then [`Value::fields_eq`].
    ///
    /// Equal hashes are necessary but never sufficient; `fields_eq` is
    /// always consulted when the fast checks pass.
    fn value_eq(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        ptr::eq(self, other)
            || (self.value_hash() == other.value_hash() && self.fields_eq(other))
    }
}

/// Object-safe surface of the value contract.
///
/// Blanket-implemented for every [`Value`] type, so any value can be held
/// and compared as `&dyn DynValue` by generic infrastructure that does not
/// know the concrete type.
pub trait DynValue: 'static {
    /// Name-based tag of the concrete type.
    fn dyn_tag(&self) -> TypeTag;

    /// Declared name of the concrete type.
    fn dyn_type_name(&self) -> &'static str;

    /// Cached structural hash, same value as [`Value::value_hash`].
    fn dyn_hash(&self) -> u64;

    /// Upcast for concrete-type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Erased equality with strict type exactness: values of different
    /// concrete types are never equal, whatever their fields hold.
    fn dyn_eq(&self, other: &dyn DynValue) -> bool;
}

impl<T: Value> DynValue for T {
    fn dyn_tag(&self) -> TypeTag {
        T::type_tag()
    }

    fn dyn_type_name(&self) -> &'static str {
        T::type_name()
    }

    fn dyn_hash(&self) -> u64 {
        self.value_hash()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynValue) -> bool {
        // The downcast (exact concrete type) comes before the identity
        // shortcut inside value_eq: distinct zero-sized values of
        // different types can share an address, so identity is only
        // meaningful between instances of the same type.
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self.value_eq(other),
            None => false,
        }
    }
}

/// The authoritative equality routine over optional erased values.
///
/// Both absent compares equal, exactly one absent compares unequal, and
/// two present values compare via [`DynValue::dyn_eq`].
///
/// # Examples
///
/// ```
/// use veq_core::value_equals;
///
/// assert!(value_equals(None, None));
/// ```
pub fn value_equals(a: Option<&dyn DynValue>, b: Option<&dyn DynValue>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.dyn_eq(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueHasher;
    use std::cell::Cell;
    use std::hash::{Hash, Hasher};

    struct Point {
        x: i32,
        y: i32,
        cache: HashCache,
    }

    impl Point {
        fn new(x: i32, y: i32) -> Self {
            Point { x, y, cache: HashCache::new() }
        }
    }

    impl Value for Point {
        fn fields_eq(&self, other: &Self) -> bool {
            self.x == other.x && self.y == other.y
        }

        fn fields_hash(&self) -> u64 {
            let mut hasher = ValueHasher::with_tag(Self::type_tag());
            self.x.hash(&mut hasher);
            self.y.hash(&mut hasher);
            hasher.finish()
        }

        fn hash_cache(&self) -> &HashCache {
            &self.cache
        }

        fn type_name() -> &'static str {
            "Point"
        }
    }

    // Same fields as Point plus z; a stand-in for a "more derived" type.
    struct Point3D {
        x: i32,
        y: i32,
        z: i32,
        cache: HashCache,
    }

    impl Point3D {
        fn new(x: i32, y: i32, z: i32) -> Self {
            Point3D { x, y, z, cache: HashCache::new() }
        }
    }

    impl Value for Point3D {
        fn fields_eq(&self, other: &Self) -> bool {
            self.x == other.x && self.y == other.y && self.z == other.z
        }

        fn fields_hash(&self) -> u64 {
            let mut hasher = ValueHasher::with_tag(Self::type_tag());
            self.x.hash(&mut hasher);
            self.y.hash(&mut hasher);
            self.z.hash(&mut hasher);
            hasher.finish()
        }

        fn hash_cache(&self) -> &HashCache {
            &self.cache
        }

        fn type_name() -> &'static str {
            "Point3D"
        }
    }

    /// Counts fields_hash invocations to observe caching.
    struct Counting {
        n: u32,
        calls: Cell<u32>,
        cache: HashCache,
    }

    impl Counting {
        fn new(n: u32) -> Self {
            Counting { n, calls: Cell::new(0), cache: HashCache::new() }
        }
    }

    impl Value for Counting {
        fn fields_eq(&self, other: &Self) -> bool {
            self.n == other.n
        }

        fn fields_hash(&self) -> u64 {
            self.calls.set(self.calls.get() + 1);
            let mut hasher = ValueHasher::with_tag(Self::type_tag());
            self.n.hash(&mut hasher);
            hasher.finish()
        }

        fn hash_cache(&self) -> &HashCache {
            &self.cache
        }

        fn type_name() -> &'static str {
            "Counting"
        }
    }

    #[test]
    fn reflexivity() {
        let p = Point::new(1, 2);
        assert!(p.value_eq(&p));
        assert!(value_equals(Some(&p), Some(&p)));
    }

    #[test]
    fn structural_equality() {
        assert!(Point::new(1, 2).value_eq(&Point::new(1, 2)));
        assert!(!Point::new(1, 2).value_eq(&Point::new(1, 3)));
        assert!(!Point::new(1, 2).value_eq(&Point::new(3, 2)));
    }

    #[test]
    fn symmetry() {
        let a = Point::new(1, 2);
        let b = Point::new(1, 2);
        let c = Point::new(4, 5);

        assert_eq!(a.value_eq(&b), b.value_eq(&a));
        assert_eq!(a.value_eq(&c), c.value_eq(&a));
    }

    #[test]
    fn hash_equality_consistency() {
        let a = Point::new(1, 2);
        let b = Point::new(1, 2);

        assert!(a.value_eq(&b));
        assert_eq!(a.value_hash(), b.value_hash());
    }

    #[test]
    fn absent_handling() {
        let p = Point::new(1, 2);

        assert!(value_equals(None, None));
        assert!(!value_equals(Some(&p), None));
        assert!(!value_equals(None, Some(&p)));
    }

    #[test]
    fn type_exactness() {
        // Point's fields coincide with Point3D's x/y (and z is the
        // "default" 0), yet the two are never equal.
        let flat = Point::new(1, 2);
        let spatial = Point3D::new(1, 2, 0);

        assert!(!value_equals(Some(&flat), Some(&spatial)));
        assert!(!value_equals(Some(&spatial), Some(&flat)));
        assert!(!flat.dyn_eq(&spatial));
    }

    #[test]
    fn hash_computed_at_most_once() {
        let c = Counting::new(7);
        let first = c.value_hash();

        for _ in 0..10 {
            assert_eq!(c.value_hash(), first);
        }
        assert_eq!(c.calls.get(), 1);
    }

    #[test]
    fn equality_uses_cached_hash() {
        let a = Counting::new(7);
        let b = Counting::new(7);

        assert!(a.value_eq(&b));
        assert!(a.value_eq(&b));
        assert_eq!(a.calls.get(), 1);
        assert_eq!(b.calls.get(), 1);
    }

    #[test]
    fn identity_shortcut_skips_hashing() {
        let c = Counting::new(7);

        assert!(c.value_eq(&c));
        assert_eq!(c.calls.get(), 0);
    }

    #[test]
    fn erased_values_in_collections() {
        let values: Vec<Box<dyn DynValue>> = vec![
            Box::new(Point::new(1, 2)),
            Box::new(Point3D::new(1, 2, 0)),
            Box::new(Point::new(1, 2)),
        ];

        let probe = Point::new(1, 2);
        let matched = values.iter().filter(|v| v.dyn_eq(&probe)).count();
        assert_eq!(matched, 2);
    }

    #[test]
    fn dyn_metadata() {
        let p = Point::new(1, 2);

        assert_eq!(p.dyn_type_name(), "Point");
        assert_eq!(p.dyn_tag(), TypeTag::from_name("Point"));
        assert_eq!(p.dyn_hash(), p.value_hash());
    }
}
