//! Lazily computed hash storage.
//!
//! [`HashCache`] is the single mutable cell inside an otherwise immutable
//! value: the structural hash, computed on first request and reused for the
//! instance's lifetime. Every value type embeds one and hands it back from
//! [`Value::hash_cache`](crate::Value::hash_cache).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel meaning "not computed yet".
const UNCOMPUTED: u64 = 0;

/// Stand-in for a structural hash that genuinely comes out as zero, so the
/// cell still settles after a single computation. The remap is
/// deterministic, which keeps hash/equality consistency intact.
const ZERO_HASH: u64 = 0x9e3779b97f4a7c15;

/// Cached structural hash of an immutable value.
///
/// Starts uncomputed; the first call to [`HashCache::get_or_compute`]
/// fills it and every later call returns the stored value. The cell is
/// valid only under the immutability precondition of the value contract:
/// the fields feeding the hash never change after construction.
///
/// `HashCache` deliberately implements neither `PartialEq` nor `Hash`.
/// Cache state is not part of a value's identity, and the missing impls
/// make a hand-written `#[derive(PartialEq)]` on the containing struct
/// fail to compile instead of silently comparing cache state.
pub struct HashCache(AtomicU64);

impl HashCache {
    /// Create an uncomputed cache. Every value constructor starts here.
    #[inline]
    pub const fn new() -> Self {
        HashCache(AtomicU64::new(UNCOMPUTED))
    }

    /// Return the cached hash, running `compute` on first use.
    ///
    /// Two threads racing on the first call both run `compute`; since the
    /// computation is pure and deterministic they store the same value, so
    /// relaxed ordering and a lost write are harmless. No lock is taken.
    #[inline]
    pub fn get_or_compute(&self, compute: impl FnOnce() -> u64) -> u64 {
        let cached = self.0.load(Ordering::Relaxed);
        if cached != UNCOMPUTED {
            return cached;
        }
        let mut hash = compute();
        if hash == UNCOMPUTED {
            hash = ZERO_HASH;
        }
        self.0.store(hash, Ordering::Relaxed);
        hash
    }

    /// Whether the hash has been computed yet.
    #[inline]
    pub fn is_computed(&self) -> bool {
        self.0.load(Ordering::Relaxed) != UNCOMPUTED
    }
}

impl Default for HashCache {
    fn default() -> Self {
        Self::new()
    }
}

/// A clone is a new instance; its hash starts uncomputed.
impl Clone for HashCache {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_computed() {
            f.write_str("HashCache(computed)")
        } else {
            f.write_str("HashCache(uncomputed)")
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    //! The cache never travels. It serializes as a unit and always
    //! deserializes to the uncomputed state, so round-tripping a value
    //! through a serializer can neither read nor forge cache contents.
    //! Formats that prefer to omit the field entirely can use
    //! `#[serde(skip)]`, which `HashCache: Default` supports.

    use super::HashCache;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{Serialize, Serializer};

    impl Serialize for HashCache {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_unit()
        }
    }

    impl<'de> Deserialize<'de> for HashCache {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct UnitVisitor;

            impl<'de> de::Visitor<'de> for UnitVisitor {
                type Value = ();

                fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str("a unit")
                }

                fn visit_unit<E: de::Error>(self) -> Result<(), E> {
                    Ok(())
                }
            }

            deserializer.deserialize_unit(UnitVisitor)?;
            Ok(HashCache::new())
        }
    }
}
