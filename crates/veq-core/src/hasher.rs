//! Structural hashing support.
//!
//! [`ValueHasher`] is the hasher that `fields_hash` implementations feed
//! their fields into, in declaration order. It is an `FxHasher` seeded with
//! the owning type's [`TypeTag`], so two types with identical field layouts
//! still produce different structural hashes.

use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::TypeTag;

/// Field hasher seeded with a type tag.
///
/// # Examples
///
/// ```
/// use std::hash::{Hash, Hasher};
/// use veq_core::{TypeTag, ValueHasher};
///
/// let mut hasher = ValueHasher::with_tag(TypeTag::from_name("Point"));
/// 1i32.hash(&mut hasher);
/// 2i32.hash(&mut hasher);
/// let hash = hasher.finish();
/// ```
pub struct ValueHasher(FxHasher);

impl ValueHasher {
    /// Create a hasher seeded with `tag`.
    #[inline]
    pub fn with_tag(tag: TypeTag) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(tag.as_u64());
        ValueHasher(hasher)
    }
}

impl Hasher for ValueHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0.write(bytes);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.0.write_u64(i);
    }
}
