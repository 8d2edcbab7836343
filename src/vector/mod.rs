//! Fixed-length vector values decodable from configuration sequences.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// An ordered sequence of exactly `N` values of type `T`.
///
/// Decodes from a sequence node only when the node holds exactly `N`
/// elements, each individually decodable as `T`; any mismatch in kind or
/// length fails the decode as a whole. Encoding produces an `N`-element
/// sequence in order, so decoding an encoded vector gives it back.
///
/// The `Vec3*` aliases cover the common three-element cases; any other
/// `(T, N)` combination works the same way without further impls:
///
/// ```
/// use conftree::FixedVec;
///
/// type Vec2I32 = FixedVec<i32, 2>;
///
/// let span = Vec2I32::new([-10, 10]);
/// assert_eq!(span[0], -10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedVec<T, const N: usize> {
    items: [T; N],
}

/// Three-element `f64` vector.
pub type Vec3d = FixedVec<f64, 3>;
/// Three-element `i64` vector.
pub type Vec3i = FixedVec<i64, 3>;
/// Three-element `bool` vector.
pub type Vec3b = FixedVec<bool, 3>;
/// Three-element `String` vector.
pub type Vec3Str = FixedVec<String, 3>;

impl<T, const N: usize> FixedVec<T, N> {
    /// Creates a vector from exactly `N` values.
    pub fn new(items: [T; N]) -> Self {
        Self { items }
    }

    /// Number of elements, always `N`.
    pub fn len(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Default, const N: usize> FixedVec<T, N> {
    /// Creates a vector from up to `N` values, filling the remaining tail
    /// positions with `T::default()`. Values beyond `N` are ignored.
    ///
    /// This is the permissive counterpart to [`FixedVec::new`] and the
    /// `TryFrom<Vec<T>>` conversion, which both require exactly `N`
    /// values.
    pub fn filled_from(values: impl IntoIterator<Item = T>) -> Self {
        let mut values = values.into_iter();
        Self {
            items: std::array::from_fn(|_| values.next().unwrap_or_default()),
        }
    }
}

impl<T: Default, const N: usize> Default for FixedVec<T, N> {
    fn default() -> Self {
        Self {
            items: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for FixedVec<T, N> {
    type Error = Vec<T>;

    /// Fails when the input does not hold exactly `N` values, handing the
    /// input back unchanged.
    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        <[T; N]>::try_from(values).map(|items| Self { items })
    }
}

impl<T, const N: usize> Index<usize> for FixedVec<T, N> {
    type Output = T;

    /// Indexing outside `[0, N)` panics.
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedVec<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T: fmt::Display, const N: usize> fmt::Display for FixedVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl<T: Serialize, const N: usize> Serialize for FixedVec<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(N))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for FixedVec<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FixedVecVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for FixedVecVisitor<T, N> {
            type Value = FixedVec<T, N>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a sequence of exactly {N} elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(N);
                while let Some(item) = seq.next_element()? {
                    if items.len() == N {
                        return Err(de::Error::invalid_length(N + 1, &self));
                    }
                    items.push(item);
                }
                let len = items.len();
                items
                    .try_into()
                    .map(|items| FixedVec { items })
                    .map_err(|_| de::Error::invalid_length(len, &self))
            }
        }

        deserializer.deserialize_seq(FixedVecVisitor(PhantomData))
    }
}
