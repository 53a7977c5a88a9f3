use crate::registry::{ComponentQuery, ComponentSet, Member};
use bitvec::array::BitArray;
use bitvec::order::Lsb0;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// The maximum number of component types in a single set.
pub const MAX_COMPONENTS: usize = 128;

const N_WORDS: usize = MAX_COMPONENTS / u64::BITS as usize;

type Bits = BitArray<[u64; N_WORDS], Lsb0>;

/// A set of component types of `S`, one bit per type.
///
/// Bit `i` corresponds to the component with [`Member::INDEX`] `i`.
/// Bits past [`ComponentSet::COUNT`] are never set.
pub struct Signature<S> {
    bits: Bits,
    _set: PhantomData<fn() -> S>,
}

impl<S: ComponentSet> Signature<S> {
    /// Returns a signature with no bits set.
    pub fn empty() -> Self {
        Signature {
            bits: BitArray::new([0; N_WORDS]),
            _set: PhantomData,
        }
    }

    /// Returns a signature with only the bit of `C` set.
    pub fn of<C: Member<S>>() -> Self {
        let mut signature = Self::empty();
        signature.set::<C>(true);
        signature
    }

    /// Returns a signature with exactly the bits of the queried components set.
    pub fn make<Q: ComponentQuery<S>>() -> Self {
        Q::signature()
    }

    pub fn get<C: Member<S>>(&self) -> bool {
        self.bits[C::INDEX]
    }

    pub fn set<C: Member<S>>(&mut self, value: bool) {
        self.bits.set(C::INDEX, value);
    }

    /// Returns `true` if every component of `Q` is present. An empty query always matches.
    pub fn has<Q: ComponentQuery<S>>(&self) -> bool {
        self.contains(&Q::signature())
    }

    /// Returns `true` if `self` is a superset of `other`.
    pub fn contains(&self, other: &Self) -> bool {
        self.bits
            .as_raw_slice()
            .iter()
            .zip(other.bits.as_raw_slice())
            .all(|(a, b)| a & b == *b)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Returns the number of components in the signature.
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns the indices of the set bits in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl<S: ComponentSet> Default for Signature<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> Clone for Signature<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Signature<S> {}

impl<S> PartialEq for Signature<S> {
    fn eq(&self, other: &Self) -> bool {
        self.bits.as_raw_slice() == other.bits.as_raw_slice()
    }
}

impl<S> Eq for Signature<S> {}

impl<S> Hash for Signature<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits.as_raw_slice().hash(state);
    }
}

impl<S: ComponentSet> fmt::Debug for Signature<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(
                self.indices()
                    .map(|i| S::NAMES.get(i).copied().unwrap_or("<unknown>")),
            )
            .finish()
    }
}
