//! Iteration over the variants of small fieldless enums.
//!
//! Implemented via `#[derive(IterableEnum)]` from `hexplan_macros`.

use std::{marker::PhantomData, ops::Range};

/// Marks an enum whose variants can be iterated over in the order they are defined.
pub trait IterableEnum: Sized {
    /// The number of variants of this enum.
    const N_VARIANTS: usize;

    /// Iterates over the possible variants in the order they were defined.
    fn variants() -> EnumIter<Self> {
        EnumIter {
            indices: 0..Self::N_VARIANTS,
            _phantom: PhantomData,
        }
    }

    /// Returns the variant stored at the provided index, if it exists.
    fn get_at(index: usize) -> Option<Self>;

    /// Returns the position of this variant in the defining enum.
    fn index(&self) -> usize;

    /// Returns the variant `steps` positions away from this one, wrapping around at either end.
    #[must_use]
    fn cycled(&self, steps: isize) -> Self {
        let n = Self::N_VARIANTS as isize;
        let index = (self.index() as isize + steps).rem_euclid(n) as usize;

        // rem_euclid keeps the index in 0..N_VARIANTS
        match Self::get_at(index) {
            Some(variant) => variant,
            None => unreachable!("IterableEnum index {index} out of range"),
        }
    }
}

/// An iterator of enum variants.
///
/// Created by calling [`IterableEnum::variants`].
#[derive(Debug, Clone)]
pub struct EnumIter<E: IterableEnum> {
    /// The indices of the variants that have not been yielded yet.
    indices: Range<usize>,
    _phantom: PhantomData<E>,
}

impl<E: IterableEnum> Iterator for EnumIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.indices.next().and_then(E::get_at)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<E: IterableEnum> DoubleEndedIterator for EnumIter<E> {
    fn next_back(&mut self) -> Option<E> {
        self.indices.next_back().and_then(E::get_at)
    }
}

impl<E: IterableEnum> ExactSizeIterator for EnumIter<E> {}
