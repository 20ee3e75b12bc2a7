use core::num::NonZero;

use super::handle::{Handle, RawHandle};

/// Number of entries in a non-empty subtree.
///
/// Every node counts itself, so a stored size is never zero. The upper bound is the
/// number of slots a [`Handle`] can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<RawHandle>);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX + 1;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size != 0, "`Size::from_usize()` - `size` is zero!");
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        match NonZero::new(size as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }

    /// Size of a node whose children hold `left` and `right` entries.
    #[inline]
    pub(crate) const fn joining(left: usize, right: usize) -> Self {
        Self::from_usize(1 + left + right)
    }
}
