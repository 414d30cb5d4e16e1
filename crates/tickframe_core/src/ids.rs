//! # Stable Identifiers
//!
//! Objects, regions and region edges are addressed by small integer indices.
//! Object slots never move, so a slot id stays valid for the life of the
//! world and links between objects are plain ids rather than pointers.

/// Index of an object slot in the [`ObjectTable`](crate::ObjectTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ObjectSlotId(u16);

impl ObjectSlotId {
    /// Creates a slot id from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a region (convex polygon) in the [`RegionMap`](crate::RegionMap).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct RegionId(u16);

impl RegionId {
    /// Creates a region id from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the region index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a boundary edge within one region.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EdgeIndex(u16);

impl EdgeIndex {
    /// Creates an edge index.
    #[inline]
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the edge position within its region.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
