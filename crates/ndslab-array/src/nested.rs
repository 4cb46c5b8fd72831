//! Depth-aware ownership for arrays whose slots own heap values.
//!
//! A "deep" array does not store its elements inline: every slot owns an
//! independent allocation, which may itself be an array owning further
//! allocations. The number of owned levels below an array is its
//! *complexity*. Here the ownership shape is carried by the type:
//!
//! ```text
//! Owned::Value(bytes)     complexity 0
//! Owned::Array(flat)      complexity 0
//! Owned::Nested(nested)   complexity 1 + complexity of every slot
//! ```
//!
//! A [`NestedArray`] only accepts slots of one common complexity, so the
//! depth of any tree is exact and releasing it is an ordinary drop: every
//! allocation is freed once, none is missed.

use ndslab_core::{flat_offset, unflatten, ArrayError, Header};

use crate::flat::FlatArray;

/// One owned slot value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Owned {
    /// An opaque heap value of fixed size.
    Value(Box<[u8]>),
    /// A flat array with inline elements.
    Array(FlatArray),
    /// An array whose slots own further values.
    Nested(NestedArray),
}

impl Owned {
    /// Number of owned levels below this value.
    pub fn complexity(&self) -> usize {
        match self {
            Self::Value(_) | Self::Array(_) => 0,
            Self::Nested(nested) => nested.complexity(),
        }
    }

    /// The bytes of an opaque value.
    pub fn as_value(&self) -> Option<&[u8]> {
        match self {
            Self::Value(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The flat array, if this slot holds one.
    pub fn as_array(&self) -> Option<&FlatArray> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The nested array, if this slot holds one.
    pub fn as_nested(&self) -> Option<&NestedArray> {
        match self {
            Self::Nested(nested) => Some(nested),
            _ => None,
        }
    }

    /// Release this value and everything it owns.
    pub fn free(self) {
        drop(self);
    }
}

impl From<FlatArray> for Owned {
    fn from(array: FlatArray) -> Self {
        Self::Array(array)
    }
}

impl From<NestedArray> for Owned {
    fn from(nested: NestedArray) -> Self {
        Self::Nested(nested)
    }
}

impl From<Box<[u8]>> for Owned {
    fn from(bytes: Box<[u8]>) -> Self {
        Self::Value(bytes)
    }
}

/// Mutable access to a slot's contents.
///
/// The slot's kind cannot change through this handle, so the depth of
/// the enclosing array is preserved. Use [`NestedArray::replace`] to swap
/// a slot for a different value.
#[derive(Debug)]
pub enum SlotMut<'a> {
    /// Bytes of an opaque value.
    Value(&'a mut [u8]),
    /// A flat array.
    Array(&'a mut FlatArray),
    /// A nested array.
    Nested(&'a mut NestedArray),
}

/// An N-dimensional array of owned slots.
///
/// Slots are stored in the same column-major order as a [`FlatArray`]
/// payload and addressed with the same multi-index rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedArray {
    header: Header,
    slots: Vec<Owned>,
    complexity: usize,
}

impl NestedArray {
    /// Deep fill: every slot gets its own heap copy of the first
    /// `value_size` bytes of `value`.
    pub fn fill_deep(
        shape: &[usize],
        value_size: usize,
        value: &[u8],
    ) -> Result<Self, ArrayError> {
        let seed = value.get(..value_size).ok_or(ArrayError::ValueTooShort {
            needed: value_size,
            got: value.len(),
        })?;
        Self::from_fn(shape, |_| Owned::Value(seed.into()))
    }

    /// Build from slots given in column-major order.
    ///
    /// All slots must share one complexity. An empty slot set is taken to
    /// hold plain values; use [`NestedArray::from_slots_at_depth`] to place
    /// an empty array deeper in a tree.
    pub fn from_slots(shape: &[usize], slots: Vec<Owned>) -> Result<Self, ArrayError> {
        let child = slots.first().map_or(0, Owned::complexity);
        Self::from_slots_at_depth(shape, child, slots)
    }

    /// Build from slots that each have complexity `child_complexity`.
    ///
    /// The resulting array has complexity `child_complexity + 1`, also when
    /// `shape` has a zero axis and there are no slots to measure.
    pub fn from_slots_at_depth(
        shape: &[usize],
        child_complexity: usize,
        slots: Vec<Owned>,
    ) -> Result<Self, ArrayError> {
        let header = Header::new(shape)?;
        if slots.len() != header.total_elements() {
            return Err(ArrayError::SlotCount {
                expected: header.total_elements(),
                got: slots.len(),
            });
        }
        if let Some(other) = slots
            .iter()
            .map(Owned::complexity)
            .find(|&c| c != child_complexity)
        {
            return Err(ArrayError::NonUniformDepth {
                expected: child_complexity,
                got: other,
            });
        }
        Ok(Self {
            header,
            slots,
            complexity: child_complexity + 1,
        })
    }

    /// Build by calling `f` with the multi-index of every slot.
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Result<Self, ArrayError>
    where
        F: FnMut(&[usize]) -> Owned,
    {
        let header = Header::new(shape)?;
        let slots = (0..header.total_elements())
            .map(|offset| f(&unflatten(header.shape(), offset)))
            .collect();
        Self::from_slots(header.shape(), slots)
    }

    /// Number of axes.
    pub fn dimensionality(&self) -> usize {
        self.header.dimensionality()
    }

    /// Per-axis lengths, axis 0 first.
    pub fn shape(&self) -> &[usize] {
        self.header.shape()
    }

    /// Number of slots.
    pub fn total_elements(&self) -> usize {
        self.header.total_elements()
    }

    /// Number of owned levels below this array (at least 1).
    pub fn complexity(&self) -> usize {
        self.complexity
    }

    /// Slots in column-major order.
    pub fn slots(&self) -> &[Owned] {
        &self.slots
    }

    /// The slot at `indices`.
    pub fn get(&self, indices: &[usize]) -> Result<&Owned, ArrayError> {
        let offset = flat_offset(self.header.shape(), indices)?;
        Ok(&self.slots[offset])
    }

    /// Mutable access to the contents of the slot at `indices`.
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<SlotMut<'_>, ArrayError> {
        let offset = flat_offset(self.header.shape(), indices)?;
        Ok(match &mut self.slots[offset] {
            Owned::Value(bytes) => SlotMut::Value(bytes),
            Owned::Array(array) => SlotMut::Array(array),
            Owned::Nested(nested) => SlotMut::Nested(nested),
        })
    }

    /// Replace the slot at `indices`, returning the previous value.
    ///
    /// The new value must have the same complexity as its siblings.
    pub fn replace(&mut self, indices: &[usize], value: Owned) -> Result<Owned, ArrayError> {
        let offset = flat_offset(self.header.shape(), indices)?;
        let expected = self.complexity - 1;
        if value.complexity() != expected {
            return Err(ArrayError::NonUniformDepth {
                expected,
                got: value.complexity(),
            });
        }
        Ok(std::mem::replace(&mut self.slots[offset], value))
    }

    /// Take the slots out, column-major.
    pub fn into_slots(self) -> Vec<Owned> {
        self.slots
    }

    /// Release this array and, depth-first, every value it owns.
    pub fn free(self) {
        drop(self);
    }
}
