//=========================================================================
// Dynamic Array
//=========================================================================
//
// Growable, order-preserving sequence with an explicit capacity policy.
//
// Architecture:
//   header { capacity, length, stride } + owned buffer (Vec<T>)
//
//   push ──> length == capacity ? ──> grow (capacity × RESIZE_FACTOR)
//                                          ↓
//                                     write at length
//
// Capacity is tracked by the array itself rather than read back from the
// backing `Vec`, so growth is deterministic: starting from capacity 1,
// N pushes always end at the smallest power of two >= N. Storage never
// shrinks on its own.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;
use std::ops::{Index, IndexMut};

use log::{error, trace};
use thiserror::Error;

//=== Constants ===========================================================

/// Capacity used by [`DynArray::new`].
pub const DEFAULT_CAPACITY: usize = 1;

/// Multiplier applied to the capacity on every growth step.
pub const RESIZE_FACTOR: usize = 2;

//=== DynArrayError =======================================================

/// Usage and allocation errors reported by [`DynArray`].
///
/// Usage errors are non-fatal: the array is left untouched and the error
/// is logged before being returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DynArrayError {
    /// The operation requires at least one live element.
    #[error("unable to '{operation}' an array with length zero")]
    Empty { operation: &'static str },

    /// The index is not within `[0, length)`.
    #[error("index {index} outside the bounds of array with length {length}")]
    OutOfBounds { index: usize, length: usize },

    /// A forced length would exceed the current capacity.
    #[error("length {requested} exceeds capacity {capacity}")]
    LengthExceedsCapacity { requested: usize, capacity: usize },

    /// The allocator could not provide the requested storage.
    #[error("allocation of {capacity} elements of {stride} bytes failed")]
    AllocationFailed { capacity: usize, stride: usize },
}

//=== DynArray ============================================================

/// Growable array with a `capacity / length / stride` header.
///
/// # Growth
///
/// When `length == capacity`, a push or insert first grows the storage to
/// `capacity * RESIZE_FACTOR` (a zero capacity grows to 1) and relocates
/// the elements. References into the array cannot outlive such a call.
///
/// # Failure Policy
///
/// - Allocation failure in [`with_capacity`](Self::with_capacity),
///   [`push`](Self::push) and [`insert_at`](Self::insert_at) is fatal:
///   it is logged and the process aborts. Use the `try_` variants to
///   receive [`DynArrayError::AllocationFailed`] instead.
/// - Popping from an empty array or addressing an index outside
///   `[0, length)` logs an error and leaves the array unchanged.
///
/// # Examples
///
/// ```
/// use aetheric_core::core::containers::DynArray;
///
/// let mut values: DynArray<u32> = DynArray::new();
/// values.push(10);
/// values.push(30);
/// values.insert_at(1, 20).unwrap();
///
/// assert_eq!(values.as_slice(), &[10, 20, 30]);
/// assert_eq!(values.capacity(), 4);
/// assert_eq!(values.stride(), 4);
/// ```
#[derive(Debug)]
pub struct DynArray<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> DynArray<T> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty array with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array able to hold `capacity` elements without
    /// growing. Aborts the process if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(array) => array,
            Err(err) => abort_on_allocation_failure(err),
        }
    }

    /// Creates an empty array, reporting allocation failure as an error.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, DynArrayError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| DynArrayError::AllocationFailed {
                capacity,
                stride: mem::size_of::<T>(),
            })?;

        Ok(Self { data, capacity })
    }

    /// Releases the array and every element it holds.
    ///
    /// Equivalent to dropping the array; consuming `self` makes a second
    /// destroy impossible.
    pub fn destroy(self) {
        trace!(
            target: "containers",
            "DynArray destroyed (capacity: {}, length: {}, stride: {})",
            self.capacity,
            self.data.len(),
            self.stride()
        );
    }

    //--- Header Fields ----------------------------------------------------

    /// Number of elements that fit without growing.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live elements.
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Alias of [`length`](Self::length).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no element is live.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size in bytes of one element.
    pub fn stride(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Bytes reserved for elements (`capacity * stride`).
    pub fn allocated_bytes(&self) -> usize {
        self.capacity * self.stride()
    }

    /// Drops every element; capacity is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    //--- Insertion --------------------------------------------------------

    /// Appends `value`, growing first if the array is full.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            abort_on_allocation_failure(err);
        }
    }

    /// Appends `value`, reporting allocation failure as an error.
    pub fn try_push(&mut self, value: T) -> Result<(), DynArrayError> {
        if self.data.len() >= self.capacity {
            self.grow()?;
        }

        self.data.push(value);
        Ok(())
    }

    /// Inserts `value` at `index`, shifting the elements at and after
    /// `index` up by one.
    ///
    /// # Errors
    ///
    /// [`DynArrayError::Empty`] if the array has no elements and
    /// [`DynArrayError::OutOfBounds`] if `index >= length`. Inserting at
    /// `length` is not allowed; use [`push`](Self::push) to append.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        self.check_index("insert at", index)?;

        if self.data.len() >= self.capacity {
            if let Err(err) = self.grow() {
                abort_on_allocation_failure(err);
            }
        }

        self.data.insert(index, value);
        Ok(())
    }

    //--- Removal ----------------------------------------------------------

    /// Removes and returns the last element.
    ///
    /// Returns `None` (and logs an error) when the array is empty; the
    /// length stays at zero.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            error!(
                target: "containers",
                "{}",
                DynArrayError::Empty { operation: "pop" }
            );
            return None;
        }

        self.data.pop()
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element down by one. Relative order is preserved.
    ///
    /// # Errors
    ///
    /// [`DynArrayError::Empty`] or [`DynArrayError::OutOfBounds`]; the
    /// array is unchanged in both cases.
    pub fn pop_at(&mut self, index: usize) -> Result<T, DynArrayError> {
        self.check_index("pop at", index)?;
        Ok(self.data.remove(index))
    }

    //--- Access -----------------------------------------------------------

    /// Returns the element at `index`, if live.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns the element at `index` mutably, if live.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterates over live elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    //--- Internal Helpers -------------------------------------------------

    fn grow(&mut self) -> Result<(), DynArrayError> {
        let new_capacity = (self.capacity * RESIZE_FACTOR).max(1);
        let additional = new_capacity - self.data.len();

        self.data
            .try_reserve_exact(additional)
            .map_err(|_| DynArrayError::AllocationFailed {
                capacity: new_capacity,
                stride: self.stride(),
            })?;

        trace!(
            target: "containers",
            "DynArray resized: {} -> {} (stride: {})",
            self.capacity,
            new_capacity,
            self.stride()
        );

        self.capacity = new_capacity;
        Ok(())
    }

    fn check_index(&self, operation: &'static str, index: usize) -> Result<(), DynArrayError> {
        let length = self.data.len();

        let result = if length == 0 {
            Err(DynArrayError::Empty { operation })
        } else if index >= length {
            Err(DynArrayError::OutOfBounds { index, length })
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            error!(target: "containers", "{}", err);
        }

        result
    }
}

impl<T: Default> DynArray<T> {
    /// Forces the length.
    ///
    /// Shrinking drops the trailing elements; growing fills with
    /// `T::default()`. The length can never exceed the capacity.
    pub fn set_length(&mut self, length: usize) -> Result<(), DynArrayError> {
        if length > self.capacity {
            let err = DynArrayError::LengthExceedsCapacity {
                requested: length,
                capacity: self.capacity,
            };
            error!(target: "containers", "{}", err);
            return Err(err);
        }

        self.data.resize_with(length, T::default);
        Ok(())
    }
}

//--- Fatal Path ----------------------------------------------------------

fn abort_on_allocation_failure(err: DynArrayError) -> ! {
    error!(target: "containers", "{}; aborting", err);
    std::process::abort()
}

//--- Trait Implementations -----------------------------------------------

impl<T: Clone> Clone for DynArray<T> {
    /// Copies the elements into storage reserved for the full tracked
    /// capacity, so the copy grows on the same schedule as the original.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity);
        copy.data.extend_from_slice(&self.data);
        copy
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
