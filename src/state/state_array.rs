use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the "old" (converged) and "new" (current iterate) values of a per-point quantity
///
/// The values are stored in flat arrays addressed by (element, integration point):
///
/// ```text
/// index = k · n_integ_point + q
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StateArray<T> {
    /// Number of elements
    n_element: usize,

    /// Number of integration points per element
    n_integ_point: usize,

    /// Holds the last converged values
    old: Vec<T>,

    /// Holds the values of the current iterate
    new: Vec<T>,
}

impl<T> StateArray<T>
where
    T: Copy,
{
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        StateArray {
            n_element: 0,
            n_integ_point: 0,
            old: Vec::new(),
            new: Vec::new(),
        }
    }

    /// Sizes the arrays and fills both old and new values with `value`
    pub fn allocate(&mut self, n_element: usize, n_integ_point: usize, value: T) {
        let n_point = n_element * n_integ_point;
        self.n_element = n_element;
        self.n_integ_point = n_integ_point;
        self.old = vec![value; n_point];
        self.new = vec![value; n_point];
    }

    /// Returns the number of elements
    pub fn n_element(&self) -> usize {
        self.n_element
    }

    /// Returns the number of integration points per element
    pub fn n_integ_point(&self) -> usize {
        self.n_integ_point
    }

    /// Returns the total number of points
    pub fn n_point(&self) -> usize {
        self.old.len()
    }

    /// Returns the flat index of the (k, q) point
    #[inline]
    pub fn index(&self, k: usize, q: usize) -> usize {
        k * self.n_integ_point + q
    }

    /// Returns the flat index of the (k, q) point or an error if out of range
    pub fn checked_index(&self, k: usize, q: usize) -> Result<usize, StrError> {
        if k >= self.n_element {
            return Err("element index is out of range");
        }
        if q >= self.n_integ_point {
            return Err("integration point index is out of range");
        }
        Ok(self.index(k, q))
    }

    /// Returns the old (converged) value at the (k, q) point
    pub fn old(&self, k: usize, q: usize) -> Result<T, StrError> {
        let p = self.checked_index(k, q)?;
        Ok(self.old[p])
    }

    /// Returns the new (current iterate) value at the (k, q) point
    pub fn new_value(&self, k: usize, q: usize) -> Result<T, StrError> {
        let p = self.checked_index(k, q)?;
        Ok(self.new[p])
    }

    /// Sets both old and new values at the (k, q) point (e.g., initial state)
    pub fn set_initial(&mut self, k: usize, q: usize, value: T) -> Result<(), StrError> {
        let p = self.checked_index(k, q)?;
        self.old[p] = value;
        self.new[p] = value;
        Ok(())
    }

    /// Returns all old values
    pub fn old_values(&self) -> &[T] {
        &self.old
    }

    /// Returns all new values
    pub fn new_values(&self) -> &[T] {
        &self.new
    }

    /// Splits the arrays into read-only old values and writable new values
    pub fn split_mut(&mut self) -> (&[T], &mut [T]) {
        (&self.old, &mut self.new)
    }

    /// Copies the new values into the old values
    pub fn commit(&mut self) {
        self.old.copy_from_slice(&self.new);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
