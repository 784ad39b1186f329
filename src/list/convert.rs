//! Conversions between [`List`] and the std sequence containers.
//!
//! Every conversion is a linear copy (or move) in traversal order.

use crate::error::{Error, Result};
use crate::List;
use std::collections::LinkedList;
use std::iter;

/// How [`List::to_array`] fits a list into an array of a fixed size `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayPolicy {
    /// Pad with `T::default()` when the list is shorter than `N`. A longer
    /// list is a length mismatch.
    Pad,
    /// Keep the first `N` elements when the list is longer than `N`. A
    /// shorter list is a length mismatch.
    Truncate,
    /// Pad or truncate, whichever fits.
    Auto,
}

impl<T> List<T> {
    /// Copy the elements into a `Vec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Move the elements into a `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Copy the elements into a [`LinkedList`].
    pub fn to_linked_list(&self) -> LinkedList<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Copy the elements into an array of size `N`, fitted by `policy`.
    ///
    /// Fails with [`Error::InvalidSize`] if `N == 0`, and with
    /// [`Error::LengthMismatch`] if the length of the list does not agree
    /// with `N` under a [`Pad`](ArrayPolicy::Pad) or
    /// [`Truncate`](ArrayPolicy::Truncate) policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::{ArrayPolicy, Error, List};
    ///
    /// let list = List::from([1, 2, 3]);
    ///
    /// assert_eq!(list.to_array::<5>(ArrayPolicy::Pad), Ok([1, 2, 3, 0, 0]));
    /// assert_eq!(list.to_array::<2>(ArrayPolicy::Truncate), Ok([1, 2]));
    /// assert_eq!(
    ///     list.to_array::<5>(ArrayPolicy::Truncate),
    ///     Err(Error::LengthMismatch { capacity: 5, len: 3 })
    /// );
    /// assert_eq!(list.to_array::<0>(ArrayPolicy::Auto), Err(Error::InvalidSize));
    /// ```
    pub fn to_array<const N: usize>(&self, policy: ArrayPolicy) -> Result<[T; N]>
    where
        T: Clone + Default,
    {
        if N == 0 {
            return Err(Error::InvalidSize);
        }
        let mismatch = match policy {
            ArrayPolicy::Pad => self.len() > N,
            ArrayPolicy::Truncate => self.len() < N,
            ArrayPolicy::Auto => false,
        };
        if mismatch {
            return Err(Error::LengthMismatch {
                capacity: N,
                len: self.len(),
            });
        }
        let mut elements = self.iter().cloned().chain(iter::repeat_with(T::default));
        Ok(std::array::from_fn(|_| elements.next().unwrap_or_default()))
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for List<T> {
    fn from(slice: &[T]) -> Self {
        slice.iter().cloned().collect()
    }
}

/// Build a list from a literal sequence of values.
///
/// ```
/// use forward_list::List;
///
/// let list = List::from([1, 2, 3]);
/// assert_eq!(list.len(), 3);
/// ```
impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> From<LinkedList<T>> for List<T> {
    fn from(list: LinkedList<T>) -> Self {
        list.into_iter().collect()
    }
}

impl<T> From<List<T>> for Vec<T> {
    fn from(list: List<T>) -> Self {
        list.into_vec()
    }
}

impl<T> From<List<T>> for LinkedList<T> {
    fn from(list: List<T>) -> Self {
        list.into_iter().collect()
    }
}
