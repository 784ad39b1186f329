use crate::list::{Link, List};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    /// Deep copy: every node of the copy is newly allocated, so positions of
    /// `self` never resolve in the copy.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrite the list with a copy of `other`, reusing the existing
    /// nodes and their positions as far as they go.
    fn clone_from(&mut self, other: &Self) {
        let mut iter_other = other.iter();
        let mut kept = 0;
        for (elem, elem_other) in self.iter_mut().zip(&mut iter_other) {
            elem.clone_from(elem_other);
            kept += 1;
        }
        if kept < self.len() {
            drop(self.split_off(kept));
        } else {
            self.extend(iter_other.cloned());
        }
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

/// # Panics
///
/// Panics if `index >= len`. Use [`List::get`] for a checked access.
impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Ok(elt) => elt,
            Err(_) => panic!("index {index} out of range for list of length {len}"),
        }
    }
}

impl<T> IndexMut<usize> for List<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Ok(elt) => elt,
            Err(_) => panic!("index {index} out of range for list of length {len}"),
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from([0, 1, 2]);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Reverse the list in place by relinking its nodes. Positions stay
    /// attached to their elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list.to_vec(), vec![3, 2, 1]);
    /// assert_eq!(list.back(), Ok(&1));
    /// ```
    pub fn reverse(&mut self) {
        let mut prev: Link<T> = None;
        let mut current = self.head;
        while let Some(mut node) = current {
            // SAFETY: `node` is reachable from `head`, and every node is
            // visited exactly once.
            unsafe {
                current = node.as_ref().next;
                node.as_mut().next = prev;
            }
            prev = Some(node);
        }
        self.tail = self.head;
        self.head = prev;
    }
}
