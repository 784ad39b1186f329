use crate::error::{Error, Result};
use crate::list::{Link, List, Node, Position};
use std::fmt;
use std::fmt::Formatter;

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can rest at any position
/// and report it. Since the list is singly-linked, it only moves forward,
/// but it can jump back to the start in *O*(1).
///
/// In a list with length *n*, there are *n* + 1 valid locations for the cursor,
/// indexed by 0, 1, ..., *n*, where *n* is the "ghost" position past the last
/// node. Moving forward from the ghost position cyclically reaches the front.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost position
/// of the list is denoted by `#`).
/// ```
/// use forward_list::List;
///
/// // Create a list: [ A B C D #]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert!(cursor.move_next().is_err());
///
/// // Move cursor forward, cyclically: [|A B C D #] (index = 0)
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some(&'A'));
/// ```
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link<T>,
    pub(crate) list: &'a List<T>,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            current: self.current,
            list: self.list,
        }
    }
}

/// Compare cursors by its position.
///
/// Only cursors belong to the same list and have the same positions
/// are considered equal.
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.index == other.index
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` can mutate the list in *O*(1) right after the cursor: the
/// successor of a node is the only place a singly-linked list can splice
/// without walking. The lifetime of its yielded references is tied to its
/// own lifetime, so it cannot yield multiple elements at once.
///
/// For convenience, [`CursorMut::view`] temporarily borrows the list
/// immutably.
///
/// # Examples
///
/// ```compile_fail
/// use forward_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: Link<T>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current.is_none()
            }
            /// The node after the cursor, where the front node follows the
            /// ghost position.
            pub(crate) fn next_node(&self) -> Link<T> {
                self.list.next_of(self.current)
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the index of the cursor
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns the position of the current node, or `None` at the
            /// ghost position.
            pub fn position(&self) -> Option<Position> {
                // SAFETY: a non-ghost cursor always rests on a valid node.
                self.current.map(|node| Position::of(unsafe { node.as_ref() }))
            }

            /// Move the cursor to the next position, where passing
            /// through the ghost position is allowed.
            ///
            /// This operation should compute in *O*(*1*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use forward_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor(2);
            ///
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), None);
            ///
            /// cursor.move_next_cyclic();
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                if self.is_ghost_node() {
                    self.index = 0;
                } else {
                    self.index += 1;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the next position, or fail with
            /// [`Error::InvalidOperation`] when it would pass through the
            /// ghost position.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next(&mut self) -> Result<()> {
                if self.is_ghost_node() {
                    return Err(Error::InvalidOperation(
                        "cannot move a cursor past the ghost position",
                    ));
                }
                self.move_next_cyclic();
                Ok(())
            }

            /// Move forward the cursor by given steps, or fail with
            /// [`Error::IndexOutOfRange`] if it would pass through the
            /// ghost position, in which case the cursor stays put.
            ///
            /// This operation should compute in *O*(*steps*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use forward_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// assert!(cursor.seek_forward(5).is_err());
            /// assert_eq!(cursor.current(), Some(&1));
            ///
            /// assert!(cursor.seek_forward(3).is_ok());
            /// assert_eq!(cursor.current(), None);
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<()> {
                let len = self.list.len();
                match self.index.checked_add(steps) {
                    Some(target) if target <= len => {
                        (0..steps).for_each(|_| self.move_next_cyclic());
                        Ok(())
                    }
                    _ => Err(Error::IndexOutOfRange {
                        index: self.index.saturating_add(steps),
                        len,
                    }),
                }
            }

            /// Move the cursor to the given position `target`, or fail with
            /// [`Error::IndexOutOfRange`] when `target > len`.
            ///
            /// Seeking backward restarts from the front.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use forward_list::List;
            ///
            /// let list = List::from([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_to(5).is_err());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_to(0).is_ok());
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<()> {
                let len = self.list.len();
                if target > len {
                    return Err(Error::IndexOutOfRange { index: target, len });
                }
                if target == len {
                    self.move_to_end();
                    return Ok(());
                }
                if target < self.index || self.is_ghost_node() {
                    self.move_to_start();
                }
                self.seek_forward(target - self.index)
            }

            /// Set the cursor to the start of the list.
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (i.e. the ghost position).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = None;
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.current())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(0).current(), Some(&1));
    /// assert_eq!(list.cursor(2).current(), Some(&3));
    /// assert_eq!(list.cursor(3).current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: a non-ghost cursor always rests on a valid node of the
        // borrowed list.
        self.current.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Return an immutable reference of the element after the cursor. At
    /// the ghost position, that is the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// assert_eq!(list.cursor(0).peek_next(), Some(&2));
    /// assert_eq!(list.cursor(1).peek_next(), None);
    /// assert_eq!(list.cursor(2).peek_next(), Some(&1));
    /// ```
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: `next_node` is a valid node of the borrowed list.
        self.next_node()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: Link<T>, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }
}

// Methods that does not change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    pub fn current(&self) -> Option<&T> {
        // SAFETY: a non-ghost cursor always rests on a valid node.
        self.current.map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost position.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    ///
    /// let mut cursor = list.cursor_mut(0);
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the ghost position.
    /// assert!(list.cursor_mut(3).current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: a non-ghost cursor always rests on a valid node, and the
        // list is mutably borrowed by the cursor.
        self.current
            .map(|node| unsafe { &mut (*node.as_ptr()).element })
    }

    /// Return an immutable reference of the element after the cursor. At
    /// the ghost position, that is the front element.
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: `next_node` is a valid node of the list.
        self.next_node()
            .map(|node| unsafe { &(*node.as_ptr()).element })
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.list, self.current, self.index)
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// assert_eq!(cursor.view().back(), Ok(&3));
    ///
    /// cursor.insert_after(4);
    /// assert_eq!(list.to_vec(), vec![1, 4, 2, 3]);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Insert a new element right after the cursor, without moving it. At
    /// the ghost position, the element is pushed to the front, and the
    /// index of the ghost position grows by one.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 3]);
    /// let mut cursor = list.cursor_start_mut();
    /// cursor.insert_after(2);
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// cursor.insert_after(0);
    /// assert_eq!(cursor.index(), 4);
    ///
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);
    /// ```
    pub fn insert_after(&mut self, item: T) -> Position {
        let node = Node::new_detached(item);
        // SAFETY: `self.current` is `None` or a valid node of the list.
        unsafe { self.list.attach_after(self.current, node) };
        if self.is_ghost_node() {
            self.index += 1;
        }
        // SAFETY: `node` is now a valid node of the list.
        Position::of(unsafe { node.as_ref() })
    }

    /// Remove the element right after the cursor and return it, or return
    /// `None` if the cursor is at the last node. At the ghost position, the
    /// front element is removed. The cursor does not move.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from_iter(0..5);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// assert_eq!(cursor.remove_next(), Some(2));
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove_next(), Some(0));
    /// assert_eq!(cursor.index(), 3);
    ///
    /// assert_eq!(list.to_vec(), vec![1, 3, 4]);
    /// ```
    pub fn remove_next(&mut self) -> Option<T> {
        // SAFETY: `self.current` is `None` or a valid node of the list.
        let node = unsafe { self.list.detach_after(self.current) }?;
        if self.is_ghost_node() {
            self.index -= 1;
        }
        Some(Node::into_element(node))
    }

    /// Split the list into two after the current element (exclusive). This
    /// will return a new list consisting of everything after the cursor,
    /// with the original list retaining everything up to the cursor
    /// (inclusive).
    ///
    /// At the ghost position, the whole list is split off and the cursor
    /// lands on the ghost position of the emptied list.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from_iter(0..6);
    /// let mut cursor = list.cursor_mut(2);
    ///
    /// let list2 = cursor.split_after();
    /// assert_eq!(cursor.current(), Some(&2));
    /// assert_eq!(cursor.view().back(), Ok(&2));
    ///
    /// assert_eq!(list2.to_vec(), vec![3, 4, 5]);
    /// assert_eq!(list.to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn split_after(&mut self) -> List<T> {
        let rest = match self.current {
            Some(_) => self.list.len() - self.index - 1,
            None => self.list.len(),
        };
        // SAFETY: `self.current` is `None` or the node at `index`, followed
        // by exactly `rest` nodes.
        let detached = unsafe { self.list.detach_nodes_after(self.current, rest) };
        if self.is_ghost_node() {
            self.index = 0;
        }
        detached.map(List::from_detached).unwrap_or_default()
    }

    /// Add an element first in the list.
    ///
    /// It is the same as [`List::push_front`], except it avoids
    /// another mutable borrow of the list while the mutable cursor
    /// is being used.
    pub fn push_front(&mut self, item: T) {
        self.list.push_front(item);
        self.index += 1;
    }

    /// Append an element to the back of the list.
    ///
    /// It is the same as [`List::push_back`], except it avoids
    /// another mutable borrow of the list while the mutable cursor
    /// is being used. A cursor at the ghost position stays there.
    pub fn push_back(&mut self, item: T) {
        self.list.push_back(item);
        if self.is_ghost_node() {
            self.index += 1;
        }
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::List;

    #[test]
    fn cursor_move() {
        let list = List::from_iter(0..4);
        let mut cursor = list.cursor_start();
        for i in 0..4 {
            assert_eq!(cursor.index(), i);
            assert_eq!(cursor.current(), Some(&i));
            assert!(cursor.move_next().is_ok());
        }
        assert_eq!(cursor.index(), 4);
        assert_eq!(cursor.current(), None);
        assert!(matches!(
            cursor.move_next(),
            Err(Error::InvalidOperation(_))
        ));
        assert_eq!(cursor.index(), 4);

        cursor.move_next_cyclic();
        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.current(), Some(&0));
    }

    #[test]
    fn cursor_on_empty_list() {
        let list = List::<i32>::new();
        let mut cursor = list.cursor_start();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek_next(), None);
        cursor.move_next_cyclic();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.move_next().is_err());
        assert_eq!(cursor.position(), None);
        assert_eq!(list.cursor_end(), list.cursor_start());
    }

    #[test]
    fn cursor_seek() {
        let list = List::from_iter(0..10);
        let mut cursor = list.cursor_start();
        for target in [5, 2, 9, 10, 0, 7, 10, 3] {
            assert!(cursor.seek_to(target).is_ok());
            assert_eq!(cursor.index(), target);
            assert_eq!(cursor, list.cursor(target));
            assert_eq!(cursor.current(), list.get(target).ok());
        }
        assert_eq!(
            cursor.seek_to(11),
            Err(Error::IndexOutOfRange { index: 11, len: 10 })
        );
        assert_eq!(cursor.index(), 3);
        assert_eq!(
            cursor.seek_forward(8),
            Err(Error::IndexOutOfRange { index: 11, len: 10 })
        );
        assert_eq!(cursor.index(), 3);
        assert!(cursor.seek_forward(7).is_ok());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn cursor_position_resolves() {
        let mut list = List::from(['a', 'b', 'c']);
        let position = list.cursor(1).position().unwrap();
        assert_eq!(list.element(position), Ok(&'b'));
        *list.element_mut(position).unwrap() = 'x';
        assert_eq!(list.to_vec(), vec!['a', 'x', 'c']);
        assert_eq!(list.cursor_end().position(), None);
    }

    #[test]
    fn cursor_mut_insert_and_remove() {
        let mut list = List::from_iter(0..3);
        let mut cursor = list.cursor_mut(2);

        // After the tail: the inserted node becomes the tail.
        cursor.insert_after(3);
        assert_eq!(cursor.view().back(), Ok(&3));
        assert_eq!(cursor.remove_next(), Some(3));
        assert_eq!(cursor.view().back(), Ok(&2));
        assert_eq!(cursor.remove_next(), None);

        cursor.push_back(4);
        cursor.push_front(-1);
        assert_eq!(cursor.index(), 3);
        assert_eq!(cursor.current(), Some(&2));
        assert_eq!(cursor.peek_next(), Some(&4));

        let position = cursor.insert_after(5);
        assert_eq!(cursor.view().element(position), Ok(&5));
        list.assert_invariants();
        assert_eq!(list.to_vec(), vec![-1, 0, 1, 2, 5, 4]);
    }

    #[test]
    fn cursor_mut_at_ghost() {
        let mut list = List::<i32>::new();
        let mut cursor = list.cursor_end_mut();
        cursor.insert_after(2);
        cursor.insert_after(1);
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.current(), None);
        cursor.push_back(3);
        assert_eq!(cursor.index(), 3);
        assert_eq!(cursor.remove_next(), Some(1));
        assert_eq!(cursor.index(), 2);
        list.assert_invariants();
        assert_eq!(list.to_vec(), vec![2, 3]);
    }

    #[test]
    fn cursor_mut_split_after() {
        fn check(len: i32, at: usize) {
            let mut list = List::from_iter(0..len);
            let mut cursor = list.cursor_mut(at);
            let split = cursor.split_after();
            let kept = if at == len as usize { 0 } else { at as i32 + 1 };
            list.assert_invariants();
            split.assert_invariants();
            assert_eq!(list.to_vec(), (0..kept).collect::<Vec<_>>());
            assert_eq!(split.to_vec(), (kept..len).collect::<Vec<_>>());
        }
        check(5, 0);
        check(5, 2);
        check(5, 4);
        check(5, 5);
        check(1, 0);
        check(0, 0);
    }

    #[test]
    fn cursor_mut_into_cursor() {
        let mut list = List::from_iter(0..3);
        let mut cursor = list.cursor_mut(1);
        if let Some(x) = cursor.current_mut() {
            *x = 10;
        }
        assert_eq!(cursor.as_cursor().current(), Some(&10));
        let cursor: crate::list::cursor::Cursor<'_, i32> = cursor.into();
        assert_eq!(cursor.peek_next(), Some(&2));
        assert_eq!(format!("{:?}", cursor), "Cursor { list: [0, 10, 2], current: Some(10), index: 1 }");
    }

    #[test]
    fn cursor_walk_stops_at_ghost() {
        let list = List::from([1, 2]);
        let mut cursor = list.cursor_start();
        let mut seen = Vec::new();
        while let Some(x) = cursor.current() {
            seen.push(*x);
            cursor.move_next().unwrap();
        }
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(cursor.index(), 2);
        assert!(cursor.move_next().is_err());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.index(), 2);

        let mut iter = list.iter();
        assert_eq!(iter.by_ref().count(), 2);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
