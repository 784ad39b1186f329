use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod convert;
pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `List` is a singly-linked list with owned nodes and a tail pointer.
/// It allows pushing elements at both ends and popping the front element in
/// constant time. In compromise, popping the back element, or accessing any
/// element other than the front and the back, take *O*(*n*) time.
///
/// The `List` contains:
/// - an owning link `head` to the first node;
/// - an observing link `tail` to the last node, which never owns it;
/// - a length field `len` indicating the length of the list.
///
/// # Naming Conventions
///
/// - `prev`: a link that is either a node of the list, or `None`, which
///   stands for the position *before* the first node. Attaching after
///   `None` means attaching at the front.
/// - `ghost`: the position past the last node, where cursors may rest.
pub struct List<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// Each node is owned by its predecessor, or by the list if it is the
/// first one. `next` is the only owning link of a node.
pub(crate) struct Node<T> {
    pub(crate) next: Link<T>,
    pub(crate) key: NodeKey,
    pub(crate) element: T,
}

/// A process-unique stamp given to every node when it is allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey(u64);

impl NodeKey {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NodeKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// An opaque handle to a node of a [`List`].
///
/// A `Position` never owns or borrows the node it refers to. Every operation
/// taking a `Position` validates it by walking the list, so a handle to a
/// removed node, or to a node of another list, is reported as
/// [`Error::PositionNotFound`] instead of being dereferenced.
///
/// # Examples
///
/// ```
/// use forward_list::{Error, List};
///
/// let mut list = List::from([1, 2, 3]);
/// let two = list.position_at(1).unwrap();
///
/// list.insert_before(two, 5).unwrap();
/// assert_eq!(list.to_vec(), vec![1, 5, 2, 3]);
///
/// assert_eq!(list.erase(two), Ok(2));
/// assert_eq!(list.element(two), Err(Error::PositionNotFound));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    key: NodeKey,
}

/// Nodes fragment detached from a list, used in list splitting or
/// appending.
///
/// `back.next` of a detached fragment is always `None`.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

// private methods
impl<T> List<T> {
    pub(crate) fn front_node(&self) -> Link<T> {
        self.head
    }

    /// Returns the successor of `prev`, or the first node if `prev` is `None`.
    pub(crate) fn next_of(&self, prev: Link<T>) -> Link<T> {
        match prev {
            // SAFETY: `prev` is a node reachable from `head`, so it is valid.
            Some(prev) => unsafe { prev.as_ref().next },
            None => self.head,
        }
    }

    /// Returns the node at `index`, or `None` if `index >= len`.
    pub(crate) fn node_at(&self, index: usize) -> Link<T> {
        if index >= self.len {
            return None;
        }
        let mut current = self.head;
        for _ in 0..index {
            current = self.next_of(current);
        }
        current
    }

    /// Find the link preceding the node stamped with `key`.
    ///
    /// Returns `Some(None)` if it is the first node, `Some(Some(prev))` if it
    /// follows `prev`, or `None` if no such node is reachable from `head`.
    fn find_prev(&self, key: NodeKey) -> Option<Link<T>> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: `node` is reachable from `head`, so it is valid.
            let node_ref = unsafe { node.as_ref() };
            if node_ref.key == key {
                return Some(prev);
            }
            prev = current;
            current = node_ref.next;
        }
        None
    }

    fn find_node(&self, position: Position) -> Result<NonNull<Node<T>>> {
        self.find_prev(position.key)
            .and_then(|prev| self.next_of(prev))
            .ok_or(Error::PositionNotFound)
    }

    /// Attach a single detached node `node` to the list right after `prev`,
    /// or at the front if `prev` is `None`.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list, or whether `node` is really detached.
    pub(crate) unsafe fn attach_after(&mut self, prev: Link<T>, mut node: NonNull<Node<T>>) {
        let next = self.next_of(prev);
        node.as_mut().next = next;
        match prev {
            Some(mut prev) => prev.as_mut().next = Some(node),
            None => self.head = Some(node),
        }
        if next.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
        #[cfg(debug_assertions)]
        self.assert_ends();
    }

    /// Detach the node right after `prev` (the first node if `prev` is `None`)
    /// and return it as a box, or return `None` if there is no such node.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list. If it does not, this function call will make the list ill-formed.
    pub(crate) unsafe fn detach_after(&mut self, prev: Link<T>) -> Option<Box<Node<T>>> {
        let node = Box::from_raw(self.next_of(prev)?.as_ptr());
        match prev {
            Some(mut prev) => prev.as_mut().next = node.next,
            None => self.head = node.next,
        }
        if node.next.is_none() {
            self.tail = prev;
        }
        self.len -= 1;
        #[cfg(debug_assertions)]
        self.assert_ends();
        Some(node)
    }

    /// Detach every node after `prev` (all nodes if `prev` is `None`), of
    /// which there must be exactly `len`, or return `None` if there is none.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list, or whether `len` is the number of nodes after it.
    pub(crate) unsafe fn detach_nodes_after(
        &mut self,
        prev: Link<T>,
        len: usize,
    ) -> Option<DetachedNodes<T>> {
        let front = self.next_of(prev)?;
        let back = self.tail?;
        match prev {
            Some(mut prev) => prev.as_mut().next = None,
            None => self.head = None,
        }
        self.tail = prev;
        self.len -= len;
        #[cfg(debug_assertions)]
        self.assert_ends();
        Some(DetachedNodes::new(front, back, len))
    }

    /// Attach a range of detached nodes to the list right after `prev`, or at
    /// the front if `prev` is `None`.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// list.
    pub(crate) unsafe fn attach_nodes_after(&mut self, prev: Link<T>, mut detached: DetachedNodes<T>) {
        let next = self.next_of(prev);
        detached.back.as_mut().next = next;
        match prev {
            Some(mut prev) => prev.as_mut().next = Some(detached.front),
            None => self.head = Some(detached.front),
        }
        if next.is_none() {
            self.tail = Some(detached.back);
        }
        self.len += detached.len;
        #[cfg(debug_assertions)]
        self.assert_ends();
    }

    /// Detach all nodes from the list, and return the detached nodes, or return
    /// `None` if the list is empty.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        // SAFETY: `None` always belongs to the list, and all `len` nodes
        // follow it.
        unsafe { self.detach_nodes_after(None, self.len) }
    }

    /// Construct a list from detached nodes.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        // SAFETY: `None` always belongs to the list.
        unsafe { list.attach_nodes_after(None, detached) };
        list
    }

    /// Check the `O(1)` part of the structural invariants: both ends and the
    /// length agree on emptiness, and the tail is the last node.
    #[cfg(debug_assertions)]
    fn assert_ends(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.len == 0, self.tail.is_none());
        if let Some(tail) = self.tail {
            // SAFETY: `tail` is a valid node in a non-empty list.
            assert!(unsafe { tail.as_ref().next.is_none() });
        }
    }

    /// Walk the whole chain and check that it has exactly `len` nodes and
    /// ends at `tail`.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let mut count = 0;
        let mut last = None;
        let mut current = self.head;
        while current.is_some() {
            count += 1;
            assert!(count <= self.len, "chain is longer than `len`");
            last = current;
            current = self.next_of(current);
        }
        assert_eq!(count, self.len);
        assert_eq!(last, self.tail);
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use forward_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`.
    ///
    /// Nodes are released one by one from the front, so dropping a long list
    /// does not recurse.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// list.clear();
    /// assert!(list.is_empty());
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// ```
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Provides a reference to the front element, or fails with
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.front().is_err());
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Result<&T> {
        self.cursor_start().current().ok_or(Error::EmptyContainer {
            operation: "access front",
        })
    }

    /// Provides a mutable reference to the front element, or fails with
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.front_mut().unwrap() = 5;
    /// assert_eq!(list.front(), Ok(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        match self.head {
            // SAFETY: `head` is valid, and the list is mutably borrowed.
            Some(mut node) => Ok(unsafe { &mut node.as_mut().element }),
            None => Err(Error::EmptyContainer {
                operation: "access front",
            }),
        }
    }

    /// Provides a reference to the back element, or fails with
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.back().is_err());
    ///
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Result<&T> {
        match self.tail {
            // SAFETY: `tail` is valid, and the list is borrowed.
            Some(node) => Ok(unsafe { &node.as_ref().element }),
            None => Err(Error::EmptyContainer {
                operation: "access back",
            }),
        }
    }

    /// Provides a mutable reference to the back element, or fails with
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// *list.back_mut().unwrap() = 5;
    /// assert_eq!(list.back(), Ok(&5));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.tail {
            // SAFETY: `tail` is valid, and the list is mutably borrowed.
            Some(mut node) => Ok(unsafe { &mut node.as_mut().element }),
            None => Err(Error::EmptyContainer {
                operation: "access back",
            }),
        }
    }

    /// Provides a reference to the element at `index`, or fails with
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::{Error, List};
    ///
    /// let list = List::from([0, 1, 2]);
    /// assert_eq!(list.get(1), Ok(&1));
    /// assert_eq!(list.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T> {
        match self.node_at(index) {
            // SAFETY: `node` is a valid node of the borrowed list.
            Some(node) => Ok(unsafe { &node.as_ref().element }),
            None => Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            }),
        }
    }

    /// Provides a mutable reference to the element at `index`, or fails with
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        match self.node_at(index) {
            // SAFETY: `node` is a valid node of the mutably borrowed list.
            Some(mut node) => Ok(unsafe { &mut node.as_mut().element }),
            None => Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            }),
        }
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Ok(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Ok(&1));
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        // SAFETY: `None` always belongs to the list.
        unsafe { self.attach_after(None, Node::new_detached(elt)) }
    }

    /// Removes the first element and returns it, or fails with
    /// [`Error::EmptyContainer`] if the list is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.pop_front().is_err());
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Ok(3));
    /// assert_eq!(list.pop_front(), Ok(1));
    /// assert!(list.pop_front().is_err());
    /// ```
    pub fn pop_front(&mut self) -> Result<T> {
        // SAFETY: `None` always belongs to the list.
        unsafe { self.detach_after(None) }
            .map(Node::into_element)
            .ok_or(Error::EmptyContainer {
                operation: "pop front",
            })
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        // SAFETY: `tail` is either `None` in an empty list, or the last node.
        unsafe { self.attach_after(self.tail, Node::new_detached(elt)) }
    }

    /// Removes the last element from a list and returns it, or fails with
    /// [`Error::EmptyContainer`] if it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, since the node before
    /// the tail is only reachable by walking from the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.pop_back().is_err());
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Ok(3));
    /// assert_eq!(list.back(), Ok(&1));
    /// ```
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer {
                operation: "pop back",
            });
        }
        // The node before the tail, or `None` if the tail is the only node.
        let prev = self.len.checked_sub(2).and_then(|at| self.node_at(at));
        // SAFETY: `prev` is `None` or a node of the list, and it has a successor.
        unsafe { self.detach_after(prev) }
            .map(Node::into_element)
            .ok_or(Error::EmptyContainer {
                operation: "pop back",
            })
    }

    /// Returns the position of the node at `index`, or fails with
    /// [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn position_at(&self, index: usize) -> Result<Position> {
        self.node_at(index)
            // SAFETY: `node` is a valid node of the borrowed list.
            .map(|node| Position::of(unsafe { node.as_ref() }))
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// Returns the position of the first node, or `None` if the list is empty.
    pub fn front_position(&self) -> Option<Position> {
        // SAFETY: `head` is a valid node of the borrowed list.
        self.head.map(|node| Position::of(unsafe { node.as_ref() }))
    }

    /// Returns the position of the last node, or `None` if the list is empty.
    pub fn back_position(&self) -> Option<Position> {
        // SAFETY: `tail` is a valid node of the borrowed list.
        self.tail.map(|node| Position::of(unsafe { node.as_ref() }))
    }

    /// Returns `true` if `position` refers to a node currently in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn contains_position(&self, position: Position) -> bool {
        self.find_prev(position.key).is_some()
    }

    /// Provides a reference to the element at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from(['a', 'b']);
    /// let back = list.back_position().unwrap();
    /// assert_eq!(list.element(back), Ok(&'b'));
    /// ```
    pub fn element(&self, position: Position) -> Result<&T> {
        let node = self.find_node(position)?;
        // SAFETY: `node` is a valid node of the borrowed list.
        Ok(unsafe { &node.as_ref().element })
    }

    /// Provides a mutable reference to the element at `position`.
    pub fn element_mut(&mut self, position: Position) -> Result<&mut T> {
        let mut node = self.find_node(position)?;
        // SAFETY: `node` is a valid node of the mutably borrowed list.
        Ok(unsafe { &mut node.as_mut().element })
    }

    /// Inserts `elt` right before the node at `position`, and returns the
    /// position of the new node.
    ///
    /// Inserting before the first node is the same as [`List::push_front`].
    /// Fails with [`Error::PositionNotFound`] if `position` does not refer to
    /// a node of this list, in which case the list is left untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::{Error, List};
    ///
    /// let mut list = List::from([1, 3]);
    /// let three = list.back_position().unwrap();
    /// list.insert_before(three, 2).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3]);
    ///
    /// let other = List::from([1]);
    /// let foreign = other.front_position().unwrap();
    /// assert_eq!(list.insert_before(foreign, 0), Err(Error::PositionNotFound));
    /// ```
    pub fn insert_before(&mut self, position: Position, elt: T) -> Result<Position> {
        let prev = self.find_prev(position.key).ok_or(Error::PositionNotFound)?;
        let node = Node::new_detached(elt);
        // SAFETY: `prev` is `None` or a node found in the list.
        unsafe { self.attach_after(prev, node) };
        // SAFETY: `node` is now a valid node of the list.
        Ok(Position::of(unsafe { node.as_ref() }))
    }

    /// Inserts `elt` right after the node at `position`, and returns the
    /// position of the new node. The new node becomes the tail if `position`
    /// referred to the tail.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, for validating the
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let two = list.back_position().unwrap();
    /// list.insert_after(two, 3).unwrap();
    /// assert_eq!(list.back(), Ok(&3));
    /// ```
    pub fn insert_after(&mut self, position: Position, elt: T) -> Result<Position> {
        let prev = self.find_node(position)?;
        let node = Node::new_detached(elt);
        // SAFETY: `prev` is a node found in the list.
        unsafe { self.attach_after(Some(prev), node) };
        // SAFETY: `node` is now a valid node of the list.
        Ok(Position::of(unsafe { node.as_ref() }))
    }

    /// Removes the element right before the node at `position` and returns it.
    ///
    /// Fails with [`Error::InvalidOperation`] if the list is empty or
    /// `position` refers to the first node, and with
    /// [`Error::PositionNotFound`] if `position` does not refer to a node of
    /// this list. On failure the list is left untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::{Error, List};
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let three = list.back_position().unwrap();
    /// assert_eq!(list.erase_before(three), Ok(2));
    /// assert_eq!(list.erase_before(three), Ok(1));
    /// assert!(matches!(list.erase_before(three), Err(Error::InvalidOperation(_))));
    /// assert_eq!(list.to_vec(), vec![3]);
    /// ```
    pub fn erase_before(&mut self, position: Position) -> Result<T> {
        if self.front_position().map_or(true, |front| front == position) {
            return Err(Error::InvalidOperation(
                "cannot erase before the first element",
            ));
        }
        // Walk with two links of look-behind, so that the node right before
        // `position` can be unlinked from its own predecessor.
        let mut prev_prev: Link<T> = None;
        let mut prev = self.head;
        while let Some(node) = prev {
            let next = self.next_of(Some(node));
            match next {
                // SAFETY: `next_node` is reachable from `head`, so it is valid.
                Some(next_node) if unsafe { next_node.as_ref().key } == position.key => {
                    // SAFETY: `prev_prev` is `None` or a node of the list, and
                    // its successor is `node`.
                    let node = unsafe { self.detach_after(prev_prev) };
                    return node.map(Node::into_element).ok_or(Error::PositionNotFound);
                }
                _ => {}
            }
            prev_prev = prev;
            prev = next;
        }
        Err(Error::PositionNotFound)
    }

    /// Removes the element at `position` and returns it.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let back = list.back_position().unwrap();
    /// assert_eq!(list.erase(back), Ok(3));
    /// assert_eq!(list.back(), Ok(&2));
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<T> {
        let prev = self.find_prev(position.key).ok_or(Error::PositionNotFound)?;
        // SAFETY: `prev` is `None` or a node found in the list, and its
        // successor is the node at `position`.
        unsafe { self.detach_after(prev) }
            .map(Node::into_element)
            .ok_or(Error::PositionNotFound)
    }

    /// Provides a cursor at the node with given index.
    ///
    /// By convention, the cursor is pointing to the "ghost" position if
    /// `at == len`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.cursor(1).current(), Some(&2));
    /// assert_eq!(list.cursor(3).current(), None);
    /// ```
    pub fn cursor(&self, at: usize) -> Cursor<'_, T> {
        assert!(at <= self.len, "Cannot create cursor at a nonexistent index");
        Cursor::new(self, self.node_at(at), at)
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the "ghost" position if the list is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head, 0)
    }

    /// Provides a cursor at the "ghost" position past the last node.
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None, self.len)
    }

    /// Provides a cursor with editing operations at the node with given index.
    ///
    /// By convention, the cursor is pointing to the "ghost" position if
    /// `at == len`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1);
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// assert_eq!(list.cursor_mut(3).current_mut(), None);
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        assert!(at <= self.len, "Cannot create cursor at a nonexistent index");
        let current = self.node_at(at);
        CursorMut::new(self, current, at)
    }

    /// Provides a cursor with editing operations at the first node.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.head;
        CursorMut::new(self, current, 0)
    }

    /// Provides a cursor with editing operations at the "ghost" position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, None, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(list.to_vec(), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements from `other` to the end of the list.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`. After
    /// this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    ///
    /// list1.append(&mut list2);
    ///
    /// assert_eq!(list1.to_vec(), vec!['a', 'b', 'c']);
    /// assert_eq!(list1.back(), Ok(&'c'));
    /// assert!(list2.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: `self.tail` is either `None` in an empty list, or the
            // last node.
            unsafe { self.attach_nodes_after(self.tail, detached) }
        }
    }

    /// Moves all elements from `other` to the begin of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list1 = List::from(['a']);
    /// let mut list2 = List::from(['b', 'c']);
    ///
    /// list2.prepend(&mut list1);
    ///
    /// assert_eq!(list2.to_vec(), vec!['a', 'b', 'c']);
    /// assert!(list1.is_empty());
    /// ```
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // SAFETY: `None` always belongs to the list.
            unsafe { self.attach_nodes_after(None, detached) }
        }
    }

    /// Splits the list into two at the given index. Returns everything after
    /// the given index (inclusive).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let split = list.split_off(2);
    ///
    /// assert_eq!(list.to_vec(), vec![1, 2]);
    /// assert_eq!(split.to_vec(), vec![3]);
    /// ```
    pub fn split_off(&mut self, at: usize) -> List<T> {
        assert!(at <= self.len, "Cannot split off at a nonexistent index");
        let prev = at.checked_sub(1).and_then(|at| self.node_at(at));
        // SAFETY: `prev` is `None` or the node at `at - 1`, followed by
        // exactly `len - at` nodes.
        unsafe { self.detach_nodes_after(prev, self.len - at) }
            .map(List::from_detached)
            .unwrap_or_default()
    }

    /// Replaces the content of the list with the elements of `iter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::List;
    /// use std::collections::LinkedList;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// list.assign(vec![4, 5]);
    /// assert_eq!(list.to_vec(), vec![4, 5]);
    ///
    /// list.assign(LinkedList::from([6]));
    /// assert_eq!(list.to_vec(), vec![6]);
    /// ```
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            key: NodeKey::fresh(),
            element,
        })))
    }

    pub(crate) fn into_element(self: Box<Self>) -> T {
        self.element
    }
}

impl Position {
    pub(crate) fn of<T>(node: &Node<T>) -> Self {
        Self { key: node.key }
    }
}

impl<T> DetachedNodes<T> {
    /// If is unsafe because it must be guaranteed that `front..=back` is
    /// a valid chain and its length is equal to `len`.
    unsafe fn new(front: NonNull<Node<T>>, back: NonNull<Node<T>>, len: usize) -> Self {
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::List;
    use std::cell::RefCell;

    #[derive(Debug)]
    struct DropChecker<'a, T: Copy> {
        value: T,
        dropped: &'a RefCell<Vec<T>>,
    }
    impl<'a, T: Copy> DropChecker<'a, T> {
        fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
            Self { value, dropped }
        }
    }
    impl<'a, T: Copy> Drop for DropChecker<'a, T> {
        fn drop(&mut self) {
            self.dropped.borrow_mut().push(self.value);
        }
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Ok(1));
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn list_drop() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_drop_only_removed_node() {
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));

        let middle = list.position_at(1).unwrap();
        drop(list.erase(middle).unwrap());
        assert_eq!(dropped.borrow().as_slice(), &[2]);

        drop(list.pop_back().unwrap());
        assert_eq!(dropped.borrow().as_slice(), &[2, 3]);
        assert_eq!(list.len(), 1);
        list.assert_invariants();
    }

    #[test]
    fn list_drop_long() {
        let list: List<u32> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert!(list.front().is_err());
        assert!(list.back().is_err());
        assert!(list.pop_front().is_err());
        assert!(list.pop_back().is_err());

        list.push_back(1);
        assert_eq!(list.back(), Ok(&1));
        assert_eq!(list.pop_front(), Ok(1));
        assert!(list.pop_back().is_err());
        assert!(list.is_empty());
        list.assert_invariants();

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        assert_eq!(list.back(), Ok(&3));
        assert_eq!(list.front(), Ok(&2));
        assert_eq!(list.pop_front(), Ok(2));
        assert_eq!(list.pop_back(), Ok(3));
        list.assert_invariants();

        assert_eq!(list.front(), Ok(&1));
        assert_eq!(list.back(), Ok(&1));
        assert_eq!(list.pop_front(), Ok(1));
        assert!(list.front().is_err());
        assert!(list.back().is_err());
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn list_empty_errors() {
        let mut list = List::<i32>::new();
        assert_eq!(
            list.pop_front(),
            Err(Error::EmptyContainer {
                operation: "pop front"
            })
        );
        assert_eq!(
            list.pop_back(),
            Err(Error::EmptyContainer {
                operation: "pop back"
            })
        );
        assert!(matches!(list.front_mut(), Err(Error::EmptyContainer { .. })));
        assert!(matches!(list.back_mut(), Err(Error::EmptyContainer { .. })));
        assert_eq!(list.get(0), Err(Error::IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(list.front_position(), None);
        assert_eq!(list.back_position(), None);
        list.assert_invariants();
    }

    #[test]
    fn list_push_back_after_pop_back_to_empty() {
        // The tail must not keep pointing to a released node.
        let mut list = List::from([1, 2]);
        assert_eq!(list.pop_back(), Ok(2));
        assert_eq!(list.pop_back(), Ok(1));
        list.push_back(3);
        list.push_back(4);
        assert_eq!(list.front(), Ok(&3));
        assert_eq!(list.back(), Ok(&4));
        list.assert_invariants();
    }

    #[test]
    fn list_get() {
        let mut list = List::from([0, 1, 2, 3]);
        for i in 0..4 {
            assert_eq!(list.get(i), Ok(&i));
        }
        *list.get_mut(2).unwrap() = 20;
        assert_eq!(list.get(2), Ok(&20));
        assert_eq!(
            list.get_mut(4).map(|x| *x),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn list_insert_before() {
        let mut list = List::from([1, 2, 3]);
        let front = list.front_position().unwrap();
        let back = list.back_position().unwrap();

        // Before the head is a push front.
        let zero = list.insert_before(front, 0).unwrap();
        assert_eq!(list.front_position(), Some(zero));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);

        // Before the tail does not move the tail.
        list.insert_before(back, 25).unwrap();
        assert_eq!(list.back_position(), Some(back));
        assert_eq!(list.to_vec(), vec![0, 1, 2, 25, 3]);
        assert_eq!(list.len(), 5);
        list.assert_invariants();
    }

    #[test]
    fn list_insert_after() {
        let mut list = List::from([1, 2]);
        let back = list.back_position().unwrap();
        let three = list.insert_after(back, 3).unwrap();
        assert_eq!(list.back_position(), Some(three));

        let front = list.front_position().unwrap();
        list.insert_after(front, 15).unwrap();
        assert_eq!(list.to_vec(), vec![1, 15, 2, 3]);
        list.push_back(4);
        assert_eq!(list.to_vec(), vec![1, 15, 2, 3, 4]);
        list.assert_invariants();
    }

    #[test]
    fn list_stale_positions() {
        let mut list = List::from([1, 2, 3]);
        let two = list.position_at(1).unwrap();
        assert_eq!(list.erase(two), Ok(2));
        assert!(!list.contains_position(two));

        // The freed node may be reused by the allocator, but its key is never.
        list.push_back(4);
        assert_eq!(list.insert_before(two, 0), Err(Error::PositionNotFound));
        assert_eq!(list.insert_after(two, 0), Err(Error::PositionNotFound));
        assert_eq!(list.erase_before(two), Err(Error::PositionNotFound));
        assert_eq!(list.erase(two), Err(Error::PositionNotFound));
        assert_eq!(list.element(two), Err(Error::PositionNotFound));
        assert_eq!(list.to_vec(), vec![1, 3, 4]);
        list.assert_invariants();

        let cloned = list.clone();
        let front = list.front_position().unwrap();
        assert!(!cloned.contains_position(front));
    }

    #[test]
    fn list_erase_before() {
        let mut list = List::from([1, 2, 3, 4]);
        let front = list.front_position().unwrap();
        let back = list.back_position().unwrap();

        assert_eq!(
            list.erase_before(front),
            Err(Error::InvalidOperation(
                "cannot erase before the first element"
            ))
        );
        assert_eq!(list.erase_before(back), Ok(3));
        assert_eq!(list.to_vec(), vec![1, 2, 4]);
        assert_eq!(list.erase_before(back), Ok(2));
        assert_eq!(list.erase_before(back), Ok(1));
        assert_eq!(list.front_position(), Some(back));
        assert!(matches!(
            list.erase_before(back),
            Err(Error::InvalidOperation(_))
        ));
        assert_eq!(list.len(), 1);
        list.assert_invariants();

        let mut empty = List::<i32>::new();
        assert!(matches!(
            empty.erase_before(back),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn list_erase_keeps_tail() {
        let mut list = List::from([1, 2, 3]);
        let back = list.back_position().unwrap();
        assert_eq!(list.erase(back), Ok(3));
        assert_eq!(list.back(), Ok(&2));
        list.push_back(5);
        assert_eq!(list.to_vec(), vec![1, 2, 5]);
        list.assert_invariants();

        let front = list.front_position().unwrap();
        assert_eq!(list.erase(front), Ok(1));
        assert_eq!(list.front(), Ok(&2));
        list.assert_invariants();
    }

    #[test]
    fn list_failed_operations_do_not_mutate() {
        let mut list = List::from([1, 2, 3]);
        let foreign = List::from([1]).front_position().unwrap();
        let front = list.front_position().unwrap();

        assert!(list.insert_before(foreign, 9).is_err());
        assert!(list.erase_before(foreign).is_err());
        assert!(list.erase_before(front).is_err());
        assert!(list.get(7).is_err());
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        list.assert_invariants();
    }

    #[test]
    fn list_split_and_append() {
        fn check(list: &[i32], other: &[i32], at: usize) {
            let mut list_a = List::from(list.to_vec());
            let mut list_b = List::from(other.to_vec());
            list_a.append(&mut list_b);
            assert!(list_b.is_empty());
            list_a.assert_invariants();
            list_b.assert_invariants();
            let appended: Vec<_> = list.iter().chain(other).copied().collect();
            assert_eq!(list_a.to_vec(), appended);

            let split = list_a.split_off(at);
            list_a.assert_invariants();
            split.assert_invariants();
            assert_eq!(list_a.to_vec(), list);
            assert_eq!(split.to_vec(), other);

            let mut list_a = List::from(list.to_vec());
            let mut list_b = List::from(other.to_vec());
            list_b.prepend(&mut list_a);
            assert!(list_a.is_empty());
            list_b.assert_invariants();
            assert_eq!(list_b.to_vec(), appended);
        }
        check(&[0, 1, 2, 3, 4], &[5, 6], 5);
        check(&[0, 1, 2, 3, 4], &[], 5);
        check(&[0], &[1, 2], 1);
        check(&[], &[0, 1], 0);
        check(&[], &[], 0);
        check(&[], &[0], 0);
    }

    #[test]
    fn list_append_then_push_back() {
        let mut list = List::from([1]);
        list.append(&mut List::from([2, 3]));
        list.push_back(4);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(list.len(), 4);

        let mut empty = List::new();
        empty.append(&mut list);
        empty.push_back(5);
        assert_eq!(empty.to_vec(), vec![1, 2, 3, 4, 5]);
        empty.assert_invariants();
    }

    #[test]
    fn list_swap() {
        let mut a = List::from([1, 2, 3]);
        let mut b = List::from([4]);
        std::mem::swap(&mut a, &mut b);
        a.push_back(5);
        b.push_back(6);
        assert_eq!(a.to_vec(), vec![4, 5]);
        assert_eq!(b.to_vec(), vec![1, 2, 3, 6]);
        a.assert_invariants();
        b.assert_invariants();
    }

    #[test]
    fn list_take_moves_everything() {
        let mut a = List::from([1, 2, 3]);
        let b = std::mem::take(&mut a);
        assert!(a.is_empty());
        assert_eq!(a.len(), 0);
        assert_eq!(b.to_vec(), vec![1, 2, 3]);
        a.push_back(7);
        assert_eq!(a.to_vec(), vec![7]);
        a.assert_invariants();
        b.assert_invariants();
    }

    #[test]
    fn list_assign() {
        let mut list = List::from([1, 2, 3]);
        list.assign([7, 8]);
        assert_eq!(list.to_vec(), vec![7, 8]);
        assert_eq!(list.back(), Ok(&8));
        list.assign(None);
        assert!(list.is_empty());
        list.assert_invariants();
    }

    #[test]
    fn list_clear_twice() {
        let mut list = List::from([1, 2, 3]);
        list.clear();
        list.clear();
        assert!(list.is_empty());
        list.assert_invariants();
    }
}
