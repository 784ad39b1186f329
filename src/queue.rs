//! A first-in-first-out adapter over a sequence container.

use crate::error::{Error, Result};
use crate::List;
use std::collections::VecDeque;

/// The operations a container must provide to back a [`Queue`]: pushing at
/// the back, popping at the front, and peeking at both ends.
pub trait QueueStorage<T> {
    /// Append an element at the back.
    fn push_back(&mut self, elt: T);

    /// Remove the front element and return it, or fail with
    /// [`Error::EmptyContainer`] if the container is empty.
    fn pop_front(&mut self) -> Result<T>;

    /// Provide a reference to the front element, or fail with
    /// [`Error::EmptyContainer`] if the container is empty.
    fn front(&self) -> Result<&T>;

    /// Provide a reference to the back element, or fail with
    /// [`Error::EmptyContainer`] if the container is empty.
    fn back(&self) -> Result<&T>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> QueueStorage<T> for List<T> {
    fn push_back(&mut self, elt: T) {
        List::push_back(self, elt)
    }

    fn pop_front(&mut self) -> Result<T> {
        List::pop_front(self)
    }

    fn front(&self) -> Result<&T> {
        List::front(self)
    }

    fn back(&self) -> Result<&T> {
        List::back(self)
    }

    fn len(&self) -> usize {
        List::len(self)
    }

    fn is_empty(&self) -> bool {
        List::is_empty(self)
    }
}

impl<T> QueueStorage<T> for VecDeque<T> {
    fn push_back(&mut self, elt: T) {
        VecDeque::push_back(self, elt)
    }

    fn pop_front(&mut self) -> Result<T> {
        VecDeque::pop_front(self).ok_or(Error::EmptyContainer {
            operation: "pop front",
        })
    }

    fn front(&self) -> Result<&T> {
        VecDeque::front(self).ok_or(Error::EmptyContainer { operation: "access front" })
    }

    fn back(&self) -> Result<&T> {
        VecDeque::back(self).ok_or(Error::EmptyContainer { operation: "access back" })
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

/// A FIFO queue backed by a [`List`] unless another [`QueueStorage`] is
/// chosen.
///
/// # Examples
///
/// ```
/// use forward_list::Queue;
///
/// let mut queue = Queue::new();
/// queue.push(10);
/// queue.push(20);
/// queue.push(30);
///
/// assert_eq!(queue.front(), Ok(&10));
/// assert_eq!(queue.back(), Ok(&30));
/// assert_eq!(queue.pop(), Ok(10));
/// assert_eq!(queue.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queue<T, C: QueueStorage<T> = List<T>> {
    storage: C,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue backed by a [`List`].
    pub fn new() -> Self {
        Self::with_storage(List::new())
    }
}

impl<T, C: QueueStorage<T>> Queue<T, C> {
    /// Create a queue over an existing container. Its front is the head of
    /// the queue.
    pub fn with_storage(storage: C) -> Self {
        Self {
            storage,
            _marker: std::marker::PhantomData,
        }
    }

    /// Add an element at the back of the queue.
    pub fn push(&mut self, elt: T) {
        self.storage.push_back(elt)
    }

    /// Remove the element at the front of the queue, or return
    /// [`Error::EmptyContainer`] if it is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.storage.pop_front()
    }

    /// Provides a reference to the oldest element, the next one to be
    /// popped, or fails with [`Error::EmptyContainer`] if the queue is empty.
    pub fn front(&self) -> Result<&T> {
        self.storage.front()
    }

    /// Provides a reference to the most recently pushed element, or fails
    /// with [`Error::EmptyContainer`] if the queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use forward_list::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.back().is_err());
    /// queue.push('a');
    /// queue.push('b');
    /// assert_eq!(queue.back(), Ok(&'b'));
    /// ```
    pub fn back(&self) -> Result<&T> {
        self.storage.back()
    }

    /// Returns the number of elements in the queue.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Unwrap the underlying container.
    pub fn into_inner(self) -> C {
        self.storage
    }
}

impl<T, C: QueueStorage<T> + Default> Default for Queue<T, C> {
    fn default() -> Self {
        Self::with_storage(C::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Queue;
    use crate::error::Error;
    use crate::List;
    use std::collections::VecDeque;

    #[test]
    fn queue_fifo() {
        let mut queue = Queue::new();
        assert!(queue.is_empty());
        queue.push(10);
        queue.push(20);
        queue.push(30);
        assert_eq!(queue.front(), Ok(&10));
        assert_eq!(queue.back(), Ok(&30));
        assert_eq!(queue.pop(), Ok(10));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.into_inner(), List::from([20, 30]));
    }

    #[test]
    fn queue_empty() {
        let mut queue: Queue<i32> = Queue::default();
        assert_eq!(
            queue.pop(),
            Err(Error::EmptyContainer {
                operation: "pop front"
            })
        );
        assert!(queue.front().is_err());
        assert!(queue.back().is_err());
        queue.push(1);
        assert_eq!(queue.pop(), Ok(1));
        queue.push(2);
        assert_eq!(queue.back(), Ok(&2));
    }

    #[test]
    fn queue_over_vec_deque() {
        let mut queue = Queue::with_storage(VecDeque::from([1, 2]));
        queue.push(3);
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.front(), Ok(&2));
        assert_eq!(queue.back(), Ok(&3));
        assert_eq!(queue.len(), 2);
        queue.pop().unwrap();
        queue.pop().unwrap();
        assert!(queue.is_empty());
        assert_eq!(
            queue.front(),
            Err(Error::EmptyContainer { operation: "access front" })
        );
    }

    #[test]
    fn queue_storage_defaults_is_empty_to_len() {
        use super::QueueStorage;

        let mut deque = VecDeque::new();
        assert!(QueueStorage::<i32>::is_empty(&deque));
        QueueStorage::push_back(&mut deque, 1);
        assert!(!QueueStorage::<i32>::is_empty(&deque));
        assert_eq!(QueueStorage::len(&deque), 1);
    }

    #[test]
    fn queue_with_existing_list() {
        let mut queue = Queue::with_storage(List::from([1, 2, 3]));
        assert_eq!(queue.pop(), Ok(1));
        assert_eq!(queue.front(), Ok(&2));
    }
}
