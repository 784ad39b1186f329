//! This crate provides a singly-linked list with owned nodes and a tail
//! pointer.
//!
//! The [`List`] allows pushing elements at both ends and popping the front
//! element in constant time. In compromise, popping the back element, or
//! accessing any element other than the front and the back, take *O*(*n*)
//! time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use forward_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! list.push_front(0);
//! list.push_back(4);
//! assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
//!
//! assert_eq!(list.pop_front(), Ok(0));
//! assert_eq!(list.pop_back(), Ok(4));
//! assert_eq!(list.get(1), Ok(&2));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!    ╔═══════════╗           ╔═══════════╗                        ╔═══════════╗
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ ║   next    ║ ──→ None
//!    ╟───────────╢           ╟───────────╢     Node 2, 3, ...     ╟───────────╢
//!    ║    key    ║           ║    key    ║                        ║    key    ║
//!    ╟───────────╢           ╟───────────╢                        ╟───────────╢
//!    ║ payload T ║           ║ payload T ║                        ║ payload T ║
//!    ╚═══════════╝           ╚═══════════╝                        ╚═══════════╝
//!      Node 0  ↑                 Node 1                            Node N - 1 ↑
//! ╔═══════════╗│                                                              │
//! ║   head    ║┘                                                              │
//! ╟───────────╢                                                               │
//! ║   tail    ║ ──────────────────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║    len    ║
//! ╚═══════════╝
//!     List
//! ```
//! The `List` contains:
//! - a pointer `head` that owns the first node;
//! - a pointer `tail` that observes the last node, so that pushing back takes
//!   constant time;
//! - a length field `len` indicating the length of the list.
//!
//! Each node of the list `List<T>` is allocated on heap, which contains:
//! - the `next` pointer that owns the next node (or is `None` at the last node);
//! - a `key` stamped at allocation, which identifies the node to a [`Position`];
//! - the actual payload `T`.
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1, ...,
//! *n* - 1, and the position past the last node (the *ghost* position) is
//! indexed by *n*.
//!
//! # Positions
//!
//! A [`Position`] refers to a node without borrowing the list. Operations
//! taking positions validate them, so a position of a removed node is reported
//! as [`Error::PositionNotFound`] rather than dereferenced.
//!
//! ```
//! use forward_list::{Error, List};
//!
//! let mut list = List::from([1, 2, 4]);
//! let four = list.back_position().unwrap();
//!
//! list.insert_before(four, 3).unwrap();
//! assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
//!
//! assert_eq!(list.erase_before(four), Ok(3));
//! assert_eq!(list.erase(four), Ok(4));
//! assert_eq!(list.erase(four), Err(Error::PositionNotFound));
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These
//! iterate the list like an array (fused and non-cyclic). [`IterMut`] provides
//! mutability of the elements (but not the linked structure of the list).
//!
//! ## Examples
//!
//! ```
//! use forward_list::List;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), Some(&3));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] move forward over a list. In a
//! list with length *n*, there are *n* + 1 valid locations for the cursor,
//! indexed by 0, 1, ..., *n*, where *n* is the ghost position.
//!
//! [`CursorMut`] mutates the list after the cursor in constant time:
//! - [`insert_after`]: insert a new item after the cursor;
//! - [`remove_next`]: remove the item after the cursor;
//! - [`split_after`]: split the items after the cursor into a new list.
//!
//! ```
//! use forward_list::List;
//!
//! let mut list = List::from([1, 2, 3, 4]);
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert_after(5); // becomes [1, 5, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! cursor.seek_forward(2).unwrap();
//! assert_eq!(cursor.remove_next(), Some(3)); // becomes [1, 5, 2, 4], points to 2
//! assert_eq!(cursor.current(), Some(&2));
//!
//! assert_eq!(Vec::from_iter(list), vec![1, 5, 2, 4]);
//! ```
//!
//! # Queues
//!
//! The [`Queue`] adapter turns a [`List`], or any other [`QueueStorage`], into
//! a FIFO queue.
//!
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut
//! [`insert_after`]: crate::list::cursor::CursorMut::insert_after
//! [`remove_next`]: crate::list::cursor::CursorMut::remove_next
//! [`split_after`]: crate::list::cursor::CursorMut::split_after

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::convert::ArrayPolicy;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{List, Position};
#[doc(inline)]
pub use queue::{Queue, QueueStorage};

mod error;
pub mod list;
pub mod queue;
