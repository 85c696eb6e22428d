//! This crate provides a doubly-linked list with comparator-driven equality,
//! implemented over a slot arena.
//!
//! The [`List`] allows inserting and removing elements at any linked position
//! in constant time once the position is reached. In compromise, reaching a
//! position by index takes *O*(*n*) time, walking from whichever end of the
//! list is closer.
//!
//! Every list is bound to a [`Comparator`] at construction, and the
//! value-based operations (`contains`, `index_of`, the occurrence lookups and
//! removals) use it as their notion of equality. Lookups and removals return
//! an [`Entry`], the item paired with its position.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use chainlist::{List, Natural};
//!
//! let mut list = List::new(Natural);
//!
//! list.push_back("walnut")?;
//! list.push_back("pecan")?;
//! list.push_front("almond")?;
//! assert_eq!(list.to_vec()?, vec!["almond", "walnut", "pecan"]);
//!
//! assert_eq!(list.index_of(&"pecan"), Some(2));
//!
//! let removed = list.remove(1)?;
//! assert_eq!((removed.index, removed.item), (1, "walnut"));
//! assert_eq!(list.len(), 2);
//! # Ok::<(), chainlist::Error>(())
//! ```
//!
//! # Memory Layout
//!
//! The nodes live in a single growable arena of slots, and the links are slot
//! indices rather than pointers:
//! ```text
//!  ╔═══════════╗     slots ┌────────────┬────────────┬────────────┬────────────┐
//!  ║   slots   ║ ────────→ │ Occupied   │ Vacant     │ Occupied   │ Occupied   │
//!  ╟───────────╢           │ item: "a"  │            │ item: "c"  │ item: "b"  │
//!  ║ head:  0  ║           │ prev: None │ next_free: │ prev: 3    │ prev: 0    │
//!  ║ tail:  2  ║           │ next: 3    │   None     │ next: None │ next: 2    │
//!  ║ free:  1  ║           └────────────┴────────────┴────────────┴────────────┘
//!  ║ len:   3  ║                slot 0      slot 1       slot 2       slot 3
//!  ╚═══════════╝
//!      List                list order: "a" (slot 0) → "b" (slot 3) → "c" (slot 2)
//! ```
//! The `List` contains:
//! - the arena `slots`, which owns every node;
//! - `head` and `tail`, the slots of the first and last element (`None` when
//!   the list is empty);
//! - `free`, the head of the free list threaded through vacant slots, so a
//!   removal hands its slot to the next insertion without reallocating;
//! - `len`, the number of linked elements;
//! - the comparator.
//!
//! Slot order is unrelated to list order: insertion and removal only rewire
//! the `prev`/`next` indices of the neighbouring slots. Because the links are
//! indices into storage the list owns, the whole structure is ordinary safe
//! Rust, and a bug in the rewiring shows up as a panic rather than as
//! undefined behaviour.
//!
//! # Iteration and Visiting
//!
//! Iterating over a list is by the [`Iter`] and [`IntoIter`] iterators. These
//! are double-ended, exact-size and fused, and iterate the list like an
//! array.
//!
//! ```
//! use chainlist::{List, Natural};
//! use std::iter::FromIterator;
//!
//! let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! ```
//!
//! For callers that want the list to drive the traversal, [`List::visit`]
//! feeds every element to a [`Visitor`] in head-to-tail order and stops at
//! the first failure the visitor reports.
//!
//! ```
//! use chainlist::{List, Natural};
//! use std::iter::FromIterator;
//!
//! let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
//! let mut sum = 0;
//! let visited: Result<(), ()> = list.visit(&mut |item: &i32| {
//!     sum += *item;
//!     Ok(())
//! });
//! assert!(visited.is_ok());
//! assert_eq!(sum, 6);
//! ```
//!
//! # Comparators
//!
//! [`Natural`] compares with [`Ord`] and is the right choice for most item
//! types. Any `Fn(&T, &T) -> Ordering` closure is a comparator too, so domain
//! notions of equality drop in without a wrapper type:
//!
//! ```
//! use chainlist::List;
//!
//! let mut list = List::new(|a: &&str, b: &&str| {
//!     a.to_lowercase().cmp(&b.to_lowercase())
//! });
//! list.push_back("Hello")?;
//! assert!(list.contains(&"HELLO"));
//! # Ok::<(), chainlist::Error>(())
//! ```
//!
//! [`List`]: crate::List
//! [`Entry`]: crate::Entry
//! [`Iter`]: crate::Iter
//! [`IntoIter`]: crate::IntoIter
//! [`Comparator`]: crate::Comparator
//! [`Natural`]: crate::Natural
//! [`Visitor`]: crate::Visitor

#[doc(inline)]
pub use comparator::{Comparator, Natural};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::{Entry, List};
#[doc(inline)]
pub use visitor::Visitor;

pub mod comparator;
pub mod error;
pub mod list;
pub mod visitor;
