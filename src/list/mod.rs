use std::fmt::{Debug, Formatter};

use log::trace;

use crate::comparator::Comparator;
use crate::error::Error;
use crate::visitor::Visitor;
use crate::Iter;

pub mod iterator;

mod algorithms;

/// The `List` is a doubly-linked list with comparator-driven equality,
/// backed by a slot arena. It allows inserting and removing elements at any
/// linked position in constant time once the position is reached; reaching a
/// position by index takes *O*(*n*) time, walking from whichever end is
/// closer.
///
/// The `List` contains:
/// - a slot arena `slots` owning every node;
/// - `head`/`tail` slot indices (`None` when empty);
/// - `free`, the head of the intrusive free list threaded through vacant
///   slots;
/// - `len`, the number of linked elements;
/// - the comparator bound at construction, used by every value-based
///   operation.
///
/// # Naming Conventions
///
/// - `index`: a position in the list, `0..len`;
/// - `at`: a slot index into the arena, unrelated to list order.
pub struct List<T, C> {
    pub(crate) slots: Vec<Slot<T>>,
    pub(crate) head: Option<usize>,
    pub(crate) tail: Option<usize>,
    free: Option<usize>,
    pub(crate) len: usize,
    comparator: C,
}

/// One linked node: the element plus links to its neighbours.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

/// An arena slot. Vacant slots form a singly-linked free list so removals
/// can hand their storage to later insertions without touching the
/// allocator.
pub(crate) enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

impl<T> Slot<T> {
    /// The node in this slot. Chain links only ever point at occupied
    /// slots; anything else means the list is corrupted, which is fatal.
    pub(crate) fn occupied(&self) -> &Node<T> {
        match self {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("chain link points at a vacant slot"),
        }
    }
}

/// An item together with its position in the list, as returned by lookups
/// and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<T> {
    pub index: usize,
    pub item: T,
}

// Arena plumbing.
impl<T, C> List<T, C> {
    fn node(&self, at: usize) -> &Node<T> {
        self.slots[at].occupied()
    }

    fn node_mut(&mut self, at: usize) -> &mut Node<T> {
        match &mut self.slots[at] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("chain link points at a vacant slot"),
        }
    }

    /// Store a node, reusing a vacant slot when one exists. Growing the
    /// arena is the only point where an insertion can fail, and it happens
    /// before any link is rewired, so a failed insertion leaves the chain
    /// untouched.
    fn alloc(&mut self, node: Node<T>) -> Result<usize, Error> {
        match self.free {
            Some(at) => {
                let next_free = match self.slots[at] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                self.free = next_free;
                self.slots[at] = Slot::Occupied(node);
                Ok(at)
            }
            None => {
                self.slots.try_reserve(1)?;
                self.slots.push(Slot::Occupied(node));
                Ok(self.slots.len() - 1)
            }
        }
    }

    /// Vacate a slot and push it onto the free list, returning its node.
    fn release(&mut self, at: usize) -> Node<T> {
        let slot = std::mem::replace(
            &mut self.slots[at],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(at);
        match slot {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    /// Follow a link that the element count guarantees to be present.
    fn chase(&self, link: Option<usize>) -> usize {
        match link {
            Some(at) => at,
            None => unreachable!("chain ended before the counted length"),
        }
    }

    /// Slot of the node at `index`, walking from whichever end is closer.
    ///
    /// Callers must have checked `index < len`.
    fn seek(&self, index: usize) -> usize {
        let from_back = self.len - 1 - index;
        if index <= from_back {
            let mut at = self.chase(self.head);
            for _ in 0..index {
                at = self.chase(self.node(at).next);
            }
            at
        } else {
            let mut at = self.chase(self.tail);
            for _ in 0..from_back {
                at = self.chase(self.node(at).prev);
            }
            at
        }
    }

    /// Unlink the node in slot `at` from the chain, vacate its slot and
    /// return its item.
    fn unlink(&mut self, at: usize) -> T {
        let node = self.release(at);
        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        self.debug_check();
        node.item
    }

    #[inline]
    fn debug_check(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = self.check_invariants() {
            panic!("list invariant violated: {}", violation);
        }
    }
}

// Lifecycle and positional operations. None of these consult the
// comparator, so they carry no bound on `C`.
impl<T, C> List<T, C> {
    /// Creates an empty `List` bound to `comparator`.
    ///
    /// The empty list does not allocate.
    ///
    /// # Examples
    /// ```
    /// use chainlist::{List, Natural};
    /// let list: List<u32, Natural> = List::new(Natural);
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new(comparator: C) -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
            comparator,
        }
    }

    /// Creates an empty `List` with arena room for `capacity` elements,
    /// surfacing allocation failure instead of aborting.
    pub fn with_capacity(comparator: C, capacity: usize) -> Result<Self, Error> {
        let mut list = Self::new(comparator);
        list.slots.try_reserve(capacity)?;
        Ok(list)
    }

    /// The comparator this list was created with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the `List`.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    ///
    /// list.push_front(2).unwrap();
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_back(3).unwrap();
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List` and returns the node storage
    /// to the allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    ///
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.front(), None);
    /// ```
    pub fn clear(&mut self) {
        trace!("clear (len {})", self.len);
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free = None;
        self.len = 0;
        self.debug_check();
    }

    /// Adds an element first in the list.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Fails only when node storage cannot be obtained; the list is left
    /// unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    ///
    /// list.push_front(2).unwrap();
    /// assert_eq!(list.front().unwrap().item, &2);
    ///
    /// list.push_front(1).unwrap();
    /// assert_eq!(list.front().unwrap().item, &1);
    /// ```
    pub fn push_front(&mut self, item: T) -> Result<(), Error> {
        self.insert(0, item)
    }

    /// Appends an element to the back of the list and returns its index
    /// (the length before insertion).
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Errors
    ///
    /// Fails only when node storage cannot be obtained; the list is left
    /// unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// assert_eq!(list.push_back(1).unwrap(), 0);
    /// assert_eq!(list.push_back(3).unwrap(), 1);
    /// assert_eq!(list.back().unwrap().item, &3);
    /// ```
    pub fn push_back(&mut self, item: T) -> Result<usize, Error> {
        let index = self.len;
        self.insert(index, item)?;
        Ok(index)
    }

    /// Adds an element at the given index, shifting every element at
    /// positions `>= index` one place towards the back. `index == len`
    /// appends.
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `index > len`, and
    /// [`Error::Alloc`] when node storage cannot be obtained. Either way
    /// the list is left unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(3).unwrap();
    ///
    /// list.insert(1, 2).unwrap();
    /// assert_eq!(list.to_vec().unwrap(), vec![1, 2, 3]);
    ///
    /// assert!(list.insert(7, 4).is_err());
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), Error> {
        if index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let next = if index == self.len {
            None
        } else {
            Some(self.seek(index))
        };
        let prev = match next {
            Some(at) => self.node(at).prev,
            None => self.tail,
        };
        let at = self.alloc(Node { item, prev, next })?;
        match prev {
            Some(prev) => self.node_mut(prev).next = Some(at),
            None => self.head = Some(at),
        }
        match next {
            Some(next) => self.node_mut(next).prev = Some(at),
            None => self.tail = Some(at),
        }
        self.len += 1;
        trace!("insert at index {} (len {})", index, self.len);
        self.debug_check();
        Ok(())
    }

    /// Replaces the item at `index` and returns the one it displaces.
    /// Neither the links nor the length change.
    ///
    /// The valid range is `0..len`: unlike insertion, there is no slot one
    /// past the end to write to.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(9).unwrap();
    ///
    /// assert_eq!(list.set(1, 2).unwrap(), 9);
    /// assert_eq!(list.to_vec().unwrap(), vec![1, 2]);
    /// assert!(list.set(2, 3).is_err());
    /// ```
    pub fn set(&mut self, index: usize, item: T) -> Result<T, Error> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let at = self.seek(index);
        let old = std::mem::replace(&mut self.node_mut(at).item, item);
        trace!("set at index {}", index);
        self.debug_check();
        Ok(old)
    }

    /// The element at `index`, together with that index.
    ///
    /// This operation should compute in *O*(*n*) time: the chain is walked
    /// from the head, or from the tail when `index` is in the latter half.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back("Hello").unwrap();
    ///
    /// let entry = list.get(0).unwrap();
    /// assert_eq!(entry.index, 0);
    /// assert_eq!(*entry.item, "Hello");
    /// assert!(list.get(1).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<Entry<&T>, Error> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let at = self.seek(index);
        Ok(Entry {
            index,
            item: &self.node(at).item,
        })
    }

    /// The first element and its index (always `0`), or `None` if the list
    /// is empty.
    pub fn front(&self) -> Option<Entry<&T>> {
        let at = self.head?;
        Some(Entry {
            index: 0,
            item: &self.node(at).item,
        })
    }

    /// The last element and its index (always `len - 1`), or `None` if the
    /// list is empty.
    pub fn back(&self) -> Option<Entry<&T>> {
        let at = self.tail?;
        Some(Entry {
            index: self.len - 1,
            item: &self.node(at).item,
        })
    }

    /// Removes the element at the given index and returns it together with
    /// that index, shifting every element behind it one place towards the
    /// front.
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back('a').unwrap();
    /// list.push_back('b').unwrap();
    /// list.push_back('c').unwrap();
    ///
    /// let removed = list.remove(1).unwrap();
    /// assert_eq!((removed.index, removed.item), (1, 'b'));
    /// assert_eq!(*list.get(1).unwrap().item, 'c');
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<Entry<T>, Error> {
        if index >= self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let at = self.seek(index);
        trace!("remove at index {} (len {})", index, self.len);
        Ok(Entry {
            index,
            item: self.unlink(at),
        })
    }

    /// Removes the first element and returns it with its former index
    /// (always `0`), or `None` if the list is empty. The empty case is a
    /// normal result, not an error.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    /// assert_eq!(list.pop_front().unwrap().item, 1);
    /// assert_eq!(list.pop_front().unwrap().item, 2);
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<Entry<T>> {
        let at = self.head?;
        trace!("pop_front (len {})", self.len);
        Some(Entry {
            index: 0,
            item: self.unlink(at),
        })
    }

    /// Removes the last element and returns it with its former index
    /// (`len - 1`), or `None` if the list is empty.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    ///
    /// let last = list.pop_back().unwrap();
    /// assert_eq!((last.index, last.item), (1, 2));
    /// ```
    pub fn pop_back(&mut self) -> Option<Entry<T>> {
        let at = self.tail?;
        let index = self.len - 1;
        trace!("pop_back (len {})", self.len);
        Some(Entry {
            index,
            item: self.unlink(at),
        })
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(0).unwrap();
    /// list.push_back(1).unwrap();
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Copies every element, in head-to-tail order, into the front of
    /// `out`. The buffer must hold at least `len` elements; the check
    /// happens before anything is written, so a failed call leaves `out`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityTooSmall`] when `out.len() < self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    ///
    /// let mut buffer = [0; 4];
    /// list.copy_into_slice(&mut buffer).unwrap();
    /// assert_eq!(buffer, [1, 2, 0, 0]);
    ///
    /// let mut small = [0; 1];
    /// assert!(list.copy_into_slice(&mut small).is_err());
    /// assert_eq!(small, [0]);
    /// ```
    pub fn copy_into_slice(&self, out: &mut [T]) -> Result<(), Error>
    where
        T: Clone,
    {
        if out.len() < self.len {
            return Err(Error::CapacityTooSmall {
                required: self.len,
                capacity: out.len(),
            });
        }
        for (dst, item) in out.iter_mut().zip(self.iter()) {
            *dst = item.clone();
        }
        Ok(())
    }

    /// The elements in head-to-tail order as a freshly allocated `Vec`,
    /// surfacing allocation failure instead of aborting.
    pub fn to_vec(&self) -> Result<Vec<T>, Error>
    where
        T: Clone,
    {
        let mut out = Vec::new();
        out.try_reserve(self.len)?;
        out.extend(self.iter().cloned());
        Ok(out)
    }

    /// Invokes `visitor` once per element, strictly in head-to-tail order.
    /// The first failure the visitor raises stops the traversal and is
    /// returned to the caller; elements behind it are not visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(-2).unwrap();
    /// list.push_back(3).unwrap();
    ///
    /// let mut seen = Vec::new();
    /// let outcome = list.visit(&mut |item: &i32| {
    ///     if *item < 0 {
    ///         return Err("negative");
    ///     }
    ///     seen.push(*item);
    ///     Ok(())
    /// });
    /// assert_eq!(outcome, Err("negative"));
    /// assert_eq!(seen, vec![1]); // 3 was never visited
    /// ```
    pub fn visit<V: Visitor<T>>(&self, visitor: &mut V) -> Result<(), V::Error> {
        for item in self.iter() {
            visitor.visit(item)?;
        }
        Ok(())
    }
}

// Value-based operations; these are the ones that consult the comparator.
impl<T, C: Comparator<T>> List<T, C> {
    /// First match scanning head→tail, as `(index, slot)`.
    fn find_forward(&self, probe: &T) -> Option<(usize, usize)> {
        let mut link = self.head;
        let mut index = 0;
        while let Some(at) = link {
            let node = self.node(at);
            if self.comparator.matches(probe, &node.item) {
                return Some((index, at));
            }
            link = node.next;
            index += 1;
        }
        None
    }

    /// First match scanning tail→head, as `(index, slot)`.
    fn find_backward(&self, probe: &T) -> Option<(usize, usize)> {
        let mut link = self.tail;
        let mut index = self.len;
        while let Some(at) = link {
            index -= 1;
            let node = self.node(at);
            if self.comparator.matches(probe, &node.item) {
                return Some((index, at));
            }
            link = node.prev;
        }
        None
    }

    /// Returns `true` if some element compares equal to `probe` under the
    /// list's comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(0).unwrap();
    /// list.push_back(1).unwrap();
    ///
    /// assert!(list.contains(&0));
    /// assert!(!list.contains(&10));
    /// ```
    pub fn contains(&self, probe: &T) -> bool {
        self.find_forward(probe).is_some()
    }

    /// The position of the first element comparing equal to `probe`,
    /// scanning head→tail, or `None` if nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back('a').unwrap();
    /// list.push_back('b').unwrap();
    /// list.push_back('a').unwrap();
    ///
    /// assert_eq!(list.index_of(&'a'), Some(0));
    /// assert_eq!(list.index_of(&'z'), None);
    /// ```
    pub fn index_of(&self, probe: &T) -> Option<usize> {
        self.find_forward(probe).map(|(index, _)| index)
    }

    /// The position of the last element comparing equal to `probe`,
    /// scanning tail→head, or `None` if nothing matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back('a').unwrap();
    /// list.push_back('b').unwrap();
    /// list.push_back('a').unwrap();
    ///
    /// assert_eq!(list.last_index_of(&'a'), Some(2));
    /// ```
    pub fn last_index_of(&self, probe: &T) -> Option<usize> {
        self.find_backward(probe).map(|(index, _)| index)
    }

    /// The first element comparing equal to `probe` together with its
    /// position, or `None` if nothing matches.
    pub fn first_occurrence(&self, probe: &T) -> Option<Entry<&T>> {
        self.find_forward(probe).map(|(index, at)| Entry {
            index,
            item: &self.node(at).item,
        })
    }

    /// The last element comparing equal to `probe` together with its
    /// position, or `None` if nothing matches.
    pub fn last_occurrence(&self, probe: &T) -> Option<Entry<&T>> {
        self.find_backward(probe).map(|(index, at)| Entry {
            index,
            item: &self.node(at).item,
        })
    }

    /// Removes the first element comparing equal to `probe` and returns it
    /// with its former position, or `None` if nothing matches. With several
    /// adjacent matches, the leftmost goes.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// list.push_back(1).unwrap();
    /// list.push_back(2).unwrap();
    /// list.push_back(1).unwrap();
    ///
    /// let removed = list.remove_first_occurrence(&1).unwrap();
    /// assert_eq!((removed.index, removed.item), (0, 1));
    /// assert_eq!(list.to_vec().unwrap(), vec![2, 1]);
    /// ```
    pub fn remove_first_occurrence(&mut self, probe: &T) -> Option<Entry<T>> {
        let (index, at) = self.find_forward(probe)?;
        trace!("remove first occurrence at index {}", index);
        Some(Entry {
            index,
            item: self.unlink(at),
        })
    }

    /// Removes the last element comparing equal to `probe` and returns it
    /// with its former position, or `None` if nothing matches. With several
    /// adjacent matches, the rightmost goes.
    pub fn remove_last_occurrence(&mut self, probe: &T) -> Option<Entry<T>> {
        let (index, at) = self.find_backward(probe)?;
        trace!("remove last occurrence at index {}", index);
        Some(Entry {
            index,
            item: self.unlink(at),
        })
    }

    /// Removes every element comparing equal to `probe` in one head→tail
    /// scan and returns how many were removed. The surviving elements keep
    /// their relative order; consecutive matches and matches at either end
    /// are unlinked like any other.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    ///
    /// let mut list = List::new(Natural);
    /// for item in ["x", "y", "x", "x", "z"] {
    ///     list.push_back(item).unwrap();
    /// }
    ///
    /// assert_eq!(list.remove_all_occurrences(&"x"), 3);
    /// assert_eq!(list.to_vec().unwrap(), vec!["y", "z"]);
    /// ```
    pub fn remove_all_occurrences(&mut self, probe: &T) -> usize {
        let mut removed = 0;
        let mut link = self.head;
        while let Some(at) = link {
            let node = self.node(at);
            link = node.next;
            if self.comparator.matches(probe, &node.item) {
                self.unlink(at);
                removed += 1;
            }
        }
        trace!("removed {} occurrences (len {})", removed, self.len);
        removed
    }
}

// Consistency checking. The predicate is pure; mutating operations assert
// it in debug builds, and the test suite asserts it after every mutation.
impl<T, C> List<T, C> {
    fn occupied_at(&self, at: usize) -> Result<&Node<T>, String> {
        match self.slots.get(at) {
            Some(Slot::Occupied(node)) => Ok(node),
            Some(Slot::Vacant { .. }) => Err(format!("link points at vacant slot {}", at)),
            None => Err(format!("link points outside the arena ({})", at)),
        }
    }

    /// Verify the structural invariants: count/head/tail agreement, the
    /// 0/1/N shape rules, symmetric neighbour links, an acyclic chain of
    /// exactly `len` nodes in both directions, and arena slot accounting.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        match (self.len, self.head, self.tail) {
            (0, None, None) => {}
            (0, _, _) => return Err("empty list with a head or tail".into()),
            (_, None, _) | (_, _, None) => {
                return Err("non-empty list missing its head or tail".into())
            }
            (1, Some(head), Some(tail)) if head != tail => {
                return Err("single-element list where head != tail".into())
            }
            (n, Some(head), Some(tail)) if n > 1 && head == tail => {
                return Err("multi-element list where head == tail".into())
            }
            _ => {}
        }
        if let Some(head) = self.head {
            if self.occupied_at(head)?.prev.is_some() {
                return Err("head node has a prev link".into());
            }
        }
        if let Some(tail) = self.tail {
            if self.occupied_at(tail)?.next.is_some() {
                return Err("tail node has a next link".into());
            }
        }

        // Forward walk: every node's prev must point back at its
        // predecessor, and exactly `len` nodes must be reachable.
        let mut reached = 0;
        let mut prev = None;
        let mut link = self.head;
        while let Some(at) = link {
            let node = self.occupied_at(at)?;
            if node.prev != prev {
                return Err(format!("asymmetric links around slot {}", at));
            }
            prev = Some(at);
            link = node.next;
            reached += 1;
            if reached > self.len {
                return Err("more nodes reachable from head than len".into());
            }
        }
        if reached != self.len {
            return Err(format!(
                "{} nodes reachable from head, but len is {}",
                reached, self.len
            ));
        }
        if prev != self.tail {
            return Err("forward walk does not end at the tail".into());
        }

        // Backward walk only needs the count; link symmetry was covered.
        let mut reached = 0;
        let mut link = self.tail;
        while let Some(at) = link {
            link = self.occupied_at(at)?.prev;
            reached += 1;
            if reached > self.len {
                return Err("more nodes reachable from tail than len".into());
            }
        }
        if reached != self.len {
            return Err(format!(
                "{} nodes reachable from tail, but len is {}",
                reached, self.len
            ));
        }

        // Every slot is on exactly one of the two lists: chain or free.
        let mut vacant = 0;
        let mut free = self.free;
        while let Some(at) = free {
            free = match self.slots.get(at) {
                Some(Slot::Vacant { next_free }) => *next_free,
                Some(Slot::Occupied(_)) => {
                    return Err(format!("occupied slot {} on the free list", at))
                }
                None => return Err(format!("free list points outside the arena ({})", at)),
            };
            vacant += 1;
            if vacant > self.slots.len() {
                return Err("free list is cyclic".into());
            }
        }
        if self.len + vacant != self.slots.len() {
            return Err(format!(
                "slot accounting mismatch: {} linked + {} vacant != {} slots",
                self.len,
                vacant,
                self.slots.len()
            ));
        }
        Ok(())
    }
}

impl<T: Debug, C> Debug for List<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for List<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}


// Random operation sequences against a `Vec` reference model; the
// structural invariants are asserted after every single mutation.
#[cfg(test)]
mod proptests {
    use crate::comparator::Natural;
    use crate::list::List;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        PushFront(i8),
        PushBack(i8),
        Insert(usize, i8),
        Set(usize, i8),
        Remove(usize),
        PopFront,
        PopBack,
        RemoveFirst(i8),
        RemoveLast(i8),
        RemoveAll(i8),
        Clear,
    }

    // Values are drawn from a small domain so comparator matches and
    // duplicates are common.
    fn op() -> impl Strategy<Value = Op> {
        let item = 0..8i8;
        prop_oneof![
            item.clone().prop_map(Op::PushFront),
            item.clone().prop_map(Op::PushBack),
            (any::<usize>(), item.clone()).prop_map(|(at, item)| Op::Insert(at, item)),
            (any::<usize>(), item.clone()).prop_map(|(at, item)| Op::Set(at, item)),
            any::<usize>().prop_map(Op::Remove),
            Just(Op::PopFront),
            Just(Op::PopBack),
            item.clone().prop_map(Op::RemoveFirst),
            item.clone().prop_map(Op::RemoveLast),
            item.prop_map(Op::RemoveAll),
            Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn agrees_with_vec_model(ops in vec(op(), 0..256)) {
            let mut list = List::new(Natural);
            let mut model: Vec<i8> = Vec::new();

            for op in ops {
                match op {
                    Op::PushFront(item) => {
                        list.push_front(item).unwrap();
                        model.insert(0, item);
                    }
                    Op::PushBack(item) => {
                        let index = list.push_back(item).unwrap();
                        prop_assert_eq!(index, model.len());
                        model.push(item);
                    }
                    Op::Insert(at, item) => {
                        let at = at % (model.len() + 1);
                        list.insert(at, item).unwrap();
                        model.insert(at, item);
                    }
                    Op::Set(at, item) => {
                        if model.is_empty() {
                            prop_assert!(list.set(at, item).is_err());
                        } else {
                            let at = at % model.len();
                            let old = list.set(at, item).unwrap();
                            prop_assert_eq!(old, model[at]);
                            model[at] = item;
                        }
                    }
                    Op::Remove(at) => {
                        if model.is_empty() {
                            prop_assert!(list.remove(at).is_err());
                        } else {
                            let at = at % model.len();
                            let removed = list.remove(at).unwrap();
                            prop_assert_eq!(removed.item, model.remove(at));
                            prop_assert_eq!(removed.index, at);
                        }
                    }
                    Op::PopFront => {
                        let popped = list.pop_front().map(|entry| entry.item);
                        let expected = if model.is_empty() {
                            None
                        } else {
                            Some(model.remove(0))
                        };
                        prop_assert_eq!(popped, expected);
                    }
                    Op::PopBack => {
                        let popped = list.pop_back().map(|entry| entry.item);
                        prop_assert_eq!(popped, model.pop());
                    }
                    Op::RemoveFirst(item) => {
                        let removed = list.remove_first_occurrence(&item);
                        match model.iter().position(|other| *other == item) {
                            Some(at) => {
                                let entry = removed.unwrap();
                                prop_assert_eq!(entry.index, at);
                                prop_assert_eq!(entry.item, model.remove(at));
                            }
                            None => prop_assert!(removed.is_none()),
                        }
                    }
                    Op::RemoveLast(item) => {
                        let removed = list.remove_last_occurrence(&item);
                        match model.iter().rposition(|other| *other == item) {
                            Some(at) => {
                                let entry = removed.unwrap();
                                prop_assert_eq!(entry.index, at);
                                prop_assert_eq!(entry.item, model.remove(at));
                            }
                            None => prop_assert!(removed.is_none()),
                        }
                    }
                    Op::RemoveAll(item) => {
                        let before = model.len();
                        model.retain(|other| *other != item);
                        let removed = list.remove_all_occurrences(&item);
                        prop_assert_eq!(removed, before - model.len());
                    }
                    Op::Clear => {
                        list.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(list.check_invariants(), Ok(()));
                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.iter().eq(model.iter()));
            }
        }

        #[test]
        fn index_and_value_operations_agree(items in vec(0..8i8, 0..64), probe in 0..8i8) {
            let mut list = List::new(Natural);
            for item in &items {
                list.push_back(*item).unwrap();
            }

            // `get` must see exactly the insertion order.
            for (at, item) in items.iter().enumerate() {
                let entry = list.get(at).unwrap();
                prop_assert_eq!(entry.index, at);
                prop_assert_eq!(entry.item, item);
            }

            // `index_of`/`last_index_of` agree with `get` at the index
            // they report.
            match list.index_of(&probe) {
                Some(at) => {
                    prop_assert_eq!(*list.get(at).unwrap().item, probe);
                    prop_assert!(items[..at].iter().all(|other| *other != probe));
                }
                None => prop_assert!(!list.contains(&probe)),
            }
            if let Some(at) = list.last_index_of(&probe) {
                prop_assert_eq!(*list.get(at).unwrap().item, probe);
                prop_assert!(items[at + 1..].iter().all(|other| *other != probe));
            }
        }
    }
}
