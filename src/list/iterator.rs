use crate::list::{List, Slot};
use crate::Comparator;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An iterator over the elements of a `List`.
///
/// It walks the chain from both ends at once: `front` and `back` are the
/// slots of the next elements each direction would yield, and `len` counts
/// the elements still between them. When `len` reaches zero the two cursors
/// have met and both directions are exhausted.
///
/// # Examples
///
/// ```compile_fail
/// use chainlist::{List, Natural};
///
/// let mut list = List::new(Natural);
/// list.push_back(1).unwrap();
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4).unwrap();
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    slots: &'a [Slot<T>],
    front: Option<usize>,
    back: Option<usize>,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new<C>(list: &'a List<T, C>) -> Self {
        Self {
            slots: &list.slots,
            front: list.head,
            back: list.tail,
            len: list.len,
        }
    }
}

// Derived `Clone` would demand `T: Clone`; the iterator only holds borrows.
impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.slots[self.front?].occupied();
        self.front = node.next;
        self.len -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.slots[self.back?].occupied();
        self.back = node.prev;
        self.len -= 1;
        Some(&node.item)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of a `List`.
///
/// It is created by [`List::into_iter`] and yields elements in head-to-tail
/// order by popping the front of the list; dropping the iterator drops the
/// remaining elements.
pub struct IntoIter<T, C> {
    list: List<T, C>,
}

impl<T: fmt::Debug, C> fmt::Debug for IntoIter<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().map(|entry| entry.item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().map(|entry| entry.item)
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {
    fn len(&self) -> usize {
        self.list.len
    }
}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T, C: Comparator<T> + Default> FromIterator<T> for List<T, C> {
    /// Collects into a list bound to the default comparator. Collecting
    /// panics on allocation failure, like the standard collections; use
    /// [`List::push_back`] to handle it instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{List, Natural};
    /// use std::iter::FromIterator;
    ///
    /// let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.to_vec().unwrap(), vec![1, 2, 3]);
    /// ```
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new(C::default());
        list.extend(iter);
        list
    }
}

impl<T, C> IntoIterator for List<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    /// Consumes the list into an iterator yielding elements by value, in
    /// head-to-tail order.
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
    /// let items: Vec<i32> = list.into_iter().collect();
    /// assert_eq!(items, vec![1, 2]);
    /// ```
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, C> IntoIterator for &'a List<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> Extend<T> for List<T, C> {
    /// Appends the items to the back of the list. Extending panics on
    /// allocation failure; use [`List::push_back`] to handle it instead.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if let Err(error) = self.push_back(item) {
                panic!("failed to extend the list: {}", error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::Natural;
    use crate::list::List;
    use std::iter::FromIterator;

    #[test]
    fn iterate_forward_and_backward() {
        let list: List<i32, Natural> = List::from_iter([1, 2, 3, 4]);

        assert!(list.iter().eq(&[1, 2, 3, 4]));
        assert!(list.iter().rev().eq(&[4, 3, 2, 1]));
    }

    #[test]
    fn iterate_from_both_ends_at_once() {
        let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
        let mut iter = list.iter();

        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.len(), 1);
        assert_eq!(iter.next(), Some(&2));
        // The cursors have met; both directions are exhausted.
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn empty_iterators() {
        let list: List<i32, Natural> = List::new(Natural);
        assert_eq!(list.iter().next(), None);
        assert_eq!(list.iter().next_back(), None);
        assert_eq!(list.iter().len(), 0);
        assert_eq!(list.into_iter().next(), None);
    }

    #[test]
    fn iter_is_cloneable_mid_way() {
        let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
        let mut iter = list.iter();
        iter.next();

        let fork = iter.clone();
        assert!(fork.eq(&[2, 3]));
        assert!(iter.eq(&[2, 3]));
    }

    #[test]
    fn into_iter_yields_owned_items_in_order() {
        let list: List<String, Natural> =
            List::from_iter(["a".to_string(), "b".to_string(), "c".to_string()]);
        let items: Vec<String> = list.into_iter().collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn into_iter_backward() {
        let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
        let items: Vec<i32> = list.into_iter().rev().collect();
        assert_eq!(items, vec![3, 2, 1]);
    }

    #[test]
    fn extend_appends_to_the_back() {
        let mut list: List<i32, Natural> = List::from_iter([1, 2]);
        list.extend([3, 4]);
        assert_eq!(list.to_vec().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(list.check_invariants(), Ok(()));
    }

    #[test]
    fn borrowed_into_iterator() {
        let list: List<i32, Natural> = List::from_iter([1, 2, 3]);
        let mut sum = 0;
        for item in &list {
            sum += item;
        }
        assert_eq!(sum, 6);
    }
}
