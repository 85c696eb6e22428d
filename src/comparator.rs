use std::cmp::Ordering;

/// The equality capability a [`List`] uses for its value-based operations.
///
/// A comparator must be a pure, total function over the element type: the
/// same pair of arguments always yields the same answer, and comparing never
/// mutates anything the list can observe. The list only distinguishes
/// [`Ordering::Equal`] from the other two variants, so the direction of
/// `Less`/`Greater` is free for comparators to use however they like (or not
/// at all).
///
/// Closures of type `Fn(&T, &T) -> Ordering` are comparators, which keeps
/// one-off equality rules cheap to write:
///
/// ```
/// use chainlist::List;
///
/// let mut list = List::new(|a: &&str, b: &&str| {
///     a.to_lowercase().cmp(&b.to_lowercase())
/// });
/// list.push_back("Hello").unwrap();
/// assert!(list.contains(&"HELLO"));
/// ```
///
/// [`List`]: crate::List
pub trait Comparator<T> {
    /// Compare two elements, returning [`Ordering::Equal`] when they are
    /// equal under this comparator's notion of equality.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Whether `a` and `b` compare equal.
    fn matches(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The comparator given by the element type's own [`Ord`] instance.
///
/// Over `&str` or `String` this is plain string comparison, the equality
/// rule most lists of text want.
///
/// ```
/// use chainlist::{List, Natural};
///
/// let mut list = List::new(Natural);
/// list.push_back("Hello").unwrap();
/// assert_eq!(list.index_of(&"Hello"), Some(0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, Natural};
    use std::cmp::Ordering;

    #[test]
    fn natural_follows_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare(&2, &2), Ordering::Equal);
        assert!(Natural.matches(&"a", &"a"));
        assert!(!Natural.matches(&"a", &"b"));
    }

    #[test]
    fn closures_are_comparators() {
        let by_length = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert!(by_length.matches(&"abc", &"xyz"));
        assert!(!by_length.matches(&"abc", &"wxyz"));
    }
}
