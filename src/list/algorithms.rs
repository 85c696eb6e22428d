use crate::list::List;
use std::hash::{Hash, Hasher};

// Structural equality over the items in order. This is deliberately
// independent of the comparator: two lists with different comparators but
// the same items compare equal, matching how `contains` and `==` may
// disagree on a single list.
impl<T: PartialEq, C> PartialEq for List<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq, C> Eq for List<T, C> {}

impl<T: Clone, C: Clone> Clone for List<T, C> {
    fn clone(&self) -> Self {
        let mut list = List::new(self.comparator().clone());
        list.extend(self.iter().cloned());
        list
    }
}

impl<T: Hash, C> Hash for List<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self {
            item.hash(state);
        }
    }
}
