/// A callback invoked once per element during [`List::visit`] traversal.
///
/// The list calls [`visit`] for each element strictly in head-to-tail order
/// and stops at the first failure, propagating it to the caller. Any state
/// the traversal needs lives in the visitor itself (closure captures or
/// struct fields); the list never inspects it.
///
/// Closures of type `FnMut(&T) -> Result<(), E>` are visitors:
///
/// ```
/// use chainlist::{List, Natural};
///
/// let mut list = List::new(Natural);
/// list.push_back(1).unwrap();
/// list.push_back(2).unwrap();
///
/// let mut sum = 0;
/// let visited: Result<(), ()> = list.visit(&mut |item: &i32| {
///     sum += *item;
///     Ok(())
/// });
/// assert!(visited.is_ok());
/// assert_eq!(sum, 3);
/// ```
///
/// [`List::visit`]: crate::List::visit
/// [`visit`]: Visitor::visit
pub trait Visitor<T> {
    /// The failure a visit can raise; traversal stops at the first one.
    type Error;

    fn visit(&mut self, item: &T) -> Result<(), Self::Error>;
}

impl<T, E, F> Visitor<T> for F
where
    F: FnMut(&T) -> Result<(), E>,
{
    type Error = E;

    fn visit(&mut self, item: &T) -> Result<(), E> {
        self(item)
    }
}

#[cfg(test)]
mod tests {
    use super::Visitor;

    #[test]
    fn closures_are_visitors() {
        let mut seen = Vec::new();
        let mut collect = |item: &i32| -> Result<(), ()> {
            seen.push(*item);
            Ok(())
        };
        assert!(collect.visit(&1).is_ok());
        assert!(collect.visit(&2).is_ok());
        drop(collect);
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn visitor_failures_surface() {
        let mut fussy = |item: &i32| {
            if *item < 0 {
                Err("negative")
            } else {
                Ok(())
            }
        };
        assert!(fussy.visit(&1).is_ok());
        assert_eq!(fussy.visit(&-1), Err("negative"));
    }
}
