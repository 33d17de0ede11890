//! Reader-writer concurrent wrapper around [`IntervalSet`].
use parking_lot::RwLock;

use crate::error::IntervalError;
use crate::interval::Interval;
use crate::interval_set::IntervalSet;
use crate::traits::IntervalLike;

/// A thread-safe interval set. Readers (`contains`, `intersects`,
/// `difference`, the navigators, `to_vec`, `for_each`) take a shared read
/// lock; writers (`add`, `remove`, `clear`, `poll_first`, `poll_last`) take
/// an exclusive write lock held for the whole mutation. `parking_lot::RwLock`
/// is used rather than the standard library's so a panicking writer cannot
/// poison the lock for every future caller.
pub struct ConcurrentIntervalSet<T, I = Interval<T>>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    inner: RwLock<IntervalSet<T, I>>,
}

impl<T, I> Default for ConcurrentIntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I> ConcurrentIntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(IntervalSet::new()),
        }
    }

    pub fn add(&self, interval: I) -> bool {
        self.inner.write().add(interval)
    }

    pub fn add_all(&self, intervals: impl IntoIterator<Item = I>) -> bool {
        let mut guard = self.inner.write();
        let mut changed = false;
        for iv in intervals {
            changed |= guard.add(iv);
        }
        changed
    }

    pub fn remove(&self, interval: &I) -> bool {
        self.inner.write().remove(interval)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn poll_first(&self) -> Result<I, IntervalError> {
        self.inner.write().poll_first()
    }

    pub fn poll_last(&self) -> Result<I, IntervalError> {
        self.inner.write().poll_last()
    }

    pub fn contains_point(&self, point: T) -> bool {
        self.inner.read().contains_point(point)
    }

    pub fn contains(&self, interval: &I) -> bool {
        self.inner.read().contains(interval)
    }

    pub fn intersects(&self, interval: &I) -> bool {
        self.inner.read().intersects(interval)
    }

    pub fn difference(&self, interval: &I) -> Vec<I> {
        self.inner.read().difference(interval)
    }

    pub fn first(&self) -> Result<I, IntervalError> {
        self.inner.read().first()
    }

    pub fn last(&self) -> Result<I, IntervalError> {
        self.inner.read().last()
    }

    pub fn lower(&self, key: &I) -> Option<I> {
        self.inner.read().lower(key)
    }

    pub fn higher(&self, key: &I) -> Option<I> {
        self.inner.read().higher(key)
    }

    pub fn floor(&self, key: &I) -> Option<I> {
        self.inner.read().floor(key)
    }

    pub fn ceiling(&self, key: &I) -> Option<I> {
        self.inner.read().ceiling(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn to_vec(&self) -> Vec<I> {
        self.inner.read().to_vec()
    }

    pub fn for_each(&self, f: impl FnMut(I)) {
        self.inner.read().for_each(f);
    }

    /// Returns an iterator over the current contents in ascending order.
    ///
    /// Unlike the base [`IntervalSet`]'s iterator, this one is not
    /// fail-fast: each step takes its own short-lived read lock rather
    /// than holding one borrow for the iterator's whole lifetime, so it
    /// never needs to detect a concurrent structural change, only to stay
    /// consistent within a single step. A concurrent `add`/`remove`
    /// between two steps can make an in-progress pass see a value more
    /// than once or skip one near the edit, but it can never panic or
    /// yield a value that was never actually stored.
    pub fn iter(&self) -> ConcurrentIter<'_, T, I> {
        ConcurrentIter {
            set: self,
            last: None,
            done: false,
        }
    }

    /// Removes every stored interval matching `predicate`, returning
    /// whether anything was removed.
    ///
    /// A single write lock held for the whole scan would starve readers on
    /// a large set, so this snapshots the current contents under one read
    /// lock, then for each matching value takes and releases a fresh write
    /// lock, de-escalating back to allowing readers between every removal
    /// rather than holding one write lock across the entire operation.
    /// Values are matched by equality against the snapshot rather than by
    /// a retained node identity, since a removal earlier in the pass can
    /// restructure the tree under later iterations.
    pub fn remove_if(&self, mut predicate: impl FnMut(&I) -> bool) -> bool
    where
        I: PartialEq,
    {
        let snapshot = self.inner.read().to_vec();
        let mut removed_anything = false;
        for value in snapshot {
            if !predicate(&value) {
                continue;
            }
            let mut guard = self.inner.write();
            if guard.contains_exact(&value) {
                guard.remove(&value);
                removed_anything = true;
            }
        }
        removed_anything
    }
}

impl<T, I> Clone for ConcurrentIntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    fn clone(&self) -> Self {
        Self {
            inner: RwLock::new(self.inner.read().clone()),
        }
    }
}

/// Cursor returned by [`ConcurrentIntervalSet::iter`]. Re-acquires the
/// shared lock on every step, advancing by `higher(&last_value)` rather
/// than by a cached tree position, since a node id obtained under one
/// read lock is not safe to dereference after that lock is released.
pub struct ConcurrentIter<'a, T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    set: &'a ConcurrentIntervalSet<T, I>,
    last: Option<I>,
    done: bool,
}

impl<'a, T, I> Iterator for ConcurrentIter<'a, T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    type Item = I;

    fn next(&mut self) -> Option<I> {
        if self.done {
            return None;
        }
        let guard = self.set.inner.read();
        let next = match &self.last {
            None => guard.first().ok(),
            Some(prev) => guard.higher(prev),
        };
        drop(guard);
        match next {
            Some(iv) => {
                self.last = Some(iv);
                Some(iv)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
