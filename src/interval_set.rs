//! The interval-merging set engine: the public, non-concurrent container.
use crate::avl_tree::{NodeId, Tree};
use crate::bound::Bound;
use crate::error::IntervalError;
use crate::interval::Interval;
use crate::iter::Iter;
use crate::traits::IntervalLike;

/// An ordered set of half-open `[min, max)` intervals over `T`, with
/// automatic merging of intervals that overlap or touch.
///
/// `I` defaults to [`Interval<T>`] but can be any type implementing
/// [`IntervalLike<T>`], so a caller's own interval subtype survives
/// round-trips through the set unchanged in kind.
#[derive(Debug)]
pub struct IntervalSet<T, I = Interval<T>>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    tree: Tree<T, I>,
}

impl<T, I> Clone for IntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T, I> Default for IntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I> IntervalSet<T, I>
where
    T: Ord + Copy,
    I: IntervalLike<T>,
{
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    pub fn len(&self) -> usize {
        self.tree.len
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len == 0
    }

    pub fn clear(&mut self) {
        self.tree = Tree::new();
    }

    pub(crate) fn mod_count(&self) -> u64 {
        self.tree.mod_count
    }

    pub(crate) fn first_node_id(&self) -> Option<NodeId> {
        self.tree.first_id()
    }

    pub(crate) fn successor_node_id(&self, id: NodeId) -> Option<NodeId> {
        self.tree.successor_id(id)
    }

    pub(crate) fn interval_at(&self, id: NodeId) -> I {
        self.tree.interval_of(id)
    }

    /// Inserts `interval`, absorbing every stored interval it overlaps or
    /// touches into a single merged interval.
    ///
    /// Implemented in two phases so that no `NodeId` is ever held across
    /// more than one structural mutation: a read-only phase walks
    /// predecessor/successor chains to compute the final merged bounds,
    /// then a mutate phase repeatedly re-searches for and deletes whatever
    /// overlaps the (growing) merged range before inserting one new leaf.
    /// Holding a single `NodeId` across a run of deletions is unsafe here
    /// because two-children deletion copies an unrelated successor's value
    /// up into the deleted slot, which can silently repurpose an id a
    /// caller still meant to use.
    pub fn add(&mut self, interval: I) -> bool {
        if self.contains(&interval) {
            return false;
        }

        let mut merged_min = interval.min_bound();
        let mut merged_max = interval.max_bound();

        if let Some(seed) = self.tree.find_touching_or_overlapping(merged_min, merged_max) {
            let seed_iv = self.tree.interval_of(seed);
            merged_min = merged_min.min(seed_iv.min_bound());
            merged_max = merged_max.max(seed_iv.max_bound());

            // Extend left over every predecessor that still touches/overlaps.
            let mut cur = self.tree.predecessor_id(seed);
            while let Some(id) = cur {
                let iv = self.tree.interval_of(id);
                if iv.max_bound() < merged_min {
                    break;
                }
                merged_min = merged_min.min(iv.min_bound());
                merged_max = merged_max.max(iv.max_bound());
                cur = self.tree.predecessor_id(id);
            }
            // Extend right over every successor that still touches/overlaps.
            let mut cur = self.tree.successor_id(seed);
            while let Some(id) = cur {
                let iv = self.tree.interval_of(id);
                if iv.min_bound() > merged_max {
                    break;
                }
                merged_min = merged_min.min(iv.min_bound());
                merged_max = merged_max.max(iv.max_bound());
                cur = self.tree.successor_id(id);
            }
        }

        let mut absorbed = 0u32;
        while let Some(id) = self.tree.find_touching_or_overlapping(merged_min, merged_max) {
            self.tree.delete_node(id);
            absorbed += 1;
        }
        if absorbed > 0 {
            tracing::trace!(absorbed, "merged overlapping/touching intervals on add");
        }

        let merged = I::new_with(merged_min, merged_max).expect("merged bounds were computed as min < max");
        self.tree.insert_leaf(merged);
        true
    }

    /// Adds every interval in `intervals`, returning whether any of them
    /// changed the set.
    pub fn add_all(&mut self, intervals: impl IntoIterator<Item = I>) -> bool {
        let mut changed = false;
        for iv in intervals {
            changed |= self.add(iv);
        }
        changed
    }

    /// Removes `interval` from the set, clipping or splitting any stored
    /// interval that overlaps it. Stored intervals that do not overlap
    /// `interval` at all are left untouched. Returns whether anything was
    /// actually removed.
    ///
    /// `interval` can span a gap between several disjoint stored intervals,
    /// only some of which truly overlap it (others might merely touch one
    /// of its edges), so this cannot stop at the first touching-or-overlapping
    /// node the way `add`'s seed search can: `add` always re-derives a
    /// single widened, contiguous range before searching, but here the
    /// probe itself is the external, possibly gap-spanning argument. Instead
    /// this walks `cursor` left to right across `[qmin, qmax)`. At each step
    /// it asks for the leftmost stored node whose `max_bound()` is still
    /// ahead of `cursor`, which, because stored intervals are disjoint and
    /// sorted, is also the leftmost node that could still truly overlap the
    /// remaining unprocessed part of the probe, and stops as soon as a
    /// candidate starts at or past `qmax`. `cursor` is a value, not a node
    /// id, so it stays valid across this loop's deletes and re-inserts.
    pub fn remove(&mut self, interval: &I) -> bool {
        let qmin = interval.min_bound();
        let qmax = interval.max_bound();
        let mut removed_anything = false;
        let mut cursor = qmin;
        loop {
            let Some(id) = self.tree.first_with_max_greater_than(cursor) else {
                break;
            };
            let stored = self.tree.interval_of(id);
            if stored.min_bound() >= qmax {
                break;
            }
            cursor = stored.max_bound();
            self.tree.delete_node(id);
            removed_anything = true;

            let left_remainder = if stored.min_bound() < qmin {
                I::new_with(stored.min_bound(), qmin).ok()
            } else {
                None
            };
            let right_remainder = if stored.max_bound() > qmax {
                I::new_with(qmax, stored.max_bound()).ok()
            } else {
                None
            };
            let split = left_remainder.is_some() && right_remainder.is_some();
            if let Some(r) = left_remainder {
                self.tree.insert_leaf(r);
            }
            if let Some(r) = right_remainder {
                self.tree.insert_leaf(r);
            }
            if split {
                tracing::debug!("remove split a covering interval into two remainders");
            }
        }
        removed_anything
    }

    pub fn contains_point(&self, point: T) -> bool {
        let mut cur = self.tree.root;
        while let Some(id) = cur {
            let iv = self.tree.interval_of(id);
            if iv.contains_point(point) {
                return true;
            }
            cur = if Bound::Finite(point) < iv.min_bound() {
                self.tree.node(id).left
            } else {
                self.tree.node(id).right
            };
        }
        false
    }

    /// True if some single stored interval fully contains `interval`
    /// (invariant I1: stored intervals are disjoint, so no union of two
    /// stored intervals can cover a query that neither alone covers).
    pub fn contains(&self, interval: &I) -> bool {
        let mut cur = self.tree.root;
        while let Some(id) = cur {
            let iv = self.tree.interval_of(id);
            if iv.contains_interval(interval) {
                return true;
            }
            cur = if interval.max_bound() <= iv.min_bound() {
                self.tree.node(id).left
            } else {
                self.tree.node(id).right
            };
        }
        false
    }

    pub(crate) fn contains_exact(&self, interval: &I) -> bool
    where
        I: PartialEq,
    {
        let mut cur = self.tree.root;
        while let Some(id) = cur {
            let iv = self.tree.interval_of(id);
            if iv == *interval {
                return true;
            }
            cur = if interval.max_bound() <= iv.min_bound() {
                self.tree.node(id).left
            } else {
                self.tree.node(id).right
            };
        }
        false
    }

    /// True if any stored interval truly overlaps `interval` (touching
    /// alone does not count).
    ///
    /// `interval` may span a gap between disjoint stored intervals where
    /// one only touches an edge of `interval` while another, further along,
    /// truly overlaps it, so a single `find_touching_or_overlapping` probe
    /// is not enough: that call returns whichever node it meets first on
    /// its root-to-match descent, which need not be the only candidate.
    /// Instead this walks forward from the leftmost node whose
    /// `max_bound()` is past `interval`'s start, the same seed `difference`
    /// uses, stopping as soon as a candidate starts at or past `interval`'s
    /// end.
    pub fn intersects(&self, interval: &I) -> bool {
        let mut cur = self.tree.first_with_max_greater_than(interval.min_bound());
        while let Some(id) = cur {
            let stored = self.tree.interval_of(id);
            if stored.min_bound() >= interval.max_bound() {
                break;
            }
            if stored.intersects(interval) {
                return true;
            }
            cur = self.tree.successor_id(id);
        }
        false
    }

    /// Returns the parts of `interval` not covered by this set, as a
    /// left-to-right list of maximal gaps.
    pub fn difference(&self, interval: &I) -> Vec<I> {
        let mut gaps = Vec::new();
        let mut cursor = interval.min_bound();
        let target_max = interval.max_bound();

        let mut cur = self.tree.first_with_max_greater_than(cursor);
        while let Some(id) = cur {
            let iv = self.tree.interval_of(id);
            if iv.min_bound() >= target_max {
                break;
            }
            if iv.min_bound() > cursor {
                if let Ok(gap) = I::new_with(cursor, iv.min_bound().min(target_max)) {
                    gaps.push(gap);
                }
            }
            cursor = cursor.max(iv.max_bound());
            if cursor >= target_max {
                break;
            }
            cur = self.tree.successor_id(id);
        }
        if cursor < target_max {
            if let Ok(gap) = I::new_with(cursor, target_max) {
                gaps.push(gap);
            }
        }
        gaps
    }

    pub fn first(&self) -> Result<I, IntervalError> {
        self.tree
            .first_id()
            .map(|id| self.tree.interval_of(id))
            .ok_or(IntervalError::EmptySet)
    }

    pub fn last(&self) -> Result<I, IntervalError> {
        self.tree
            .last_id()
            .map(|id| self.tree.interval_of(id))
            .ok_or(IntervalError::EmptySet)
    }

    pub fn lower(&self, key: &I) -> Option<I> {
        self.tree.lower_id(key.min_bound()).map(|id| self.tree.interval_of(id))
    }

    pub fn higher(&self, key: &I) -> Option<I> {
        self.tree
            .higher_id(key.min_bound())
            .map(|id| self.tree.interval_of(id))
    }

    pub fn floor(&self, key: &I) -> Option<I> {
        self.tree.floor_id(key.min_bound()).map(|id| self.tree.interval_of(id))
    }

    pub fn ceiling(&self, key: &I) -> Option<I> {
        self.tree
            .ceiling_id(key.min_bound())
            .map(|id| self.tree.interval_of(id))
    }

    pub fn poll_first(&mut self) -> Result<I, IntervalError> {
        let id = self.tree.first_id().ok_or(IntervalError::EmptySet)?;
        let iv = self.tree.interval_of(id);
        self.tree.delete_node(id);
        Ok(iv)
    }

    pub fn poll_last(&mut self) -> Result<I, IntervalError> {
        let id = self.tree.last_id().ok_or(IntervalError::EmptySet)?;
        let iv = self.tree.interval_of(id);
        self.tree.delete_node(id);
        Ok(iv)
    }

    pub fn iter(&self) -> Iter<'_, T, I> {
        Iter::new(self)
    }

    pub fn for_each(&self, mut f: impl FnMut(I)) {
        for result in self.iter() {
            f(result.expect("shared borrow prevents concurrent modification"));
        }
    }

    pub fn to_vec(&self) -> Vec<I> {
        self.iter()
            .map(|r| r.expect("shared borrow prevents concurrent modification"))
            .collect()
    }

    /// The sub-view operations from the source's `NavigableSet` contract
    /// (`subSet`/`headSet`/`tailSet`/`descendingSet`,
    /// `descendingIterator`) are explicitly out of scope: every call
    /// raises [`IntervalError::UnsupportedOperation`].
    pub fn sub_set(&self, _from: &I, _to: &I) -> Result<Self, IntervalError> {
        Err(IntervalError::UnsupportedOperation)
    }

    pub fn head_set(&self, _to: &I) -> Result<Self, IntervalError> {
        Err(IntervalError::UnsupportedOperation)
    }

    pub fn tail_set(&self, _from: &I) -> Result<Self, IntervalError> {
        Err(IntervalError::UnsupportedOperation)
    }

    pub fn descending_set(&self) -> Result<Self, IntervalError> {
        Err(IntervalError::UnsupportedOperation)
    }

    pub fn descending_iterator(&self) -> Result<Iter<'_, T, I>, IntervalError> {
        Err(IntervalError::UnsupportedOperation)
    }
}
