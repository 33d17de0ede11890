//! Ordered, self-merging sets of half-open `[min, max)` intervals.
//!
//! [`IntervalSet`] stores intervals over any `Ord + Copy` domain, merging
//! overlapping or touching intervals as they are inserted, and exposes
//! `BTreeSet`-style navigation (`floor`, `ceiling`, `lower`, `higher`,
//! `poll_first`, `poll_last`) over them. [`ConcurrentIntervalSet`] wraps
//! the same engine in a reader-writer lock for shared use across threads.
mod avl_tree;
mod bound;
mod concurrent;
mod error;
mod interval;
mod interval_set;
mod iter;
mod traits;

pub use bound::Bound;
pub use concurrent::{ConcurrentIntervalSet, ConcurrentIter};
pub use error::IntervalError;
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use iter::Iter;
pub use traits::IntervalLike;

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::{thread_rng, Rng};

    use super::*;

    fn random_interval<R: Rng>(rng: &mut R) -> Interval<i8> {
        let a = rng.gen_range(i8::MIN..i8::MAX - 1);
        let b = rng.gen_range(i8::MIN..i8::MAX - 1);
        let lo = a.min(b);
        let hi = a.max(b).max(lo + 1);
        Interval::closed(lo, hi).unwrap()
    }

    fn random_interval_small<R: Rng>(rng: &mut R) -> Interval<i8> {
        let start = rng.gen_range(i8::MIN..=i8::MAX - 6);
        Interval::closed(start, start + 6).unwrap()
    }

    fn oracle_contains(oracle: &BTreeSet<i8>, point: i8) -> bool {
        oracle.contains(&point)
    }

    #[test]
    fn random_test_interval_set_insert() {
        let mut set: IntervalSet<i8> = IntervalSet::new();
        let mut oracle: BTreeSet<i8> = BTreeSet::new();
        let mut rng = thread_rng();
        const ITERATIONS: i32 = 200;
        const SAMPLES_PER_ITERATION: i32 = 20;
        for _ in 0..ITERATIONS {
            let interval = random_interval_small(&mut rng);
            for x in interval.min().finite().copied().unwrap()..interval.max().finite().copied().unwrap() {
                oracle.insert(x);
            }
            set.add(interval);
            for _ in 0..SAMPLES_PER_ITERATION {
                let x: i8 = rng.gen();
                assert_eq!(set.contains_point(x), oracle_contains(&oracle, x));
            }
        }
    }

    #[test]
    fn random_test_interval_set_add_and_remove() {
        let mut set: IntervalSet<i8> = IntervalSet::new();
        let mut oracle: BTreeSet<i8> = BTreeSet::new();
        let mut rng = thread_rng();
        const ITERATIONS: i32 = 500;
        const SAMPLES_PER_ITERATION: i32 = 20;
        for _ in 0..ITERATIONS {
            let interval = random_interval(&mut rng);
            let (lo, hi) = (
                *interval.min().finite().unwrap(),
                *interval.max().finite().unwrap(),
            );
            let do_add = rng.gen_bool(0.6) || oracle.is_empty();
            if do_add {
                for x in lo..hi {
                    oracle.insert(x);
                }
                set.add(interval);
            } else {
                for x in lo..hi {
                    oracle.remove(&x);
                }
                set.remove(&interval);
            }
            for _ in 0..SAMPLES_PER_ITERATION {
                let x: i8 = rng.gen();
                assert_eq!(set.contains_point(x), oracle_contains(&oracle, x));
            }
        }
    }

    #[test]
    fn touching_intervals_merge_then_split_on_removal() {
        let mut set: IntervalSet<i32> = IntervalSet::new();
        set.add(Interval::closed(0, 5).unwrap());
        set.add(Interval::closed(5, 10).unwrap());
        assert_eq!(set.to_vec(), vec![Interval::closed(0, 10).unwrap()]);

        set.remove(&Interval::closed(4, 6).unwrap());
        assert_eq!(
            set.to_vec(),
            vec![Interval::closed(0, 4).unwrap(), Interval::closed(6, 10).unwrap()]
        );
    }

    #[test]
    fn remove_reaches_past_a_merely_touching_interval_to_one_that_truly_overlaps() {
        let mut set: IntervalSet<i32> = IntervalSet::new();
        set.add(Interval::closed(0, 5).unwrap());
        set.add(Interval::closed(10, 15).unwrap());

        assert!(set.intersects(&Interval::closed(5, 12).unwrap()));
        assert_eq!(
            set.difference(&Interval::closed(5, 12).unwrap()),
            vec![Interval::closed(5, 10).unwrap()]
        );

        assert!(set.remove(&Interval::closed(5, 12).unwrap()));
        assert_eq!(
            set.to_vec(),
            vec![Interval::closed(0, 5).unwrap(), Interval::closed(12, 15).unwrap()]
        );
    }

    #[test]
    fn empty_set_reports_empty_errors() {
        let set: IntervalSet<i32> = IntervalSet::new();
        assert!(set.is_empty());
        assert_eq!(set.first().unwrap_err(), IntervalError::EmptySet);
        assert_eq!(set.last().unwrap_err(), IntervalError::EmptySet);
    }

    #[test]
    fn iterator_is_independent_of_insertion_order() {
        let mut set: IntervalSet<i32> = IntervalSet::new();
        for start in [40, 10, 30, 0, 20] {
            set.add(Interval::closed(start, start + 1).unwrap());
        }
        let collected: Vec<_> = set.iter().map(|r| r.unwrap()).collect();
        let mut sorted = collected.clone();
        sorted.sort_by_key(|iv| *iv.min().finite().unwrap());
        assert_eq!(collected, sorted);
    }
}
