use std::fmt;
use wireroute_common::db::core::Cost;

/// Congestion seen while walking a route: the busiest cell and the sum of all reads.
///
/// Ordered lexicographically by `(max_cost, sum_cost)`; smaller is better.
/// The derived `Ord` relies on the field order below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Metrics {
    pub max_cost: Cost,
    pub sum_cost: i64,
}

impl Metrics {
    /// Worse than any real route.
    pub const MAX: Metrics = Metrics {
        max_cost: Cost::MAX,
        sum_cost: i64::MAX,
    };

    pub fn new(max_cost: Cost, sum_cost: i64) -> Self {
        Self { max_cost, sum_cost }
    }

    #[inline]
    pub fn record(&mut self, cost: Cost) {
        self.max_cost = self.max_cost.max(cost);
        self.sum_cost = self.sum_cost.saturating_add(cost as i64);
    }

    #[inline]
    pub fn merge(&mut self, other: Metrics) {
        self.max_cost = self.max_cost.max(other.max_cost);
        self.sum_cost = self.sum_cost.saturating_add(other.sum_cost);
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Max cost: {}, Sum cost: {}",
            self.max_cost, self.sum_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn max_cost_dominates() {
        assert!(Metrics::new(1, 100) < Metrics::new(2, 3));
        assert!(Metrics::new(2, 3) < Metrics::new(2, 4));
        assert_eq!(Metrics::new(2, 3), Metrics::new(2, 3));
    }

    #[test]
    fn sentinel_loses_to_everything() {
        assert!(Metrics::new(0, 0) < Metrics::MAX);
        assert!(Metrics::new(Cost::MAX, i64::MAX - 1) < Metrics::MAX);
    }

    #[test]
    fn record_and_merge() {
        let mut a = Metrics::default();
        a.record(2);
        a.record(5);
        a.record(1);
        assert_eq!(a, Metrics::new(5, 8));

        let mut b = Metrics::new(3, 4);
        b.merge(a);
        assert_eq!(b, Metrics::new(5, 12));
    }

    #[test]
    fn display() {
        assert_eq!(Metrics::new(3, 17).to_string(), "Max cost: 3, Sum cost: 17");
    }

    fn metrics() -> impl Strategy<Value = Metrics> {
        (0..5i32, 0..20i64).prop_map(|(m, s)| Metrics::new(m, s))
    }

    proptest! {
        #[test]
        fn exactly_one_relation_holds(a in metrics(), b in metrics()) {
            let relations = [a < b, b < a, a == b];
            prop_assert_eq!(relations.iter().filter(|&&r| r).count(), 1);
        }

        #[test]
        fn strict_order_is_transitive(a in metrics(), b in metrics(), c in metrics()) {
            if a < b && b < c {
                prop_assert!(a < c);
            }
        }

        #[test]
        fn order_is_lexicographic(a in metrics(), b in metrics()) {
            let expected = a.max_cost.cmp(&b.max_cost).then(a.sum_cost.cmp(&b.sum_cost));
            prop_assert_eq!(a.cmp(&b), expected);
            if expected == Ordering::Equal {
                prop_assert_eq!(a, b);
            }
        }
    }
}
