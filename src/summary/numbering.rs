//! Hierarchical section numbering ("1", "1.2", "1.2.3").

/// Deepest level that owns its own counter. Deeper chapters share the last
/// counter so pathological nesting cannot grow the table without bound.
pub const MAX_COUNTER_DEPTH: usize = 100;

/// Per-level counters for one parse.
#[derive(Debug, Default)]
pub struct Numbering {
    counters: Vec<u32>,
}

impl Numbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter for `level`, reset deeper counters, and return the
    /// dotted number.
    pub fn next(&mut self, level: usize) -> String {
        let depth = level.min(MAX_COUNTER_DEPTH - 1);
        if self.counters.len() <= depth {
            self.counters.resize(depth + 1, 0);
        }
        self.counters[depth] += 1;
        self.counters.truncate(depth + 1);

        let first = self.counters.iter().position(|&c| c > 0).unwrap_or(depth);
        self.counters[first..]
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sequential_top_level() {
        let mut n = Numbering::new();
        assert_eq!(n.next(0), "1");
        assert_eq!(n.next(0), "2");
        assert_eq!(n.next(0), "3");
    }

    #[test]
    fn test_nested_reset() {
        let mut n = Numbering::new();
        assert_eq!(n.next(0), "1");
        assert_eq!(n.next(1), "1.1");
        assert_eq!(n.next(1), "1.2");
        assert_eq!(n.next(2), "1.2.1");
        assert_eq!(n.next(0), "2");
        assert_eq!(n.next(1), "2.1");
    }

    #[test]
    fn test_skipped_level_keeps_zero() {
        let mut n = Numbering::new();
        assert_eq!(n.next(0), "1");
        assert_eq!(n.next(2), "1.0.1");
        assert_eq!(n.next(1), "1.1");
    }

    #[test]
    fn test_leading_zeros_omitted() {
        let mut n = Numbering::new();
        assert_eq!(n.next(2), "1");
        assert_eq!(n.next(2), "2");
    }

    #[test]
    fn test_depth_cap() {
        let mut n = Numbering::new();
        n.next(0);
        let deep = n.next(1000);
        assert_eq!(deep.split('.').count(), MAX_COUNTER_DEPTH);
        assert!(deep.ends_with(".1"));
    }

    proptest! {
        #[test]
        fn prop_child_restarts_at_one(levels in proptest::collection::vec(0usize..6, 1..40)) {
            let mut n = Numbering::new();
            n.next(0);
            let mut prev_level = 0;
            for level in levels {
                let number = n.next(level);
                if level > prev_level {
                    prop_assert!(number.ends_with(".1"), "{number}");
                }
                prev_level = level;
            }
        }

        #[test]
        fn prop_same_level_increments(level in 0usize..8, count in 1usize..20) {
            let mut n = Numbering::new();
            n.next(0);
            let mut last: u32 = if level == 0 { 1 } else { 0 };
            for _ in 0..count {
                let number = n.next(level);
                let tail: u32 = number.rsplit('.').next().unwrap().parse().unwrap();
                prop_assert_eq!(tail, last + 1);
                last = tail;
            }
        }
    }
}
