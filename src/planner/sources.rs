use rand::Rng;
use time::OffsetDateTime;

/// Source of random picks (regional keyword, canned meal).
pub trait RandomSource: Send + Sync {
    /// Index in `0..len`; `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(random.pick(items.len()))
}

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC; plan days roll over at UTC midnight.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[cfg(test)]
mod sources_tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        for len in 1..20 {
            assert!(ThreadRandom.pick(len) < len);
        }
    }

    #[test]
    fn choose_on_empty_is_none() {
        let empty: [&str; 0] = [];
        assert!(choose(&ThreadRandom, &empty).is_none());
        assert_eq!(choose(&ThreadRandom, &["only"]), Some(&"only"));
    }
}
