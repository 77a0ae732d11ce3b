//! Deterministic fake data helpers.
//!
//! Thin wrapper over a seeded RNG. Identity fields come from the `fake`
//! crate's fakers driven through `fake_with_rng`; everything else is sampled
//! directly. All timestamps are offsets from a fixed reference date so a
//! given seed always yields the same output, byte for byte.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use fake::faker::internet::en::{FreeEmail, Username};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;

/// Anchor for every generated timestamp. Session starts land after it,
/// account and ticket creation times land before it.
pub fn reference_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Round to two decimal places (money fields).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fake data generator backed by a caller-supplied RNG.
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn username(&mut self) -> String {
        Username().fake_with_rng(&mut self.rng)
    }

    pub fn email(&mut self) -> String {
        FreeEmail().fake_with_rng(&mut self.rng)
    }

    /// Random v4-shaped UUID drawn from this generator's RNG, not the OS.
    pub fn uuid(&mut self) -> String {
        uuid::Builder::from_random_bytes(self.rng.gen())
            .into_uuid()
            .to_string()
    }

    /// Random integer in the inclusive range.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random float in the half-open range.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.rng.gen_range(min..max)
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Random index into a collection of the given length.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Sample `n` distinct elements without replacement.
    pub fn sample<'a, T>(&mut self, items: &'a [T], n: usize) -> Vec<&'a T> {
        items.choose_multiple(&mut self.rng, n).collect()
    }

    /// Weighted choice over (item, weight) pairs.
    pub fn weighted<'a, T>(&mut self, choices: &'a [(T, u32)]) -> &'a T {
        let total: u32 = choices.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total);
        for (item, weight) in choices {
            if roll < *weight {
                return item;
            }
            roll -= weight;
        }
        // Weights sum to `total`, so the loop always returns.
        unreachable!("weighted choice ran past its total weight")
    }

    /// Random timestamp in `[start, end)`.
    pub fn datetime_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
        let span = (end - start).num_seconds();
        start + Duration::seconds(self.rng.gen_range(0..span))
    }

    /// Random timestamp between `min_days` and `max_days` after the
    /// reference date.
    pub fn datetime_days_ahead(&mut self, min_days: i64, max_days: i64) -> NaiveDateTime {
        let base = reference_date();
        self.datetime_between(base + Duration::days(min_days), base + Duration::days(max_days))
    }

    /// Random timestamp within the `days` preceding the reference date.
    pub fn datetime_days_back(&mut self, days: i64) -> NaiveDateTime {
        let base = reference_date();
        self.datetime_between(base - Duration::days(days), base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fake(seed: u64) -> FakeData<ChaCha8Rng> {
        FakeData::new(ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn same_seed_same_output() {
        let mut a = fake(42);
        let mut b = fake(42);
        assert_eq!(a.username(), b.username());
        assert_eq!(a.email(), b.email());
        assert_eq!(a.uuid(), b.uuid());
        assert_eq!(a.int_range(0, 1000), b.int_range(0, 1000));
        assert_eq!(a.datetime_days_back(365), b.datetime_days_back(365));
    }

    #[test]
    fn datetime_ranges_are_honored() {
        let mut f = fake(7);
        let base = reference_date();
        for _ in 0..100 {
            let ahead = f.datetime_days_ahead(30, 180);
            assert!(ahead >= base + Duration::days(30));
            assert!(ahead < base + Duration::days(180));

            let back = f.datetime_days_back(365);
            assert!(back >= base - Duration::days(365));
            assert!(back < base);
        }
    }

    #[test]
    fn weighted_respects_certainty() {
        let mut f = fake(1);
        let choices = [("always", 1u32)];
        for _ in 0..10 {
            assert_eq!(*f.weighted(&choices), "always");
        }
    }

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(4567.0), 4567.0);
    }

    #[test]
    fn sample_is_without_replacement() {
        let mut f = fake(3);
        let items = [1, 2, 3];
        let picked = f.sample(&items, 3);
        let mut values: Vec<i32> = picked.into_iter().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3]);
    }
}
