//! API-key pools. A key is drawn uniformly at random per request purely to
//! spread load across keys.

use std::time::{SystemTime, UNIX_EPOCH};

use oorandom::Rand32;
use serde::{Deserialize, Serialize};

/// A fixed pool of interchangeable API keys for one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPool {
    keys: Vec<String>,
}

impl KeyPool {
    #[must_use]
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.trim().is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated key list, ignoring blanks.
    #[must_use]
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(',').map(str::trim))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Draws a key, or `None` for an empty pool.
    pub fn pick(&self, rng: &mut Rand32) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let idx = rng.rand_range(0..self.keys.len() as u32) as usize;
        self.keys.get(idx).map(String::as_str)
    }
}

/// Per-request generator: seeded from `seed` when given, else from the clock.
#[must_use]
pub fn request_rng(seed: Option<u64>) -> Rand32 {
    Rand32::new(seed.unwrap_or_else(clock_seed))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_picks_nothing() {
        let pool = KeyPool::default();
        assert!(pool.pick(&mut request_rng(Some(1))).is_none());
    }

    #[test]
    fn csv_parsing_drops_blanks() {
        let pool = KeyPool::from_csv(" a1, ,b2,, c3 ");
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let pool = KeyPool::new(["k1", "k2", "k3", "k4"]);
        let first = pool.pick(&mut request_rng(Some(42))).map(str::to_owned);
        let second = pool.pick(&mut request_rng(Some(42))).map(str::to_owned);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn picks_stay_inside_pool() {
        let pool = KeyPool::new(["k1", "k2"]);
        let mut rng = request_rng(Some(7));
        for _ in 0..50 {
            let key = pool.pick(&mut rng).unwrap();
            assert!(key == "k1" || key == "k2");
        }
    }
}
