use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a product, unique per allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

impl From<u64> for ProductId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

static GLOBAL_IDS: IdAllocator = IdAllocator::new();

/// Hands out monotonically increasing product ids.
///
/// Every product constructor takes its id from an allocator. The
/// process-wide instance behind [`IdAllocator::global`] backs the
/// convenience constructors, so ids stay unique across every product
/// built in one run regardless of variant.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The shared allocator
    pub fn global() -> &'static IdAllocator {
        &GLOBAL_IDS
    }

    /// Reserve the next id
    pub fn next_id(&self) -> ProductId {
        ProductId(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// The id the next call to `next_id` will return, without reserving it
    pub fn peek(&self) -> ProductId {
        ProductId(self.next.load(Ordering::SeqCst))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_allocator_is_monotonic() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_id(), ProductId::new(1));
        assert_eq!(ids.next_id(), ProductId::new(2));
        assert_eq!(ids.peek(), ProductId::new(3));
        assert_eq!(ids.next_id(), ProductId::new(3));
    }

    #[test]
    fn test_allocator_unique_across_threads() {
        let ids = Arc::new(IdAllocator::starting_at(100));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || (0..250).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn test_product_id_parse_and_display() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }
}
