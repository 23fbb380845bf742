use crate::{CoreError, CoreResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniform random numbers from one process-wide engine.
///
/// The engine is seeded from the system clock on first use and is never
/// reseeded. Draws go through a mutex, so callers on several threads
/// see one shared sequence.
pub struct RandomGenerator;

impl RandomGenerator {
    /// Random integer in `[min, max]`
    pub fn random_int(min: i64, max: i64) -> CoreResult<i64> {
        if min > max {
            return Err(CoreError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(engine().gen_range(min..=max))
    }

    /// Random double in `[min, max]`
    pub fn random_double(min: f64, max: f64) -> CoreResult<f64> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CoreError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(engine().gen_range(min..=max))
    }

    /// Random index into a collection of `len` elements
    pub fn random_index(len: usize) -> CoreResult<usize> {
        if len == 0 {
            return Err(CoreError::ValidationError(
                "cannot pick an index from an empty collection".to_string(),
            ));
        }
        Ok(engine().gen_range(0..len))
    }
}

fn engine() -> MutexGuard<'static, StdRng> {
    static ENGINE: OnceLock<Mutex<StdRng>> = OnceLock::new();

    let engine = ENGINE.get_or_init(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        tracing::debug!(seed, "Seeding shared random engine");
        Mutex::new(StdRng::seed_from_u64(seed))
    });

    engine.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
