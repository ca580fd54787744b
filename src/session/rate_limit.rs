//! Update rate limiting
//!
//! Two gates combined: a minimum interval since the last recorded
//! update, and a ceiling on updates counted within the current fixed
//! 60-second bucket. `can_update` is pure; `record_update` is the only
//! mutator and must follow a permitted check immediately, with no
//! second check in between, so a permit cannot be spent twice.

/// Width of the counting bucket in seconds
pub const BUCKET_WIDTH: f64 = 60.0;

/// Sliding minimum-interval gate plus per-bucket update counter
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min_interval: f64,
    max_per_bucket: u32,
    last_update: Option<f64>,
    bucket: u64,
    bucket_count: u32,
}

impl RateLimiter {
    pub fn new(min_interval: f64, max_per_bucket: u32) -> Self {
        Self {
            min_interval,
            max_per_bucket,
            last_update: None,
            bucket: 0,
            bucket_count: 0,
        }
    }

    /// Whether an update may proceed at `now`
    pub fn can_update(&self, now: f64) -> bool {
        if let Some(last) = self.last_update {
            if now - last < self.min_interval {
                return false;
            }
        }

        // A later bucket than the tracked one has spent nothing yet
        let count = if Self::bucket_of(now) > self.bucket {
            0
        } else {
            self.bucket_count
        };
        count < self.max_per_bucket
    }

    /// Commit an update at `now`, rolling the bucket on a boundary crossing
    pub fn record_update(&mut self, now: f64) {
        let bucket = Self::bucket_of(now);
        if bucket > self.bucket {
            self.bucket = bucket;
            self.bucket_count = 0;
        }
        self.last_update = Some(now);
        self.bucket_count += 1;
    }

    fn bucket_of(now: f64) -> u64 {
        (now / BUCKET_WIDTH).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_allowed() {
        let limiter = RateLimiter::new(1.0, 60);
        assert!(limiter.can_update(0.0));
    }

    #[test]
    fn min_interval_blocks_rapid_updates() {
        let mut limiter = RateLimiter::new(1.0, 60);
        limiter.record_update(10.0);

        assert!(!limiter.can_update(10.5));
        assert!(!limiter.can_update(10.99));
        assert!(limiter.can_update(11.0));
    }

    #[test]
    fn bucket_ceiling_blocks_sixty_first_update() {
        // ceiling 60/minute, minimum interval 1.0, 1-second spacing
        let mut limiter = RateLimiter::new(1.0, 60);

        for i in 0..60 {
            let now = 60.0 + i as f64;
            assert!(limiter.can_update(now), "update {i} should be permitted");
            limiter.record_update(now);
        }

        // 61st before the bucket rolls
        assert!(!limiter.can_update(119.5));
        // next bucket spends a fresh count
        assert!(limiter.can_update(120.0));
    }

    #[test]
    fn bucket_rolls_exactly_once_per_boundary() {
        let mut limiter = RateLimiter::new(0.0, 2);
        limiter.record_update(59.0);
        limiter.record_update(59.5);
        assert!(!limiter.can_update(59.9));

        limiter.record_update(60.0); // boundary crossed, count restarts at 1
        assert!(limiter.can_update(60.5));
        limiter.record_update(60.5);
        assert!(!limiter.can_update(61.0));
    }

    #[test]
    fn can_update_is_pure() {
        let mut limiter = RateLimiter::new(1.0, 60);
        limiter.record_update(5.0);

        for _ in 0..10 {
            assert!(limiter.can_update(7.0));
        }
        assert_eq!(limiter.bucket_count, 1);
    }

    #[test]
    fn ceiling_never_exceeded_across_sequences() {
        // arbitrary check/record interleavings never push a bucket past
        // the ceiling
        let mut limiter = RateLimiter::new(0.25, 5);
        let mut per_bucket: std::collections::HashMap<u64, u32> = Default::default();

        let mut now = 0.0;
        for step in 0..500 {
            now += 0.1 + (step % 7) as f64 * 0.05;
            if limiter.can_update(now) {
                limiter.record_update(now);
                *per_bucket.entry((now / BUCKET_WIDTH) as u64).or_default() += 1;
            }
        }

        assert!(per_bucket.values().all(|&count| count <= 5));
        assert!(!per_bucket.is_empty());
    }
}
