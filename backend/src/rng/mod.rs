//! Deterministic random number generation
//!
//! Uses xorshift64* algorithm for fast, deterministic random number generation.
//! All randomness in the engine goes through a [`RandomSource`], which is passed
//! into the table constructors and snapshot builders as a capability.

mod xorshift;

pub use xorshift::RngManager;

/// Source of uniform draws in `[0.0, 1.0)`
///
/// Everything else (normal draws, centred jitter) is derived from
/// `next_f64`, so a test can swap in a scripted source and know exactly
/// what every builder will compute.
pub trait RandomSource {
    /// Next uniform draw in `[0.0, 1.0)`
    fn next_f64(&mut self) -> f64;

    /// Standard normal draw via the Box-Muller transform
    fn standard_normal(&mut self) -> f64 {
        // 1 - u keeps the log argument in (0, 1]
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Normal draw with the given mean and standard deviation
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Multiplicative jitter factor `1 + (u - 0.5) * 2 * variance`,
    /// uniform in `[1 - variance, 1 + variance)`
    fn jitter(&mut self, variance: f64) -> f64 {
        1.0 + (self.next_f64() - 0.5) * 2.0 * variance
    }
}

impl RandomSource for RngManager {
    fn next_f64(&mut self) -> f64 {
        RngManager::next_f64(self)
    }
}
