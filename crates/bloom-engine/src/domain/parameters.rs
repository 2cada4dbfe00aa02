//! Theoretical Bloom filter parameters
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k      -- expected false positive rate
//! - k = (m/n) * ln(2)            -- optimal hash functions
//! - m = -n*ln(fpr) / (ln(2)^2)   -- minimum bits, rounded up to 2^e
//!
//! The formula assumes independent hash functions. The `raw-hex` function
//! violates that, so measured rates for the non-cryptographic family can
//! drift away from these numbers.

use std::f64::consts::LN_2;

use super::config::{MAX_EXPONENT, MIN_EXPONENT};

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Calculate optimal k for given m and n (at least 1)
pub fn optimal_k(m: usize, n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    (((m as f64 / n as f64) * LN_2).round() as usize).max(1)
}

/// Smallest supported exponent whose `2^e` bits reach `target_fpr` for `n` items
///
/// Clamped to the supported exponent range.
pub fn minimum_exponent(n: usize, target_fpr: f64) -> u32 {
    if n == 0 {
        return MIN_EXPONENT;
    }
    let bits = (-(n as f64) * target_fpr.ln() / (LN_2 * LN_2)).ceil();
    let exponent = bits.max(1.0).log2().ceil() as u32;
    exponent.clamp(MIN_EXPONENT, MAX_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fpr_calculation() {
        // With m=1000, n=100, k=7, FPR should be around 0.008
        let fpr = calculate_fpr(1000, 100, 7);
        assert!(fpr > 0.005 && fpr < 0.02, "Expected FPR≈0.008, got {}", fpr);
    }

    #[test]
    fn test_fpr_empty_filter_is_zero() {
        assert_eq!(calculate_fpr(1 << 16, 0, 3), 0.0);
        assert_eq!(calculate_fpr(0, 10, 3), 1.0);
    }

    #[test]
    fn test_fpr_grows_with_elements() {
        let m = 1 << 16;
        let rates: Vec<f64> = [100, 1000, 5000, 20000]
            .iter()
            .map(|&n| calculate_fpr(m, n, 3))
            .collect();

        assert!(rates.windows(2).all(|w| w[0] < w[1]), "{rates:?}");
    }

    #[test]
    fn test_optimal_k() {
        // m/n = 10 -> k = round(6.93) = 7
        assert_eq!(optimal_k(1000, 100), 7);
        assert_eq!(optimal_k(16, 100), 1);
        assert_eq!(optimal_k(16, 0), 1);
    }

    #[test]
    fn test_minimum_exponent() {
        // n=2500, fpr=1% needs ~23963 bits -> 2^15
        assert_eq!(minimum_exponent(2500, 0.01), 15);
        assert_eq!(minimum_exponent(0, 0.01), MIN_EXPONENT);
        assert_eq!(minimum_exponent(1, 0.5), MIN_EXPONENT);
        assert_eq!(minimum_exponent(usize::MAX / 4, 1e-9), MAX_EXPONENT);
    }
}
