use serde::{Deserialize, Serialize};

use crate::constants::scoring::{GPU_WEIGHT, MULTI_WEIGHT, SINGLE_WEIGHT};
use crate::scoring::tiers::{tier_for, Tier};

/// The three probe scores of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScores {
    pub cpu_single: u64,
    pub cpu_multi: u64,
    pub gpu_score: u64,
}

impl RawScores {
    pub fn new(cpu_single: u64, cpu_multi: u64, gpu_score: u64) -> Self {
        Self {
            cpu_single,
            cpu_multi,
            gpu_score,
        }
    }

    /// Multi-core score divided by single-core score, if single-core is non-zero
    pub fn scaling_ratio(&self) -> Option<f64> {
        (self.cpu_single > 0).then(|| self.cpu_multi as f64 / self.cpu_single as f64)
    }
}

/// Composite total and its tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositeResult {
    pub total: u64,
    pub tier: &'static Tier,
}

/// floor(single×10 + multi×0.5 + gpu×10)
///
/// Multi-core is down-weighted: the thread count behind it is the least
/// trustworthy input.
pub fn composite_total(scores: &RawScores) -> u64 {
    let total = scores.cpu_single as f64 * SINGLE_WEIGHT
        + scores.cpu_multi as f64 * MULTI_WEIGHT
        + scores.gpu_score as f64 * GPU_WEIGHT;
    total.floor() as u64
}

pub fn composite(scores: &RawScores) -> CompositeResult {
    let total = composite_total(scores);
    CompositeResult {
        total,
        tier: tier_for(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_reference_value() {
        assert_eq!(composite_total(&RawScores::new(10, 10, 10)), 205);
    }

    #[test]
    fn test_composite_floors_half_points() {
        assert_eq!(composite_total(&RawScores::new(0, 1, 0)), 0);
        assert_eq!(composite_total(&RawScores::new(0, 3, 0)), 1);
        assert_eq!(composite_total(&RawScores::default()), 0);
    }

    #[test]
    fn test_composite_is_deterministic() {
        let scores = RawScores::new(41_234, 250_001, 7_321);
        let a = composite(&scores);
        let b = composite(&scores);
        assert_eq!(a, b);
        assert_eq!(a.total, 412_340 + 125_000 + 73_210);
        assert_eq!(a.tier.name, "Office Clerk");
    }

    #[test]
    fn test_scaling_ratio() {
        assert_eq!(RawScores::new(0, 100, 0).scaling_ratio(), None);
        assert_eq!(RawScores::new(100, 800, 0).scaling_ratio(), Some(8.0));
    }

    #[test]
    fn test_raw_scores_serde_keys() {
        let json = serde_json::to_string(&RawScores::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#"{"cpuSingle":1,"cpuMulti":2,"gpuScore":3}"#);
    }
}
