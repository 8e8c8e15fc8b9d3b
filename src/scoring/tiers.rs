use serde::Serialize;

/// A named performance bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub name: &'static str,
    pub emoji: &'static str,
    /// Inclusive lower bound of the composite score
    pub min_score: u64,
    /// Colour hint for presentation layers
    pub color: &'static str,
    pub description: &'static str,
    pub short_description: &'static str,
}

/// Ascending by `min_score`; the first entry starts at 0
pub static TIERS: [Tier; 6] = [
    Tier {
        name: "Potato / Calculator",
        emoji: "🥔",
        min_score: 0,
        color: "gray",
        description: "Basic tasks only. Might struggle with modern web apps.",
        short_description: "Basic tasks only",
    },
    Tier {
        name: "Office Clerk",
        emoji: "📎",
        min_score: 500_000,
        color: "blue",
        description: "Good for documents, browsing, and media consumption.",
        short_description: "Documents, browsing",
    },
    Tier {
        name: "Student Laptop",
        emoji: "💻",
        min_score: 1_000_000,
        color: "green",
        description: "Capable multitasker. Handles light gaming and creative work.",
        short_description: "Light gaming, multitasking",
    },
    Tier {
        name: "Creative Pro",
        emoji: "🎨",
        min_score: 1_500_000,
        color: "purple",
        description: "Great for video editing, coding, and design work.",
        short_description: "Video editing, development",
    },
    Tier {
        name: "Gaming Rig",
        emoji: "🎮",
        min_score: 2_000_000,
        color: "orange",
        description: "High-performance machine ready for AAA gaming.",
        short_description: "AAA gaming ready",
    },
    Tier {
        name: "Titan Workstation",
        emoji: "⚡",
        min_score: 3_000_000,
        color: "red",
        description: "Extreme performance. Crushes heavy rendering and computation.",
        short_description: "Heavy rendering, computation",
    },
];

/// Highest tier whose lower bound is <= `total`
pub fn tier_for(total: u64) -> &'static Tier {
    TIERS
        .iter()
        .rev()
        .find(|tier| tier.min_score <= total)
        .unwrap_or(&TIERS[0])
}

/// Fraction of the way from the current tier's bound to the next one (1.0 at the top)
pub fn tier_progress(total: u64) -> f64 {
    let index = TIERS
        .iter()
        .rposition(|tier| tier.min_score <= total)
        .unwrap_or(0);
    match TIERS.get(index + 1) {
        Some(next) => {
            let floor = TIERS[index].min_score;
            (total - floor) as f64 / (next.min_score - floor) as f64
        }
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_strictly_ascending_from_zero() {
        assert_eq!(TIERS[0].min_score, 0);
        for pair in TIERS.windows(2) {
            assert!(pair[0].min_score < pair[1].min_score);
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(tier_for(499_999).name, "Potato / Calculator");
        assert_eq!(tier_for(500_000).name, "Office Clerk");
        for tier in TIERS.iter() {
            assert_eq!(tier_for(tier.min_score), tier);
        }
    }

    #[test]
    fn test_lookup_is_total_and_maximal() {
        let samples = [0, 1, 205, 750_000, 1_499_999, 2_999_999, 3_000_000, u64::MAX];
        for total in samples {
            let tier = tier_for(total);
            assert!(tier.min_score <= total);
            assert!(!TIERS
                .iter()
                .any(|other| other.min_score > tier.min_score && other.min_score <= total));
        }
        assert_eq!(tier_for(u64::MAX).name, "Titan Workstation");
    }

    #[test]
    fn test_tier_progress() {
        assert_eq!(tier_progress(0), 0.0);
        assert_eq!(tier_progress(250_000), 0.5);
        assert_eq!(tier_progress(1_750_000), 0.5);
        assert_eq!(tier_progress(2_500_000), 0.5);
        assert_eq!(tier_progress(3_000_000), 1.0);
        assert_eq!(tier_progress(9_000_000), 1.0);
    }
}
