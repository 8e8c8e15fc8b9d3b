//! Composite score and performance tiers

pub mod composite;
pub mod tiers;

pub use composite::{composite, composite_total, CompositeResult, RawScores};
pub use tiers::{tier_for, tier_progress, Tier, TIERS};
