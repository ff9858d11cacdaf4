//! Presentational gradient hints per tier.

use serde::{Deserialize, Serialize};

/// Gradient the plan page uses when rendering a tier card.
///
/// Purely presentational; the UI maps each variant to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierGradient {
    /// Default, also used for unknown ranks.
    Slate,
    Ocean,
    Violet,
    Sunrise,
}

/// Maps a tier rank to its gradient hint.
///
/// Pure and total: unknown ranks map to the default gradient.
pub fn gradient_for_tier(tier_rank: u8) -> TierGradient {
    match tier_rank {
        1 => TierGradient::Ocean,
        2 => TierGradient::Violet,
        3 => TierGradient::Sunrise,
        _ => TierGradient::Slate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ranks_map_to_distinct_gradients() {
        assert_eq!(gradient_for_tier(1), TierGradient::Ocean);
        assert_eq!(gradient_for_tier(2), TierGradient::Violet);
        assert_eq!(gradient_for_tier(3), TierGradient::Sunrise);
    }

    #[test]
    fn unknown_ranks_map_to_default() {
        assert_eq!(gradient_for_tier(0), TierGradient::Slate);
        assert_eq!(gradient_for_tier(42), TierGradient::Slate);
        assert_eq!(gradient_for_tier(u8::MAX), TierGradient::Slate);
    }
}
